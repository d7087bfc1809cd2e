//! Blink sequencer — the state machine that walks an installed playlist.
//!
//! `Idle` → `install` → `Running`; each `tick` applies the segment at the
//! cursor, advances it, and re-arms the timer for that segment's duration.
//! `cancel` passes through `Stopping` and always ends in `Idle` with every
//! bound channel at 0.
//!
//! A tick carries the handle of the timer that fired. Only the currently
//! pending handle is honored, so a timer armed for a replaced playlist can
//! never drive the new one.

use std::time::Duration;

use crate::error::Result;
use crate::led::{ChannelRegistry, Playlist};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::sysfs::LedIo;

/// Lowest delay ever armed, so zero-length segments cannot spin.
pub const DEFAULT_MIN_TICK: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No playlist installed.
    Idle,
    /// Playlist installed, timer armed.
    Running,
    /// Cancellation in progress.
    Stopping,
}

/// What a [`Sequencer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Applied a segment and re-armed.
    Applied,
    /// The handle was not the pending timer; nothing happened.
    Stale,
    /// The playlist was empty; now idle with all channels off.
    Stopped,
}

/// Everything the sequencer owns between ticks.
#[derive(Debug)]
pub struct SequencerState {
    playlist: Option<Playlist>,
    timer: Option<TimerHandle>,
    phase: Phase,
}

impl Default for SequencerState {
    fn default() -> Self {
        SequencerState {
            playlist: None,
            timer: None,
            phase: Phase::Idle,
        }
    }
}

pub struct Sequencer<S: Scheduler> {
    state: SequencerState,
    scheduler: S,
    min_tick: Duration,
}

impl<S: Scheduler> Sequencer<S> {
    pub fn new(scheduler: S, min_tick: Duration) -> Self {
        Sequencer {
            state: SequencerState::default(),
            scheduler,
            min_tick,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_active(&self) -> bool {
        self.state.phase == Phase::Running
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.state.playlist.as_ref()
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.state.timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Replace whatever is running with `playlist` and start it from the
    /// first segment.
    ///
    /// Returns the result of writing the first segment. A failed write does
    /// not stop the sequence.
    pub fn install(
        &mut self,
        playlist: Playlist,
        registry: &ChannelRegistry,
        io: &impl LedIo,
    ) -> Result<()> {
        self.disarm();
        log::debug!("installing playlist with {} segments", playlist.len());
        self.state.playlist = Some(playlist);
        self.state.phase = Phase::Running;
        self.step(registry, io)
    }

    /// Handle an expired timer.
    ///
    /// Write failures are logged and the sequence keeps its schedule.
    pub fn tick(
        &mut self,
        fired: TimerHandle,
        registry: &ChannelRegistry,
        io: &impl LedIo,
    ) -> TickOutcome {
        if self.state.phase != Phase::Running || self.state.timer != Some(fired) {
            log::debug!("ignoring stale timer {}", fired.id());
            return TickOutcome::Stale;
        }
        self.state.timer = None;
        if let Err(e) = self.step(registry, io) {
            log::warn!("blink tick: {e}");
        }
        if self.state.phase == Phase::Running {
            TickOutcome::Applied
        } else {
            TickOutcome::Stopped
        }
    }

    /// Stop any running sequence and drive every channel to 0.
    ///
    /// A no-op when idle: the channels already hold whatever the last
    /// request wrote, and `NotificationLed` writes every channel right after
    /// cancelling. Never fails; write errors are logged and the remaining
    /// channels are still written.
    pub fn cancel(&mut self, registry: &ChannelRegistry, io: &impl LedIo) {
        if self.state.phase == Phase::Idle {
            return;
        }
        self.state.phase = Phase::Stopping;
        self.disarm();
        self.state.playlist = None;
        if let Err(e) = registry.turn_off(io) {
            log::warn!("turning off after cancel: {e}");
        }
        self.state.phase = Phase::Idle;
    }

    fn disarm(&mut self) {
        if let Some(h) = self.state.timer.take() {
            self.scheduler.cancel(h);
        }
    }

    /// Apply the segment at the cursor, advance, and arm the next timer.
    fn step(&mut self, registry: &ChannelRegistry, io: &impl LedIo) -> Result<()> {
        let Some(playlist) = self.state.playlist.as_mut() else {
            return Ok(());
        };
        let Some((segment, next)) = playlist.advance() else {
            log::debug!("empty playlist, stopping");
            self.cancel(registry, io);
            return Ok(());
        };
        let delay = Duration::from_millis(u64::from(segment.duration_ms)).max(self.min_tick);
        let result = registry.apply(io, segment);
        playlist.set_cursor(next);
        self.state.timer = Some(self.scheduler.schedule_after(delay));
        result
    }
}
