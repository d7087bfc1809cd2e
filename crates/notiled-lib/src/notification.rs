//! Notification LED — the `set_state` entry point for the RGB LED.
//!
//! Every request fully supersedes the previous one: any running blink is
//! canceled before the new color is decomposed and applied.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::led::{ChannelRegistry, Color, Decomposition, LedMode, LedState, decompose};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::sequencer::{Phase, Sequencer, TickOutcome};
use crate::sysfs::LedIo;

/// Where to probe for the RGB nodes, and scheduler granularity.
#[derive(Debug, Clone)]
pub struct NotificationOptions {
    pub leds_root: PathBuf,
    pub probe_indices: Vec<u32>,
    pub min_tick: Duration,
}

impl Default for NotificationOptions {
    fn default() -> Self {
        NotificationOptions {
            leds_root: PathBuf::from(crate::sysfs::LEDS_ROOT),
            probe_indices: crate::led::DEFAULT_PROBE_INDICES.to_vec(),
            min_tick: crate::sequencer::DEFAULT_MIN_TICK,
        }
    }
}

impl From<&Config> for NotificationOptions {
    fn from(config: &Config) -> Self {
        NotificationOptions {
            leds_root: config.leds_root.clone(),
            probe_indices: config.probe_indices.clone(),
            min_tick: Duration::from_millis(config.min_tick_ms),
        }
    }
}

pub struct NotificationLed<I: LedIo, S: Scheduler> {
    io: I,
    registry: ChannelRegistry,
    sequencer: Sequencer<S>,
}

impl<I: LedIo, S: Scheduler> NotificationLed<I, S> {
    /// Resolve the channel registry and start idle.
    pub fn open(io: I, scheduler: S, options: &NotificationOptions) -> Self {
        let registry = ChannelRegistry::resolve(&io, &options.leds_root, &options.probe_indices);
        Self::with_registry(io, scheduler, registry, options.min_tick)
    }

    pub fn with_registry(io: I, scheduler: S, registry: ChannelRegistry, min_tick: Duration) -> Self {
        NotificationLed {
            io,
            registry,
            sequencer: Sequencer::new(scheduler, min_tick),
        }
    }

    /// Render `color` in `mode`, replacing whatever was showing.
    ///
    /// A zero discriminant always turns the LED off, whatever the mode.
    /// Manual mode returns the first channel write failure; blink mode
    /// returns the failure of the first segment only.
    pub fn set_state(
        &mut self,
        color: Color,
        mode: LedMode,
        duty_on_ms: u32,
        duty_off_ms: u32,
    ) -> Result<()> {
        self.sequencer.cancel(&self.registry, &self.io);

        if color.is_off() {
            log::debug!("notification led off");
            return self.registry.turn_off(&self.io);
        }

        log::info!(
            "COLOR({color}) r({:x}), g({:x}), b({:x}) mode {mode}",
            color.intensity(crate::led::Channel::Red),
            color.intensity(crate::led::Channel::Green),
            color.intensity(crate::led::Channel::Blue),
        );
        match decompose(color, duty_on_ms, duty_off_ms, mode) {
            Decomposition::Immediate(segment) => self.registry.apply(&self.io, &segment),
            Decomposition::Playlist(playlist) => {
                self.sequencer.install(playlist, &self.registry, &self.io)
            }
        }
    }

    /// [`set_state`](Self::set_state) from a request struct.
    pub fn apply(&mut self, state: &LedState) -> Result<()> {
        self.set_state(state.color, state.mode, state.duty_on_ms, state.duty_off_ms)
    }

    /// [`set_state`](Self::set_state) from raw wire values.
    ///
    /// Fails with `UnsupportedMode` before touching any state when `mode`
    /// is not a known mode code.
    pub fn set_state_raw(
        &mut self,
        color: u32,
        mode: u32,
        duty_on_ms: u32,
        duty_off_ms: u32,
    ) -> Result<()> {
        let mode = LedMode::try_from(mode)?;
        self.set_state(Color(color), mode, duty_on_ms, duty_off_ms)
    }

    /// Feed an expired timer to the sequencer.
    pub fn tick(&mut self, fired: TimerHandle) -> TickOutcome {
        self.sequencer.tick(fired, &self.registry, &self.io)
    }

    /// Cancel any blink and turn every channel off.
    pub fn turn_off(&mut self) -> Result<()> {
        self.sequencer.cancel(&self.registry, &self.io);
        self.registry.turn_off(&self.io)
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn sequencer(&self) -> &Sequencer<S> {
        &self.sequencer
    }

    pub fn scheduler(&self) -> &S {
        self.sequencer.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.sequencer.scheduler_mut()
    }
}
