//! Event loop — owns the notification LED and runs every request and timer
//! expiry on one thread.
//!
//! Callers on other threads talk to the loop through a [`LedHandle`]. The
//! loop sleeps until either a request arrives or the earliest armed timer is
//! due, so a `set_state` and a blink tick can never interleave.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::error::{NotiledError, Result};
use crate::led::LedState;
use crate::notification::{NotificationLed, NotificationOptions};
use crate::scheduler::TimerQueue;
use crate::sysfs::LedIo;

/// Longest single wait before the running flag is checked again.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How often a blocked [`LedHandle::set_state`] rechecks whether the loop stopped.
const REPLY_POLL: Duration = Duration::from_millis(50);

/// Where a request's result is sent, if the caller waits for it.
pub type Reply = Option<Sender<Result<()>>>;

/// Messages accepted by the event loop.
#[derive(Debug)]
pub enum Request {
    SetState { state: LedState, reply: Reply },
    Shutdown,
}

/// Cloneable sender side of an [`EventLoop`].
#[derive(Debug, Clone)]
pub struct LedHandle {
    tx: Sender<Request>,
    /// Set by [`EventLoop::run`] on exit.
    stopped: Arc<AtomicBool>,
}

impl LedHandle {
    /// Send a request and block until the loop has applied it.
    ///
    /// Fails with `Disconnected` once the loop has stopped, including when it
    /// stops with this request still queued. Must not be called from the
    /// loop's own thread.
    pub fn set_state(&self, state: LedState) -> Result<()> {
        let (reply, rx) = mpsc::channel();
        self.send(Request::SetState {
            state,
            reply: Some(reply),
        })?;
        loop {
            match rx.recv_timeout(REPLY_POLL) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) if self.is_stopped() => {
                    return Err(NotiledError::Disconnected);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Err(NotiledError::Disconnected),
            }
        }
    }

    /// Queue a request without waiting for the result.
    pub fn post(&self, state: LedState) -> Result<()> {
        self.send(Request::SetState { state, reply: None })
    }

    /// Ask the loop to turn the LED off and return from [`EventLoop::run`].
    pub fn shutdown(&self) {
        let _ = self.tx.send(Request::Shutdown);
    }

    /// Whether the loop has returned from [`EventLoop::run`].
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn send(&self, request: Request) -> Result<()> {
        if self.is_stopped() {
            return Err(NotiledError::Disconnected);
        }
        self.tx.send(request).map_err(|_| NotiledError::Disconnected)
    }
}

pub struct EventLoop<I: LedIo> {
    led: NotificationLed<I, TimerQueue>,
    tx: Sender<Request>,
    rx: Receiver<Request>,
    stopped: Arc<AtomicBool>,
    poll_interval: Duration,
}

impl<I: LedIo> EventLoop<I> {
    pub fn new(led: NotificationLed<I, TimerQueue>) -> Self {
        let (tx, rx) = mpsc::channel();
        EventLoop {
            led,
            tx,
            rx,
            stopped: Arc::new(AtomicBool::new(false)),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Resolve the RGB nodes under `options.leds_root` and wrap them.
    pub fn open(io: I, options: &NotificationOptions) -> Self {
        Self::new(NotificationLed::open(io, TimerQueue::new(), options))
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn handle(&self) -> LedHandle {
        LedHandle {
            tx: self.tx.clone(),
            stopped: Arc::clone(&self.stopped),
        }
    }

    pub fn led(&self) -> &NotificationLed<I, TimerQueue> {
        &self.led
    }

    /// Direct access for callers already on the loop's thread.
    pub fn led_mut(&mut self) -> &mut NotificationLed<I, TimerQueue> {
        &mut self.led
    }

    /// Wait up to `max_wait` for a request or the next timer deadline, then
    /// handle the request (if any) and every expired timer.
    ///
    /// Returns `false` once a `Shutdown` request has been received.
    pub fn run_once(&mut self, max_wait: Duration) -> bool {
        let wait = match self.led.scheduler().next_deadline() {
            Some(at) => at.saturating_duration_since(Instant::now()).min(max_wait),
            None => max_wait,
        };

        match self.rx.recv_timeout(wait) {
            Ok(Request::Shutdown) => return false,
            Ok(request) => self.handle_request(request),
            Err(RecvTimeoutError::Timeout) => {}
            // We hold a sender ourselves, so this never happens.
            Err(RecvTimeoutError::Disconnected) => return false,
        }

        self.fire_expired();
        true
    }

    /// Serve requests until `running` is cleared or a `Shutdown` arrives,
    /// then turn the LED off.
    ///
    /// On return every handle reports `Disconnected`, and requests still
    /// queued are answered with it instead of being applied.
    pub fn run(&mut self, running: &AtomicBool) {
        log::debug!("event loop started");
        self.stopped.store(false, Ordering::SeqCst);
        while running.load(Ordering::SeqCst) {
            if !self.run_once(self.poll_interval) {
                break;
            }
        }
        self.stopped.store(true, Ordering::SeqCst);
        if let Err(e) = self.led.turn_off() {
            log::warn!("turning off on exit: {e}");
        }
        self.reject_pending();
        log::debug!("event loop stopped");
    }

    fn reject_pending(&mut self) {
        while let Ok(request) = self.rx.try_recv() {
            if let Request::SetState {
                reply: Some(tx), ..
            } = request
            {
                let _ = tx.send(Err(NotiledError::Disconnected));
            }
        }
    }

    fn handle_request(&mut self, request: Request) {
        let Request::SetState { state, reply } = request else {
            return;
        };
        let result = self.led.apply(&state);
        match reply {
            Some(tx) => {
                let _ = tx.send(result);
            }
            None => {
                if let Err(e) = result {
                    log::warn!("set_state: {e}");
                }
            }
        }
    }

    fn fire_expired(&mut self) {
        let due = self.led.scheduler_mut().expired(Instant::now());
        for handle in due {
            self.led.tick(handle);
        }
    }
}
