//! notiled — notification LED control for Linux LED-class sysfs nodes.
//!
//! The RGB notification LED is driven through three per-channel
//! `brightness` files. Manual colors are written once; blink requests are
//! decomposed into a cyclic playlist that the [`sequencer`] walks on timer
//! expiries delivered by a [`scheduler::Scheduler`].

pub mod config;
pub mod device;
pub mod error;
pub mod event_loop;
pub mod led;
pub mod notification;
pub mod scheduler;
pub mod sequencer;
pub mod single;
pub mod sysfs;

pub use config::Config;
pub use error::NotiledError;
pub use event_loop::{EventLoop, LedHandle};
pub use notification::{NotificationLed, NotificationOptions};
