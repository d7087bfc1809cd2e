//! LED devices by id — `camera_back`, `touch_key`, `notification`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::Config;
use crate::error::{NotiledError, Result};
use crate::led::LedState;
use crate::notification::{NotificationLed, NotificationOptions};
use crate::scheduler::Scheduler;
use crate::single::SingleLed;
use crate::sysfs::LedIo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedId {
    CameraBack,
    TouchKey,
    Notification,
}

impl LedId {
    pub const ALL: [LedId; 3] = [LedId::CameraBack, LedId::TouchKey, LedId::Notification];

    pub fn as_str(self) -> &'static str {
        match self {
            LedId::CameraBack => "camera_back",
            LedId::TouchKey => "touch_key",
            LedId::Notification => "notification",
        }
    }
}

impl FromStr for LedId {
    type Err = NotiledError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LedId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| NotiledError::NotSupported(format!("unknown LED id: {s}")))
    }
}

impl fmt::Display for LedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opened LED of any kind.
pub enum LedDevice<I: LedIo, S: Scheduler> {
    Single(SingleLed<I>),
    Notification(NotificationLed<I, S>),
}

impl<I: LedIo, S: Scheduler> LedDevice<I, S> {
    /// Open the LED named `id`, with node paths taken from `config`.
    ///
    /// Opening `notification` probes the RGB nodes.
    pub fn open(id: &str, io: I, scheduler: S, config: &Config) -> Result<Self> {
        Ok(match id.parse::<LedId>()? {
            LedId::CameraBack => LedDevice::Single(SingleLed::new(io, &config.camera_back_path)),
            LedId::TouchKey => LedDevice::Single(SingleLed::new(io, &config.touch_key_path)),
            LedId::Notification => LedDevice::Notification(NotificationLed::open(
                io,
                scheduler,
                &NotificationOptions::from(config),
            )),
        })
    }

    pub fn set_state(&mut self, state: &LedState) -> Result<()> {
        match self {
            LedDevice::Single(led) => led.set_state(state.color, state.mode),
            LedDevice::Notification(led) => led.apply(state),
        }
    }
}
