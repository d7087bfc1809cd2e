//! Single-color LEDs (camera flash, touch-key backlight).
//!
//! These have one brightness file and no blink support. The discriminant
//! byte of the color is the requested brightness in `0..=255`, scaled to
//! the node's `max_brightness`.

use std::path::{Path, PathBuf};

use crate::error::{NotiledError, Result};
use crate::led::{Color, LedMode};
use crate::sysfs::LedIo;

/// Default node of the rear camera flash LED.
pub const CAMERA_BACK_PATH: &str = "/sys/class/leds/ktd2692-flash";
/// Default node of the touch-key backlight.
pub const TOUCH_KEY_PATH: &str = "/sys/class/leds/sec_touchkey";

pub struct SingleLed<I: LedIo> {
    io: I,
    node: PathBuf,
    /// Cached after the first successful read.
    max_brightness: Option<u32>,
}

impl<I: LedIo> SingleLed<I> {
    pub fn new(io: I, node: impl Into<PathBuf>) -> Self {
        SingleLed {
            io,
            node: node.into(),
            max_brightness: None,
        }
    }

    pub fn node(&self) -> &Path {
        &self.node
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    /// Set the brightness from the color's discriminant byte.
    ///
    /// Blink mode is rejected with `UnsupportedMode`.
    pub fn set_state(&mut self, color: Color, mode: LedMode) -> Result<()> {
        if mode == LedMode::Blink {
            return Err(NotiledError::UnsupportedMode(format!(
                "{} does not support blink",
                self.node.display()
            )));
        }

        let max = self.max_brightness()?;
        let brightness = (u64::from(color.discriminant()) * u64::from(max) / 255) as u32;
        let path = self.node.join("brightness");
        self.io
            .write_value(&path, brightness)
            .map_err(|e| NotiledError::io(&path, e))
    }

    fn max_brightness(&mut self) -> Result<u32> {
        if let Some(max) = self.max_brightness {
            return Ok(max);
        }
        let path = self.node.join("max_brightness");
        let max = self
            .io
            .read_u32(&path)
            .map_err(|e| NotiledError::io(&path, e))?;
        self.max_brightness = Some(max);
        Ok(max)
    }
}
