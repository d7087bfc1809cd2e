//! LED state requests — mode and timing of a `set_state` call.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::color::Color;
use crate::error::NotiledError;

/// How a requested color is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedMode {
    /// Set once, no repetition.
    Manual,
    /// Repeating on/off cycle driven by the sequencer.
    Blink,
}

impl LedMode {
    /// Wire code used by device request handlers.
    pub fn code(self) -> u32 {
        match self {
            LedMode::Manual => 0,
            LedMode::Blink => 1,
        }
    }
}

impl TryFrom<u32> for LedMode {
    type Error = NotiledError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LedMode::Manual),
            1 => Ok(LedMode::Blink),
            other => Err(NotiledError::UnsupportedMode(format!("mode code {other}"))),
        }
    }
}

impl FromStr for LedMode {
    type Err = NotiledError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(LedMode::Manual),
            "blink" => Ok(LedMode::Blink),
            other => Err(NotiledError::UnsupportedMode(format!(
                "{other} (expected manual or blink)"
            ))),
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedMode::Manual => write!(f, "manual"),
            LedMode::Blink => write!(f, "blink"),
        }
    }
}

/// A complete `set_state` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedState {
    pub color: Color,
    pub mode: LedMode,
    /// Time each channel is lit per blink cycle (blink mode only).
    pub duty_on_ms: u32,
    /// Time each channel is dark per blink cycle (blink mode only).
    pub duty_off_ms: u32,
}

impl LedState {
    pub fn manual(color: Color) -> Self {
        LedState {
            color,
            mode: LedMode::Manual,
            duty_on_ms: 0,
            duty_off_ms: 0,
        }
    }

    pub fn blink(color: Color, duty_on_ms: u32, duty_off_ms: u32) -> Self {
        LedState {
            color,
            mode: LedMode::Blink,
            duty_on_ms,
            duty_off_ms,
        }
    }

    pub fn off() -> Self {
        Self::manual(Color::OFF)
    }
}
