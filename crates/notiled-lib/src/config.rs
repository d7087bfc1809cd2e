//! Application configuration — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::led;

/// First lines of every file written by [`Config::save_to`].
const CONFIG_HEADER: &str = "# notiled configuration\n# Unset keys fall back to built-in defaults.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the LED class. Default: "/sys/class/leds".
    #[serde(default = "default_leds_root")]
    pub leds_root: PathBuf,

    /// `led.<N>` nodes probed for the RGB notification channels.
    #[serde(default = "default_probe_indices")]
    pub probe_indices: Vec<u32>,

    /// Shortest delay the sequencer will arm, in milliseconds.
    #[serde(default = "default_min_tick_ms")]
    pub min_tick_ms: u64,

    /// Default on time per channel in blink mode.
    #[serde(default = "default_duty_ms")]
    pub duty_on_ms: u32,

    /// Default off time per channel in blink mode.
    #[serde(default = "default_duty_ms")]
    pub duty_off_ms: u32,

    /// Default notification color (hex or name).
    #[serde(default = "default_color")]
    pub color: String,

    /// Node of the rear camera flash LED.
    #[serde(default = "default_camera_back_path")]
    pub camera_back_path: PathBuf,

    /// Node of the touch-key backlight LED.
    #[serde(default = "default_touch_key_path")]
    pub touch_key_path: PathBuf,
}

fn default_leds_root() -> PathBuf {
    PathBuf::from(crate::sysfs::LEDS_ROOT)
}
fn default_probe_indices() -> Vec<u32> {
    led::DEFAULT_PROBE_INDICES.to_vec()
}
fn default_min_tick_ms() -> u64 {
    crate::sequencer::DEFAULT_MIN_TICK.as_millis() as u64
}
fn default_duty_ms() -> u32 {
    500
}
fn default_color() -> String {
    "#FF0000".into()
}
fn default_camera_back_path() -> PathBuf {
    PathBuf::from(crate::single::CAMERA_BACK_PATH)
}
fn default_touch_key_path() -> PathBuf {
    PathBuf::from(crate::single::TOUCH_KEY_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            leds_root: default_leds_root(),
            probe_indices: default_probe_indices(),
            min_tick_ms: default_min_tick_ms(),
            duty_on_ms: default_duty_ms(),
            duty_off_ms: default_duty_ms(),
            color: default_color(),
            camera_back_path: default_camera_back_path(),
            touch_key_path: default_touch_key_path(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `color` field could not be parsed.
    InvalidColor(String),
    /// `probe_indices` is empty.
    NoProbeIndices,
    /// `min_tick_ms` is zero.
    ZeroMinTick,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidColor(e) => write!(f, "Invalid color: {e}"),
            ValidationError::NoProbeIndices => write!(f, "probe_indices cannot be empty"),
            ValidationError::ZeroMinTick => write!(f, "min_tick_ms must be at least 1"),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("notiled"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Write the config as TOML to `path`, creating parent directories.
    ///
    /// The file is staged next to `path` and renamed over it; if the rename
    /// fails the file is written in place instead.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let body = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{body}");
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let staged = path.with_extension("toml.new");
        std::fs::write(&staged, &contents)?;
        if let Err(e) = std::fs::rename(&staged, path) {
            log::debug!("rename {} failed ({e}), writing in place", staged.display());
            let _ = std::fs::remove_file(&staged);
            std::fs::write(path, &contents)?;
        }
        Ok(())
    }

    /// [`save_to`](Self::save_to) the platform config path, returning it.
    pub fn save(&self) -> std::io::Result<PathBuf> {
        let path = Self::path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory")
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// The configured default color, parsed.
    pub fn default_color(&self) -> crate::error::Result<led::Color> {
        led::parse_color(&self.color)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = led::parse_color(&self.color) {
            errors.push(ValidationError::InvalidColor(e.to_string()));
        }
        if self.probe_indices.is_empty() {
            errors.push(ValidationError::NoProbeIndices);
        }
        if self.min_tick_ms == 0 {
            errors.push(ValidationError::ZeroMinTick);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
