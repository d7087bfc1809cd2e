//! CLI subcommands — channel listing, LED control, config, blink plans.

mod channels;
mod config_cmd;
mod led_cmd;
mod plan;
mod set;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use notiled_lib::config::Config;
pub(super) use notiled_lib::error::{NotiledError, Result};
pub(super) use notiled_lib::led::{self, ChannelBinding, LedMode, LedState, Segment};
pub(super) use notiled_lib::notification::NotificationOptions;
pub(super) use notiled_lib::sysfs::SysfsIo;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load the config from `custom_path`, or the default location.
///
/// Parse warnings are logged; a broken file falls back to defaults.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Parse `color`, or the config's default color when none was given.
pub(super) fn resolve_color(color: Option<&str>, config: &Config) -> Result<led::Color> {
    match color {
        Some(c) => led::parse_color(c),
        None => config.default_color(),
    }
}

/// [`load_config`], rejecting configs that fail validation.
pub(super) fn load_valid_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = load_config(custom_path);
    config.validate().map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        NotiledError::Config(msgs.join("; "))
    })?;
    Ok(config)
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ChannelsOutput {
    pub leds_root: String,
    pub bound: usize,
    pub channels: Vec<ChannelBinding>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub errors: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct PlanOutput {
    pub color: String,
    pub duty_on_ms: u32,
    pub duty_off_ms: u32,
    pub period_ms: u64,
    pub segments: Vec<Segment>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Probe the notification LED nodes and show which channels were found
    Channels,

    /// Set the notification LED color (blink mode runs until Ctrl+C)
    Set {
        /// Color: name, #RRGGBB, or #TTRRGGBB (default: from config)
        color: Option<String>,
        /// manual or blink
        #[arg(long, default_value = "manual")]
        mode: LedMode,
        /// On time per channel in ms (default: from config)
        #[arg(long)]
        on: Option<u32>,
        /// Off time per channel in ms (default: from config)
        #[arg(long)]
        off: Option<u32>,
    },

    /// Turn the notification LED off
    Off,

    /// Set a single LED by id (camera_back, touch_key, notification)
    Led {
        /// LED id
        id: String,
        /// Color: name, #RRGGBB, or #TTRRGGBB (the first byte is brightness)
        color: String,
    },

    /// Show current configuration and file paths
    Config {
        /// Write a config file with default settings (fails if one exists)
        #[arg(long)]
        init: bool,
    },

    /// Print the blink playlist for a color without touching hardware
    Plan {
        /// Color: name, #RRGGBB, or #TTRRGGBB (default: from config)
        color: Option<String>,
        /// On time per channel in ms (default: from config)
        #[arg(long)]
        on: Option<u32>,
        /// Off time per channel in ms (default: from config)
        #[arg(long)]
        off: Option<u32>,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Channels => channels::cmd_channels(json, config_path),
        Command::Set {
            color,
            mode,
            on,
            off,
        } => {
            if json {
                warn_json_unsupported("set");
            }
            set::cmd_set(color.as_deref(), mode, on, off, config_path)
        }
        Command::Off => {
            if json {
                warn_json_unsupported("off");
            }
            set::cmd_off(config_path)
        }
        Command::Led { id, color } => {
            if json {
                warn_json_unsupported("led");
            }
            led_cmd::cmd_led(&id, &color, config_path)
        }
        Command::Config { init: true } => {
            if json {
                warn_json_unsupported("config --init");
            }
            config_cmd::cmd_config_init(config_path)
        }
        Command::Config { init: false } => config_cmd::cmd_config(json, config_path),
        Command::Plan { color, on, off } => {
            plan::cmd_plan(color.as_deref(), on, off, json, config_path)
        }
    }
}
