//! `led` subcommand — set one LED by id.

use std::path::Path;

use notiled_lib::device::LedDevice;
use notiled_lib::scheduler::TimerQueue;

use super::{LedState, Result, SysfsIo, led, load_valid_config};

pub(super) fn cmd_led(id: &str, color: &str, config_path: Option<&Path>) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let color = led::parse_color(color)?;
    let mut device = LedDevice::open(id, SysfsIo, TimerQueue::new(), &config)?;
    device.set_state(&LedState::manual(color))?;
    println!("{id}: {}", led::format_color(color));
    Ok(())
}
