//! `set` / `off` subcommands — drive the notification LED.

use std::path::Path;

use notiled_lib::notification::NotificationLed;
use notiled_lib::scheduler::TimerQueue;
use notiled_lib::EventLoop;

use super::{
    LedMode, LedState, NotificationOptions, NotiledError, RUNNING, Result, SysfsIo, led,
    load_valid_config, resolve_color,
};

pub(super) fn cmd_set(
    color: Option<&str>,
    mode: LedMode,
    on: Option<u32>,
    off: Option<u32>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let color = resolve_color(color, &config)?;
    let state = LedState {
        color,
        mode,
        duty_on_ms: on.unwrap_or(config.duty_on_ms),
        duty_off_ms: off.unwrap_or(config.duty_off_ms),
    };

    let mut event_loop = EventLoop::open(SysfsIo, &NotificationOptions::from(&config));
    if event_loop.led().registry().bound_count() == 0 {
        return Err(NotiledError::NotSupported(format!(
            "no notification LED channels under {}",
            config.leds_root.display()
        )));
    }

    if let Err(e) = event_loop.led_mut().apply(&state) {
        let _ = event_loop.led_mut().turn_off();
        return Err(e);
    }

    if !event_loop.led().sequencer().is_active() {
        println!("Notification LED: {} ({mode})", led::format_color(color));
        return Ok(());
    }

    println!(
        "Blinking {} ({} ms on / {} ms off). Press Ctrl+C to stop.",
        led::format_color(color),
        state.duty_on_ms,
        state.duty_off_ms
    );
    event_loop.run(&RUNNING);
    println!("Notification LED: off");
    Ok(())
}

pub(super) fn cmd_off(config_path: Option<&Path>) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let mut led = NotificationLed::open(
        SysfsIo,
        TimerQueue::new(),
        &NotificationOptions::from(&config),
    );
    led.turn_off()?;
    println!("Notification LED: off");
    Ok(())
}
