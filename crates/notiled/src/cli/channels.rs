//! `channels` subcommand — probe and list the notification LED channels.

use std::path::Path;

use notiled_lib::led::ChannelRegistry;

use super::{ChannelsOutput, Result, SysfsIo, kv, kv_indent, kv_width, load_config};

pub(super) fn cmd_channels(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let registry = ChannelRegistry::resolve(&SysfsIo, &config.leds_root, &config.probe_indices);

    if json {
        let output = ChannelsOutput {
            leds_root: config.leds_root.display().to_string(),
            bound: registry.bound_count(),
            channels: registry.bindings().to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(&["LED root:", "Channels:"], &["GREEN:"]);
    kv("LED root:", config.leds_root.display(), w);
    kv(
        "Channels:",
        format_args!(
            "{} of {} bound",
            registry.bound_count(),
            registry.bindings().len()
        ),
        w,
    );
    for binding in registry.bindings() {
        let key = format!("{}:", binding.channel);
        match &binding.brightness_path {
            Some(p) => kv_indent(&key, p.display(), w),
            None => kv_indent(&key, "(not found)", w),
        }
    }
    Ok(())
}
