//! `config` subcommand — show current configuration and file paths, or
//! write a default config file.

use std::path::Path;

use super::{
    Config, ConfigOutput, NotiledError, Result, kv, kv_indent, kv_width, led, load_config,
};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let errors: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errs) => errs.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &[
            "leds_root:",
            "probe_indices:",
            "min_tick_ms:",
            "duty_on_ms:",
            "duty_off_ms:",
            "color:",
            "camera_back_path:",
            "touch_key_path:",
        ],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("leds_root:", config.leds_root.display(), w);
    let indices: Vec<String> = config.probe_indices.iter().map(|i| i.to_string()).collect();
    kv_indent("probe_indices:", indices.join(", "), w);
    kv_indent("min_tick_ms:", config.min_tick_ms, w);
    kv_indent("duty_on_ms:", config.duty_on_ms, w);
    kv_indent("duty_off_ms:", config.duty_off_ms, w);
    let color_display = match led::parse_color(&config.color) {
        Ok(val) => format!("{} -> {}", config.color, led::format_color(val)),
        Err(_) => format!("{} (invalid)", config.color),
    };
    kv_indent("color:", &color_display, w);
    kv_indent("camera_back_path:", config.camera_back_path.display(), w);
    kv_indent("touch_key_path:", config.touch_key_path.display(), w);

    if !errors.is_empty() {
        println!();
        println!("Problems:");
        for e in &errors {
            println!("  {e}");
        }
    }
    Ok(())
}

pub(super) fn cmd_config_init(custom_path: Option<&Path>) -> Result<()> {
    let target = custom_path
        .map(|p| p.to_path_buf())
        .or_else(Config::path)
        .ok_or_else(|| NotiledError::Config("no config directory".into()))?;
    if target.exists() {
        return Err(NotiledError::Config(format!(
            "{} already exists",
            target.display()
        )));
    }

    let config = Config::default();
    let written = match custom_path {
        Some(path) => config.save_to(path).map(|()| path.to_path_buf()),
        None => config.save(),
    }
    .map_err(|e| NotiledError::io(&target, e))?;
    println!("Wrote {}", written.display());
    Ok(())
}
