//! `plan` subcommand — show the blink playlist for a color (no hardware required).

use std::path::Path;

use super::{
    LedMode, PlanOutput, Result, Segment, kv, kv_width, led, load_config, resolve_color,
};

/// `RED=255 GREEN=0`, or `all off` for an empty segment.
fn describe(segment: &Segment) -> String {
    if segment.values.is_empty() {
        return "all off".into();
    }
    segment
        .values
        .iter()
        .map(|(ch, v)| format!("{ch}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn cmd_plan(
    color: Option<&str>,
    on: Option<u32>,
    off: Option<u32>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path);
    let color = resolve_color(color, &config)?;
    let duty_on_ms = on.unwrap_or(config.duty_on_ms);
    let duty_off_ms = off.unwrap_or(config.duty_off_ms);

    let segments = match led::decompose(color, duty_on_ms, duty_off_ms, LedMode::Blink) {
        led::Decomposition::Playlist(p) => p.segments().to_vec(),
        led::Decomposition::Immediate(s) => vec![s],
    };
    let period_ms: u64 = segments.iter().map(|s| u64::from(s.duration_ms)).sum();

    if json {
        let output = PlanOutput {
            color: led::format_color(color),
            duty_on_ms,
            duty_off_ms,
            period_ms,
            segments,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(&["Color:", "Period:", "Segments:"], &[]);
    kv("Color:", led::format_color(color), w);
    if segments.is_empty() {
        kv("Segments:", "none (LED stays off)", w);
        return Ok(());
    }
    kv("Period:", format_args!("{period_ms} ms"), w);
    kv("Segments:", segments.len(), w);
    for (i, segment) in segments.iter().enumerate() {
        println!(
            "  {:>2}  {:<12}{:>6} ms",
            i + 1,
            describe(segment),
            segment.duration_ms
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notiled_lib::led::Channel;

    #[test]
    fn describe_lists_channel_values() {
        assert_eq!(describe(&Segment::single(Channel::Green, 255, 500)), "GREEN=255");
        assert_eq!(describe(&Segment::off()), "all off");
    }
}
