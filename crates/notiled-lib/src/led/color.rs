//! Packed notification colors and the three color channels.
//!
//! Colors use the format `0xTTRRGGBB`: the high byte `TT` is the
//! discriminant (zero means "off"; single-color LEDs read it as brightness),
//! the low three bytes are red, green and blue intensities.

use std::fmt;

use serde::Serialize;

use crate::error::{NotiledError, Result};

/// One of the three color primaries, each backed by its own brightness file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in decomposition order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Type marker the LED class driver reports in the node's `color` file.
    pub fn marker(self) -> &'static str {
        match self {
            Channel::Red => "RED",
            Channel::Green => "GREEN",
            Channel::Blue => "BLUE",
        }
    }

    fn shift(self) -> u32 {
        match self {
            Channel::Red => 16,
            Channel::Green => 8,
            Channel::Blue => 0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A packed `0xTTRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const OFF: Color = Color(0);

    /// The high byte: zero means "off".
    pub fn discriminant(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn is_off(self) -> bool {
        self.discriminant() == 0
    }

    /// Intensity of one channel, in `0..=255`.
    pub fn intensity(self, channel: Channel) -> u8 {
        (self.0 >> channel.shift()) as u8
    }
}

impl From<u32> for Color {
    fn from(raw: u32) -> Self {
        Color(raw)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_color(*self))
    }
}

/// Parse a color string into a packed [`Color`].
///
/// Accepts:
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`,
///   `"purple"`, `"cyan"`, `"off"`/`"black"`
/// - `"#RRGGBB"` / `"RRGGBB"`: discriminant set to `0xFF`
/// - `"#TTRRGGBB"` / `"0xTTRRGGBB"`: raw packed value
pub fn parse_color(s: &str) -> Result<Color> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(Color(0xFFFF_0000)),
        "green" => return Ok(Color(0xFF00_FF00)),
        "blue" => return Ok(Color(0xFF00_00FF)),
        "white" => return Ok(Color(0xFFFF_FFFF)),
        "orange" => return Ok(Color(0xFFFF_8000)),
        "yellow" => return Ok(Color(0xFFFF_FF00)),
        "purple" => return Ok(Color(0xFF80_00FF)),
        "cyan" => return Ok(Color(0xFF00_FFFF)),
        "off" | "black" => return Ok(Color::OFF),
        _ => {}
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| NotiledError::InvalidColor(format!("Invalid hex color: {s}")))?;
    match hex.len() {
        6 => Ok(Color(0xFF00_0000 | val)),
        8 => Ok(Color(val)),
        _ => Err(NotiledError::InvalidColor(format!(
            "Invalid color: {s} (use #RRGGBB, #TTRRGGBB or a color name)"
        ))),
    }
}

/// Format a packed color as `#TTRRGGBB`.
pub fn format_color(color: Color) -> String {
    format!("#{:08X}", color.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Color accessors ──

    #[test]
    fn extracts_discriminant_and_channels() {
        let c = Color(0x80_12_34_56);
        assert_eq!(c.discriminant(), 0x80);
        assert_eq!(c.intensity(Channel::Red), 0x12);
        assert_eq!(c.intensity(Channel::Green), 0x34);
        assert_eq!(c.intensity(Channel::Blue), 0x56);
    }

    #[test]
    fn zero_discriminant_is_off_even_with_rgb() {
        assert!(Color(0x00FF_0000).is_off());
        assert!(!Color(0x0100_0000).is_off());
    }

    #[test]
    fn channel_markers() {
        assert_eq!(Channel::Red.marker(), "RED");
        assert_eq!(Channel::Green.to_string(), "GREEN");
        assert_eq!(Channel::ALL.len(), 3);
    }

    // ── parse_color ──

    #[test]
    fn parse_named_colors() {
        assert_eq!(parse_color("red").unwrap(), Color(0xFFFF_0000));
        assert_eq!(parse_color("green").unwrap(), Color(0xFF00_FF00));
        assert_eq!(parse_color("blue").unwrap(), Color(0xFF00_00FF));
    }

    #[test]
    fn parse_named_off() {
        assert_eq!(parse_color("off").unwrap(), Color::OFF);
        assert_eq!(parse_color("black").unwrap(), Color::OFF);
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(parse_color("  RED ").unwrap(), Color(0xFFFF_0000));
    }

    #[test]
    fn parse_rgb_hex_sets_full_discriminant() {
        assert_eq!(parse_color("#00FF00").unwrap(), Color(0xFF00_FF00));
        assert_eq!(parse_color("abcdef").unwrap(), Color(0xFFAB_CDEF));
    }

    #[test]
    fn parse_packed_hex_is_raw() {
        assert_eq!(parse_color("#00FF0000").unwrap(), Color(0x00FF_0000));
        assert_eq!(parse_color("0xFF0000FF").unwrap(), Color(0xFF00_00FF));
    }

    #[test]
    fn parse_invalid_length() {
        assert!(matches!(
            parse_color("#FFF"),
            Err(NotiledError::InvalidColor(_))
        ));
    }

    #[test]
    fn parse_invalid_name() {
        assert!(parse_color("chartreuse").is_err());
    }

    #[test]
    fn parse_invalid_hex_chars() {
        assert!(parse_color("#GGHHII").is_err());
    }

    // ── format_color ──

    #[test]
    fn format_is_packed_hex() {
        assert_eq!(format_color(Color(0xFF00_FF00)), "#FF00FF00");
        assert_eq!(Color::OFF.to_string(), "#00000000");
    }

    #[test]
    fn formatted_color_parses_back() {
        let c = parse_color("purple").unwrap();
        assert_eq!(parse_color(&format_color(c)).unwrap(), c);
    }
}
