//! Color decomposition — packed color + mode → immediate write or playlist.

use super::color::{Channel, Color};
use super::playlist::{Playlist, Segment};
use super::state::LedMode;

/// Result of decomposing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    /// Apply once, no timing.
    Immediate(Segment),
    /// Hand to the sequencer.
    Playlist(Playlist),
}

/// Decompose `color` into what the sequencer should render.
///
/// Blink mode blinks each lit channel on its own, in red, green, blue order:
/// `(channel at intensity, duty_on)` then `(channel at 0, duty_off)`. Channels
/// are never blended into one multi-color frame. An all-dark color yields an
/// empty playlist.
pub fn decompose(color: Color, duty_on_ms: u32, duty_off_ms: u32, mode: LedMode) -> Decomposition {
    match mode {
        LedMode::Manual if color.is_off() => Decomposition::Immediate(Segment::off()),
        LedMode::Manual => Decomposition::Immediate(Segment::from_color(color, 0)),
        LedMode::Blink => {
            let mut segments = Vec::new();
            for ch in Channel::ALL {
                let value = color.intensity(ch);
                if value == 0 {
                    continue;
                }
                segments.push(Segment::single(ch, value, duty_on_ms));
                segments.push(Segment::single(ch, 0, duty_off_ms));
            }
            Decomposition::Playlist(Playlist::new(segments))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(d: Decomposition) -> Playlist {
        match d {
            Decomposition::Playlist(p) => p,
            other => panic!("expected playlist, got {other:?}"),
        }
    }

    #[test]
    fn manual_off_is_all_zero() {
        let d = decompose(Color(0x00FF_FFFF), 0, 0, LedMode::Manual);
        assert_eq!(d, Decomposition::Immediate(Segment::off()));
    }

    #[test]
    fn manual_extracts_intensities() {
        let d = decompose(Color(0xFF10_2030), 0, 0, LedMode::Manual);
        let Decomposition::Immediate(seg) = d else {
            panic!("expected immediate write");
        };
        assert_eq!(seg.value(Channel::Red), 0x10);
        assert_eq!(seg.value(Channel::Green), 0x20);
        assert_eq!(seg.value(Channel::Blue), 0x30);
    }

    #[test]
    fn blink_green_only() {
        let p = playlist(decompose(Color(0xFF00_FF00), 500, 200, LedMode::Blink));
        assert_eq!(
            p.segments(),
            &[
                Segment::single(Channel::Green, 255, 500),
                Segment::single(Channel::Green, 0, 200),
            ]
        );
    }

    #[test]
    fn blink_channels_are_sequential_not_blended() {
        let p = playlist(decompose(Color(0xFF11_0033), 100, 50, LedMode::Blink));
        assert_eq!(
            p.segments(),
            &[
                Segment::single(Channel::Red, 0x11, 100),
                Segment::single(Channel::Red, 0, 50),
                Segment::single(Channel::Blue, 0x33, 100),
                Segment::single(Channel::Blue, 0, 50),
            ]
        );
    }

    #[test]
    fn blink_white_has_six_segments() {
        let p = playlist(decompose(Color(0xFFFF_FFFF), 1, 1, LedMode::Blink));
        assert_eq!(p.len(), 6);
    }

    #[test]
    fn blink_all_dark_is_empty() {
        let p = playlist(decompose(Color(0xFF00_0000), 500, 500, LedMode::Blink));
        assert!(p.is_empty());
    }

    #[test]
    fn blink_is_deterministic() {
        let a = decompose(Color(0xFF12_3456), 300, 700, LedMode::Blink);
        let b = decompose(Color(0xFF12_3456), 300, 700, LedMode::Blink);
        assert_eq!(a, b);
    }
}
