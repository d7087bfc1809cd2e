//! Segments and the cyclic playlist the sequencer walks.

use std::collections::BTreeMap;

use serde::Serialize;

use super::color::{Channel, Color};

/// One timed step: hold these channel values for `duration_ms`.
///
/// A segment fully specifies the instantaneous brightness: a channel absent
/// from `values` is driven to 0, not left at its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Segment {
    pub values: BTreeMap<Channel, u8>,
    pub duration_ms: u32,
}

impl Segment {
    /// All channels dark, no duration.
    pub fn off() -> Self {
        Segment::default()
    }

    /// Every channel at the intensity extracted from `color`.
    pub fn from_color(color: Color, duration_ms: u32) -> Self {
        Segment {
            values: Channel::ALL
                .iter()
                .map(|&ch| (ch, color.intensity(ch)))
                .collect(),
            duration_ms,
        }
    }

    /// A single channel at `value`; the others are implicitly 0.
    pub fn single(channel: Channel, value: u8, duration_ms: u32) -> Self {
        Segment {
            values: BTreeMap::from([(channel, value)]),
            duration_ms,
        }
    }

    /// Value to write for `channel` (0 if absent).
    pub fn value(&self, channel: Channel) -> u8 {
        self.values.get(&channel).copied().unwrap_or(0)
    }
}

/// Ordered cyclic sequence of segments representing one blink period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Playlist {
    segments: Vec<Segment>,
    cursor: usize,
}

impl Playlist {
    pub fn new(segments: Vec<Segment>) -> Self {
        Playlist {
            segments,
            cursor: 0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The segment at the cursor and the cursor that should follow it,
    /// wrapping to 0 after the last segment. `None` when empty.
    pub fn advance(&self) -> Option<(&Segment, usize)> {
        let segment = self.segments.get(self.cursor)?;
        let next = (self.cursor + 1) % self.segments.len();
        Some((segment, next))
    }

    /// Store the cursor returned by [`advance`](Self::advance).
    ///
    /// Out-of-range values are ignored; the cursor always stays a valid index.
    pub fn set_cursor(&mut self, cursor: usize) {
        if cursor < self.segments.len() {
            self.cursor = cursor;
        }
    }
}
