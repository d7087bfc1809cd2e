//! LED model — colors, requests, segment decomposition, channel registry.

mod color;
mod decompose;
mod playlist;
mod registry;
mod state;

pub use color::{Channel, Color, format_color, parse_color};
pub use decompose::{Decomposition, decompose};
pub use playlist::{Playlist, Segment};
pub use registry::{ChannelBinding, ChannelRegistry, DEFAULT_PROBE_INDICES};
pub use state::{LedMode, LedState};
