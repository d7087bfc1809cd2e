//! Channel registry — which brightness file drives which color channel.
//!
//! Built once by probing `<root>/led.<N>/color` for a small fixed set of
//! indices. Read-only afterwards.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::color::Channel;
use super::playlist::Segment;
use crate::error::{NotiledError, Result};
use crate::sysfs::LedIo;

/// Candidate node indices probed by default.
pub const DEFAULT_PROBE_INDICES: [u32; 3] = [1, 2, 3];

/// A color channel and the brightness file that drives it, if one was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelBinding {
    pub channel: Channel,
    pub brightness_path: Option<PathBuf>,
}

/// The resolved bindings for red, green and blue, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelRegistry {
    bindings: Vec<ChannelBinding>,
}

impl ChannelRegistry {
    /// Probe `indices` under `root` and bind every node whose `color`
    /// marker names a channel.
    ///
    /// Missing, unreadable or empty marker files are skipped. When two nodes
    /// report the same channel the later one wins.
    pub fn resolve(io: &impl LedIo, root: &Path, indices: &[u32]) -> Self {
        let mut registry = Self::unbound();
        for &index in indices {
            let node = root.join(format!("led.{index}"));
            let marker = match io.read_value(&node.join("color")) {
                Ok(m) if !m.is_empty() => m,
                Ok(_) => {
                    log::debug!("{}: empty color marker, skipped", node.display());
                    continue;
                }
                Err(e) => {
                    log::debug!("{}: no color marker ({e}), skipped", node.display());
                    continue;
                }
            };
            if let Some(binding) = registry
                .bindings
                .iter_mut()
                .find(|b| marker.starts_with(b.channel.marker()))
            {
                binding.brightness_path = Some(node.join("brightness"));
            }
        }
        for b in &registry.bindings {
            match &b.brightness_path {
                Some(p) => log::info!("NOTI LED {} ({})", b.channel, p.display()),
                None => log::info!("NOTI LED {} (unbound)", b.channel),
            }
        }
        registry
    }

    /// A registry with no channel bound.
    pub fn unbound() -> Self {
        ChannelRegistry {
            bindings: Channel::ALL
                .iter()
                .map(|&channel| ChannelBinding {
                    channel,
                    brightness_path: None,
                })
                .collect(),
        }
    }

    /// Build a registry from explicit `(channel, path)` pairs.
    pub fn from_paths(paths: &[(Channel, PathBuf)]) -> Self {
        let mut registry = Self::unbound();
        for (channel, path) in paths {
            if let Some(b) = registry.bindings.iter_mut().find(|b| b.channel == *channel) {
                b.brightness_path = Some(path.clone());
            }
        }
        registry
    }

    pub fn bindings(&self) -> &[ChannelBinding] {
        &self.bindings
    }

    pub fn path(&self, channel: Channel) -> Option<&Path> {
        self.bindings
            .iter()
            .find(|b| b.channel == channel)
            .and_then(|b| b.brightness_path.as_deref())
    }

    pub fn is_bound(&self, channel: Channel) -> bool {
        self.path(channel).is_some()
    }

    pub fn bound_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.brightness_path.is_some())
            .count()
    }

    /// Write `segment` to every bound channel (absent channels get 0).
    ///
    /// All channels are attempted; the first failure is returned after the
    /// last write.
    pub fn apply(&self, io: &impl LedIo, segment: &Segment) -> Result<()> {
        let mut first_err = None;
        for b in &self.bindings {
            let Some(path) = &b.brightness_path else {
                continue;
            };
            let value = segment.value(b.channel);
            if let Err(e) = io.write_value(path, u32::from(value)) {
                log::error!(
                    "failed to change brightness of {} to {value}: {e}",
                    b.channel
                );
                first_err.get_or_insert(NotiledError::io(path, e));
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Drive every bound channel to 0.
    pub fn turn_off(&self, io: &impl LedIo) -> Result<()> {
        self.apply(io, &Segment::off())
    }
}
