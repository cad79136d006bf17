use std::fmt;

use crate::constants::STEREO_CHANNELS;

pub mod store;
pub mod wav;

pub use store::RenditionStore;

/// Display-only metadata carried alongside a rendition's samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenditionInfo {
    /// Declared bitrate of the encoded origin, in kbit/s.
    pub bitrate_kbps: u32,
    /// Size of the encoded origin file in bytes.
    pub byte_size: u64,
}

impl RenditionInfo {
    pub const fn new(bitrate_kbps: u32, byte_size: u64) -> Self {
        Self {
            bitrate_kbps,
            byte_size,
        }
    }

    /// Origin size in KiB with at most one fraction digit, e.g. `12.3`.
    pub fn size_kib(&self) -> String {
        let kib = (self.byte_size as f64 / 1024.0 * 10.0).round() / 10.0;
        if kib.fract() == 0.0 {
            format!("{kib:.0}")
        } else {
            format!("{kib:.1}")
        }
    }
}

impl fmt::Display for RenditionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kbit/s ({} KiB)", self.bitrate_kbps, self.size_kib())
    }
}

/// One decoded version of the program: per-channel PCM plus metadata.
///
/// Construction does not validate; [`RenditionStore::initialize`] checks the
/// whole set at once so that a bad rendition rejects every rendition.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendition {
    channels: Vec<Vec<f32>>,
    info: RenditionInfo,
}

impl Rendition {
    pub fn new(channels: Vec<Vec<f32>>, info: RenditionInfo) -> Self {
        Self { channels, info }
    }

    pub fn stereo(left: Vec<f32>, right: Vec<f32>, info: RenditionInfo) -> Self {
        Self::new(vec![left, right], info)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Length in samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn left(&self) -> &[f32] {
        self.channel(0)
    }

    pub fn right(&self) -> &[f32] {
        self.channel(1)
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        self.channels.get(index).map_or(&[], Vec::as_slice)
    }

    pub const fn info(&self) -> RenditionInfo {
        self.info
    }

    /// Stereo frame at `transport` frames into the program, wrapping at this
    /// rendition's own length.
    pub fn frame_at(&self, transport: u64) -> (f32, f32) {
        let len = self.len() as u64;
        if len == 0 {
            return (0.0, 0.0);
        }
        let position = (transport % len) as usize;
        (
            self.left().get(position).copied().unwrap_or(0.0),
            self.right().get(position).copied().unwrap_or(0.0),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.channels.len() != STEREO_CHANNELS {
            return Err(format!(
                "expected {STEREO_CHANNELS} channels, got {}",
                self.channels.len()
            ));
        }
        let len = self.len();
        if len == 0 {
            return Err("zero-length channel data".to_owned());
        }
        if let Some(mismatch) = self.channels.iter().find(|c| c.len() != len) {
            return Err(format!(
                "channel length mismatch ({len} vs {})",
                mismatch.len()
            ));
        }
        Ok(())
    }
}
