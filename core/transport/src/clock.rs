/// Elapsed-sample bookkeeping shared by every rendition.
///
/// The clock knows nothing about what is being played. It counts frames
/// since playback started and only moves backwards through an explicit
/// [`TransportClock::wrap_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportClock {
    frame: u64,
}

impl TransportClock {
    pub const fn new() -> Self {
        Self { frame: 0 }
    }

    /// Advance by `frames` rendered samples.
    pub fn advance(&mut self, frames: u64) {
        self.frame = self.frame.saturating_add(frames);
    }

    pub const fn current(&self) -> u64 {
        self.frame
    }

    /// Reposition the clock, e.g. on a loop boundary or an explicit seek.
    pub fn wrap_to(&mut self, frame: u64) {
        self.frame = frame;
    }
}

pub fn frames_to_seconds(frames: u64, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    frames as f64 / f64::from(sample_rate)
}
