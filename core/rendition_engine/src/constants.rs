/// Output layout is fixed stereo: left then right.
pub const STEREO_CHANNELS: usize = 2;

pub const DEFAULT_COMMAND_CAPACITY: usize = 256;
pub const DEFAULT_PENDING_CAPACITY: usize = 32;

#[cfg(test)]
pub const AUDIO_SAMPLE_EPSILON: f32 = 1e-6;
