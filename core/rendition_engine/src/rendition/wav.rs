use std::{fs, io::Read, path::Path};

use hound::WavReader;

use crate::{
    error::{EngineError, Result},
    rendition::{Rendition, RenditionInfo},
};

/// Decodes a `.wav` file into a stereo [`Rendition`].
///
/// Supports:
/// - Mono and Stereo files (mono is duplicated into both channels)
/// - Integer PCM of any bit depth, or 32-bit float samples (converted to `f32`)
///
/// Does NOT support:
/// - More than 2 channels
/// - Resampling: every rendition is assumed to share the output sample rate
///
/// # Example
/// ```no_run
/// use rendition_engine::rendition::wav;
///
/// let rendition = wav::from_file("audio/music-128.wav", 128).unwrap();
/// ```
pub fn from_file<P: AsRef<Path>>(path: P, bitrate_kbps: u32) -> Result<Rendition> {
    let byte_size = fs::metadata(path.as_ref())?.len();
    let reader = WavReader::open(path)?;
    from_reader(reader, RenditionInfo::new(bitrate_kbps, byte_size))
}

pub fn from_stream<R: Read>(stream: R, info: RenditionInfo) -> Result<Rendition> {
    from_reader(WavReader::new(stream)?, info)
}

fn from_reader<R: Read>(reader: WavReader<R>, info: RenditionInfo) -> Result<Rendition> {
    let channels = reader.spec().channels;
    if channels == 0 || channels > 2 {
        return Err(EngineError::invalid(format!(
            "only mono or stereo WAVs are supported, got {channels} channels"
        )));
    }

    let samples = decode_pcm_samples(reader)?;
    let (left, right) = split_channels(samples, usize::from(channels));
    Ok(Rendition::stereo(left, right, info))
}

fn decode_pcm_samples<R: Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<std::result::Result<Vec<f32>, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()?,
    };
    Ok(samples)
}

/// Splits interleaved samples into separate left and right buffers.
/// Mono is duplicated into both channels.
fn split_channels(samples: Vec<f32>, channels: usize) -> (Vec<f32>, Vec<f32>) {
    if channels == 1 {
        return (samples.clone(), samples);
    }
    samples
        .chunks_exact(2)
        .map(|frame| (frame[0], frame[1]))
        .unzip()
}

/// Bitrate encoded in a file name such as `music-128.wav`.
pub fn bitrate_from_file_name(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.rsplit(|c: char| !c.is_ascii_digit()).next()?;
    digits.parse().ok()
}
