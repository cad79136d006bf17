pub mod cpal_dm;

/// Output buffer handed to an [`AudioSource`], tagged with the device's
/// sample format. Always interleaved stereo.
#[derive(Debug)]
pub enum AudioSourceBufferKind<'a> {
    F32(&'a mut [f32]),
    I16(&'a mut [i16]),
    U16(&'a mut [u16]),
}

/// Anything the device callback can pull audio from.
pub trait AudioSource: Send {
    fn fill_buffer(&mut self, buffer: AudioSourceBufferKind<'_>);
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum AudioDeviceError {
    #[error("no output device available")]
    DeviceNotFound,
    #[error("failed to build output stream: {0}")]
    StreamBuildFailed(String),
    #[error("failed to start output stream: {0}")]
    StreamStartFailed(String),
    #[error("failed to pause output stream: {0}")]
    StreamPauseFailed(String),
    #[error("no output stream is open")]
    NoStream,
}

pub trait AudioDeviceManager {
    /// Open the output stream without starting playback.
    fn open_output_stream(
        &mut self,
        audio_source: Box<dyn AudioSource>,
    ) -> Result<(), AudioDeviceError>;

    fn resume(&mut self) -> Result<(), AudioDeviceError>;

    /// Stop pulling audio. The source is not invoked while paused.
    fn pause(&mut self) -> Result<(), AudioDeviceError>;

    /// Sample rate of the open stream.
    fn sample_rate(&self) -> Option<u32>;

    fn start_output_stream(
        &mut self,
        audio_source: Box<dyn AudioSource>,
    ) -> Result<(), AudioDeviceError> {
        self.open_output_stream(audio_source)?;
        self.resume()
    }
}
