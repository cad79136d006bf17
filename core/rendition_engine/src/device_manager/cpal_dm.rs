use super::AudioDeviceManager;
use crate::{
    constants::STEREO_CHANNELS,
    device_manager::{AudioDeviceError, AudioSource, AudioSourceBufferKind},
};
use cpal::{
    OutputCallbackInfo,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use log::{error, info};

pub struct CpalAudioDeviceManager {
    stream: Option<cpal::Stream>,
    sample_rate: Option<u32>,
}

impl std::fmt::Debug for CpalAudioDeviceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalAudioDeviceManager")
            .field("open", &self.stream.is_some())
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl Default for CpalAudioDeviceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CpalAudioDeviceManager {
    pub const fn new() -> Self {
        Self {
            stream: None,
            sample_rate: None,
        }
    }

    fn build_output_stream<T, C>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        mut cb: C,
    ) -> Result<cpal::Stream, AudioDeviceError>
    where
        T: cpal::SizedSample,
        C: FnMut(&mut [T]) + Send + 'static,
    {
        let error_cb = move |err| {
            error!("Stream error: {err}");
        };

        let data_cb = move |data: &mut [T], _: &OutputCallbackInfo| cb(data);

        device
            .build_output_stream(config, data_cb, error_cb, None)
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))
    }

    fn stream(&self) -> Result<&cpal::Stream, AudioDeviceError> {
        self.stream.as_ref().ok_or(AudioDeviceError::NoStream)
    }
}

impl AudioDeviceManager for CpalAudioDeviceManager {
    fn open_output_stream(
        &mut self,
        mut audio_source: Box<dyn AudioSource>,
    ) -> Result<(), AudioDeviceError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(AudioDeviceError::DeviceNotFound)?;

        let supported = device
            .default_output_config()
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))?;

        // the engine renders fixed stereo; the device is asked for it
        let config = cpal::StreamConfig {
            channels: STEREO_CHANNELS as u16,
            sample_rate: supported.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => Self::build_output_stream(&device, &config, move |data| {
                audio_source.fill_buffer(AudioSourceBufferKind::F32(data));
            })?,
            cpal::SampleFormat::I16 => Self::build_output_stream(&device, &config, move |data| {
                audio_source.fill_buffer(AudioSourceBufferKind::I16(data));
            })?,
            cpal::SampleFormat::U16 => Self::build_output_stream(&device, &config, move |data| {
                audio_source.fill_buffer(AudioSourceBufferKind::U16(data));
            })?,
            format => {
                return Err(AudioDeviceError::StreamBuildFailed(format!(
                    "Unsupported sample format '{format}'"
                )));
            }
        };

        // some hosts start streams eagerly
        stream
            .pause()
            .map_err(|e| AudioDeviceError::StreamPauseFailed(e.to_string()))?;

        info!(
            "Opened stereo output at {} Hz ({})",
            config.sample_rate.0,
            supported.sample_format()
        );
        self.sample_rate = Some(config.sample_rate.0);
        self.stream = Some(stream);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioDeviceError> {
        self.stream()?
            .play()
            .map_err(|e| AudioDeviceError::StreamStartFailed(e.to_string()))
    }

    fn pause(&mut self) -> Result<(), AudioDeviceError> {
        self.stream()?
            .pause()
            .map_err(|e| AudioDeviceError::StreamPauseFailed(e.to_string()))
    }

    fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }
}
