use std::sync::Arc;

use cpal::Sample;
use rtrb::RingBuffer;
use transport::clock::TransportClock;

use crate::{
    config::EngineConfig,
    constants::STEREO_CHANNELS,
    device_manager::{AudioSource, AudioSourceBufferKind},
    rendition::RenditionStore,
    selection::{
        SelectionController,
        command::{EngineCommand, EngineCommandConsumer},
    },
};

pub mod controller;
pub mod status;

pub use controller::EngineController;
pub use status::{EngineState, EngineStatus};

/// Build the two halves of an engine: the control handle and the
/// render-context engine. They share the rendition store and status.
pub fn create(config: EngineConfig) -> (EngineController, RenderEngine) {
    let (producer, consumer) = RingBuffer::new(config.command_capacity.max(1));
    let store = Arc::new(RenditionStore::new());
    let status = Arc::new(EngineStatus::default());

    let controller = EngineController::new(Arc::clone(&store), producer, Arc::clone(&status));
    let engine = RenderEngine {
        store,
        clock: TransportClock::new(),
        selection: SelectionController::new(config.pending_capacity),
        commands: consumer,
        status,
    };
    (controller, engine)
}

/// Render-context half of the engine.
///
/// Owns the transport clock and the selection state. A block render never
/// allocates, locks or fails: before the store is initialized it emits
/// silence while still advancing the clock.
#[derive(Debug)]
pub struct RenderEngine {
    store: Arc<RenditionStore>,
    clock: TransportClock,
    selection: SelectionController,
    commands: EngineCommandConsumer,
    status: Arc<EngineStatus>,
}

impl RenderEngine {
    /// Fill one block of per-channel stereo output.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frame_size = left.len().min(right.len());
        self.render_with(frame_size, |i, l, r| {
            left[i] = l;
            right[i] = r;
        });
    }

    /// Fill one block of interleaved stereo output.
    pub fn render_interleaved<T>(&mut self, data: &mut [T])
    where
        T: cpal::FromSample<f32>,
    {
        let frame_size = data.len() / STEREO_CHANNELS;
        self.render_with(frame_size, |i, l, r| {
            data[i * STEREO_CHANNELS] = l.to_sample::<T>();
            data[i * STEREO_CHANNELS + 1] = r.to_sample::<T>();
        });
    }

    pub const fn current_frame(&self) -> u64 {
        self.clock.current()
    }

    pub const fn active_index(&self) -> usize {
        self.selection.active_index()
    }

    pub fn state(&self) -> EngineState {
        self.status.state()
    }

    fn render_with<F>(&mut self, frame_size: usize, mut write: F)
    where
        F: FnMut(usize, f32, f32),
    {
        let Some(renditions) = self.store.renditions() else {
            for i in 0..frame_size {
                write(i, 0.0, 0.0);
            }
            self.clock.advance(frame_size as u64);
            self.status
                .publish(self.clock.current(), self.selection.active_index());
            return;
        };

        self.status.mark_running();

        while let Ok(command) = self.commands.pop() {
            match command {
                EngineCommand::Switch(request) => {
                    let outcome =
                        self.selection
                            .enqueue(request, self.clock.current(), renditions.len());
                    self.status.record(outcome);
                }
                EngineCommand::Seek(frame) => {
                    self.selection.rebase_due(self.clock.current(), frame);
                    self.clock.wrap_to(frame);
                }
            }
        }

        for i in 0..frame_size {
            let now = self.clock.current();
            let index = self.selection.resolve_active_index(now);
            let (l, r) = renditions
                .get(index)
                .map_or((0.0, 0.0), |rendition| rendition.frame_at(now));
            write(i, l, r);
            self.clock.advance(1);
        }

        self.status
            .publish(self.clock.current(), self.selection.active_index());
    }
}

impl AudioSource for RenderEngine {
    fn fill_buffer(&mut self, buffer: AudioSourceBufferKind<'_>) {
        match buffer {
            AudioSourceBufferKind::F32(data) => self.render_interleaved(data),
            AudioSourceBufferKind::I16(data) => self.render_interleaved(data),
            AudioSourceBufferKind::U16(data) => self.render_interleaved(data),
        }
    }
}
