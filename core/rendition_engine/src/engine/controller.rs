use std::sync::Arc;

use log::{info, warn};

use crate::{
    engine::status::{EngineState, EngineStatus},
    error::{EngineError, Result},
    rendition::{Rendition, RenditionStore},
    selection::command::{
        EngineCommand, EngineCommandProducer, SwitchRequest, SwitchTarget, SwitchTime,
    },
};

/// Control-context handle to the engine.
///
/// Owns the producer half of the command ring. Never touches the clock or
/// the active index directly; everything it changes goes through the ring.
#[derive(Debug)]
pub struct EngineController {
    store: Arc<RenditionStore>,
    commands: EngineCommandProducer,
    status: Arc<EngineStatus>,
}

impl EngineController {
    pub(crate) const fn new(
        store: Arc<RenditionStore>,
        commands: EngineCommandProducer,
        status: Arc<EngineStatus>,
    ) -> Self {
        Self {
            store,
            commands,
            status,
        }
    }

    /// Hand the decoded renditions to the engine. Allowed once.
    pub fn initialize(&self, renditions: Vec<Rendition>) -> Result<()> {
        let count = renditions.len();
        if let Err(e) = self.store.initialize(renditions) {
            warn!("Rendition store initialization failed: {e}");
            return Err(e);
        }

        self.status.mark_ready();
        info!("Rendition store initialized with {count} renditions");
        Ok(())
    }

    pub fn rendition(&self, index: usize) -> Result<&Rendition> {
        self.store.get(index)
    }

    /// Every rendition in index order; empty before initialization.
    pub fn renditions(&self) -> &[Rendition] {
        self.store.renditions().unwrap_or_default()
    }

    pub fn rendition_count(&self) -> usize {
        self.store.len()
    }

    /// Switch to rendition `index`. An out-of-range index is ignored by the
    /// render context and leaves the current rendition playing.
    pub fn request_switch(&mut self, index: usize, at: SwitchTime) -> Result<()> {
        self.send(EngineCommand::Switch(SwitchRequest::index(index, at)))
    }

    /// Set the scalar rendition control, clamped to `[0, N-1]` and
    /// truncated to an index.
    pub fn set_control_value(&mut self, value: f32, at: SwitchTime) -> Result<()> {
        self.send(EngineCommand::Switch(SwitchRequest::new(
            SwitchTarget::Control(value),
            at,
        )))
    }

    pub fn seek(&mut self, frame: u64) -> Result<()> {
        self.send(EngineCommand::Seek(frame))
    }

    pub fn state(&self) -> EngineState {
        self.status.state()
    }

    pub fn status(&self) -> &EngineStatus {
        &self.status
    }

    fn send(&mut self, command: EngineCommand) -> Result<()> {
        self.commands.push(command).map_err(|_| {
            warn!("Dropping {command:?}: command queue is full");
            EngineError::CommandQueueFull
        })
    }
}
