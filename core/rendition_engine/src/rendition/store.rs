use std::sync::OnceLock;

use crate::{
    error::{EngineError, Result},
    rendition::Rendition,
};

/// Owns every rendition's samples once initialized.
///
/// The set is written exactly once and never mutated afterwards, so readers
/// in either context only ever perform an atomic load.
#[derive(Debug, Default)]
pub struct RenditionStore {
    renditions: OnceLock<Box<[Rendition]>>,
}

impl RenditionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of the decoded renditions.
    ///
    /// Either every rendition is accepted or none is.
    pub fn initialize(&self, renditions: Vec<Rendition>) -> Result<()> {
        if self.is_initialized() {
            return Err(EngineError::AlreadyInitialized);
        }
        if renditions.is_empty() {
            return Err(EngineError::invalid("no renditions supplied"));
        }
        for (index, rendition) in renditions.iter().enumerate() {
            rendition
                .validate()
                .map_err(|reason| EngineError::invalid(format!("rendition {index}: {reason}")))?;
        }

        self.renditions
            .set(renditions.into_boxed_slice())
            .map_err(|_| EngineError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.renditions.get().is_some()
    }

    /// All renditions, or `None` before initialization.
    pub fn renditions(&self) -> Option<&[Rendition]> {
        self.renditions.get().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.renditions().map_or(0, <[Rendition]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<&Rendition> {
        let renditions = self.renditions().unwrap_or_default();
        renditions.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            len: renditions.len(),
        })
    }
}
