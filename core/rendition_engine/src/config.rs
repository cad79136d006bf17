use crate::constants::{DEFAULT_COMMAND_CAPACITY, DEFAULT_PENDING_CAPACITY};

/// Sizing for the preallocated structures shared by both contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Slots in the control -> render command ring.
    pub command_capacity: usize,
    /// Scheduled switches the render side may hold at once.
    pub pending_capacity: usize,
}

impl EngineConfig {
    pub fn new(command_capacity: usize, pending_capacity: usize) -> Self {
        Self {
            command_capacity: command_capacity.max(1),
            pending_capacity: pending_capacity.max(1),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_CAPACITY, DEFAULT_PENDING_CAPACITY)
    }
}
