use std::sync::atomic::{AtomicU8, AtomicU64, AtomicUsize, Ordering};

use crate::selection::EnqueueOutcome;

/// Lifecycle of the engine as a whole. `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EngineState {
    Uninitialized = 0,
    Ready = 1,
    Running = 2,
}

impl EngineState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Ready,
            2 => Self::Running,
            _ => Self::Uninitialized,
        }
    }
}

/// Playback state published by the render context for the control context.
///
/// All fields are plain atomics; nothing here is ever locked.
#[derive(Debug)]
pub struct EngineStatus {
    state: AtomicU8,
    position: AtomicU64,
    active_index: AtomicUsize,
    rejected_requests: AtomicU64,
    dropped_requests: AtomicU64,
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self {
            state: AtomicU8::new(EngineState::Uninitialized as u8),
            position: AtomicU64::new(0),
            active_index: AtomicUsize::new(0),
            rejected_requests: AtomicU64::new(0),
            dropped_requests: AtomicU64::new(0),
        }
    }
}

impl EngineStatus {
    pub fn state(&self) -> EngineState {
        EngineState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Transport frame at the end of the last rendered block.
    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    /// Rendition in force at the end of the last rendered block.
    pub fn active_index(&self) -> usize {
        self.active_index.load(Ordering::Relaxed)
    }

    /// Switch requests ignored because their target was invalid.
    pub fn rejected_requests(&self) -> u64 {
        self.rejected_requests.load(Ordering::Relaxed)
    }

    /// Switch requests dropped because the pending queue was full.
    pub fn dropped_requests(&self) -> u64 {
        self.dropped_requests.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_ready(&self) -> bool {
        self.transition(EngineState::Uninitialized, EngineState::Ready)
    }

    /// Called once the render side has seen an initialized store, which may
    /// happen before the control side gets to mark the engine ready.
    pub(crate) fn mark_running(&self) -> bool {
        self.transition(EngineState::Ready, EngineState::Running)
            || self.transition(EngineState::Uninitialized, EngineState::Running)
    }

    pub(crate) fn publish(&self, position: u64, active_index: usize) {
        self.position.store(position, Ordering::Relaxed);
        self.active_index.store(active_index, Ordering::Relaxed);
    }

    pub(crate) fn record(&self, outcome: EnqueueOutcome) {
        match outcome {
            EnqueueOutcome::Scheduled => {}
            EnqueueOutcome::Rejected => {
                self.rejected_requests.fetch_add(1, Ordering::Relaxed);
            }
            EnqueueOutcome::Dropped => {
                self.dropped_requests.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn transition(&self, from: EngineState, to: EngineState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_uninitialized() {
        let status = EngineStatus::default();
        assert_eq!(status.state(), EngineState::Uninitialized);
        assert_eq!(status.position(), 0);
    }

    #[test]
    fn test_ready_then_running() {
        let status = EngineStatus::default();
        assert!(status.mark_ready());
        assert_eq!(status.state(), EngineState::Ready);

        assert!(status.mark_running());
        assert_eq!(status.state(), EngineState::Running);
    }

    #[test]
    fn test_running_before_ready_is_not_undone() {
        let status = EngineStatus::default();
        assert!(status.mark_running());

        assert!(!status.mark_ready());
        assert_eq!(status.state(), EngineState::Running);
    }

    #[test]
    fn test_running_is_terminal() {
        let status = EngineStatus::default();
        status.mark_ready();
        status.mark_running();

        assert!(!status.mark_ready());
        assert!(!status.mark_running());
        assert_eq!(status.state(), EngineState::Running);
    }

    #[test]
    fn test_record_counts_failures_only() {
        let status = EngineStatus::default();
        status.record(EnqueueOutcome::Scheduled);
        status.record(EnqueueOutcome::Rejected);
        status.record(EnqueueOutcome::Rejected);
        status.record(EnqueueOutcome::Dropped);

        assert_eq!(status.rejected_requests(), 2);
        assert_eq!(status.dropped_requests(), 1);
    }
}
