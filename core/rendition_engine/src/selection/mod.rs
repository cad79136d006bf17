use std::collections::VecDeque;

use crate::selection::command::{SwitchRequest, SwitchTime};

pub mod command;

/// A switch with its target resolved and its effective frame fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledSwitch {
    pub index: usize,
    pub at: u64,
}

/// Why a request did not make it into the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Scheduled,
    /// Target outside the rendition set.
    Rejected,
    /// Pending queue at capacity.
    Dropped,
}

/// Render-side record of which rendition is playing and which switches
/// are still ahead.
///
/// `pending` is kept in ascending frame order with at most one entry per
/// frame. Enqueuing at frame `t` retires everything pending at or after
/// `t`, so new entries always land at the back. The queue is allocated once
/// and never grows past its initial capacity.
#[derive(Debug)]
pub struct SelectionController {
    active: usize,
    pending: VecDeque<ScheduledSwitch>,
    limit: usize,
}

impl SelectionController {
    pub fn new(pending_capacity: usize) -> Self {
        let limit = pending_capacity.max(1);
        Self {
            active: 0,
            pending: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub const fn active_index(&self) -> usize {
        self.active
    }

    pub fn pending(&self) -> impl Iterator<Item = &ScheduledSwitch> {
        self.pending.iter()
    }

    /// Schedule `request` against a set of `rendition_count` renditions.
    /// `now` is the transport frame at the start of the current block.
    pub fn enqueue(
        &mut self,
        request: SwitchRequest,
        now: u64,
        rendition_count: usize,
    ) -> EnqueueOutcome {
        let Some(index) = request.target.resolve(rendition_count) else {
            return EnqueueOutcome::Rejected;
        };
        let at = match request.at {
            SwitchTime::Now => now,
            SwitchTime::At(frame) => frame.max(now),
        };

        self.pending.retain(|switch| switch.at < at);
        if self.pending.len() >= self.limit {
            return EnqueueOutcome::Dropped;
        }
        self.pending.push_back(ScheduledSwitch { index, at });
        EnqueueOutcome::Scheduled
    }

    /// Keep switches that were already due at `from` due after the
    /// transport moves back to `to`. Only the latest of them survives.
    pub fn rebase_due(&mut self, from: u64, to: u64) {
        if to >= from {
            return;
        }
        let mut latest = None;
        while let Some(next) = self.pending.front().copied() {
            if next.at > from {
                break;
            }
            latest = Some(next.index);
            self.pending.pop_front();
        }
        if let Some(index) = latest {
            self.pending.push_front(ScheduledSwitch { index, at: to });
        }
    }

    /// Index in force at transport frame `at`.
    ///
    /// Applies, in frame order, every pending switch due at or before `at`
    /// and retires it.
    pub fn resolve_active_index(&mut self, at: u64) -> usize {
        while let Some(next) = self.pending.front().copied() {
            if next.at > at {
                break;
            }
            self.active = next.index;
            self.pending.pop_front();
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::command::{SwitchTarget, SwitchTime};

    const COUNT: usize = 3;

    fn at(index: usize, frame: u64) -> SwitchRequest {
        SwitchRequest::index(index, SwitchTime::At(frame))
    }

    #[test]
    fn test_starts_on_first_rendition() {
        let mut selection = SelectionController::new(4);
        assert_eq!(selection.resolve_active_index(0), 0);
        assert_eq!(selection.resolve_active_index(1_000_000), 0);
    }

    #[test]
    fn test_now_applies_at_block_start() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(SwitchRequest::index(2, SwitchTime::Now), 64, COUNT);
        assert_eq!(selection.resolve_active_index(64), 2);
    }

    #[test]
    fn test_future_switch_is_sample_accurate() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 500), 0, COUNT);

        assert_eq!(selection.resolve_active_index(499), 0);
        assert_eq!(selection.resolve_active_index(500), 1);
        assert_eq!(selection.resolve_active_index(501), 1);
    }

    #[test]
    fn test_past_switch_applies_immediately() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 10), 256, COUNT);
        assert_eq!(selection.pending().next().map(|s| s.at), Some(256));
        assert_eq!(selection.resolve_active_index(256), 1);
    }

    #[test]
    fn test_applied_in_frame_order() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 100), 0, COUNT);
        selection.enqueue(at(2, 200), 0, COUNT);

        assert_eq!(selection.resolve_active_index(150), 1);
        assert_eq!(selection.resolve_active_index(250), 2);
        assert_eq!(selection.pending().count(), 0);
    }

    #[test]
    fn test_skipping_ahead_applies_last_due_switch() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 100), 0, COUNT);
        selection.enqueue(at(2, 200), 0, COUNT);

        assert_eq!(selection.resolve_active_index(300), 2);
    }

    #[test]
    fn test_same_frame_later_request_wins() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 100), 0, COUNT);
        selection.enqueue(at(2, 100), 0, COUNT);

        assert_eq!(selection.pending().count(), 1);
        assert_eq!(selection.resolve_active_index(100), 2);
    }

    #[test]
    fn test_earlier_request_supersedes_later_pending() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 1000), 0, COUNT);
        selection.enqueue(at(2, 500), 0, COUNT);

        assert_eq!(selection.resolve_active_index(600), 2);
        assert_eq!(selection.resolve_active_index(1200), 2);
    }

    #[test]
    fn test_rebase_keeps_due_switch_due_after_rewind() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(SwitchRequest::index(1, SwitchTime::Now), 128, COUNT);
        selection.enqueue(at(2, 400), 128, COUNT);

        selection.rebase_due(128, 10);
        assert_eq!(selection.resolve_active_index(10), 1);
        assert_eq!(selection.resolve_active_index(399), 1);
        assert_eq!(selection.resolve_active_index(400), 2);
    }

    #[test]
    fn test_rebase_collapses_due_switches_to_latest() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 200), 100, COUNT);
        selection.enqueue(at(2, 300), 100, COUNT);

        selection.rebase_due(300, 0);
        assert_eq!(selection.pending().count(), 1);
        assert_eq!(selection.resolve_active_index(0), 2);
    }

    #[test]
    fn test_rebase_ignores_forward_seek() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 500), 0, COUNT);

        selection.rebase_due(0, 1000);
        assert_eq!(selection.pending().next().map(|s| s.at), Some(500));
        assert_eq!(selection.resolve_active_index(1000), 1);
    }

    #[test]
    fn test_out_of_range_request_is_rejected() {
        let mut selection = SelectionController::new(4);
        selection.enqueue(at(1, 10), 0, COUNT);

        let outcome = selection.enqueue(SwitchRequest::index(99, SwitchTime::Now), 0, COUNT);
        assert_eq!(outcome, EnqueueOutcome::Rejected);
        // a rejected request does not supersede anything
        assert_eq!(selection.pending().count(), 1);
        assert_eq!(selection.resolve_active_index(0), 0);
        assert_eq!(selection.resolve_active_index(10), 1);
    }

    #[test]
    fn test_control_target_is_clamped() {
        let mut selection = SelectionController::new(4);
        let request = SwitchRequest::new(SwitchTarget::Control(7.5), SwitchTime::Now);
        assert_eq!(selection.enqueue(request, 0, COUNT), EnqueueOutcome::Scheduled);
        assert_eq!(selection.resolve_active_index(0), 2);
    }

    #[test]
    fn test_full_queue_drops_new_request() {
        let mut selection = SelectionController::new(2);
        assert_eq!(selection.enqueue(at(1, 10), 0, COUNT), EnqueueOutcome::Scheduled);
        assert_eq!(selection.enqueue(at(2, 20), 0, COUNT), EnqueueOutcome::Scheduled);
        assert_eq!(selection.enqueue(at(0, 30), 0, COUNT), EnqueueOutcome::Dropped);
        assert_eq!(selection.resolve_active_index(40), 2);
    }

    #[test]
    fn test_result_is_always_a_valid_index() {
        let mut selection = SelectionController::new(8);
        let requests = [
            SwitchRequest::index(5, SwitchTime::At(3)),
            SwitchRequest::index(2, SwitchTime::At(4)),
            SwitchRequest::new(SwitchTarget::Control(f32::NAN), SwitchTime::At(5)),
            SwitchRequest::index(usize::MAX, SwitchTime::At(6)),
            SwitchRequest::new(SwitchTarget::Control(-1.0), SwitchTime::At(7)),
        ];
        for request in requests {
            selection.enqueue(request, 0, COUNT);
        }
        for frame in 0..16 {
            assert!(selection.resolve_active_index(frame) < COUNT);
        }
        assert_eq!(selection.active_index(), 0);
    }
}
