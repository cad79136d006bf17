use rtrb::{Consumer, Producer};

/// When a switch should take effect, in transport frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchTime {
    /// At the start of the next render block.
    Now,
    /// At an exact transport frame. Past frames behave like `Now`.
    At(u64),
}

/// What a switch request selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchTarget {
    /// A rendition index. Out-of-range indices are ignored.
    Index(usize),
    /// The scalar control value in `[0, N-1]`; clamped then truncated.
    Control(f32),
}

impl SwitchTarget {
    /// Concrete index for a store of `count` renditions, or `None` when the
    /// request must be ignored.
    pub fn resolve(self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        match self {
            Self::Index(index) => (index < count).then_some(index),
            Self::Control(value) if value.is_finite() => {
                Some(value.clamp(0.0, (count - 1) as f32) as usize)
            }
            Self::Control(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchRequest {
    pub target: SwitchTarget,
    pub at: SwitchTime,
}

impl SwitchRequest {
    pub const fn new(target: SwitchTarget, at: SwitchTime) -> Self {
        Self { target, at }
    }

    pub const fn index(index: usize, at: SwitchTime) -> Self {
        Self::new(SwitchTarget::Index(index), at)
    }
}

/// Messages from the control context to the render context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    Switch(SwitchRequest),
    /// Reposition the transport clock.
    Seek(u64),
}

pub type EngineCommandProducer = Producer<EngineCommand>;
pub type EngineCommandConsumer = Consumer<EngineCommand>;

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn test_index_in_range_resolves() {
        assert_eq!(SwitchTarget::Index(2).resolve(3), Some(2));
    }

    #[test]
    fn test_index_out_of_range_is_ignored() {
        assert_eq!(SwitchTarget::Index(99).resolve(3), None);
        assert_eq!(SwitchTarget::Index(3).resolve(3), None);
    }

    #[test]
    fn test_nothing_resolves_without_renditions() {
        assert_eq!(SwitchTarget::Index(0).resolve(0), None);
        assert_eq!(SwitchTarget::Control(0.0).resolve(0), None);
    }

    #[test]
    fn test_control_value_truncates() {
        assert_eq!(SwitchTarget::Control(1.9).resolve(3), Some(1));
        assert_eq!(SwitchTarget::Control(0.2).resolve(3), Some(0));
    }

    #[test]
    fn test_control_value_clamps_to_valid_range() {
        assert_eq!(SwitchTarget::Control(42.0).resolve(3), Some(2));
        assert_eq!(SwitchTarget::Control(-5.0).resolve(3), Some(0));
    }

    #[test]
    fn test_non_finite_control_value_is_ignored() {
        assert_eq!(SwitchTarget::Control(f32::NAN).resolve(3), None);
        assert_eq!(SwitchTarget::Control(f32::INFINITY).resolve(3), None);
    }

    #[test]
    fn test_ring_buffer_rejects_when_full() {
        let (mut prod, mut cons) = RingBuffer::<EngineCommand>::new(1);

        prod.push(EngineCommand::Seek(0)).unwrap();
        let result = prod.push(EngineCommand::Switch(SwitchRequest::index(1, SwitchTime::Now)));
        assert!(result.is_err(), "second command should not fit");

        assert!(matches!(cons.pop(), Ok(EngineCommand::Seek(0))));
        assert!(prod.push(EngineCommand::Seek(5)).is_ok());
    }
}
