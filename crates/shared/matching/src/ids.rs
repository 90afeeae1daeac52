use meridian_core::{OrderId, Sequence};
use meridian_ports::IdGenerator;
use uuid::Uuid;

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> OrderId {
        Uuid::new_v4().to_string()
    }
}

/// "1", "2", "3", ... in creation order
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    sequence: Sequence,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> OrderId {
        self.sequence.increment().to_string()
    }
}
