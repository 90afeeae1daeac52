use serde::{Deserialize, Serialize};

use super::SeqNo;

/// Monotonic sequence counter
///
/// Owned by whichever component stamps sequence numbers (the order book,
/// a sequencer contributor). Never global, so independent instances never
/// collide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    current: SeqNo,
}

impl Sequence {
    /// Create a counter that has not issued anything yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Last issued (or adopted) sequence number
    pub fn current(&self) -> SeqNo {
        self.current
    }

    /// The value `increment` would return, without advancing
    pub fn next(&self) -> SeqNo {
        self.current + 1
    }

    /// Advance the counter and return the new value
    pub fn increment(&mut self) -> SeqNo {
        self.current = self.next();
        self.current
    }

    /// Adopt an externally supplied sequence number
    pub fn set(&mut self, seq_no: SeqNo) {
        self.current = seq_no;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_starts_at_one() {
        let mut seq = Sequence::new();
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.increment(), 1);
        assert_eq!(seq.increment(), 2);
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn test_set_adopts_value() {
        let mut seq = Sequence::new();
        seq.set(41);
        assert_eq!(seq.next(), 42);
        assert_eq!(seq.increment(), 42);
    }
}
