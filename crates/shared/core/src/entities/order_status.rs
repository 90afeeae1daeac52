use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Order is queued and can still be matched
    Active,
    /// Order has been completely filled
    Filled,
    /// Order has been cancelled by the user
    Cancelled,
    /// Order was rejected on submission and never queued
    Rejected,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if the order may still be matched
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_live() {
        assert!(OrderStatus::Active.is_active());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
    }
}
