use serde::{Deserialize, Serialize};

/// Order types supported by the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Transact at the specified price
    Limit,
    /// Transact at whatever the market price resolves to
    Market,
}
