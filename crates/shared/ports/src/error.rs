use meridian_core::{OrderId, SeqNo};
use thiserror::Error;

/// Domain-level errors for book and settlement operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Unknown id, or the order already reached a terminal state
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("stale sequence number {received}, last assigned was {last}")]
    StaleSequence { last: SeqNo, received: SeqNo },
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
