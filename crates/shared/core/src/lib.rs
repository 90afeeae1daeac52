//! Meridian Core Domain
//!
//! Pure domain types for the Meridian matching engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Fill, Order, OrderKind, OrderRequest, OrderSnapshot, OrderStatus, OrderType, PriceSource,
    Side,
};
pub use values::{OrderId, Price, Quantity, SeqNo, Sequence};
