use rust_decimal::Decimal;

mod sequence;

pub use sequence::Sequence;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Position of an order in arrival order; the sole tie-break between equal prices
pub type SeqNo = u64;

/// Identifier handed out by the book's id generator
pub type OrderId = String;
