mod fill;
mod order;
mod order_request;
mod order_status;
mod order_type;
mod side;

pub use fill::Fill;
pub use order::{Order, OrderKind, OrderSnapshot, PriceSource};
pub use order_request::OrderRequest;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use side::Side;
