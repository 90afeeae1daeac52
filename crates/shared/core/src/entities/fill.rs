use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{OrderId, Price, Quantity};

/// Quantity of one order consumed by a match
///
/// Every match emits two fills, one per side, each priced at that side's
/// own resolved price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl Fill {
    pub fn new(id: impl Into<OrderId>, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id: id.into(),
            side,
            price,
            quantity,
        }
    }
}
