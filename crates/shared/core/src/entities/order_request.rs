use serde::{Deserialize, Serialize};

use super::{OrderType, Side};
use crate::values::{Price, Quantity};

/// Immutable request to place an order
///
/// Tagged on `type` on the wire:
/// `{"type":"limit","side":"BID","quantity":"1","price":"2"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OrderRequest {
    Limit {
        side: Side,
        quantity: Quantity,
        price: Price,
    },
    Market {
        side: Side,
        quantity: Quantity,
    },
}

impl OrderRequest {
    /// Create a limit order request
    pub fn limit(side: Side, price: Price, quantity: Quantity) -> Self {
        OrderRequest::Limit {
            side,
            quantity,
            price,
        }
    }

    /// Create a market order request
    pub fn market(side: Side, quantity: Quantity) -> Self {
        OrderRequest::Market { side, quantity }
    }

    pub fn side(&self) -> Side {
        match self {
            OrderRequest::Limit { side, .. } | OrderRequest::Market { side, .. } => *side,
        }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            OrderRequest::Limit { quantity, .. } | OrderRequest::Market { quantity, .. } => {
                *quantity
            }
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            OrderRequest::Limit { .. } => OrderType::Limit,
            OrderRequest::Market { .. } => OrderType::Market,
        }
    }

    /// The requested price, for limit requests only
    pub fn limit_price(&self) -> Option<Price> {
        match self {
            OrderRequest::Limit { price, .. } => Some(*price),
            OrderRequest::Market { .. } => None,
        }
    }

    /// Returns true if the request can be queued as-is
    pub fn is_well_formed(&self) -> bool {
        self.quantity().is_sign_positive()
            && !self.quantity().is_zero()
            && self.limit_price().is_none_or(|price| !price.is_sign_negative())
    }
}
