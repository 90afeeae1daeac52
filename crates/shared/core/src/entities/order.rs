use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderRequest, OrderStatus, OrderType, Side};
use crate::values::{OrderId, Price, Quantity, SeqNo};

/// Answers "what does a market order on this side transact at right now"
///
/// Implemented by whoever tracks the book state and the last traded prices.
pub trait PriceSource {
    fn market_price(&self, side: Side) -> Price;
}

impl<F> PriceSource for F
where
    F: Fn(Side) -> Price,
{
    fn market_price(&self, side: Side) -> Price {
        self(side)
    }
}

/// How an order's transacting price is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OrderKind {
    /// Fixed at creation from the request
    Limit { price: Price },
    /// Resolved from the price source on every read, unless a price was
    /// captured at creation
    Market { captured: Option<Price> },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::Market { .. } => OrderType::Market,
        }
    }

    /// The price that does not depend on book state, if any
    pub fn fixed_price(&self) -> Option<Price> {
        match self {
            OrderKind::Limit { price } => Some(*price),
            OrderKind::Market { captured } => *captured,
        }
    }
}

/// The book's record of a request plus its mutable matching state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    seq_no: SeqNo,
    side: Side,
    kind: OrderKind,
    quantity: Quantity,
    remaining_quantity: Quantity,
    status: OrderStatus,
}

impl Order {
    /// Create an active order from a request
    pub fn new(id: impl Into<OrderId>, seq_no: SeqNo, request: &OrderRequest) -> Self {
        let kind = match request {
            OrderRequest::Limit { price, .. } => OrderKind::Limit { price: *price },
            OrderRequest::Market { .. } => OrderKind::Market { captured: None },
        };

        Self {
            id: id.into(),
            seq_no,
            side: request.side(),
            kind,
            quantity: request.quantity(),
            remaining_quantity: request.quantity(),
            status: OrderStatus::Active,
        }
    }

    /// Pin a market order's price; limit orders are left untouched
    pub fn with_captured_price(mut self, price: Price) -> Self {
        if let OrderKind::Market { captured } = &mut self.kind {
            *captured = Some(price);
        }
        self
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn seq_no(&self) -> SeqNo {
        self.seq_no
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Transacting price at the moment of the call
    ///
    /// Floating market orders ask `source` every time; nothing is cached.
    pub fn price(&self, source: &impl PriceSource) -> Price {
        match self.kind {
            OrderKind::Limit { price } => price,
            OrderKind::Market { captured: Some(price) } => price,
            OrderKind::Market { captured: None } => source.market_price(self.side),
        }
    }

    /// Consume `delta` units; reaching zero marks the order filled
    ///
    /// Remaining quantity never drops below zero.
    pub fn decrease_quantity(&mut self, delta: Quantity) {
        self.remaining_quantity = (self.remaining_quantity - delta).max(Decimal::ZERO);
        if self.remaining_quantity.is_zero() && self.status.is_active() {
            self.status = OrderStatus::Filled;
        }
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Point-in-time view with the price resolved against `source`
    pub fn serialize(&self, source: &impl PriceSource) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id.clone(),
            seq_no: self.seq_no,
            side: self.side,
            order_type: self.order_type(),
            price: self.price(source),
            quantity: self.quantity,
            remaining_quantity: self.remaining_quantity,
            status: self.status,
        }
    }
}

/// Serializable view of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub seq_no: SeqNo,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub price: Price,
    pub quantity: Quantity,
    pub remaining_quantity: Quantity,
    pub status: OrderStatus,
}
