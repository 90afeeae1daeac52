use log::{debug, info, warn};
use meridian_core::{
    Fill, Order, OrderRequest, OrderSnapshot, OrderStatus, OrderType, Price,
    PriceSource, SeqNo, Side,
};
use meridian_ports::{EngineError, EngineResult, IdGenerator};
use rust_decimal::Decimal;

use crate::book::{BookDepth, OrderBook};
use crate::config::{EngineConfig, MarketPricing, SettlementMode};

/// Price-time settlement engine for a single symbol
///
/// Owns the book and the last transacted price on each side. Market orders
/// resolve to the best opposing limit price, or to their own side's last
/// transacted price when the opposing side has no active limit order at
/// the top.
///
/// Every operation runs to completion; callers that share an engine must
/// hold one exclusive lock around `submit`/`cancel`/`settle`.
pub struct SettlementEngine {
    book: OrderBook,
    last_ask_price: Price,
    last_bid_price: Price,
    config: EngineConfig,
    /// Fills produced by automatic settlement, handed out by the next `settle()`
    pending: Vec<Fill>,
}

impl SettlementEngine {
    /// Create an engine; the configured seed prices stand in for the last
    /// trade until one happens
    pub fn new(config: EngineConfig, ids: impl IdGenerator + 'static) -> Self {
        info!(
            "Settlement engine created (seed ask {}, seed bid {}, {:?}, {:?})",
            config.initial_ask_price,
            config.initial_bid_price,
            config.settlement,
            config.market_pricing
        );

        let mut engine = Self {
            book: OrderBook::new(ids),
            last_ask_price: config.initial_ask_price,
            last_bid_price: config.initial_bid_price,
            config,
            pending: Vec::new(),
        };
        engine.refresh_market_prices();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn last_ask_price(&self) -> Price {
        self.last_ask_price
    }

    pub fn last_bid_price(&self) -> Price {
        self.last_bid_price
    }

    fn last_price(&self, side: Side) -> Price {
        match side {
            Side::Ask => self.last_ask_price,
            Side::Bid => self.last_bid_price,
        }
    }

    /// Create an order stamped with the engine's own sequence counter and
    /// queue it
    pub fn submit_order(&mut self, request: OrderRequest) -> OrderSnapshot {
        let order = self.book.create_order(&request);
        self.accept(order)
    }

    /// Same as [`SettlementEngine::submit_order`] with an externally
    /// supplied sequence number, which must advance past every number seen
    pub fn submit_sequenced(
        &mut self,
        seq_no: SeqNo,
        request: OrderRequest,
    ) -> EngineResult<OrderSnapshot> {
        let order = self.book.create_sequenced(seq_no, &request)?;
        Ok(self.accept(order))
    }

    fn accept(&mut self, order: Order) -> OrderSnapshot {
        if order.status() == OrderStatus::Rejected {
            warn!("Order {} rejected", order.id());
            return order.serialize(&*self);
        }

        let order = match self.config.market_pricing {
            MarketPricing::Captured if order.order_type() == OrderType::Market => {
                let price = self.resolve_market_price(order.side());
                order.with_captured_price(price)
            }
            _ => order,
        };

        let seq_no = order.seq_no();
        let mut snapshot = order.serialize(&*self);
        self.book.enqueue(order);
        self.refresh_market_prices();

        if self.config.settlement == SettlementMode::OnSubmit {
            let fills = self.run_settlement();
            self.pending.extend(fills);
            match self.book.snapshot(seq_no) {
                Some(latest) => snapshot = latest,
                // fully filled and already evicted
                None => {
                    snapshot.remaining_quantity = Decimal::ZERO;
                    snapshot.status = OrderStatus::Filled;
                }
            }
        }

        snapshot
    }

    /// Cancel an active order by id
    ///
    /// The order keeps its heap slot until the settlement loop evicts it.
    pub fn cancel_order(&mut self, id: &str) -> EngineResult<String> {
        match self.book.cancel(id) {
            Some(order) => {
                debug!(
                    "Cancelled order {} with {} remaining",
                    id,
                    order.remaining_quantity()
                );
                self.refresh_market_prices();
                Ok(format!("order {id} cancelled"))
            }
            None => {
                warn!("Cancel failed, order {} not found", id);
                Err(EngineError::OrderNotFound(id.to_string()))
            }
        }
    }

    /// Match best ask against best bid while their prices overlap
    ///
    /// Returns every fill of this invocation in emission order, preceded by
    /// fills buffered from automatic settlement. Calling it again with
    /// nothing new to match returns an empty vector.
    pub fn settle(&mut self) -> Vec<Fill> {
        let mut fills = std::mem::take(&mut self.pending);
        fills.extend(self.run_settlement());
        if !fills.is_empty() {
            info!(
                "Settled {} fills, last ask {}, last bid {}",
                fills.len(),
                self.last_ask_price,
                self.last_bid_price
            );
        }
        fills
    }

    fn run_settlement(&mut self) -> Vec<Fill> {
        let mut fills = Vec::new();

        loop {
            self.refresh_market_prices();

            let (Some(ask), Some(bid)) = (self.book.peek(Side::Ask), self.book.peek(Side::Bid))
            else {
                break;
            };

            // lazy eviction of cancelled orders
            let Some(ask_order) = self.book.live_order(ask.seq_no) else {
                self.book.evict(Side::Ask);
                continue;
            };
            let Some(bid_order) = self.book.live_order(bid.seq_no) else {
                self.book.evict(Side::Bid);
                continue;
            };

            let ask_price = ask_order.price(&self.book);
            let bid_price = bid_order.price(&self.book);
            if ask_price > bid_price {
                break;
            }

            let quantity = ask_order
                .remaining_quantity()
                .min(bid_order.remaining_quantity());
            let ask_fill = Fill::new(ask_order.id().clone(), Side::Ask, ask_price, quantity);
            let bid_fill = Fill::new(bid_order.id().clone(), Side::Bid, bid_price, quantity);
            debug!(
                "Matched ask {} @ {} with bid {} @ {} for {}",
                ask_fill.id, ask_price, bid_fill.id, bid_price, quantity
            );

            let ask_filled = self.book.fill(ask.seq_no, quantity);
            let bid_filled = self.book.fill(bid.seq_no, quantity);

            // whichever order arrived first is reported first
            if ask.seq_no < bid.seq_no {
                fills.push(ask_fill);
                fills.push(bid_fill);
            } else {
                fills.push(bid_fill);
                fills.push(ask_fill);
            }

            self.last_ask_price = ask_price;
            self.last_bid_price = bid_price;

            if ask_filled {
                self.book.evict(Side::Ask);
            }
            if bid_filled {
                self.book.evict(Side::Bid);
            }
        }

        fills
    }

    /// Best ask price minus best bid price
    pub fn spread(&self) -> Option<Price> {
        self.book.spread()
    }

    pub fn best_bid(&self) -> Option<OrderSnapshot> {
        self.book.best_bid()
    }

    pub fn best_ask(&self) -> Option<OrderSnapshot> {
        self.book.best_ask()
    }

    pub fn depth(&self) -> BookDepth {
        self.book.depth()
    }

    /// Snapshot of an active order
    pub fn order(&self, id: &str) -> Option<OrderSnapshot> {
        self.book.lookup(id).map(|order| order.serialize(&self.book))
    }

    /// Current resolvable price for a market order on `side`
    ///
    /// The best active limit order on the opposing side, even when market
    /// orders rank above it; otherwise this side's last transacted price.
    fn resolve_market_price(&self, side: Side) -> Price {
        self.book
            .best_limit(side.opposite())
            .map(|order| order.price(&self.book))
            .unwrap_or_else(|| self.last_price(side))
    }

    /// Push the current market prices into the book's comparators
    fn refresh_market_prices(&mut self) {
        let ask = self.resolve_market_price(Side::Ask);
        let bid = self.resolve_market_price(Side::Bid);
        self.book.set_market_prices(ask, bid);
    }
}

impl PriceSource for SettlementEngine {
    fn market_price(&self, side: Side) -> Price {
        self.resolve_market_price(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use rust_decimal_macros::dec;

    fn engine(config: EngineConfig) -> SettlementEngine {
        SettlementEngine::new(config, SequentialIdGenerator::new())
    }

    #[test]
    fn test_market_order_resolves_to_opposing_limit() {
        let mut engine = engine(EngineConfig::default());
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(7), dec!(1)));
        let order = engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));
        assert_eq!(order.price, dec!(7));
        assert_eq!(order.status, OrderStatus::Active);
    }

    #[test]
    fn test_market_order_ignores_opposing_market() {
        let mut engine = engine(EngineConfig::with_market_price(dec!(4)));
        engine.submit_order(OrderRequest::market(Side::Bid, dec!(1)));
        let ask = engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));
        assert_eq!(ask.price, dec!(4));
    }

    #[test]
    fn test_market_order_sees_limit_below_opposing_market() {
        let mut engine = engine(EngineConfig::with_market_price(dec!(10)));
        engine.submit_order(OrderRequest::market(Side::Bid, dec!(1)));
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(5), dec!(1)));
        let ask = engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));

        assert_eq!(ask.price, dec!(5));
        assert_eq!(engine.market_price(Side::Ask), dec!(5));
        assert_eq!(engine.best_bid().unwrap().id, "1");
    }

    #[test]
    fn test_market_price_follows_cancellation() {
        let mut engine = engine(EngineConfig::with_market_price(dec!(1)));
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(9), dec!(1)));
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(8), dec!(1)));
        engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));
        assert_eq!(engine.order("3").unwrap().price, dec!(9));

        engine.cancel_order("1").unwrap();
        assert_eq!(engine.order("3").unwrap().price, dec!(8));
    }

    #[test]
    fn test_captured_market_price_does_not_float() {
        let config = EngineConfig::default().market_pricing(MarketPricing::Captured);
        let mut engine = engine(config);
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(3), dec!(1)));
        engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));
        engine.cancel_order("1").unwrap();
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(2), dec!(1)));

        assert_eq!(engine.order("2").unwrap().price, dec!(3));
        assert!(engine.settle().is_empty());
    }

    #[test]
    fn test_floating_market_price_does_float() {
        let mut engine = engine(EngineConfig::default());
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(3), dec!(1)));
        engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));
        engine.cancel_order("1").unwrap();
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(2), dec!(1)));

        let fills = engine.settle();
        assert_eq!(
            fills,
            vec![
                Fill::new("2", Side::Ask, dec!(2), dec!(1)),
                Fill::new("3", Side::Bid, dec!(2), dec!(1)),
            ]
        );
    }

    #[test]
    fn test_settle_on_submit_buffers_fills() {
        let config = EngineConfig::default().settlement(SettlementMode::OnSubmit);
        let mut engine = engine(config);
        engine.submit_order(OrderRequest::limit(Side::Ask, dec!(1), dec!(1)));
        let bid = engine.submit_order(OrderRequest::limit(Side::Bid, dec!(1), dec!(3)));
        assert_eq!(bid.status, OrderStatus::Active);
        assert_eq!(bid.remaining_quantity, dec!(2));

        let ask = engine.submit_order(OrderRequest::limit(Side::Ask, dec!(1), dec!(2)));
        assert_eq!(ask.status, OrderStatus::Filled);
        assert_eq!(ask.remaining_quantity, Decimal::ZERO);

        let fills = engine.settle();
        assert_eq!(fills.len(), 4);
        assert_eq!(fills[0], Fill::new("1", Side::Ask, dec!(1), dec!(1)));
        assert_eq!(fills[3], Fill::new("3", Side::Ask, dec!(1), dec!(2)));
        assert!(engine.settle().is_empty());
    }

    #[test]
    fn test_rejected_request() {
        let mut engine = engine(EngineConfig::default());
        let order = engine.submit_order(OrderRequest::market(Side::Bid, dec!(0)));
        assert_eq!(order.status, OrderStatus::Rejected);
        assert!(engine.best_bid().is_none());
        assert!(matches!(
            engine.cancel_order(&order.id),
            Err(EngineError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_submit_sequenced() {
        let mut engine = engine(EngineConfig::default());
        let order = engine
            .submit_sequenced(5, OrderRequest::limit(Side::Ask, dec!(1), dec!(1)))
            .unwrap();
        assert_eq!(order.seq_no, 5);

        let stale = engine.submit_sequenced(3, OrderRequest::limit(Side::Ask, dec!(1), dec!(1)));
        assert_eq!(
            stale,
            Err(EngineError::StaleSequence {
                last: 5,
                received: 3
            })
        );

        let next = engine.submit_order(OrderRequest::limit(Side::Bid, dec!(1), dec!(1)));
        assert_eq!(next.seq_no, 6);
    }

    #[test]
    fn test_spread_with_market_order() {
        let mut engine = engine(EngineConfig::default());
        engine.submit_order(OrderRequest::market(Side::Ask, dec!(1)));
        engine.submit_order(OrderRequest::limit(Side::Bid, dec!(3), dec!(1)));
        assert_eq!(engine.spread(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_engine_as_price_source() {
        let mut engine = engine(EngineConfig::with_market_price(dec!(2)));
        assert_eq!(engine.market_price(Side::Ask), dec!(2));
        engine.submit_order(OrderRequest::limit(Side::Ask, dec!(6), dec!(1)));
        assert_eq!(engine.market_price(Side::Bid), dec!(6));
        assert_eq!(engine.market_price(Side::Ask), dec!(2));
    }
}
