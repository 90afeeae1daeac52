use std::collections::HashMap;

use log::{debug, warn};
use meridian_core::{
    Order, OrderId, OrderRequest, OrderSnapshot, OrderStatus, OrderType, Price, PriceSource,
    Quantity, SeqNo, Sequence, Side,
};
use meridian_ports::{EngineError, EngineResult, IdGenerator};
use serde::{Deserialize, Serialize};

use crate::priority::{BookEntry, PriceTimePriority};
use crate::priority_queue::{Comparator, PriorityQueue};

type SideQueue = PriorityQueue<BookEntry, PriceTimePriority>;

/// Both sides of the book in heap order, for inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDepth {
    pub bids: Vec<OrderSnapshot>,
    pub asks: Vec<OrderSnapshot>,
}

/// Single-symbol order book
///
/// The queues hold lightweight [`BookEntry`] handles; orders live in an
/// arena keyed by `seq_no` until they are physically dequeued. The id
/// index only covers active orders, so a terminal order is unreachable by
/// id even while it still sits in a heap slot awaiting eviction.
pub struct OrderBook {
    bids: SideQueue,
    asks: SideQueue,
    /// Every order still present in a queue
    orders: HashMap<SeqNo, Order>,
    /// Active orders by id
    index: HashMap<OrderId, SeqNo>,
    sequence: Sequence,
    ids: Box<dyn IdGenerator>,
}

impl OrderBook {
    pub fn new(ids: impl IdGenerator + 'static) -> Self {
        Self {
            bids: PriorityQueue::new(PriceTimePriority::bids()),
            asks: PriorityQueue::new(PriceTimePriority::asks()),
            orders: HashMap::new(),
            index: HashMap::new(),
            sequence: Sequence::new(),
            ids: Box::new(ids),
        }
    }

    /// Create an order stamped with the next internal sequence number
    ///
    /// Malformed requests come back `Rejected`; they still consume an id and
    /// a sequence number.
    pub fn create_order(&mut self, request: &OrderRequest) -> Order {
        let seq_no = self.sequence.increment();
        self.build_order(seq_no, request)
    }

    /// Create an order with an externally assigned sequence number
    ///
    /// The number must advance past everything assigned so far.
    pub fn create_sequenced(
        &mut self,
        seq_no: SeqNo,
        request: &OrderRequest,
    ) -> EngineResult<Order> {
        let last = self.sequence.current();
        if seq_no <= last {
            return Err(EngineError::StaleSequence {
                last,
                received: seq_no,
            });
        }
        self.sequence.set(seq_no);
        Ok(self.build_order(seq_no, request))
    }

    fn build_order(&mut self, seq_no: SeqNo, request: &OrderRequest) -> Order {
        let mut order = Order::new(self.ids.next_id(), seq_no, request);
        if !request.is_well_formed() {
            warn!("Rejecting malformed request {:?} (seq {})", request, seq_no);
            order.set_status(OrderStatus::Rejected);
        }
        order
    }

    /// Queue an order on its own side and index it by id
    ///
    /// Orders that are not active are ignored.
    pub fn enqueue(&mut self, order: Order) {
        if order.status().is_terminal() {
            debug!("Not queuing order {} in state {:?}", order.id(), order.status());
            return;
        }

        let side = order.side();
        let entry = BookEntry {
            seq_no: order.seq_no(),
            fixed_price: order.kind().fixed_price(),
        };
        debug!(
            "Queued {} order {} (seq {}, {:?}) qty {}",
            side,
            order.id(),
            entry.seq_no,
            order.kind(),
            order.quantity()
        );

        self.index.insert(order.id().clone(), entry.seq_no);
        self.orders.insert(entry.seq_no, order);
        self.queue_mut(side).enqueue(entry);
    }

    pub fn queue(&self, side: Side) -> &PriorityQueue<BookEntry, PriceTimePriority> {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn queue_mut(&mut self, side: Side) -> &mut SideQueue {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Root entry of one side, terminal or not
    pub fn peek(&self, side: Side) -> Option<BookEntry> {
        self.queue(side).peek().copied()
    }

    /// Order still physically queued under `seq_no`
    pub fn order(&self, seq_no: SeqNo) -> Option<&Order> {
        self.orders.get(&seq_no)
    }

    /// Queued order under `seq_no`, only if it can still match
    pub fn live_order(&self, seq_no: SeqNo) -> Option<&Order> {
        self.order(seq_no).filter(|order| order.is_active())
    }

    /// Active order by id
    pub fn lookup(&self, id: &str) -> Option<&Order> {
        self.index.get(id).and_then(|seq_no| self.orders.get(seq_no))
    }

    /// Highest-priority active order on one side
    ///
    /// Normally the root. When the root is terminal and still awaiting
    /// eviction, the active entries are scanned instead; nothing is removed.
    pub fn best(&self, side: Side) -> Option<&Order> {
        let queue = self.queue(side);
        let root = queue.peek()?;
        if let Some(order) = self.live_order(root.seq_no) {
            return Some(order);
        }

        queue
            .items()
            .iter()
            .filter(|entry| self.live_order(entry.seq_no).is_some())
            .min_by(|a, b| queue.comparator().compare(*a, *b))
            .and_then(|entry| self.live_order(entry.seq_no))
    }

    /// Highest-priority active limit order on one side
    ///
    /// Looks past floating market orders ranked above it.
    pub fn best_limit(&self, side: Side) -> Option<&Order> {
        let queue = self.queue(side);
        let is_limit = |order: &&Order| order.order_type() == OrderType::Limit;
        if let Some(root) = queue
            .peek()
            .and_then(|entry| self.live_order(entry.seq_no))
            .filter(is_limit)
        {
            return Some(root);
        }

        queue
            .items()
            .iter()
            .filter(|entry| entry.fixed_price.is_some())
            .filter_map(|entry| {
                self.live_order(entry.seq_no)
                    .filter(is_limit)
                    .map(|order| (entry, order))
            })
            .min_by(|(a, _), (b, _)| queue.comparator().compare(*a, *b))
            .map(|(_, order)| order)
    }

    pub fn best_bid(&self) -> Option<OrderSnapshot> {
        self.best(Side::Bid).map(|order| order.serialize(self))
    }

    pub fn best_ask(&self) -> Option<OrderSnapshot> {
        self.best(Side::Ask).map(|order| order.serialize(self))
    }

    /// Best ask price minus best bid price; `None` when either side is empty
    pub fn spread(&self) -> Option<Price> {
        let ask = self.best(Side::Ask)?.price(self);
        let bid = self.best(Side::Bid)?.price(self);
        Some(ask - bid)
    }

    /// Set the price floating market orders resolve to on each side
    ///
    /// A side holding floating entries is re-heapified when its price moves,
    /// since those entries now rank differently against fixed-price ones.
    pub fn set_market_prices(&mut self, ask: Price, bid: Price) {
        for (side, price) in [(Side::Ask, ask), (Side::Bid, bid)] {
            let queue = self.queue_mut(side);
            if queue.comparator().market_price() == price {
                continue;
            }
            queue.comparator_mut().set_market_price(price);
            if queue.items().iter().any(|entry| entry.fixed_price.is_none()) {
                debug!("Re-ranking {} side at market price {}", side, price);
                queue.rebuild();
            }
        }
    }

    /// Consume `quantity` from a queued order
    ///
    /// Returns true once the order is fully filled; it then leaves the id
    /// index but stays queued until [`OrderBook::evict`].
    pub fn fill(&mut self, seq_no: SeqNo, quantity: Quantity) -> bool {
        let Some(order) = self.orders.get_mut(&seq_no) else {
            return false;
        };
        order.decrease_quantity(quantity);
        if order.status() != OrderStatus::Filled {
            return false;
        }
        self.index.remove(order.id());
        true
    }

    /// Mark an active order cancelled
    ///
    /// The heap slot is left for the settlement loop to evict.
    pub fn cancel(&mut self, id: &str) -> Option<&Order> {
        let seq_no = self.index.remove(id)?;
        let order = self.orders.get_mut(&seq_no)?;
        order.set_status(OrderStatus::Cancelled);
        Some(&*order)
    }

    /// Physically remove the root of one side
    pub fn evict(&mut self, side: Side) -> Option<Order> {
        let entry = self.queue_mut(side).dequeue()?;
        let order = self.orders.remove(&entry.seq_no)?;
        // filled and cancelled orders already left the index
        if order.is_active() {
            self.index.remove(order.id());
        }
        debug!(
            "Evicted {} order {} (seq {}) in state {:?}",
            side,
            order.id(),
            entry.seq_no,
            order.status()
        );
        Some(order)
    }

    /// Snapshot of a queued order
    pub fn snapshot(&self, seq_no: SeqNo) -> Option<OrderSnapshot> {
        self.order(seq_no).map(|order| order.serialize(self))
    }

    /// Every queued order, terminal ones included, in heap array order
    pub fn depth(&self) -> BookDepth {
        let side = |queue: &SideQueue| -> Vec<OrderSnapshot> {
            queue
                .items()
                .iter()
                .filter_map(|entry| self.snapshot(entry.seq_no))
                .collect()
        };
        BookDepth {
            bids: side(&self.bids),
            asks: side(&self.asks),
        }
    }

    /// Number of active orders
    pub fn active_orders(&self) -> usize {
        self.index.len()
    }

    /// Last sequence number assigned
    pub fn last_seq_no(&self) -> SeqNo {
        self.sequence.current()
    }
}

/// Market orders resolve at the price last pushed through
/// [`OrderBook::set_market_prices`].
impl PriceSource for OrderBook {
    fn market_price(&self, side: Side) -> Price {
        self.queue(side).comparator().market_price()
    }
}
