use std::cmp::Ordering;

use meridian_core::{Price, SeqNo, Side};
use rust_decimal::Decimal;

use crate::priority_queue::Comparator;

/// Heap slot for a resting order
///
/// Holds only what ordering needs; the order itself lives in the book's
/// arena under `seq_no`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub seq_no: SeqNo,
    /// `None` for market orders whose price floats with the book
    pub fixed_price: Option<Price>,
}

/// Price-time priority for one side of the book
///
/// - Asks: lowest price first
/// - Bids: highest price first
/// - Equal prices: lowest `seq_no` first
///
/// Floating market orders compare at `market_price`, which the engine
/// refreshes whenever the resolvable market price may have moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTimePriority {
    side: Side,
    market_price: Price,
}

impl PriceTimePriority {
    pub fn new(side: Side, market_price: Price) -> Self {
        Self { side, market_price }
    }

    pub fn asks() -> Self {
        Self::new(Side::Ask, Decimal::ZERO)
    }

    pub fn bids() -> Self {
        Self::new(Side::Bid, Decimal::ZERO)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn market_price(&self) -> Price {
        self.market_price
    }

    pub fn set_market_price(&mut self, price: Price) {
        self.market_price = price;
    }

    /// Effective price of an entry under the current market price
    pub fn price_of(&self, entry: &BookEntry) -> Price {
        entry.fixed_price.unwrap_or(self.market_price)
    }
}

impl Comparator<BookEntry> for PriceTimePriority {
    fn compare(&self, a: &BookEntry, b: &BookEntry) -> Ordering {
        let (price_a, price_b) = (self.price_of(a), self.price_of(b));
        let by_price = match self.side {
            Side::Ask => price_a.cmp(&price_b),
            Side::Bid => price_b.cmp(&price_a),
        };
        by_price.then(a.seq_no.cmp(&b.seq_no))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limit(seq_no: SeqNo, price: Price) -> BookEntry {
        BookEntry {
            seq_no,
            fixed_price: Some(price),
        }
    }

    fn market(seq_no: SeqNo) -> BookEntry {
        BookEntry {
            seq_no,
            fixed_price: None,
        }
    }

    #[test]
    fn test_ask_ascending_price() {
        let asks = PriceTimePriority::asks();
        assert_eq!(asks.compare(&limit(2, dec!(1)), &limit(1, dec!(2))), Ordering::Less);
    }

    #[test]
    fn test_bid_descending_price() {
        let bids = PriceTimePriority::bids();
        assert_eq!(bids.compare(&limit(2, dec!(2)), &limit(1, dec!(1))), Ordering::Less);
    }

    #[test]
    fn test_equal_price_earlier_first() {
        for priority in [PriceTimePriority::asks(), PriceTimePriority::bids()] {
            assert_eq!(
                priority.compare(&limit(1, dec!(5)), &limit(2, dec!(5))),
                Ordering::Less
            );
            assert_eq!(
                priority.compare(&limit(2, dec!(5)), &limit(1, dec!(5))),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn test_market_entry_uses_market_price() {
        let mut asks = PriceTimePriority::asks();
        asks.set_market_price(dec!(3));
        assert_eq!(asks.price_of(&market(1)), dec!(3));
        assert_eq!(asks.compare(&market(2), &limit(1, dec!(4))), Ordering::Less);

        asks.set_market_price(dec!(6));
        assert_eq!(asks.compare(&market(2), &limit(1, dec!(4))), Ordering::Greater);
    }
}
