//! Meridian Matching
//!
//! Single-symbol matching core:
//!
//! - **PriorityQueue**: comparator-driven binary heap backing both sides
//! - **PriceTimePriority**: best price first, earliest arrival on ties
//! - **OrderBook**: queues, order arena, id index, point queries
//! - **SettlementEngine**: last-trade tracking and the settlement loop
//!
//! ```text
//! OrderRequest ──► OrderBook::create_order ──► enqueue (bids | asks)
//!                                                   │
//!                  settle() ◄───────────────────────┘
//!                     │  peek best ask / best bid
//!                     │  evict cancelled roots
//!                     │  match while ask <= bid
//!                     ▼
//!                  Vec<Fill> (earlier seq_no first)
//! ```

mod book;
mod config;
mod engine;
mod ids;
mod priority;
mod priority_queue;

pub use book::{BookDepth, OrderBook};
pub use config::{EngineConfig, MarketPricing, SettlementMode};
pub use engine::SettlementEngine;
pub use ids::{SequentialIdGenerator, UuidIdGenerator};
pub use priority::{BookEntry, PriceTimePriority};
pub use priority_queue::{Comparator, PriorityQueue};

// Re-export the ports for convenience
pub use meridian_ports::{EngineError, EngineResult, IdGenerator};
