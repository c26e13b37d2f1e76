//! # Matchbook
//!
//! In-memory limit order book matching engine for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: order, trade, and depth data structures
//! - **OrderBook**: slab-arena book with intrusive FIFO price levels and
//!   incrementally maintained level aggregates
//! - **Engine**: thread-safe surface serializing all mutations, owning
//!   the background good-for-day pruner
//! - **Script**: line-oriented command parsing for external harnesses
//!
//! ## Matching Rules
//!
//! Price-time priority: best price first, FIFO within a level. Admission
//! is type-specific: GoodTillCancel and GoodForDay rest unconditionally;
//! FillAndKill requires immediate marketability; FillOrKill requires the
//! whole quantity up front; Market orders are repriced to the worst
//! opposing price and then behave as GoodTillCancel. Rejections are
//! silent: an empty trade list, no error.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: orders, trades, depth
pub mod types;

/// Order book core: arena, price levels, matching
pub mod orderbook;

/// Thread-safe engine and good-for-day pruner
pub mod engine;

/// Command-script parsing for test harnesses
pub mod script;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::{EngineConfig, Orderbook};
pub use orderbook::{Book, OrderNode, PriceLevel};
pub use types::{
    BookDepth, LevelInfo, Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, Trade,
    TradeInfo, Trades,
};
