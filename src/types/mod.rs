//! Core data types for the matching engine.
//!
//! ## Types
//!
//! - [`Order`]: one resting or transient order and its fill state
//! - [`Side`]: Buy or Sell
//! - [`OrderType`]: admission behavior (GoodTillCancel, FillAndKill, ...)
//! - [`OrderModify`]: descriptor that yields a replacement order
//! - [`Trade`]: one match event, carrying both the bid and ask fill
//! - [`BookDepth`]: aggregated per-level depth snapshot
//!
//! ## Numeric Conventions
//!
//! Prices are signed integers (synthetic instruments may trade at negative
//! prices). Quantities are unsigned and never negative. Order ids are
//! caller-supplied and must be unique among live orders.

mod depth;
mod order;
mod trade;

pub use depth::{BookDepth, LevelInfo};
pub use order::{Order, OrderModify, OrderType, Side};
pub use trade::{Trade, TradeInfo, Trades};

/// Limit price. Signed: negative prices are valid.
pub type Price = i64;

/// Order quantity. Never negative.
pub type Quantity = u64;

/// Caller-supplied order identifier.
pub type OrderId = u64;

/// A batch of order ids, e.g. for batched cancellation.
pub type OrderIds = Vec<OrderId>;

/// Sentinel carried by market orders until admission reprices them.
///
/// A market order has no limit price of its own; it receives the worst
/// resting opposing price when it enters the book.
pub const INVALID_PRICE: Price = Price::MIN;
