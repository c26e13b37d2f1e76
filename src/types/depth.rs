//! Aggregated book depth: per-level price and total quantity.
//!
//! Snapshots are read straight from the incrementally maintained level
//! aggregates; producing one never rescans individual orders.

use crate::types::{Price, Quantity};

/// One price level: its price and the total remaining quantity resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

impl LevelInfo {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

/// Depth snapshot for both sides of the book.
///
/// Bid levels are ordered best-first descending, ask levels best-first
/// ascending, matching book iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookDepth {
    bids: Vec<LevelInfo>,
    asks: Vec<LevelInfo>,
}

impl BookDepth {
    pub fn new(bids: Vec<LevelInfo>, asks: Vec<LevelInfo>) -> Self {
        Self { bids, asks }
    }

    /// Bid levels, best (highest) price first
    #[inline]
    pub fn bids(&self) -> &[LevelInfo] {
        &self.bids
    }

    /// Ask levels, best (lowest) price first
    #[inline]
    pub fn asks(&self) -> &[LevelInfo] {
        &self.asks
    }

    /// Best bid price, if any bids rest
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|level| level.price)
    }

    /// Best ask price, if any asks rest
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|level| level.price)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
