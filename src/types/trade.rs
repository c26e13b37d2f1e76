//! Trade types representing executed matches.
//!
//! Every match event pairs the bid-side fill with the ask-side fill. When
//! the two resting prices differ (a crossed submission), each side reports
//! its own price, so a single [`Trade`] may carry two distinct prices.

use crate::types::{OrderId, Price, Quantity};

/// One side's view of a match: which order, at what price, how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

impl TradeInfo {
    pub fn new(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            price,
            quantity,
        }
    }
}

/// A single match event between a bid and an ask.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Trade, TradeInfo};
///
/// let trade = Trade::new(
///     TradeInfo::new(1, 102, 5),
///     TradeInfo::new(4, 101, 5),
/// );
/// assert_eq!(trade.bid().order_id, 1);
/// assert_eq!(trade.ask().price, 101);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    bid: TradeInfo,
    ask: TradeInfo,
}

impl Trade {
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// The bid-side fill
    #[inline]
    pub fn bid(&self) -> &TradeInfo {
        &self.bid
    }

    /// The ask-side fill
    #[inline]
    pub fn ask(&self) -> &TradeInfo {
        &self.ask
    }

    /// Matched quantity (identical on both sides)
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// One submission can yield zero to many trades.
pub type Trades = Vec<Trade>;

// ============================================================================
// Unit Tests
// ============================================================================
