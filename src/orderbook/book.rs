//! Single-instrument limit order book core.
//!
//! ## Architecture
//!
//! - **Slab arena**: single owner of every live order; the side maps and
//!   the directory hold slab keys into it, never separate ownership
//! - **BTreeMap side maps**: bids keyed by `Reverse(price)` (best-first
//!   descending), asks keyed by price (best-first ascending)
//! - **Directory**: order id to slab key, for O(1) cancel and modify
//!
//! Each [`PriceLevel`] carries the incrementally maintained per-price
//! aggregate; admission checks and depth snapshots read those aggregates
//! and never rescan individual orders.
//!
//! `Book` is the single-threaded core. Matching runs synchronously inside
//! [`add_order`](Book::add_order) and [`modify_order`](Book::modify_order);
//! the thread-safe engine in [`crate::engine`] serializes access.
//!
//! ## Example
//!
//! ```
//! use matchbook::orderbook::Book;
//! use matchbook::types::{Order, OrderType, Side};
//!
//! let mut book = Book::new();
//! book.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10));
//! let trades = book.add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 4));
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(book.len(), 1);
//! assert_eq!(book.best_bid(), Some(100));
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use slab::Slab;
use tracing::debug;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{
    BookDepth, LevelInfo, Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, Trade,
    TradeInfo, Trades,
};

/// Limit order book for one instrument.
#[derive(Debug, Default)]
pub struct Book {
    /// Arena owning every live order
    orders: Slab<OrderNode>,

    /// Bid levels, highest price first
    bids: BTreeMap<Reverse<Price>, PriceLevel>,

    /// Ask levels, lowest price first
    asks: BTreeMap<Price, PriceLevel>,

    /// Order id to slab key
    index: HashMap<OrderId, usize>,
}

impl Book {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with pre-allocated order storage
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of live orders
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no orders rest on either side
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of active bid levels
    #[inline]
    pub fn bid_level_count(&self) -> usize {
        self.bids.len()
    }

    /// Number of active ask levels
    #[inline]
    pub fn ask_level_count(&self) -> usize {
        self.asks.len()
    }

    /// Best (highest) bid price
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next().map(|key| key.0)
    }

    /// Best (lowest) ask price
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// True if an order with this id is live
    #[inline]
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Look up a live order by id
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        let key = *self.index.get(&order_id)?;
        Some(&self.orders[key].order)
    }

    /// Iterate over all live orders (side map order is not implied)
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter().map(|(_, node)| &node.order)
    }

    /// Depth snapshot, read from the level aggregates: bid levels
    /// best-first descending, ask levels best-first ascending.
    pub fn depth(&self) -> BookDepth {
        let bids = self
            .bids
            .values()
            .map(|level| LevelInfo::new(level.price, level.total_quantity))
            .collect();
        let asks = self
            .asks
            .values()
            .map(|level| LevelInfo::new(level.price, level.total_quantity))
            .collect();
        BookDepth::new(bids, asks)
    }

    // ========================================================================
    // Admission
    // ========================================================================

    /// Submit an order: admission checks, insertion, then a synchronous
    /// matching pass. Returns the trades the submission produced.
    ///
    /// Rejections are silent (empty result, order discarded): duplicate
    /// ids, market orders with no opposing liquidity, unmarketable
    /// FillAndKill orders, and FillOrKill orders whose full quantity is
    /// not immediately achievable.
    pub fn add_order(&mut self, mut order: Order) -> Trades {
        if self.index.contains_key(&order.id()) {
            debug!(order_id = order.id(), "rejected: duplicate order id");
            return Trades::new();
        }

        if order.order_type() == OrderType::Market {
            // Reprice to the worst resting opposing price: guarantees a
            // match attempt at the cost of far-from-touch fills.
            let worst = match order.side() {
                Side::Buy => self.asks.keys().next_back().copied(),
                Side::Sell => self.bids.keys().next_back().map(|key| key.0),
            };
            match worst {
                Some(price) => order.to_good_till_cancel(price),
                None => {
                    debug!(order_id = order.id(), "rejected: market order with empty opposing book");
                    return Trades::new();
                }
            }
        }

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            debug!(order_id = order.id(), "rejected: fill-and-kill not marketable");
            return Trades::new();
        }

        if order.order_type() == OrderType::FillOrKill
            && !self.can_fully_fill(order.side(), order.price(), order.initial_quantity())
        {
            debug!(order_id = order.id(), "rejected: fill-or-kill not fully fillable");
            return Trades::new();
        }

        let id = order.id();
        let side = order.side();
        let price = order.price();

        let key = self.orders.insert(OrderNode::new(order));
        self.index.insert(id, key);

        match side {
            Side::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| PriceLevel::new(price))
                .push_back(key, &mut self.orders),
            Side::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| PriceLevel::new(price))
                .push_back(key, &mut self.orders),
        }

        self.match_orders()
    }

    /// True if an order at `price` would cross the opposing best price.
    fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => match self.best_ask() {
                Some(best_ask) => price >= best_ask,
                None => false,
            },
            Side::Sell => match self.best_bid() {
                Some(best_bid) => price <= best_bid,
                None => false,
            },
        }
    }

    /// True if `quantity` is fully achievable at prices at least as
    /// favorable as `price`, by accumulating level aggregates from the
    /// opposing best. O(levels scanned), independent of order count.
    fn can_fully_fill(&self, side: Side, price: Price, mut quantity: Quantity) -> bool {
        match side {
            Side::Buy => {
                for level in self.asks.values() {
                    if level.price > price {
                        break;
                    }
                    if quantity <= level.total_quantity {
                        return true;
                    }
                    quantity -= level.total_quantity;
                }
            }
            Side::Sell => {
                for level in self.bids.values() {
                    if level.price < price {
                        break;
                    }
                    if quantity <= level.total_quantity {
                        return true;
                    }
                    quantity -= level.total_quantity;
                }
            }
        }
        false
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Cross the books while the best bid price meets the best ask price.
    ///
    /// Head orders match for min(remaining) under time priority; fully
    /// filled orders leave the book, empty levels leave the maps. After
    /// the loop a FillAndKill order left resting at either touch is
    /// cancelled: those never survive a match attempt.
    fn match_orders(&mut self) -> Trades {
        let mut trades = Trades::new();

        loop {
            let (Some(bid_price), Some(ask_price)) = (self.best_bid(), self.best_ask()) else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            let bid_key = self
                .bids
                .values()
                .next()
                .and_then(PriceLevel::peek_head)
                .expect("bid level with no orders");
            let ask_key = self
                .asks
                .values()
                .next()
                .and_then(PriceLevel::peek_head)
                .expect("ask level with no orders");

            let quantity = self.orders[bid_key]
                .remaining()
                .min(self.orders[ask_key].remaining());
            let bid_id = self.orders[bid_key].order_id();
            let ask_id = self.orders[ask_key].order_id();

            self.orders[bid_key].order.fill(quantity);
            self.orders[ask_key].order.fill(quantity);

            trades.push(Trade::new(
                TradeInfo::new(bid_id, bid_price, quantity),
                TradeInfo::new(ask_id, ask_price, quantity),
            ));

            self.settle_fill(Side::Buy, bid_key, quantity);
            self.settle_fill(Side::Sell, ask_key, quantity);
        }

        if let Some(order_id) = self.resting_fill_and_kill(Side::Buy) {
            self.cancel_order(order_id);
        }
        if let Some(order_id) = self.resting_fill_and_kill(Side::Sell) {
            self.cancel_order(order_id);
        }

        trades
    }

    /// Update aggregates after a fill; evict the order and its level if
    /// the fill completed it.
    fn settle_fill(&mut self, side: Side, key: usize, matched: Quantity) {
        let price = self.orders[key].price();
        let filled = self.orders[key].is_filled();

        match side {
            Side::Buy => {
                let map_key = Reverse(price);
                let level = self.bids.get_mut(&map_key).expect("missing bid level");
                level.reduce_quantity(matched);
                if filled {
                    // Remaining is zero by now; this just unlinks and drops the count.
                    level.remove(key, &mut self.orders);
                }
                let now_empty = level.is_empty();
                if now_empty {
                    self.bids.remove(&map_key);
                }
            }
            Side::Sell => {
                let level = self.asks.get_mut(&price).expect("missing ask level");
                level.reduce_quantity(matched);
                if filled {
                    level.remove(key, &mut self.orders);
                }
                let now_empty = level.is_empty();
                if now_empty {
                    self.asks.remove(&price);
                }
            }
        }

        if filled {
            let node = self.orders.remove(key);
            self.index.remove(&node.order_id());
        }
    }

    /// Id of the head order at the given side's best level, if that order
    /// is a FillAndKill that survived the matching loop.
    fn resting_fill_and_kill(&self, side: Side) -> Option<OrderId> {
        let key = match side {
            Side::Buy => self.bids.values().next()?.peek_head()?,
            Side::Sell => self.asks.values().next()?.peek_head()?,
        };
        let order = &self.orders[key].order;
        (order.order_type() == OrderType::FillAndKill).then(|| order.id())
    }

    // ========================================================================
    // Cancel / Modify
    // ========================================================================

    /// Cancel a live order. Unknown ids are a silent no-op.
    ///
    /// Returns the cancelled order, if there was one.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Option<Order> {
        let key = self.index.remove(&order_id)?;
        let price = self.orders[key].price();
        let side = self.orders[key].order.side();

        match side {
            Side::Buy => {
                let map_key = Reverse(price);
                let level = self.bids.get_mut(&map_key).expect("missing bid level");
                level.remove(key, &mut self.orders);
                let now_empty = level.is_empty();
                if now_empty {
                    self.bids.remove(&map_key);
                }
            }
            Side::Sell => {
                let level = self.asks.get_mut(&price).expect("missing ask level");
                level.remove(key, &mut self.orders);
                let now_empty = level.is_empty();
                if now_empty {
                    self.asks.remove(&price);
                }
            }
        }

        Some(self.orders.remove(key).order)
    }

    /// Cancel a batch of orders in one pass.
    pub fn cancel_orders(&mut self, order_ids: &[OrderId]) {
        for &order_id in order_ids {
            self.cancel_order(order_id);
        }
    }

    /// Replace an existing order: cancel it and resubmit with the
    /// modification's fields and the preserved order type.
    ///
    /// Unknown ids yield an empty result. The replacement goes through
    /// full admission, so it may match immediately or be rejected under
    /// FillOrKill/FillAndKill/Market rules; queue position is lost.
    pub fn modify_order(&mut self, modify: OrderModify) -> Trades {
        let Some(&key) = self.index.get(&modify.order_id) else {
            return Trades::new();
        };
        let order_type = self.orders[key].order.order_type();

        self.cancel_order(modify.order_id);
        self.add_order(modify.to_order(order_type))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
