//! Price level: FIFO queue plus the incrementally maintained aggregate.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at one price. Orders form
//! an intrusive doubly-linked list through the slab (time priority: new
//! orders append at the tail, matching consumes from the head, any order
//! unlinks in O(1) by slab key).
//!
//! The level also carries the per-price aggregate (`total_quantity` and
//! `order_count`), updated on every mutation and never recomputed by
//! scanning orders. FillOrKill feasibility walks these aggregates, which
//! keeps that check proportional to levels inspected rather than resting
//! orders.
//!
//! Aggregate invariant: `total_quantity` equals the sum of remaining
//! quantities of the queued orders and `order_count` equals their number.
//! A level whose count reaches zero is removed from the side map by the
//! caller; empty levels never persist.

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Price, Quantity};

/// All orders resting at a single price, plus the level aggregate.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price of this level
    pub price: Price,

    /// Sum of remaining quantities of all queued orders
    pub total_quantity: Quantity,

    /// Oldest order (slab key): matched first
    pub head: Option<usize>,

    /// Newest order (slab key): insertion point
    pub tail: Option<usize>,

    /// Number of queued orders
    pub order_count: usize,
}

impl PriceLevel {
    /// Create an empty level at `price`
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// True once the last order has been unlinked
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Oldest order's slab key, the next to match at this price
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Append an order at the tail, preserving time priority.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn push_back(&mut self, key: usize, arena: &mut Slab<OrderNode>) {
        let node = arena.get_mut(key).expect("invalid slab key");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = arena.get_mut(tail_key).expect("invalid tail key");
            tail_node.next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink an order from anywhere in the queue.
    ///
    /// Decrements the aggregate by the order's remaining quantity at
    /// removal time and returns that quantity.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn remove(&mut self, key: usize, arena: &mut Slab<OrderNode>) -> Quantity {
        let node = arena.get(key).expect("invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => arena.get_mut(prev).expect("invalid prev key").next = next_key,
            None => self.head = next_key,
        }
        match next_key {
            Some(next) => arena.get_mut(next).expect("invalid next key").prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = arena.get_mut(key).expect("invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= quantity;

        quantity
    }

    /// Account for a partial fill of a queued order.
    ///
    /// The order count is unchanged; a full fill is instead handled by
    /// [`remove`](PriceLevel::remove) after the fill has been applied.
    #[inline]
    pub fn reduce_quantity(&mut self, matched: Quantity) {
        self.total_quantity -= matched;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
