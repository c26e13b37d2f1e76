//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an [`Order`] with intrusive doubly-linked-list
//! pointers so a price level can unlink it in O(1) given its slab key.
//! The pointers are slab keys (`usize`), not references, so removal never
//! depends on iterator stability.
//!
//! ```text
//! head (oldest) <-> node <-> node <-> tail (newest)
//! ```

use crate::types::{Order, OrderId, Price, Quantity};

/// Order plus queue linkage, stored in the slab arena.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The order itself
    pub order: Order,

    /// Next (newer) order at the same price level, if any
    pub next: Option<usize>,

    /// Previous (older) order at the same price level, if any
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Wrap an order; the node starts unlinked.
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// True if the node is not part of any price-level queue
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id()
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.order.price()
    }

    #[inline]
    pub fn remaining(&self) -> Quantity {
        self.order.remaining_quantity()
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
