//! Order, side, and order-type definitions.
//!
//! ## Order Lifecycle
//!
//! An [`Order`] is created by the caller, admitted (or silently rejected)
//! by the book, mutated only through fills, and destroyed when fully
//! filled or cancelled. The single exception to "the price never changes"
//! is the one-time conversion of a market order into a good-till-cancel
//! order at admission time; see [`Order::to_good_till_cancel`].
//!
//! ## Fatal Invariants
//!
//! Filling past the remaining quantity or repricing a non-market order
//! indicates corrupted book state, never a caller mistake, so both panic
//! with the offending order id rather than returning an error.

use crate::types::{OrderId, Price, Quantity, INVALID_PRICE};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy (bid) or Sell (ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the instrument
    Buy,
    /// Sell order (ask) - wants to sell the instrument
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// Admission behavior of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Rests until explicitly cancelled
    GoodTillCancel,
    /// Executes whatever is immediately available, never rests
    FillAndKill,
    /// Executes only if the entire quantity is immediately fillable
    FillOrKill,
    /// Rests until cancelled or pruned at the daily cutoff
    GoodForDay,
    /// Takes liquidity at any price; repriced to the worst opposing
    /// price at admission, then behaves as GoodTillCancel
    Market,
}

// ============================================================================
// Order struct
// ============================================================================

/// A single order and its fill state.
///
/// Fields are private: `remaining_quantity` only ever decreases (via
/// [`fill`](Order::fill)) and `price` only changes through the one-time
/// market-order conversion.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Order, OrderType, Side};
///
/// let mut order = Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10);
/// order.fill(4);
/// assert_eq!(order.remaining_quantity(), 6);
/// assert_eq!(order.filled_quantity(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new order. `remaining` starts equal to `quantity`.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Create a market order. It carries [`INVALID_PRICE`] until admission
    /// converts it with [`to_good_till_cancel`](Order::to_good_till_cancel).
    pub fn market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, id, side, INVALID_PRICE, quantity)
    }

    /// Order id
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Buy or Sell
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Limit price ([`INVALID_PRICE`] for an unconverted market order)
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Admission behavior
    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Quantity at submission
    #[inline]
    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    /// Quantity still unfilled
    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity filled so far
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Apply a fill of exactly `quantity`.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` exceeds the remaining quantity. The matching
    /// loop always fills min(bid remaining, ask remaining), so this firing
    /// means the book state is corrupt.
    pub fn fill(&mut self, quantity: Quantity) {
        if quantity > self.remaining_quantity {
            panic!(
                "order {}: fill of {} exceeds remaining quantity {}",
                self.id, quantity, self.remaining_quantity
            );
        }
        self.remaining_quantity -= quantity;
    }

    /// Convert a market order into a good-till-cancel order at `price`.
    ///
    /// # Panics
    ///
    /// Panics if the order is not a market order: resting orders must
    /// never be repriced.
    pub fn to_good_till_cancel(&mut self, price: Price) {
        if self.order_type != OrderType::Market {
            panic!("order {}: only market orders may be repriced", self.id);
        }
        self.price = price;
        self.order_type = OrderType::GoodTillCancel;
    }
}

// ============================================================================
// OrderModify struct
// ============================================================================

/// Lightweight descriptor used to replace an existing order.
///
/// Applying a modification is cancel + re-add: the book looks up the
/// current order's type, cancels it, and resubmits a fresh order built
/// from these fields via [`to_order`](OrderModify::to_order). Queue
/// position is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderModify {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    /// Build the replacement order, preserving the original's type.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(order_type, self.order_id, self.side, self.price, self.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10);

        assert_eq!(order.id(), 1);
        assert_eq!(order.side(), Side::Buy);
        assert_eq!(order.price(), 100);
        assert_eq!(order.order_type(), OrderType::GoodTillCancel);
        assert_eq!(order.initial_quantity(), 10);
        assert_eq!(order.remaining_quantity(), 10);
        assert_eq!(order.filled_quantity(), 0);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = Order::new(OrderType::GoodTillCancel, 1, Side::Sell, -5, 10);

        order.fill(3);
        assert_eq!(order.remaining_quantity(), 7);
        assert_eq!(order.filled_quantity(), 3);
        assert!(!order.is_filled());

        order.fill(7);
        assert_eq!(order.remaining_quantity(), 0);
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "order 42")]
    fn test_order_overfill_panics() {
        let mut order = Order::new(OrderType::GoodTillCancel, 42, Side::Buy, 100, 5);
        order.fill(6);
    }

    #[test]
    fn test_market_order_conversion() {
        let mut order = Order::market(7, Side::Buy, 20);
        assert_eq!(order.price(), INVALID_PRICE);
        assert_eq!(order.order_type(), OrderType::Market);

        order.to_good_till_cancel(105);
        assert_eq!(order.price(), 105);
        assert_eq!(order.order_type(), OrderType::GoodTillCancel);
        assert_eq!(order.remaining_quantity(), 20);
    }

    #[test]
    #[should_panic(expected = "only market orders")]
    fn test_reprice_non_market_panics() {
        let mut order = Order::new(OrderType::GoodTillCancel, 9, Side::Buy, 100, 5);
        order.to_good_till_cancel(101);
    }

    #[test]
    fn test_modify_preserves_type() {
        let modify = OrderModify::new(3, Side::Sell, 99, 25);
        let order = modify.to_order(OrderType::GoodForDay);

        assert_eq!(order.id(), 3);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price(), 99);
        assert_eq!(order.initial_quantity(), 25);
        assert_eq!(order.order_type(), OrderType::GoodForDay);
    }

    #[test]
    fn test_negative_price_allowed() {
        let order = Order::new(OrderType::GoodTillCancel, 1, Side::Sell, -250, 1);
        assert_eq!(order.price(), -250);
    }
}
