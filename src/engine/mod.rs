//! Thread-safe engine: the public order book surface plus the
//! good-for-day pruning task.
//!
//! ## Concurrency Model
//!
//! Every mutating operation takes one exclusive lock over the [`Book`] for
//! the whole call, including the synchronous matching pass, so each
//! returned trade list is a consistent snapshot. Read-only queries take
//! the same lock and therefore never observe a torn aggregate.
//!
//! ## Pruner Lifecycle
//!
//! Construction spawns one background thread that alternates between a
//! cancellable timed wait until the next daily cutoff (never holding the
//! book lock) and a lock-scan-cancel pass over resting GoodForDay orders.
//! Dropping the engine signals a one-shot shutdown, wakes the wait, and
//! joins the thread: no background activity outlives the engine.
//!
//! ## Example
//!
//! ```
//! use matchbook::Orderbook;
//! use matchbook::types::{Order, OrderType, Side};
//!
//! let orderbook = Orderbook::new();
//! orderbook.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10));
//! let trades = orderbook.add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 10));
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(orderbook.size(), 0);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveTime};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, info};

use crate::orderbook::Book;
use crate::types::{BookDepth, Order, OrderId, OrderModify, OrderType, Trades};

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Orders to pre-allocate in the arena
    pub order_capacity: usize,

    /// Local wall-clock time at which GoodForDay orders are cancelled
    pub daily_cutoff: NaiveTime,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: 1024,
            daily_cutoff: NaiveTime::from_hms_opt(16, 0, 0).expect("valid cutoff time"),
        }
    }
}

/// State shared between the engine handle and the pruner thread.
struct Shared {
    book: Mutex<Book>,
    shutdown: AtomicBool,
    wake: Condvar,
    wake_lock: Mutex<()>,
    daily_cutoff: NaiveTime,
}

/// Thread-safe limit order book with background day-order pruning.
pub struct Orderbook {
    shared: Arc<Shared>,
    pruner: Option<JoinHandle<()>>,
}

impl Orderbook {
    /// Create an engine with default configuration (16:00 local cutoff)
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let shared = Arc::new(Shared {
            book: Mutex::new(Book::with_capacity(config.order_capacity)),
            shutdown: AtomicBool::new(false),
            wake: Condvar::new(),
            wake_lock: Mutex::new(()),
            daily_cutoff: config.daily_cutoff,
        });

        let pruner = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("gfd-pruner".into())
                .spawn(move || prune_good_for_day(&shared))
                .expect("failed to spawn pruner thread")
        };

        Self {
            shared,
            pruner: Some(pruner),
        }
    }

    /// Submit an order and return the trades it produced.
    ///
    /// Duplicate ids and infeasible FillAndKill/FillOrKill/Market
    /// submissions are silently rejected with an empty result.
    pub fn add_order(&self, order: Order) -> Trades {
        self.shared.book.lock().add_order(order)
    }

    /// Cancel one order; unknown ids are a no-op.
    pub fn cancel_order(&self, order_id: OrderId) {
        self.shared.book.lock().cancel_order(order_id);
    }

    /// Cancel a batch of orders under a single lock acquisition.
    pub fn cancel_orders(&self, order_ids: &[OrderId]) {
        self.shared.book.lock().cancel_orders(order_ids);
    }

    /// Replace an existing order (cancel + re-add, type preserved).
    /// Unknown ids yield an empty result.
    pub fn modify_order(&self, modify: OrderModify) -> Trades {
        self.shared.book.lock().modify_order(modify)
    }

    /// Aggregated depth snapshot, best price first on each side.
    pub fn depth(&self) -> BookDepth {
        self.shared.book.lock().depth()
    }

    /// Number of currently live orders.
    pub fn size(&self) -> usize {
        self.shared.book.lock().len()
    }
}

impl Default for Orderbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Orderbook {
    fn drop(&mut self) {
        // Flag under the wakeup lock so the pruner cannot re-check the
        // flag and then miss this notification.
        {
            let _guard = self.shared.wake_lock.lock();
            self.shared.shutdown.store(true, Ordering::Release);
        }
        self.shared.wake.notify_one();

        if let Some(handle) = self.pruner.take() {
            let _ = handle.join();
        }
    }
}

/// Pruner loop: wait until the next daily cutoff or shutdown, then cancel
/// every resting GoodForDay order in one batched pass.
fn prune_good_for_day(shared: &Shared) {
    loop {
        let deadline = next_cutoff(shared.daily_cutoff);

        {
            let mut guard = shared.wake_lock.lock();
            while !shared.shutdown.load(Ordering::Acquire) {
                // Spurious wakes re-enter with the same deadline.
                if shared.wake.wait_until(&mut guard, deadline).timed_out() {
                    break;
                }
            }
        }

        if shared.shutdown.load(Ordering::Acquire) {
            debug!("pruner shutting down");
            return;
        }

        // Scan under the lock, then cancel in one batched pass.
        let expired: Vec<OrderId> = {
            let book = shared.book.lock();
            book.iter()
                .filter(|order| order.order_type() == OrderType::GoodForDay)
                .map(|order| order.id())
                .collect()
        };

        if expired.is_empty() {
            continue;
        }

        info!(count = expired.len(), "cancelling good-for-day orders at daily cutoff");
        shared.book.lock().cancel_orders(&expired);
    }
}

/// Next instant at which the daily cutoff occurs, rolling to the next day
/// if today's cutoff has already passed. Includes a small slack so the
/// wake lands strictly after the wall-clock cutoff.
fn next_cutoff(cutoff: NaiveTime) -> Instant {
    let now = Local::now();
    let mut date = now.date_naive();
    if now.time() >= cutoff {
        date = date.succ_opt().expect("date overflow");
    }
    let target = date.and_time(cutoff);

    let wait = (target - now.naive_local())
        .to_std()
        .unwrap_or(Duration::ZERO)
        + Duration::from_millis(100);
    Instant::now() + wait
}

// ============================================================================
// Unit Tests
// ============================================================================
