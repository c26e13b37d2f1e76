//! Order book module: arena-backed price-time-priority book.
//!
//! ## Components
//!
//! - [`OrderNode`]: order plus intrusive linked-list pointers (slab keys)
//! - [`PriceLevel`]: FIFO queue at one price plus its incremental
//!   (quantity, count) aggregate
//! - [`Book`]: the single-threaded core: admission, matching, cancel,
//!   modify, depth
//!
//! ## Complexity
//!
//! | Operation            | Complexity          |
//! |----------------------|---------------------|
//! | Add order            | O(log levels)       |
//! | Cancel by id         | O(1) + level evict  |
//! | Best bid/ask         | O(1)                |
//! | FillOrKill admission | O(levels scanned)   |
//! | Depth snapshot       | O(levels)           |

pub mod book;
pub mod level;
pub mod node;

pub use book::Book;
pub use level::PriceLevel;
pub use node::OrderNode;
