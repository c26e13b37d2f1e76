//! Benchmarks for the matchbook order book core.
//!
//! These drive [`Book`] directly rather than the threaded [`Orderbook`]
//! wrapper so the numbers measure matching cost, not lock contention.
//!
//! ```bash
//! cargo bench
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use matchbook::types::{Order, OrderType, Price, Quantity, Side};
use matchbook::Book;

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

fn make_buy(id: u64, price: Price, quantity: Quantity) -> Order {
    Order::new(OrderType::GoodTillCancel, id, Side::Buy, price, quantity)
}

fn make_sell(id: u64, price: Price, quantity: Quantity) -> Order {
    Order::new(OrderType::GoodTillCancel, id, Side::Sell, price, quantity)
}

/// Pre-populate a book with resting asks at `count` ascending price levels.
/// Ids start at `base_id` so callers can avoid collisions.
fn populate_asks(book: &mut Book, count: usize, base_id: u64, base_price: Price) {
    for i in 0..count {
        book.add_order(make_sell(base_id + i as u64, base_price + i as Price, 10));
    }
}

/// Pre-populate a book with resting bids at `count` descending price levels.
fn populate_bids(book: &mut Book, count: usize, base_id: u64, base_price: Price) {
    for i in 0..count {
        book.add_order(make_buy(base_id + i as u64, base_price - i as Price, 10));
    }
}

/// Generate a deterministic batch of mixed orders around a midpoint.
/// Same seed always yields the same sequence.
fn generate_order_batch(count: usize, seed: u64) -> Vec<Order> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    let mid: Price = 50_000;

    for i in 0..count {
        let is_buy = rng.gen_bool(0.5);
        let offset: Price = rng.gen_range(-500..=500);
        let quantity: Quantity = rng.gen_range(1..=100);

        let order = if is_buy {
            make_buy((i + 1) as u64, mid + offset, quantity)
        } else {
            make_sell((i + 1) as u64, mid + offset, quantity)
        };
        orders.push(order);
    }

    orders
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(1000);

    // Match a buy against the best ask of a 1k-order book.
    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(2000);
                populate_asks(&mut book, 1000, 1, 50_000);
                (book, make_buy(999_999, 50_000, 10))
            },
            |(mut book, buy)| black_box(book.add_order(buy)),
            BatchSize::SmallInput,
        );
    });

    // Buy large enough to sweep ~10 price levels.
    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(200);
                populate_asks(&mut book, 100, 1, 50_000);
                (book, make_buy(999_999, 50_010, 100))
            },
            |(mut book, buy)| black_box(book.add_order(buy)),
            BatchSize::SmallInput,
        );
    });

    // No match: the order rests on the book.
    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(2000);
                populate_asks(&mut book, 1000, 1, 50_000);
                (book, make_buy(999_999, 49_000, 10))
            },
            |(mut book, buy)| black_box(book.add_order(buy)),
            BatchSize::SmallInput,
        );
    });

    // Fill-or-kill admission walks the opposing side's aggregates.
    group.bench_function("fill_or_kill_admission", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(2000);
                populate_asks(&mut book, 1000, 1, 50_000);
                let fok = Order::new(OrderType::FillOrKill, 999_999, Side::Buy, 50_100, 500);
                (book, fok)
            },
            |(mut book, fok)| black_box(book.add_order(fok)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order Operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");

    group.measurement_time(Duration::from_secs(5));

    group.bench_function("add_to_empty", |b| {
        b.iter_batched(
            Book::new,
            |mut book| black_box(book.add_order(make_buy(1, 50_000, 10))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("add_to_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(2000);
                populate_asks(&mut book, 500, 1, 50_001);
                populate_bids(&mut book, 500, 501, 50_000);
                book
            },
            |mut book| black_box(book.add_order(make_buy(999_999, 45_000, 10))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_order", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(2000);
                populate_bids(&mut book, 1000, 1, 50_000);
                book
            },
            // Cancel from the middle of the book.
            |mut book| black_box(book.cancel_order(500)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("modify_order", |b| {
        b.iter_batched(
            || {
                let mut book = Book::with_capacity(2000);
                populate_bids(&mut book, 1000, 1, 50_000);
                book
            },
            |mut book| {
                let modify =
                    matchbook::types::OrderModify::new(500, Side::Buy, 49_000, 5);
                black_box(book.modify_order(modify))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("orders", batch_size),
            &batch_size,
            |b, &size| {
                let orders = generate_order_batch(size, 42);

                b.iter_batched(
                    || (Book::with_capacity(size * 2), orders.clone()),
                    |(mut book, orders)| {
                        let mut trade_count = 0;
                        for order in orders {
                            trade_count += book.add_order(order).len();
                        }
                        black_box((book.len(), trade_count))
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Large Book
// ============================================================================

fn bench_large_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_book");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    group.bench_function("match_in_100k_book", |b| {
        let mut book = Book::with_capacity(120_000);
        populate_asks(&mut book, 50_000, 1, 50_001);
        populate_bids(&mut book, 50_000, 50_001, 50_000);

        let mut next_id = 200_000u64;
        b.iter(|| {
            next_id += 1;
            // Matches the best ask exactly, leaving the book depth stable.
            black_box(book.add_order(make_buy(next_id, 50_001, 10)))
        });
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_throughput,
    bench_large_book
);

criterion_main!(benches);
