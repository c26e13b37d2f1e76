//! Demo binary: submits a handful of orders through the public engine
//! surface and renders the resulting depth. Presentation only: every
//! number shown comes from `depth()` and `size()`.

use matchbook::types::{BookDepth, Order, OrderType, Side};
use matchbook::Orderbook;

fn render_depth(depth: &BookDepth) {
    println!("{:>8} {:>8}  |  {:<8} {:<8}", "BID QTY", "PRICE", "PRICE", "ASK QTY");
    println!("------------------+------------------");

    let rows = depth.bids().len().max(depth.asks().len());
    for i in 0..rows {
        match depth.bids().get(i) {
            Some(bid) => print!("{:>8} {:>8}  |  ", bid.quantity, bid.price),
            None => print!("{:>8} {:>8}  |  ", "-", "-"),
        }
        match depth.asks().get(i) {
            Some(ask) => println!("{:<8} {:<8}", ask.price, ask.quantity),
            None => println!("{:<8} {:<8}", "-", "-"),
        }
    }

    if let (Some(bid), Some(ask)) = (depth.best_bid(), depth.best_ask()) {
        println!("spread: {}", ask - bid);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let orderbook = Orderbook::new();

    orderbook.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 25));
    orderbook.add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Buy, 101, 10));
    orderbook.add_order(Order::new(OrderType::GoodForDay, 3, Side::Sell, 103, 15));
    orderbook.add_order(Order::new(OrderType::GoodTillCancel, 4, Side::Sell, 104, 30));

    println!("book after four resting orders ({} live):", orderbook.size());
    render_depth(&orderbook.depth());

    let trades = orderbook.add_order(Order::new(OrderType::GoodTillCancel, 5, Side::Sell, 101, 40));
    println!();
    println!("crossing sell 40 @ 101 produced {} trade(s):", trades.len());
    for trade in &trades {
        println!(
            "  bid #{} @ {}  x  ask #{} @ {}  qty {}",
            trade.bid().order_id,
            trade.bid().price,
            trade.ask().order_id,
            trade.ask().price,
            trade.quantity(),
        );
    }

    println!();
    println!("book after the cross ({} live):", orderbook.size());
    render_depth(&orderbook.depth());
}
