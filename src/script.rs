//! Line-oriented command scripts for driving the book from a harness.
//!
//! The core consumes only structured commands; all text handling lives
//! here, outside the matching path. Format, one command per line:
//!
//! ```text
//! A <side> <orderType> <price> <quantity> <orderId>   add
//! M <orderId> <side> <price> <quantity>               modify
//! C <orderId>                                          cancel
//! R <totalOrders> <bidLevels> <askLevels>              expected final state
//! ```
//!
//! Sides are `B`/`S`; order types are spelled out (`GoodTillCancel`,
//! `FillAndKill`, `FillOrKill`, `GoodForDay`, `Market`). Blank lines and
//! `#` comments are skipped. The `R` line is optional and records the
//! expected order count and per-side level counts after the script runs.

use thiserror::Error;

use crate::engine::Orderbook;
use crate::types::{Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, Trades};

/// Script parsing failure.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("`{action}` expects {expected} fields, found {found}")]
    FieldCount {
        action: char,
        expected: usize,
        found: usize,
    },

    #[error("invalid side `{0}` (expected B or S)")]
    InvalidSide(String),

    #[error("invalid order type `{0}`")]
    InvalidOrderType(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),
}

/// One structured command from a script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add {
        side: Side,
        order_type: OrderType,
        price: Price,
        quantity: Quantity,
        order_id: OrderId,
    },
    Modify {
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    Cancel {
        order_id: OrderId,
    },
}

impl Command {
    /// Apply this command through the public engine surface.
    pub fn apply(&self, orderbook: &Orderbook) -> Trades {
        match *self {
            Command::Add {
                side,
                order_type,
                price,
                quantity,
                order_id,
            } => orderbook.add_order(Order::new(order_type, order_id, side, price, quantity)),
            Command::Modify {
                order_id,
                side,
                price,
                quantity,
            } => orderbook.modify_order(OrderModify::new(order_id, side, price, quantity)),
            Command::Cancel { order_id } => {
                orderbook.cancel_order(order_id);
                Trades::new()
            }
        }
    }
}

/// Expected final state from an `R` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub total_orders: usize,
    pub bid_levels: usize,
    pub ask_levels: usize,
}

/// A parsed script: commands in order plus an optional expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub commands: Vec<Command>,
    pub expectation: Option<Expectation>,
}

impl Script {
    /// Parse a whole script.
    pub fn parse(input: &str) -> Result<Self, ScriptError> {
        let mut commands = Vec::new();
        let mut expectation = None;

        for raw in input.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('R') {
                expectation = Some(parse_expectation(line)?);
                continue;
            }
            commands.push(parse_command(line)?);
        }

        Ok(Self {
            commands,
            expectation,
        })
    }

    /// Run every command against `orderbook`, returning all trades.
    pub fn run(&self, orderbook: &Orderbook) -> Trades {
        let mut trades = Trades::new();
        for command in &self.commands {
            trades.extend(command.apply(orderbook));
        }
        trades
    }
}

fn parse_side(token: &str) -> Result<Side, ScriptError> {
    match token {
        "B" => Ok(Side::Buy),
        "S" => Ok(Side::Sell),
        other => Err(ScriptError::InvalidSide(other.to_string())),
    }
}

fn parse_order_type(token: &str) -> Result<OrderType, ScriptError> {
    match token {
        "GoodTillCancel" => Ok(OrderType::GoodTillCancel),
        "FillAndKill" => Ok(OrderType::FillAndKill),
        "FillOrKill" => Ok(OrderType::FillOrKill),
        "GoodForDay" => Ok(OrderType::GoodForDay),
        "Market" => Ok(OrderType::Market),
        other => Err(ScriptError::InvalidOrderType(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T, ScriptError> {
    token
        .parse()
        .map_err(|_| ScriptError::InvalidNumber(token.to_string()))
}

fn expect_fields(action: char, tokens: &[&str], expected: usize) -> Result<(), ScriptError> {
    if tokens.len() != expected {
        return Err(ScriptError::FieldCount {
            action,
            expected,
            found: tokens.len(),
        });
    }
    Ok(())
}

/// Parse one non-`R` command line.
pub fn parse_command(line: &str) -> Result<Command, ScriptError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.first().copied() {
        Some("A") => {
            expect_fields('A', &tokens, 6)?;
            Ok(Command::Add {
                side: parse_side(tokens[1])?,
                order_type: parse_order_type(tokens[2])?,
                price: parse_number(tokens[3])?,
                quantity: parse_number(tokens[4])?,
                order_id: parse_number(tokens[5])?,
            })
        }
        Some("M") => {
            expect_fields('M', &tokens, 5)?;
            Ok(Command::Modify {
                order_id: parse_number(tokens[1])?,
                side: parse_side(tokens[2])?,
                price: parse_number(tokens[3])?,
                quantity: parse_number(tokens[4])?,
            })
        }
        Some("C") => {
            expect_fields('C', &tokens, 2)?;
            Ok(Command::Cancel {
                order_id: parse_number(tokens[1])?,
            })
        }
        Some(other) => Err(ScriptError::UnknownAction(other.to_string())),
        None => Err(ScriptError::UnknownAction(String::new())),
    }
}

/// Parse an `R <totalOrders> <bidLevels> <askLevels>` line.
pub fn parse_expectation(line: &str) -> Result<Expectation, ScriptError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    expect_fields('R', &tokens, 4)?;

    Ok(Expectation {
        total_orders: parse_number(tokens[1])?,
        bid_levels: parse_number(tokens[2])?,
        ask_levels: parse_number(tokens[3])?,
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let command = parse_command("A B GoodTillCancel 101 10 1").unwrap();
        assert_eq!(
            command,
            Command::Add {
                side: Side::Buy,
                order_type: OrderType::GoodTillCancel,
                price: 101,
                quantity: 10,
                order_id: 1,
            }
        );
    }

    #[test]
    fn test_parse_add_negative_price() {
        let command = parse_command("A S FillOrKill -25 10 7").unwrap();
        match command {
            Command::Add { price, .. } => assert_eq!(price, -25),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_modify_and_cancel() {
        assert_eq!(
            parse_command("M 3 S 99 25").unwrap(),
            Command::Modify {
                order_id: 3,
                side: Side::Sell,
                price: 99,
                quantity: 25,
            }
        );
        assert_eq!(parse_command("C 42").unwrap(), Command::Cancel { order_id: 42 });
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(matches!(
            parse_command("A B GoodTillCancel 101 10"),
            Err(ScriptError::FieldCount { action: 'A', .. })
        ));
        assert!(matches!(
            parse_command("X 1 2 3"),
            Err(ScriptError::UnknownAction(_))
        ));
        assert!(matches!(
            parse_command("A Q GoodTillCancel 101 10 1"),
            Err(ScriptError::InvalidSide(_))
        ));
        assert!(matches!(
            parse_command("A B Limit 101 10 1"),
            Err(ScriptError::InvalidOrderType(_))
        ));
        assert!(matches!(
            parse_command("C banana"),
            Err(ScriptError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_parse_script_with_expectation() {
        let script = Script::parse(
            "# resting orders\n\
             A B GoodTillCancel 101 10 1\n\
             \n\
             A S GoodTillCancel 105 20 2\n\
             R 2 1 1\n",
        )
        .unwrap();

        assert_eq!(script.commands.len(), 2);
        assert_eq!(
            script.expectation,
            Some(Expectation {
                total_orders: 2,
                bid_levels: 1,
                ask_levels: 1,
            })
        );
    }

    #[test]
    fn test_script_runs_against_engine() {
        let script = Script::parse(
            "A B GoodTillCancel 100 10 1\n\
             A S GoodTillCancel 100 10 2\n\
             R 0 0 0\n",
        )
        .unwrap();

        let orderbook = Orderbook::new();
        let trades = script.run(&orderbook);

        assert_eq!(trades.len(), 1);
        assert_eq!(orderbook.size(), 0);
    }
}
