//! Execution orders and the venues they route to.

use super::bond::Bond;
use super::side::PricingSide;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of execution order types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Fill-or-kill.
    Fok,
    /// Immediate-or-cancel.
    Ioc,
    Market,
    Limit,
    Stop,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderType::Fok => "FOK",
            OrderType::Ioc => "IOC",
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
        };
        write!(f, "{s}")
    }
}

/// Closed set of execution venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    BrokerTec,
    Espeed,
    Cme,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Venue::BrokerTec => "BROKERTEC",
            Venue::Espeed => "ESPEED",
            Venue::Cme => "CME",
        };
        write!(f, "{s}")
    }
}

/// An order produced by the algo engine and routed for execution.
///
/// Invariant: `is_child_order` implies `parent_order_id` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub product: Bond,
    pub order_id: String,
    pub side: PricingSide,
    pub order_type: OrderType,
    pub price: f64,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub parent_order_id: Option<String>,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    pub fn total_quantity(&self) -> i64 {
        self.visible_quantity + self.hidden_quantity
    }
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{:.6},{},{},{},{}",
            self.product.cusip,
            self.order_id,
            self.side,
            self.order_type,
            self.price,
            self.visible_quantity,
            self.hidden_quantity,
            self.parent_order_id.as_deref().unwrap_or(""),
            if self.is_child_order { "Y" } else { "N" }
        )
    }
}
