//! Booked trades.

use super::bond::Bond;
use super::execution::ExecutionOrder;
use super::side::{PricingSide, TradeSide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trade booked against a particular book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub product: Bond,
    pub trade_id: String,
    pub price: f64,
    /// Book label, e.g. "TRSY1".
    pub book: String,
    pub quantity: i64,
    pub side: TradeSide,
}

impl Trade {
    /// Convert an execution order to a trade: the full (visible + hidden)
    /// size trades, bids buy and offers sell.
    pub fn from_execution(order: &ExecutionOrder, book: String) -> Self {
        let side = match order.side {
            PricingSide::Bid => TradeSide::Buy,
            PricingSide::Offer => TradeSide::Sell,
        };
        Self {
            product: order.product.clone(),
            trade_id: order.order_id.clone(),
            price: order.price,
            book,
            quantity: order.total_quantity(),
            side,
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{:.6},{},{},{}",
            self.product.cusip, self.trade_id, self.price, self.book, self.quantity, self.side
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::OrderType;
    use chrono::NaiveDate;

    fn order(side: PricingSide, visible: i64, hidden: i64) -> ExecutionOrder {
        ExecutionOrder {
            product: Bond::new(
                "91282CAV3",
                "US2Y",
                0.045,
                NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            ),
            order_id: "ALGO-0000007".into(),
            side,
            order_type: OrderType::Market,
            price: 99.5,
            visible_quantity: visible,
            hidden_quantity: hidden,
            parent_order_id: None,
            is_child_order: false,
        }
    }

    #[test]
    fn bid_books_as_buy_with_total_quantity() {
        let trade = Trade::from_execution(&order(PricingSide::Bid, 1_000_000, 2_000_000), "TRSY1".into());
        assert_eq!(trade.side, TradeSide::Buy);
        assert_eq!(trade.quantity, 3_000_000);
        assert_eq!(trade.trade_id, "ALGO-0000007");
    }

    #[test]
    fn offer_books_as_sell() {
        let trade = Trade::from_execution(&order(PricingSide::Offer, 500_000, 0), "TRSY2".into());
        assert_eq!(trade.side, TradeSide::Sell);
        assert_eq!(trade.quantity, 500_000);
    }
}
