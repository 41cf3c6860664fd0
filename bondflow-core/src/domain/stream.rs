//! Two-sided price stream quotes.

use super::bond::Bond;
use super::side::PricingSide;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a streamed quote: price plus displayed and undisplayed size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: f64,
    pub visible_quantity: i64,
    /// Undisplayed size; typically a multiple of the visible size.
    pub hidden_quantity: i64,
    pub side: PricingSide,
}

impl PriceStreamOrder {
    pub fn new(price: f64, visible_quantity: i64, hidden_quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

/// A quoted bid/offer pair for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStream {
    pub product: Bond,
    pub bid: PriceStreamOrder,
    pub offer: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(product: Bond, bid: PriceStreamOrder, offer: PriceStreamOrder) -> Self {
        Self {
            product,
            bid,
            offer,
        }
    }
}

impl fmt::Display for PriceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:.6},{},{},{:.6},{},{}",
            self.product.cusip,
            self.bid.price,
            self.bid.visible_quantity,
            self.bid.hidden_quantity,
            self.offer.price,
            self.offer.visible_quantity,
            self.offer.hidden_quantity
        )
    }
}
