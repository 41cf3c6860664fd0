//! Mid/spread price for a product.

use super::bond::Bond;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mid price plus bid/offer spread. The two sides are derived, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub product: Bond,
    pub mid: f64,
    pub spread: f64,
}

impl Price {
    pub fn new(product: Bond, mid: f64, spread: f64) -> Self {
        Self {
            product,
            mid,
            spread,
        }
    }

    pub fn bid(&self) -> f64 {
        self.mid - self.spread / 2.0
    }

    pub fn offer(&self) -> f64 {
        self.mid + self.spread / 2.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:.6},{:.6}",
            self.product.cusip, self.mid, self.spread
        )
    }
}
