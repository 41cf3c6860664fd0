//! PV01 risk values and bucketed sectors.

use super::bond::Bond;
use serde::{Deserialize, Serialize};
use std::fmt;

/// PV01 risk for one product: the per-unit value plus the running quantity
/// it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pv01 {
    pub product: Bond,
    /// Per-unit PV01 (dollar price change per basis point per unit).
    pub pv01: f64,
    pub quantity: i64,
}

impl Pv01 {
    pub fn new(product: Bond, pv01: f64, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }

    /// Accumulate quantity; the stored per-unit value is unchanged.
    pub fn add_quantity(&mut self, quantity: i64) {
        self.quantity += quantity;
    }
}

impl fmt::Display for Pv01 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:.6},{}", self.product.cusip, self.pv01, self.quantity)
    }
}

/// A named, fixed list of products aggregated at read time. Not stored
/// state: bucketing never mutates the risk store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub name: String,
    pub cusips: Vec<String>,
}

impl BucketedSector {
    pub fn new(name: &str, cusips: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            cusips: cusips.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Synthetic sector-level risk reading. Unlike [`Pv01`], `pv01` here is the
/// TOTAL risk of the bucket (sum of per-unit pv01 × quantity), not a
/// per-unit value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedRisk {
    pub sector: String,
    pub pv01: f64,
    pub quantity: i64,
}

impl fmt::Display for BucketedRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:.6},{}", self.sector, self.pv01, self.quantity)
    }
}
