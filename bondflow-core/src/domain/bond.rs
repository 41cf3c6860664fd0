//! The traded product: a fixed-coupon US Treasury bond.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bond reference data, keyed by CUSIP throughout the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// Fixed-format security identifier, the product key.
    pub cusip: String,
    /// Tenor label, e.g. "US2Y".
    pub tenor: String,
    /// Annual coupon rate as a decimal.
    pub coupon: f64,
    pub maturity: NaiveDate,
}

impl Bond {
    pub fn new(cusip: &str, tenor: &str, coupon: f64, maturity: NaiveDate) -> Self {
        Self {
            cusip: cusip.to_string(),
            tenor: tenor.to_string(),
            coupon,
            maturity,
        }
    }
}
