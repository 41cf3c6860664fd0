//! Static reference data: the CUSIP registry and per-unit PV01 values.
//!
//! The registry is an explicitly constructed provider handed to stages at
//! construction (`Rc<ReferenceData>`), never process-wide state, so tests
//! can inject small custom universes. An unrecognized CUSIP is a hard
//! failure ([`PipelineError::UnknownProduct`]), not a soft default.

use crate::analytics;
use crate::domain::Bond;
use crate::error::PipelineError;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const FACE_VALUE: f64 = 1000.0;
const COUPON_FREQUENCY: u32 = 2;

struct Entry {
    bond: Bond,
    pv01: f64,
}

/// Bond registry mapping a closed set of CUSIPs to reference data and
/// per-unit PV01.
pub struct ReferenceData {
    entries: BTreeMap<String, Entry>,
}

impl ReferenceData {
    /// An empty registry; populate with [`add_bond`](Self::add_bond).
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a bond, deriving its per-unit PV01 from a 1bp yield bump on
    /// semiannual cash flows.
    pub fn add_bond(&mut self, bond: Bond, yield_rate: f64, years_to_maturity: u32) {
        let pv01 = analytics::pv01(
            FACE_VALUE,
            bond.coupon,
            yield_rate,
            years_to_maturity,
            COUPON_FREQUENCY,
        );
        self.entries
            .insert(bond.cusip.clone(), Entry { bond, pv01 });
    }

    /// The on-the-run US Treasury universe the simulation trades.
    pub fn us_treasuries() -> Self {
        let mut refdata = Self::new();
        let universe: [(&str, &str, f64, (i32, u32, u32), f64, u32); 7] = [
            ("91282CAV3", "US2Y", 0.04500, (2026, 11, 30), 0.0464, 2),
            ("91282CBL4", "US3Y", 0.04750, (2027, 12, 15), 0.0440, 3),
            ("91282CCB5", "US5Y", 0.04875, (2029, 11, 30), 0.0412, 5),
            ("91282CCS8", "US7Y", 0.05000, (2031, 11, 30), 0.0430, 7),
            ("91282CDH2", "US10Y", 0.05125, (2034, 12, 15), 0.0428, 10),
            ("912810TM0", "US20Y", 0.05250, (2044, 12, 15), 0.0461, 20),
            ("912810TL2", "US30Y", 0.05375, (2054, 12, 15), 0.0443, 30),
        ];
        for (cusip, tenor, coupon, (y, m, d), yield_rate, years) in universe {
            let maturity = NaiveDate::from_ymd_opt(y, m, d).expect("valid maturity date");
            refdata.add_bond(Bond::new(cusip, tenor, coupon, maturity), yield_rate, years);
        }
        refdata
    }

    pub fn bond(&self, cusip: &str) -> Result<&Bond, PipelineError> {
        self.entries
            .get(cusip)
            .map(|e| &e.bond)
            .ok_or_else(|| PipelineError::UnknownProduct(cusip.to_string()))
    }

    /// Per-unit PV01 for a security.
    pub fn pv01(&self, cusip: &str) -> Result<f64, PipelineError> {
        self.entries
            .get(cusip)
            .map(|e| e.pv01)
            .ok_or_else(|| PipelineError::UnknownProduct(cusip.to_string()))
    }

    pub fn cusips(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::us_treasuries()
    }
}
