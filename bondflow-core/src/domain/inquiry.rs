//! Client inquiries and their lifecycle states.

use super::bond::Bond;
use super::side::TradeSide;
use crate::fractional;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inquiry lifecycle. `Done`, `Rejected`, and `CustomerRejected` are
/// terminal; `Done` records are evicted from the live store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

impl fmt::Display for InquiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InquiryState::Received => "RECEIVED",
            InquiryState::Quoted => "QUOTED",
            InquiryState::Done => "DONE",
            InquiryState::Rejected => "REJECTED",
            InquiryState::CustomerRejected => "CUSTOMER_REJECTED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for InquiryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVED" => Ok(InquiryState::Received),
            "QUOTED" => Ok(InquiryState::Quoted),
            "DONE" => Ok(InquiryState::Done),
            "REJECTED" => Ok(InquiryState::Rejected),
            "CUSTOMER_REJECTED" => Ok(InquiryState::CustomerRejected),
            other => Err(format!("unknown inquiry state {other:?}")),
        }
    }
}

/// A client-initiated request for a quote on a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: String,
    pub product: Bond,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: f64,
    pub state: InquiryState,
}

impl fmt::Display for Inquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.inquiry_id,
            self.product.cusip,
            self.side,
            self.quantity,
            fractional::format(self.price),
            self.state
        )
    }
}
