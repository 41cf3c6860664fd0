//! Domain value types for the trading pipeline.
//!
//! Everything here is an owned value: stages clone across boundaries and
//! never share mutable entity instances.

pub mod bond;
pub mod book;
pub mod execution;
pub mod inquiry;
pub mod position;
pub mod price;
pub mod risk;
pub mod side;
pub mod stream;
pub mod trade;

pub use bond::Bond;
pub use book::{BidOffer, Order, OrderBook};
pub use execution::{ExecutionOrder, OrderType, Venue};
pub use inquiry::{Inquiry, InquiryState};
pub use position::Position;
pub use price::Price;
pub use risk::{BucketedRisk, BucketedSector, Pv01};
pub use side::{PricingSide, TradeSide};
pub use stream::{PriceStream, PriceStreamOrder};
pub use trade::Trade;
