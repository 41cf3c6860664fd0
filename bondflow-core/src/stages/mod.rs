//! Pipeline stages.
//!
//! Each stage owns a keyed store and a listener set; the inter-stage
//! adapter that feeds a stage lives in that stage's module (an
//! `XyzListener` subscribing to the upstream value type). The propagation
//! graph is:
//!
//! ```text
//! MarketData -> AlgoExecution -> Execution -> TradeBooking -> Position -> Risk
//! Pricing -> AlgoStreaming -> Streaming
//! Pricing -> Display (throttled)
//! {Position, Risk, Execution, Streaming, Inquiry} -> Historical sinks
//! ```

pub mod algo_execution;
pub mod algo_streaming;
pub mod booking;
pub mod display;
pub mod execution;
pub mod historical;
pub mod inquiry;
pub mod market_data;
pub mod position;
pub mod pricing;
pub mod risk;
pub mod streaming;

pub use algo_execution::{
    AlgoExecution, AlgoExecutionListener, AlgoExecutionService, AlgoOrderFactory,
    SpreadCrossingFactory, TIGHT_SPREAD,
};
pub use algo_streaming::{AlgoStreamingListener, AlgoStreamingService};
pub use booking::{TradeBookingListener, TradeBookingService, TRADE_BOOKS};
pub use display::{DisplayListener, DisplayService};
pub use execution::{ExecutionListener, ExecutionService, LogRouter, OrderRouter};
pub use historical::{HistoricalDataService, HistoricalListener, Persist};
pub use inquiry::{AutoQuoteResponder, InquiryService, QuoteResponder};
pub use market_data::{DepthUpdate, MarketDataService, BOOK_DEPTH};
pub use position::{PositionListener, PositionService};
pub use pricing::PricingService;
pub use risk::{RiskListener, RiskService};
pub use streaming::{LogPublisher, StreamPublisher, StreamingListener, StreamingService};
