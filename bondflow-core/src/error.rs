//! Pipeline-wide error taxonomy.
//!
//! Every failure the pipeline can produce is an explicit value here — there
//! is no catch-and-retry anywhere inside the stages. An error raised during
//! a listener cascade aborts the remainder of that cascade and surfaces at
//! the ingestion call that triggered it; whether the rest of the feed is
//! then processed is the feed's [`ErrorPolicy`](crate::feeds::ErrorPolicy)
//! choice.

use crate::domain::PricingSide;
use crate::fractional::PriceFormatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Store lookup miss. Absence is never treated as a default.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// CUSIP not present in the reference data registry.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// Malformed handle-fraction price text.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceFormatError),

    /// A best bid/offer was requested from a book with an empty side.
    #[error("order book has no {0} orders")]
    EmptyBook(PricingSide),

    /// A feed record that could not be interpreted (wrong field count,
    /// unparseable number, unknown enum token).
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
