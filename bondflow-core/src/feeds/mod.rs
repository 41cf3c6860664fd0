//! Inbound feed adapters.
//!
//! Each adapter drains a line-oriented comma-separated source, builds the
//! stage's value type, and pushes one record at a time into the stage in
//! file order. Per-record failure isolation is a configuration choice:
//! `Abort` stops at the first bad record, `Skip` logs and keeps going.

mod inquiry_feed;
mod market_feed;
mod price_feed;
mod trade_feed;

pub use inquiry_feed::ingest_inquiries;
pub use market_feed::ingest_market_data;
pub use price_feed::ingest_prices;
pub use trade_feed::ingest_trades;

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// First bad record terminates the remaining input for the feed.
    #[default]
    Abort,
    /// Bad records are logged and dropped; the feed keeps going.
    Skip,
}

fn on_record_error(
    policy: ErrorPolicy,
    line: u64,
    err: PipelineError,
) -> Result<(), PipelineError> {
    match policy {
        ErrorPolicy::Abort => Err(err),
        ErrorPolicy::Skip => {
            tracing::warn!(line, error = %err, "skipping bad feed record");
            Ok(())
        }
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    line: u64,
) -> Result<&'a str, PipelineError> {
    record
        .get(index)
        .ok_or_else(|| PipelineError::MalformedRecord {
            line,
            reason: format!("missing field {index}"),
        })
}

fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}
