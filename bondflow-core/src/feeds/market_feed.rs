//! Market depth feed: `Timestamp,CUSIP,(Bid,BidSize,Ask,AskSize)×5` with
//! a header line. Prices are handle-fraction form.

use super::{field, on_record_error, record_line, ErrorPolicy};
use crate::domain::{Order, PricingSide};
use crate::error::PipelineError;
use crate::fractional;
use crate::stages::{DepthUpdate, MarketDataService, BOOK_DEPTH};
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

pub fn ingest_market_data<R: BufRead>(
    reader: R,
    market_data: &Rc<RefCell<MarketDataService>>,
    policy: ErrorPolicy,
) -> Result<u64, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut ingested = 0;
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                on_record_error(policy, line, err.into())?;
                continue;
            }
        };
        let line = record_line(&record);
        match parse_depth(&record, line)
            .and_then(|update| market_data.borrow_mut().on_depth(update))
        {
            Ok(()) => ingested += 1,
            Err(err) => on_record_error(policy, line, err)?,
        }
    }
    Ok(ingested)
}

fn parse_depth(record: &csv::StringRecord, line: u64) -> Result<DepthUpdate, PipelineError> {
    let cusip = field(record, 1, line)?.to_string();
    let mut bids = Vec::with_capacity(BOOK_DEPTH);
    let mut offers = Vec::with_capacity(BOOK_DEPTH);
    for level in 0..BOOK_DEPTH {
        let base = 2 + level * 4;
        bids.push(Order::new(
            fractional::parse(field(record, base, line)?)?,
            parse_quantity(field(record, base + 1, line)?, line)?,
            PricingSide::Bid,
        ));
        offers.push(Order::new(
            fractional::parse(field(record, base + 2, line)?)?,
            parse_quantity(field(record, base + 3, line)?, line)?,
            PricingSide::Offer,
        ));
    }
    Ok(DepthUpdate { cusip, bids, offers })
}

fn parse_quantity(text: &str, line: u64) -> Result<i64, PipelineError> {
    text.parse()
        .map_err(|_| PipelineError::MalformedRecord {
            line,
            reason: format!("bad quantity {text:?}"),
        })
}
