//! Trade feed: `CUSIP,TradeId,PriceFrac,Book,Quantity,Side`, no header.

use super::{field, on_record_error, record_line, ErrorPolicy};
use crate::domain::{Trade, TradeSide};
use crate::error::PipelineError;
use crate::fractional;
use crate::refdata::ReferenceData;
use crate::stages::TradeBookingService;
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

pub fn ingest_trades<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    booking: &Rc<RefCell<TradeBookingService>>,
    policy: ErrorPolicy,
) -> Result<u64, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
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
        match parse_trade(&record, refdata, line)
            .and_then(|trade| booking.borrow_mut().on_message(trade))
        {
            Ok(()) => ingested += 1,
            Err(err) => on_record_error(policy, line, err)?,
        }
    }
    Ok(ingested)
}

fn parse_trade(
    record: &csv::StringRecord,
    refdata: &ReferenceData,
    line: u64,
) -> Result<Trade, PipelineError> {
    let cusip = field(record, 0, line)?;
    let bond = refdata.bond(cusip)?.clone();
    let side: TradeSide = field(record, 5, line)?
        .parse()
        .map_err(|reason| PipelineError::MalformedRecord { line, reason })?;
    Ok(Trade {
        product: bond,
        trade_id: field(record, 1, line)?.to_string(),
        price: fractional::parse(field(record, 2, line)?)?,
        book: field(record, 3, line)?.to_string(),
        quantity: field(record, 4, line)?
            .parse()
            .map_err(|_| PipelineError::MalformedRecord {
                line,
                reason: "bad quantity".into(),
            })?,
        side,
    })
}
