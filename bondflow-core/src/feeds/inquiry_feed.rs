//! Inquiry feed: `InquiryId,CUSIP,Side,Quantity,PriceFrac,State`, no header.

use super::{field, on_record_error, record_line, ErrorPolicy};
use crate::domain::{Inquiry, InquiryState, TradeSide};
use crate::error::PipelineError;
use crate::fractional;
use crate::refdata::ReferenceData;
use crate::stages::InquiryService;
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

pub fn ingest_inquiries<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    inquiries: &Rc<RefCell<InquiryService>>,
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
        match parse_inquiry(&record, refdata, line)
            .and_then(|inquiry| inquiries.borrow_mut().on_message(inquiry))
        {
            Ok(()) => ingested += 1,
            Err(err) => on_record_error(policy, line, err)?,
        }
    }
    Ok(ingested)
}

fn parse_inquiry(
    record: &csv::StringRecord,
    refdata: &ReferenceData,
    line: u64,
) -> Result<Inquiry, PipelineError> {
    let cusip = field(record, 1, line)?;
    let bond = refdata.bond(cusip)?.clone();
    let side: TradeSide = field(record, 2, line)?
        .parse()
        .map_err(|reason| PipelineError::MalformedRecord { line, reason })?;
    let state: InquiryState = field(record, 5, line)?
        .parse()
        .map_err(|reason| PipelineError::MalformedRecord { line, reason })?;
    Ok(Inquiry {
        inquiry_id: field(record, 0, line)?.to_string(),
        product: bond,
        side,
        quantity: field(record, 3, line)?
            .parse()
            .map_err(|_| PipelineError::MalformedRecord {
                line,
                reason: "bad quantity".into(),
            })?,
        price: fractional::parse(field(record, 4, line)?)?,
        state,
    })
}
