//! Price feed: `Timestamp,CUSIP,Bid,Ask,Spread` with a header line.
//! Bid and Ask are handle-fraction prices; mid and spread are derived
//! from them, the trailing Spread column is informational.

use super::{field, on_record_error, record_line, ErrorPolicy};
use crate::domain::Price;
use crate::error::PipelineError;
use crate::fractional;
use crate::refdata::ReferenceData;
use crate::stages::PricingService;
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

pub fn ingest_prices<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    pricing: &Rc<RefCell<PricingService>>,
    policy: ErrorPolicy,
) -> Result<u64, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
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
        match parse_price(&record, refdata, line)
            .and_then(|price| pricing.borrow_mut().on_message(price))
        {
            Ok(()) => ingested += 1,
            Err(err) => on_record_error(policy, line, err)?,
        }
    }
    Ok(ingested)
}

fn parse_price(
    record: &csv::StringRecord,
    refdata: &ReferenceData,
    line: u64,
) -> Result<Price, PipelineError> {
    let cusip = field(record, 1, line)?;
    let bond = refdata.bond(cusip)?.clone();
    let bid = fractional::parse(field(record, 2, line)?)?;
    let ask = fractional::parse(field(record, 3, line)?)?;
    Ok(Price {
        product: bond,
        mid: (bid + ask) / 2.0,
        spread: ask - bid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const INPUT: &str = "\
Timestamp,CUSIP,Bid,Ask,Spread
2026-08-28 09:00:00.000,91282CAV3,99-000,99-004,0-004
2026-08-28 09:00:00.001,91282CDH2,100-16+,100-170,0-00+
";

    #[test]
    fn parses_header_file_and_derives_mid() {
        let refdata = ReferenceData::us_treasuries();
        let pricing = Rc::new(RefCell::new(PricingService::new()));

        let count = ingest_prices(Cursor::new(INPUT), &refdata, &pricing, ErrorPolicy::Abort)
            .unwrap();
        assert_eq!(count, 2);

        let svc = pricing.borrow();
        let p = svc.get("91282CAV3").unwrap();
        assert!((p.mid - (99.0 + 2.0 / 256.0)).abs() < 1e-12);
        assert!((p.spread - 4.0 / 256.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_cusip_aborts_by_default() {
        let refdata = ReferenceData::us_treasuries();
        let pricing = Rc::new(RefCell::new(PricingService::new()));
        let input = "Timestamp,CUSIP,Bid,Ask,Spread\n2026-08-28 09:00:00.000,BADCUSIP9,99-000,99-004,0-004\n";

        assert!(matches!(
            ingest_prices(Cursor::new(input), &refdata, &pricing, ErrorPolicy::Abort),
            Err(PipelineError::UnknownProduct(_))
        ));
    }

    #[test]
    fn skip_policy_survives_wrong_field_count() {
        // a record the csv layer itself rejects must still honor the policy
        let refdata = ReferenceData::us_treasuries();
        let pricing = Rc::new(RefCell::new(PricingService::new()));
        let input = "\
Timestamp,CUSIP,Bid,Ask,Spread
2026-08-28 09:00:00.000,91282CAV3,99-000,99-004,0-004
2026-08-28 09:00:00.001,91282CDH2,99-000
2026-08-28 09:00:00.002,91282CBL4,99-000,99-004,0-004
";

        let count =
            ingest_prices(Cursor::new(input), &refdata, &pricing, ErrorPolicy::Skip).unwrap();
        assert_eq!(count, 2);
        assert!(pricing.borrow().get("91282CAV3").is_ok());
        assert!(pricing.borrow().get("91282CBL4").is_ok());
        assert!(pricing.borrow().get("91282CDH2").is_err());
    }

    #[test]
    fn wrong_field_count_aborts_by_default() {
        let refdata = ReferenceData::us_treasuries();
        let pricing = Rc::new(RefCell::new(PricingService::new()));
        let input = "Timestamp,CUSIP,Bid,Ask,Spread\n2026-08-28 09:00:00.000,91282CAV3,99-000\n";

        assert!(matches!(
            ingest_prices(Cursor::new(input), &refdata, &pricing, ErrorPolicy::Abort),
            Err(PipelineError::Csv(_))
        ));
    }

    #[test]
    fn skip_policy_drops_bad_records_and_continues() {
        let refdata = ReferenceData::us_treasuries();
        let pricing = Rc::new(RefCell::new(PricingService::new()));
        let input = "\
Timestamp,CUSIP,Bid,Ask,Spread
2026-08-28 09:00:00.000,91282CAV3,99,99-004,0-004
2026-08-28 09:00:00.001,91282CAV3,99-000,99-004,0-004
";

        let count =
            ingest_prices(Cursor::new(input), &refdata, &pricing, ErrorPolicy::Skip).unwrap();
        assert_eq!(count, 1);
        assert!(pricing.borrow().get("91282CAV3").is_ok());
    }
}
