//! Historical persistence stage.
//!
//! Generic over the persisted type: each record is stored under its
//! persist key and appended to the sink as `timestamp,display-form`.

use crate::domain::{ExecutionOrder, Inquiry, Position, PriceStream, Pv01};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener};
use crate::sink::{timestamp, RecordSink};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

/// Something the historical stage can file away.
pub trait Persist {
    /// Store key for the latest persisted copy of this record.
    fn persist_key(&self) -> String;
}

impl Persist for Position {
    fn persist_key(&self) -> String {
        self.product.cusip.clone()
    }
}

impl Persist for Pv01 {
    fn persist_key(&self) -> String {
        self.product.cusip.clone()
    }
}

impl Persist for ExecutionOrder {
    fn persist_key(&self) -> String {
        self.order_id.clone()
    }
}

impl Persist for PriceStream {
    fn persist_key(&self) -> String {
        self.product.cusip.clone()
    }
}

impl Persist for Inquiry {
    fn persist_key(&self) -> String {
        self.inquiry_id.clone()
    }
}

pub struct HistoricalDataService<V> {
    store: KeyedStore<V>,
    sink: Box<dyn RecordSink>,
}

impl<V: Persist + Display + Clone> HistoricalDataService<V> {
    pub fn new(sink: Box<dyn RecordSink>) -> Self {
        Self {
            store: KeyedStore::new(),
            sink,
        }
    }

    pub fn get(&self, key: &str) -> Result<&V, PipelineError> {
        self.store.get(key)
    }

    /// Record the latest copy and append one timestamped line.
    pub fn persist(&mut self, data: &V) -> Result<(), PipelineError> {
        self.store.insert(data.persist_key(), data.clone());
        self.sink.append(&format!("{},{}", timestamp(), data))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

pub struct HistoricalListener<V> {
    service: Rc<RefCell<HistoricalDataService<V>>>,
}

impl<V> HistoricalListener<V> {
    pub fn new(service: Rc<RefCell<HistoricalDataService<V>>>) -> Self {
        Self { service }
    }
}

impl<V: Persist + Display + Clone> Listener<V> for HistoricalListener<V> {
    fn process_add(&mut self, data: &V) -> Result<(), PipelineError> {
        self.service.borrow_mut().persist(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bond;
    use chrono::NaiveDate;

    #[test]
    fn persists_latest_copy_and_appends_line() {
        struct Shared(Rc<RefCell<Vec<String>>>);
        impl RecordSink for Shared {
            fn append(&mut self, line: &str) -> std::io::Result<()> {
                self.0.borrow_mut().push(line.to_string());
                Ok(())
            }
        }

        let lines = Rc::new(RefCell::new(Vec::new()));
        let mut service: HistoricalDataService<Pv01> =
            HistoricalDataService::new(Box::new(Shared(Rc::clone(&lines))));

        let bond = Bond::new(
            "91282CAV3",
            "US2Y",
            0.045,
            NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
        );
        service
            .persist(&Pv01 {
                product: bond.clone(),
                pv01: 0.0185,
                quantity: 1_000_000,
            })
            .unwrap();
        service
            .persist(&Pv01 {
                product: bond,
                pv01: 0.0185,
                quantity: 3_000_000,
            })
            .unwrap();

        assert_eq!(lines.borrow().len(), 2);
        assert!(lines.borrow()[1].contains("91282CAV3"));
        // latest copy wins in the store
        assert_eq!(service.get("91282CAV3").unwrap().quantity, 3_000_000);
        assert_eq!(service.len(), 1);
    }
}
