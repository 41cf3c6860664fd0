//! Risk stage: PV01 per product plus sector-bucketed aggregation.

use crate::domain::{BucketedRisk, BucketedSector, Position, Pv01};
use crate::error::PipelineError;
use crate::refdata::ReferenceData;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

pub struct RiskService {
    store: KeyedStore<Pv01>,
    listeners: ListenerSet<Pv01>,
    refdata: Rc<ReferenceData>,
}

impl RiskService {
    pub fn new(refdata: Rc<ReferenceData>) -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            refdata,
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&Pv01, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<Pv01>) {
        self.listeners.subscribe(listener);
    }

    /// Fold an updated position into per-product risk. Unknown products
    /// are a hard failure: risk on an unpriced bond is meaningless.
    pub fn add_position(&mut self, position: &Position) -> Result<(), PipelineError> {
        let cusip = position.product.cusip.clone();
        let pv01 = self.refdata.pv01(&cusip)?;
        let fresh = Pv01 {
            product: position.product.clone(),
            pv01,
            quantity: position.aggregate_position(),
        };
        match self.store.get_mut(&cusip) {
            Ok(existing) => existing.add_quantity(fresh.quantity),
            Err(_) => self.store.insert(cusip, fresh.clone()),
        }
        self.listeners.notify(&fresh)
    }

    /// Read-time aggregation over a named sector of CUSIPs. Products the
    /// store has never seen contribute nothing.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> BucketedRisk {
        let mut total_pv01 = 0.0;
        let mut total_quantity = 0;
        for cusip in &sector.cusips {
            if let Ok(entry) = self.store.get(cusip) {
                total_pv01 += entry.pv01 * entry.quantity as f64;
                total_quantity += entry.quantity;
            }
        }
        BucketedRisk {
            sector: sector.name.clone(),
            pv01: total_pv01,
            quantity: total_quantity,
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

pub struct RiskListener {
    service: Rc<RefCell<RiskService>>,
}

impl RiskListener {
    pub fn new(service: Rc<RefCell<RiskService>>) -> Self {
        Self { service }
    }
}

impl Listener<Position> for RiskListener {
    fn process_add(&mut self, data: &Position) -> Result<(), PipelineError> {
        self.service.borrow_mut().add_position(data)
    }
}
