//! Pricing stage: mid + spread per product.

use crate::domain::Price;
use crate::error::PipelineError;
use crate::service::{KeyedStore, ListenerSet, SharedListener};

/// Keeps the current mid/spread price per CUSIP and fans updates out to
/// the streaming and display stages. Inbound-only: the price feed has no
/// outbound adapter.
pub struct PricingService {
    store: KeyedStore<Price>,
    listeners: ListenerSet<Price>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&Price, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<Price>) {
        self.listeners.subscribe(listener);
    }

    /// Replace the price under its product key and notify subscribers.
    pub fn on_message(&mut self, price: Price) -> Result<(), PipelineError> {
        self.store.insert(price.product.cusip.clone(), price.clone());
        self.listeners.notify(&price)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}
