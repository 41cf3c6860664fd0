//! Price display stage: throttled snapshot of the latest prices.

use crate::domain::Price;
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener};
use crate::sink::{timestamp, RecordSink};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(300);

/// Writes the most recent price per product to a sink, at most once per
/// throttle interval. Updates inside the window still refresh the store,
/// so the next flush always shows current data.
pub struct DisplayService {
    store: KeyedStore<Price>,
    sink: Box<dyn RecordSink>,
    throttle: Duration,
    last_publish: Option<Instant>,
}

impl DisplayService {
    pub fn new(sink: Box<dyn RecordSink>) -> Self {
        Self::with_throttle(sink, DEFAULT_THROTTLE)
    }

    pub fn with_throttle(sink: Box<dyn RecordSink>, throttle: Duration) -> Self {
        Self {
            store: KeyedStore::new(),
            sink,
            throttle,
            last_publish: None,
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&Price, PipelineError> {
        self.store.get(cusip)
    }

    pub fn on_price(&mut self, price: &Price) -> Result<(), PipelineError> {
        self.store
            .insert(price.product.cusip.clone(), price.clone());
        let due = match self.last_publish {
            Some(at) => at.elapsed() >= self.throttle,
            None => true,
        };
        if due {
            self.sink.append(&format!("{},{}", timestamp(), price))?;
            self.last_publish = Some(Instant::now());
        }
        Ok(())
    }
}

pub struct DisplayListener {
    service: Rc<RefCell<DisplayService>>,
}

impl DisplayListener {
    pub fn new(service: Rc<RefCell<DisplayService>>) -> Self {
        Self { service }
    }
}

impl Listener<Price> for DisplayListener {
    fn process_add(&mut self, data: &Price) -> Result<(), PipelineError> {
        self.service.borrow_mut().on_price(data)
    }
}
