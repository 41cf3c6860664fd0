//! Streaming stage: keeps the latest quote per product and republishes it.

use crate::domain::PriceStream;
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

/// Outbound adapter that externalizes a quote. Never mutates stage state.
pub trait StreamPublisher {
    fn publish(&mut self, stream: &PriceStream) -> Result<(), PipelineError>;
}

/// Default publisher: one structured log event per quote.
pub struct LogPublisher;

impl StreamPublisher for LogPublisher {
    fn publish(&mut self, stream: &PriceStream) -> Result<(), PipelineError> {
        tracing::info!(
            cusip = %stream.product.cusip,
            bid = stream.bid.price,
            offer = stream.offer.price,
            visible = stream.bid.visible_quantity,
            "price stream"
        );
        Ok(())
    }
}

/// Stores the latest [`PriceStream`] per CUSIP, notifies subscribers, and
/// republishes through the outbound publisher.
pub struct StreamingService {
    store: KeyedStore<PriceStream>,
    listeners: ListenerSet<PriceStream>,
    publisher: Box<dyn StreamPublisher>,
}

impl StreamingService {
    pub fn new(publisher: Box<dyn StreamPublisher>) -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            publisher,
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&PriceStream, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<PriceStream>) {
        self.listeners.subscribe(listener);
    }

    pub fn add_stream(&mut self, stream: &PriceStream) -> Result<(), PipelineError> {
        self.store
            .insert(stream.product.cusip.clone(), stream.clone());
        self.listeners.notify(stream)?;
        self.publisher.publish(stream)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

/// Subscribes the streaming stage to algo streaming output.
pub struct StreamingListener {
    service: Rc<RefCell<StreamingService>>,
}

impl StreamingListener {
    pub fn new(service: Rc<RefCell<StreamingService>>) -> Self {
        Self { service }
    }
}

impl Listener<PriceStream> for StreamingListener {
    fn process_add(&mut self, data: &PriceStream) -> Result<(), PipelineError> {
        self.service.borrow_mut().add_stream(data)
    }
}
