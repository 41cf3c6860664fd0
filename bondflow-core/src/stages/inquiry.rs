//! Inquiry lifecycle stage.
//!
//! A received inquiry is quoted through an outbound responder, the quote
//! is re-ingested, and the completed inquiry is evicted from the live
//! store. Each ingest pass re-runs the full state ladder on the record's
//! current value, so one received inquiry produces several notifications
//! on its way to `Done`.

use crate::domain::{Inquiry, InquiryState};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

/// Outbound quoting adapter. Returns the re-marked inquiry to submit
/// back into the service, or `None` to leave the inquiry untouched.
pub trait QuoteResponder {
    fn respond(&mut self, inquiry: &Inquiry) -> Option<Inquiry>;
}

/// Quotes every received inquiry at par.
pub struct AutoQuoteResponder;

impl QuoteResponder for AutoQuoteResponder {
    fn respond(&mut self, inquiry: &Inquiry) -> Option<Inquiry> {
        let mut quoted = inquiry.clone();
        quoted.price = 100.0;
        quoted.state = InquiryState::Quoted;
        Some(quoted)
    }
}

pub struct InquiryService {
    store: KeyedStore<Inquiry>,
    listeners: ListenerSet<Inquiry>,
    responder: Box<dyn QuoteResponder>,
}

impl InquiryService {
    pub fn new(responder: Box<dyn QuoteResponder>) -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            responder,
        }
    }

    pub fn get(&self, inquiry_id: &str) -> Result<&Inquiry, PipelineError> {
        self.store.get(inquiry_id)
    }

    pub fn subscribe(&mut self, listener: SharedListener<Inquiry>) {
        self.listeners.subscribe(listener);
    }

    pub fn on_message(&mut self, inquiry: Inquiry) -> Result<(), PipelineError> {
        self.ingest(inquiry).map(|_| ())
    }

    /// Quote a live inquiry at `price` and run it back through the ladder.
    pub fn send_quote(&mut self, inquiry_id: &str, price: f64) -> Result<(), PipelineError> {
        let mut inquiry = self.store.get(inquiry_id)?.clone();
        inquiry.price = price;
        inquiry.state = InquiryState::Quoted;
        self.ingest(inquiry).map(|_| ())
    }

    /// Mark a live inquiry rejected.
    pub fn reject(&mut self, inquiry_id: &str) -> Result<(), PipelineError> {
        let mut inquiry = self.store.get(inquiry_id)?.clone();
        inquiry.state = InquiryState::Rejected;
        self.ingest(inquiry).map(|_| ())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// One pass of the state ladder. Returns the record's final value so
    /// an outer pass observes mutations made by a recursive inner pass.
    fn ingest(&mut self, mut inquiry: Inquiry) -> Result<Inquiry, PipelineError> {
        if inquiry.state == InquiryState::Received {
            if let Some(quoted) = self.responder.respond(&inquiry) {
                inquiry = self.ingest(quoted)?;
            }
        }
        if inquiry.state == InquiryState::Quoted {
            inquiry.state = InquiryState::Done;
            self.store.remove(&inquiry.inquiry_id);
            self.store
                .insert(inquiry.inquiry_id.clone(), inquiry.clone());
            self.listeners.notify(&inquiry)?;
        }
        if inquiry.state == InquiryState::Done {
            self.store.remove(&inquiry.inquiry_id);
        } else {
            self.store
                .insert(inquiry.inquiry_id.clone(), inquiry.clone());
        }
        self.listeners.notify(&inquiry)?;
        Ok(inquiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bond, TradeSide};
    use crate::service::share;
    use chrono::NaiveDate;

    struct Recorder {
        states: Rc<RefCell<Vec<InquiryState>>>,
    }

    impl Listener<Inquiry> for Recorder {
        fn process_add(&mut self, data: &Inquiry) -> Result<(), PipelineError> {
            self.states.borrow_mut().push(data.state);
            Ok(())
        }
    }

    fn inquiry(id: &str, state: InquiryState) -> Inquiry {
        Inquiry {
            inquiry_id: id.into(),
            product: Bond::new(
                "91282CCB5",
                "US5Y",
                0.04875,
                NaiveDate::from_ymd_opt(2029, 11, 30).unwrap(),
            ),
            side: TradeSide::Buy,
            quantity: 1_000_000,
            price: 0.0,
            state,
        }
    }

    fn service_with_recorder() -> (InquiryService, Rc<RefCell<Vec<InquiryState>>>) {
        let states = Rc::new(RefCell::new(Vec::new()));
        let mut service = InquiryService::new(Box::new(AutoQuoteResponder));
        service.subscribe(share(Recorder {
            states: Rc::clone(&states),
        }));
        (service, states)
    }

    #[test]
    fn received_inquiry_completes_with_three_notifications() {
        let (mut service, states) = service_with_recorder();
        service
            .on_message(inquiry("INQ1", InquiryState::Received))
            .unwrap();

        assert_eq!(
            *states.borrow(),
            vec![InquiryState::Done, InquiryState::Done, InquiryState::Done]
        );
        assert!(service.get("INQ1").is_err());
    }

    #[test]
    fn quoted_inquiry_completes_with_two_notifications() {
        let (mut service, states) = service_with_recorder();
        service
            .on_message(inquiry("INQ2", InquiryState::Quoted))
            .unwrap();

        assert_eq!(states.borrow().len(), 2);
        assert!(service.get("INQ2").is_err());
    }

    #[test]
    fn rejected_inquiry_stays_live() {
        let (mut service, states) = service_with_recorder();
        service
            .on_message(inquiry("INQ3", InquiryState::Rejected))
            .unwrap();

        assert_eq!(*states.borrow(), vec![InquiryState::Rejected]);
        assert_eq!(service.get("INQ3").unwrap().state, InquiryState::Rejected);
    }

    #[test]
    fn send_quote_requires_live_inquiry() {
        let (mut service, _states) = service_with_recorder();
        assert!(matches!(
            service.send_quote("MISSING", 100.0),
            Err(PipelineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn reject_then_send_quote_runs_the_ladder() {
        struct Silent;
        impl QuoteResponder for Silent {
            fn respond(&mut self, _inquiry: &Inquiry) -> Option<Inquiry> {
                None
            }
        }

        let mut service = InquiryService::new(Box::new(Silent));
        service
            .on_message(inquiry("INQ4", InquiryState::Received))
            .unwrap();
        assert_eq!(service.get("INQ4").unwrap().state, InquiryState::Received);

        service.send_quote("INQ4", 99.984375).unwrap();
        assert!(service.get("INQ4").is_err());
    }
}
