//! Algo streaming stage: derives two-sided quotes from prices.

use crate::domain::{Price, PriceStream, PriceStreamOrder, PricingSide};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

/// Displayed size alternates between these two tiers on successive quotes.
const VISIBLE_TIERS: [i64; 2] = [1_000_000, 2_000_000];

/// Turns each price update into a [`PriceStream`] quote: bid/offer at
/// mid ∓ spread/2, alternating visible tiers, hidden = 2 × visible.
pub struct AlgoStreamingService {
    store: KeyedStore<PriceStream>,
    listeners: ListenerSet<PriceStream>,
    count: u64,
}

impl AlgoStreamingService {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            count: 0,
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&PriceStream, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<PriceStream>) {
        self.listeners.subscribe(listener);
    }

    /// Quote both sides of the price, store the stream, and notify.
    pub fn publish_stream(&mut self, price: &Price) -> Result<(), PipelineError> {
        let visible = VISIBLE_TIERS[(self.count % 2) as usize];
        let hidden = visible * 2;
        self.count += 1;

        let stream = PriceStream::new(
            price.product.clone(),
            PriceStreamOrder::new(price.bid(), visible, hidden, PricingSide::Bid),
            PriceStreamOrder::new(price.offer(), visible, hidden, PricingSide::Offer),
        );
        self.store
            .insert(stream.product.cusip.clone(), stream.clone());
        self.listeners.notify(&stream)
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscribes the algo streaming stage to pricing updates.
pub struct AlgoStreamingListener {
    service: Rc<RefCell<AlgoStreamingService>>,
}

impl AlgoStreamingListener {
    pub fn new(service: Rc<RefCell<AlgoStreamingService>>) -> Self {
        Self { service }
    }
}

impl Listener<Price> for AlgoStreamingListener {
    fn process_add(&mut self, data: &Price) -> Result<(), PipelineError> {
        self.service.borrow_mut().publish_stream(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bond;
    use chrono::NaiveDate;

    fn price() -> Price {
        Price::new(
            Bond::new(
                "91282CCS8",
                "US7Y",
                0.05,
                NaiveDate::from_ymd_opt(2031, 11, 30).unwrap(),
            ),
            100.0,
            1.0 / 64.0,
        )
    }

    #[test]
    fn quotes_derive_from_mid_and_spread() {
        let mut algo = AlgoStreamingService::new();
        algo.publish_stream(&price()).unwrap();
        let stream = algo.get("91282CCS8").unwrap();
        assert_eq!(stream.bid.price, 100.0 - 1.0 / 128.0);
        assert_eq!(stream.offer.price, 100.0 + 1.0 / 128.0);
    }

    #[test]
    fn visible_tier_alternates_with_hidden_double() {
        let mut algo = AlgoStreamingService::new();

        algo.publish_stream(&price()).unwrap();
        let first = algo.get("91282CCS8").unwrap().clone();
        assert_eq!(first.bid.visible_quantity, 1_000_000);
        assert_eq!(first.bid.hidden_quantity, 2_000_000);

        algo.publish_stream(&price()).unwrap();
        let second = algo.get("91282CCS8").unwrap();
        assert_eq!(second.offer.visible_quantity, 2_000_000);
        assert_eq!(second.offer.hidden_quantity, 4_000_000);
    }
}
