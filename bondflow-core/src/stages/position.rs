//! Position stage: per-product, per-book signed quantity aggregation.

use crate::domain::{Position, Trade};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

pub struct PositionService {
    store: KeyedStore<Position>,
    listeners: ListenerSet<Position>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&Position, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<Position>) {
        self.listeners.subscribe(listener);
    }

    /// Apply a trade to the product's position and publish the updated
    /// snapshot.
    pub fn add_trade(&mut self, trade: &Trade) -> Result<(), PipelineError> {
        let cusip = trade.product.cusip.clone();
        let mut position = match self.store.get(&cusip) {
            Ok(existing) => existing.clone(),
            Err(_) => Position::new(trade.product.clone()),
        };
        position.apply(trade);
        self.store.insert(cusip, position.clone());
        self.listeners.notify(&position)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PositionListener {
    service: Rc<RefCell<PositionService>>,
}

impl PositionListener {
    pub fn new(service: Rc<RefCell<PositionService>>) -> Self {
        Self { service }
    }
}

impl Listener<Trade> for PositionListener {
    fn process_add(&mut self, data: &Trade) -> Result<(), PipelineError> {
        self.service.borrow_mut().add_trade(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bond, TradeSide};
    use crate::service::share;
    use chrono::NaiveDate;

    fn trade(id: &str, book: &str, quantity: i64, side: TradeSide) -> Trade {
        Trade {
            product: Bond::new(
                "91282CAV3",
                "US2Y",
                0.045,
                NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            ),
            trade_id: id.into(),
            price: 99.5,
            book: book.into(),
            quantity,
            side,
        }
    }

    #[test]
    fn accumulates_signed_quantities_across_books() {
        let mut service = PositionService::new();
        service.add_trade(&trade("T1", "TRSY1", 1_000_000, TradeSide::Buy)).unwrap();
        service.add_trade(&trade("T2", "TRSY1", 400_000, TradeSide::Sell)).unwrap();
        service.add_trade(&trade("T3", "TRSY2", 2_000_000, TradeSide::Buy)).unwrap();

        let position = service.get("91282CAV3").unwrap();
        assert_eq!(position.position("TRSY1"), 600_000);
        assert_eq!(position.position("TRSY2"), 2_000_000);
        assert_eq!(position.aggregate_position(), 2_600_000);
    }

    #[test]
    fn notifies_updated_snapshot_per_trade() {
        struct Recorder {
            aggregates: Rc<RefCell<Vec<i64>>>,
        }
        impl Listener<Position> for Recorder {
            fn process_add(&mut self, data: &Position) -> Result<(), PipelineError> {
                self.aggregates.borrow_mut().push(data.aggregate_position());
                Ok(())
            }
        }

        let aggregates = Rc::new(RefCell::new(Vec::new()));
        let mut service = PositionService::new();
        service.subscribe(share(Recorder {
            aggregates: Rc::clone(&aggregates),
        }));

        service.add_trade(&trade("T1", "TRSY1", 1_000_000, TradeSide::Buy)).unwrap();
        service.add_trade(&trade("T2", "TRSY2", 500_000, TradeSide::Sell)).unwrap();

        assert_eq!(*aggregates.borrow(), vec![1_000_000, 500_000]);
    }
}
