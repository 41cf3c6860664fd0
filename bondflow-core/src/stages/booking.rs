//! Trade booking stage.
//!
//! - `book_trade` notifies subscribers without storing the trade.
//! - `on_message` stores by trade id and then notifies; only feed trades
//!   take this path.
//! - `TradeBookingListener` converts executions into trades, cycling
//!   the destination book round-robin across [`TRADE_BOOKS`], and books
//!   them through the notify-only path.

use crate::domain::{ExecutionOrder, Trade};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

pub const TRADE_BOOKS: [&str; 3] = ["TRSY1", "TRSY2", "TRSY3"];

pub struct TradeBookingService {
    store: KeyedStore<Trade>,
    listeners: ListenerSet<Trade>,
}

impl TradeBookingService {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn get(&self, trade_id: &str) -> Result<&Trade, PipelineError> {
        self.store.get(trade_id)
    }

    pub fn subscribe(&mut self, listener: SharedListener<Trade>) {
        self.listeners.subscribe(listener);
    }

    /// Forward a trade downstream without recording it.
    pub fn book_trade(&mut self, trade: &Trade) -> Result<(), PipelineError> {
        self.listeners.notify(trade)
    }

    /// Record an inbound trade and fan it out.
    pub fn on_message(&mut self, trade: Trade) -> Result<(), PipelineError> {
        self.store.insert(trade.trade_id.clone(), trade.clone());
        self.listeners.notify(&trade)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

impl Default for TradeBookingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Books every filled execution into the next book in rotation.
pub struct TradeBookingListener {
    service: Rc<RefCell<TradeBookingService>>,
    count: u64,
}

impl TradeBookingListener {
    pub fn new(service: Rc<RefCell<TradeBookingService>>) -> Self {
        Self { service, count: 0 }
    }
}

impl Listener<ExecutionOrder> for TradeBookingListener {
    fn process_add(&mut self, data: &ExecutionOrder) -> Result<(), PipelineError> {
        let book = TRADE_BOOKS[(self.count as usize) % TRADE_BOOKS.len()];
        self.count += 1;
        let trade = Trade::from_execution(data, book.to_string());
        self.service.borrow_mut().book_trade(&trade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bond, OrderType, PricingSide, TradeSide};
    use crate::service::share;
    use chrono::NaiveDate;

    fn execution(id: &str, side: PricingSide) -> ExecutionOrder {
        ExecutionOrder {
            product: Bond::new(
                "91282CDH2",
                "US10Y",
                0.05125,
                NaiveDate::from_ymd_opt(2034, 12, 15).unwrap(),
            ),
            order_id: id.into(),
            side,
            order_type: OrderType::Market,
            price: 100.25,
            visible_quantity: 1_000_000,
            hidden_quantity: 500_000,
            parent_order_id: None,
            is_child_order: false,
        }
    }

    struct Recorder {
        trades: Rc<RefCell<Vec<Trade>>>,
    }

    impl Listener<Trade> for Recorder {
        fn process_add(&mut self, data: &Trade) -> Result<(), PipelineError> {
            self.trades.borrow_mut().push(data.clone());
            Ok(())
        }
    }

    #[test]
    fn books_executions_round_robin_without_storing() {
        let trades = Rc::new(RefCell::new(Vec::new()));
        let service = Rc::new(RefCell::new(TradeBookingService::new()));
        service.borrow_mut().subscribe(share(Recorder {
            trades: Rc::clone(&trades),
        }));
        let mut listener = TradeBookingListener::new(Rc::clone(&service));

        for i in 0..4 {
            listener
                .process_add(&execution(&format!("ALGO-{i:07}"), PricingSide::Bid))
                .unwrap();
        }

        let seen = trades.borrow();
        let booked: Vec<&str> = seen.iter().map(|t| t.book.as_str()).collect();
        assert_eq!(booked, vec!["TRSY1", "TRSY2", "TRSY3", "TRSY1"]);
        // execution-derived trades flow through without entering the store
        assert_eq!(service.borrow().len(), 0);
    }

    #[test]
    fn execution_side_maps_to_trade_side() {
        let trades = Rc::new(RefCell::new(Vec::new()));
        let service = Rc::new(RefCell::new(TradeBookingService::new()));
        service.borrow_mut().subscribe(share(Recorder {
            trades: Rc::clone(&trades),
        }));
        let mut listener = TradeBookingListener::new(Rc::clone(&service));

        listener.process_add(&execution("X1", PricingSide::Bid)).unwrap();
        listener.process_add(&execution("X2", PricingSide::Offer)).unwrap();

        let seen = trades.borrow();
        assert_eq!(seen[0].side, TradeSide::Buy);
        assert_eq!(seen[1].side, TradeSide::Sell);
        // quantity covers visible and hidden
        assert_eq!(seen[0].quantity, 1_500_000);
    }

    #[test]
    fn book_trade_notifies_without_storing() {
        struct Counting {
            seen: Rc<RefCell<u32>>,
        }
        impl Listener<Trade> for Counting {
            fn process_add(&mut self, _data: &Trade) -> Result<(), PipelineError> {
                *self.seen.borrow_mut() += 1;
                Ok(())
            }
        }

        let seen = Rc::new(RefCell::new(0));
        let mut service = TradeBookingService::new();
        service.subscribe(share(Counting { seen: Rc::clone(&seen) }));

        let trade = Trade::from_execution(&execution("T1", PricingSide::Bid), "TRSY1".into());
        service.book_trade(&trade).unwrap();

        assert_eq!(*seen.borrow(), 1);
        assert!(service.get("T1").is_err());
    }
}
