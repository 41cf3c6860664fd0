//! Algorithmic execution stage: turns order books into execution orders.

use crate::domain::{ExecutionOrder, OrderBook, OrderType, PricingSide, Venue};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

/// Spread at or below which the market counts as tight: 1/128 of a point.
pub const TIGHT_SPREAD: f64 = 1.0 / 128.0;

/// Strategy seam: (order book, running call count) → execution order.
/// Swapping the factory substitutes the decision logic without touching
/// the surrounding pipeline.
pub trait AlgoOrderFactory {
    fn create_order(&self, book: &OrderBook, count: u64) -> Result<ExecutionOrder, PipelineError>;
}

/// Default strategy.
///
/// In a tight market (spread ≤ [`TIGHT_SPREAD`]) it trades through the
/// spread on alternating calls: even counts quote at the offer price with
/// the bid's quantity, odd counts at the bid price with the offer's
/// quantity. Otherwise it posts at the bid with the bid's quantity. Always
/// a market order, fully visible, no parent.
pub struct SpreadCrossingFactory;

impl AlgoOrderFactory for SpreadCrossingFactory {
    fn create_order(&self, book: &OrderBook, count: u64) -> Result<ExecutionOrder, PipelineError> {
        let best = book.best_bid_offer()?;

        let (side, price, quantity) = if best.spread() <= TIGHT_SPREAD {
            if count % 2 == 0 {
                (PricingSide::Bid, best.offer.price, best.bid.quantity)
            } else {
                (PricingSide::Offer, best.bid.price, best.offer.quantity)
            }
        } else {
            (PricingSide::Bid, best.bid.price, best.bid.quantity)
        };

        Ok(ExecutionOrder {
            product: book.product.clone(),
            order_id: format!("ALGO-{count:07}"),
            side,
            order_type: OrderType::Market,
            price,
            visible_quantity: quantity,
            hidden_quantity: 0,
            parent_order_id: None,
            is_child_order: false,
        })
    }
}

/// An execution order paired with the venue it will route to.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgoExecution {
    pub order: ExecutionOrder,
    pub venue: Venue,
}

/// Runs the pluggable decision logic on every order book update.
pub struct AlgoExecutionService {
    store: KeyedStore<AlgoExecution>,
    listeners: ListenerSet<AlgoExecution>,
    factory: Box<dyn AlgoOrderFactory>,
    count: u64,
}

impl AlgoExecutionService {
    pub fn new(factory: Box<dyn AlgoOrderFactory>) -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            factory,
            count: 0,
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&AlgoExecution, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<AlgoExecution>) {
        self.listeners.subscribe(listener);
    }

    /// Create an order for this book, store it by CUSIP, and notify.
    pub fn execute(&mut self, book: &OrderBook) -> Result<(), PipelineError> {
        let order = self.factory.create_order(book, self.count)?;
        self.count += 1;

        let algo = AlgoExecution {
            order,
            venue: Venue::BrokerTec,
        };
        self.store
            .insert(algo.order.product.cusip.clone(), algo.clone());
        self.listeners.notify(&algo)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Subscribes the algo execution stage to market data updates.
pub struct AlgoExecutionListener {
    service: Rc<RefCell<AlgoExecutionService>>,
}

impl AlgoExecutionListener {
    pub fn new(service: Rc<RefCell<AlgoExecutionService>>) -> Self {
        Self { service }
    }
}

impl Listener<OrderBook> for AlgoExecutionListener {
    fn process_add(&mut self, data: &OrderBook) -> Result<(), PipelineError> {
        self.service.borrow_mut().execute(data)
    }
}
