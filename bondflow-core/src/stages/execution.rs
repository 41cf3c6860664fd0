//! Execution stage: stores routed orders and publishes them to a venue.

use super::algo_execution::AlgoExecution;
use crate::domain::{ExecutionOrder, Venue};
use crate::error::PipelineError;
use crate::service::{KeyedStore, Listener, ListenerSet, SharedListener};
use std::cell::RefCell;
use std::rc::Rc;

/// Outbound adapter that routes an order to a venue, purely for external
/// visibility. Routing never changes stored state.
pub trait OrderRouter {
    fn route(&mut self, order: &ExecutionOrder, venue: Venue) -> Result<(), PipelineError>;
}

/// Default router: one structured log event per routed order.
pub struct LogRouter;

impl OrderRouter for LogRouter {
    fn route(&mut self, order: &ExecutionOrder, venue: Venue) -> Result<(), PipelineError> {
        tracing::info!(
            cusip = %order.product.cusip,
            order_id = %order.order_id,
            venue = %venue,
            side = %order.side,
            price = order.price,
            visible = order.visible_quantity,
            "routed execution order"
        );
        Ok(())
    }
}

/// Stores execution orders by order id, fans out, and routes.
pub struct ExecutionService {
    store: KeyedStore<ExecutionOrder>,
    listeners: ListenerSet<ExecutionOrder>,
    router: Box<dyn OrderRouter>,
}

impl ExecutionService {
    pub fn new(router: Box<dyn OrderRouter>) -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            router,
        }
    }

    pub fn get(&self, order_id: &str) -> Result<&ExecutionOrder, PipelineError> {
        self.store.get(order_id)
    }

    pub fn subscribe(&mut self, listener: SharedListener<ExecutionOrder>) {
        self.listeners.subscribe(listener);
    }

    /// Store the order, notify subscribers, then route it externally.
    pub fn add_order(&mut self, order: &ExecutionOrder, venue: Venue) -> Result<(), PipelineError> {
        self.store.insert(order.order_id.clone(), order.clone());
        self.listeners.notify(order)?;
        self.router.route(order, venue)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

/// Subscribes the execution stage to algo execution output.
pub struct ExecutionListener {
    service: Rc<RefCell<ExecutionService>>,
}

impl ExecutionListener {
    pub fn new(service: Rc<RefCell<ExecutionService>>) -> Self {
        Self { service }
    }
}

impl Listener<AlgoExecution> for ExecutionListener {
    fn process_add(&mut self, data: &AlgoExecution) -> Result<(), PipelineError> {
        self.service.borrow_mut().add_order(&data.order, data.venue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bond, OrderType, PricingSide};
    use chrono::NaiveDate;

    struct RecordingRouter {
        routed: Rc<RefCell<Vec<(String, Venue)>>>,
    }

    impl OrderRouter for RecordingRouter {
        fn route(&mut self, order: &ExecutionOrder, venue: Venue) -> Result<(), PipelineError> {
            self.routed.borrow_mut().push((order.order_id.clone(), venue));
            Ok(())
        }
    }

    fn order(id: &str) -> ExecutionOrder {
        ExecutionOrder {
            product: Bond::new(
                "912810TM0",
                "US20Y",
                0.0525,
                NaiveDate::from_ymd_opt(2044, 12, 15).unwrap(),
            ),
            order_id: id.into(),
            side: PricingSide::Bid,
            order_type: OrderType::Market,
            price: 99.5,
            visible_quantity: 1_000_000,
            hidden_quantity: 0,
            parent_order_id: None,
            is_child_order: false,
        }
    }

    #[test]
    fn stores_by_order_id_and_routes() {
        let routed = Rc::new(RefCell::new(Vec::new()));
        let mut execution = ExecutionService::new(Box::new(RecordingRouter {
            routed: Rc::clone(&routed),
        }));

        execution.add_order(&order("A1"), Venue::BrokerTec).unwrap();
        execution.add_order(&order("A2"), Venue::Cme).unwrap();

        assert_eq!(execution.len(), 2);
        assert_eq!(execution.get("A1").unwrap().order_id, "A1");
        assert_eq!(
            *routed.borrow(),
            vec![("A1".to_string(), Venue::BrokerTec), ("A2".to_string(), Venue::Cme)]
        );
    }
}
