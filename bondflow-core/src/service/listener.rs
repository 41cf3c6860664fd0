//! Subscriber fanout.

use crate::error::PipelineError;
use std::cell::RefCell;
use std::rc::Rc;

/// A subscriber to a stage's updates. Implementors are adapters that carry
/// the value into the next stage.
pub trait Listener<V> {
    /// Called once per new or updated value, after the owning stage has
    /// stored it. An error aborts the remainder of the cascade.
    fn process_add(&mut self, data: &V) -> Result<(), PipelineError>;
}

/// Shared handle to a listener. `Rc<RefCell<_>>` is deliberate: the
/// pipeline is single-threaded and fully synchronous, and these handles
/// being `!Send` keeps it that way at compile time.
pub type SharedListener<V> = Rc<RefCell<dyn Listener<V>>>;

/// Wrap a listener for registration.
pub fn share<V, L: Listener<V> + 'static>(listener: L) -> SharedListener<V> {
    Rc::new(RefCell::new(listener))
}

/// Append-only list of subscribers. There is no removal: listeners live for
/// the owning store's lifetime.
pub struct ListenerSet<V> {
    listeners: Vec<SharedListener<V>>,
}

impl<V> ListenerSet<V> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: SharedListener<V>) {
        self.listeners.push(listener);
    }

    /// Invoke every listener in registration order, synchronously, on the
    /// calling thread. The first failure stops the fanout and propagates.
    pub fn notify(&self, data: &V) -> Result<(), PipelineError> {
        for listener in &self.listeners {
            listener.borrow_mut().process_add(data)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<V> Default for ListenerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
