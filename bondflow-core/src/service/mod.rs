//! The keyed-store + listener-fanout framework every stage is built on.
//!
//! A stage owns a [`KeyedStore`] (string key → exactly one current value)
//! and a [`ListenerSet`]. Ingesting a record updates the store under the
//! value's natural key (overwrite semantics) and then notifies every
//! registered listener synchronously, in registration order, on the calling
//! thread. Listeners are themselves adapters into the next stage, so a
//! single inbound record drives a depth-first cascade through the whole
//! pipeline before the ingestion call returns.

pub mod listener;
pub mod store;

pub use listener::{share, Listener, ListenerSet, SharedListener};
pub use store::KeyedStore;
