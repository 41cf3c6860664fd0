//! BondFlow Core — domain types, keyed-store fanout framework, and the
//! trading pipeline stages.
//!
//! This crate contains the heart of the pipeline:
//! - Domain types (bonds, order books, prices, streams, executions,
//!   trades, positions, PV01 risk, inquiries)
//! - Keyed store + synchronous listener fanout framework
//! - Handle-fraction price codec and bond analytics
//! - Pipeline stages from pricing through historical persistence
//! - Inbound feed adapters with configurable per-record error policy

pub mod analytics;
pub mod domain;
pub mod error;
pub mod feeds;
pub mod fractional;
pub mod refdata;
pub mod service;
pub mod sink;
pub mod stages;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all domain value types cross stage boundaries
    /// as owned clones and serialize for diagnostics.
    #[allow(dead_code)]
    fn assert_clone_serialize() {
        fn require<T: Clone + serde::Serialize>() {}

        require::<domain::Bond>();
        require::<domain::Order>();
        require::<domain::BidOffer>();
        require::<domain::OrderBook>();
        require::<domain::Price>();
        require::<domain::PriceStream>();
        require::<domain::ExecutionOrder>();
        require::<domain::Trade>();
        require::<domain::Position>();
        require::<domain::Pv01>();
        require::<domain::BucketedSector>();
        require::<domain::BucketedRisk>();
        require::<domain::Inquiry>();
    }

    /// Architecture contract: `Listener` stays object-safe. Every stage
    /// subscription is a `SharedListener`, a trait object behind
    /// `Rc<RefCell<_>>` — if the trait gains a non-dispatchable method,
    /// the whole wiring model breaks, and this stops compiling first.
    #[test]
    fn listener_trait_is_object_safe() {
        fn _check_trait_object_builds(
            listener: &mut dyn service::Listener<domain::Price>,
            price: &domain::Price,
        ) -> Result<(), error::PipelineError> {
            listener.process_add(price)
        }
    }
}
