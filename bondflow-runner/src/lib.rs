//! BondFlow Runner — pipeline assembly, synthetic feeds, run orchestration.
//!
//! This crate builds on `bondflow-core` to provide:
//! - Serializable runner configuration (TOML, defaults, error policy)
//! - Deterministic seeded feed generation for all four inputs
//! - Full pipeline wiring and in-order feed execution
//! - Run summaries and sector-bucketed risk reporting

pub mod config;
pub mod datagen;
pub mod pipeline;

pub use config::{ConfigError, RunnerConfig};
pub use datagen::generate_all;
pub use pipeline::{standard_sectors, RunSummary, RunnerError, TradingPipeline};
