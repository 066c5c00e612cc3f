//! Backtest module - submission client and request runner

pub mod client;
pub mod metrics;
pub mod runner;

pub use client::{BacktestClient, BacktestResponse};
pub use metrics::MetricsSummary;
pub use runner::{RequestRunner, RunOutcome};
