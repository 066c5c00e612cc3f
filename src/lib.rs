//! BacktestProbe Library
//!
//! Submits a trading strategy graph to a backtest API endpoint and
//! reports the response in human-readable form.

pub mod backtest;
pub mod common;
pub mod config;
pub mod strategy;

// Re-export commonly used types
pub use backtest::{BacktestClient, BacktestResponse, MetricsSummary, RequestRunner, RunOutcome};
pub use common::errors::{FailureKind, ProbeError, Result};
pub use config::types::AppConfig;
pub use strategy::{Edge, Node, NodeType, Strategy, StrategyMetadata};
