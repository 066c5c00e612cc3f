//! Strategy payload submitted to the backtest endpoint
//!
//! A strategy is a directed graph of typed nodes plus metadata, in the
//! shape the visual strategy builder exports:
//!
//! ```text
//!   stock ──► technicalIndicator ──► priceCondition ──► orderType
//! ```
//!
//! # Components
//!
//! - [`Strategy`], [`Node`], [`Edge`], [`StrategyMetadata`]: wire types
//! - [`test_strategy`]: the built-in payload used when no file is given
//! - [`validate`]: advisory graph checks run before sending
//! - [`load_strategy`]: read an exported strategy from disk

pub mod loader;
pub mod sample;
pub mod types;
pub mod validation;

pub use loader::load_strategy;
pub use sample::test_strategy;
pub use types::{Edge, Node, NodeType, Strategy, StrategyMetadata};
pub use validation::{validate, Severity, ValidationIssue};
