//! Shared error types

pub mod errors;
