//! Shared building blocks for the Siklus workspace: calendar value types,
//! the error taxonomy, constants and layered configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
