//! Shared error types for the waypost exporter toolkit.

pub mod error;

pub use error::{Error, Result};
