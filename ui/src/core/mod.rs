//! Shared plumbing: errors, validation, transport, configuration and formatting.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod platform;
pub mod timing;
pub mod validate;

pub use error::{DashboardError, Result};
