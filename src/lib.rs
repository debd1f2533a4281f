//! Registry Dashboard
//!
//! Loads a monthly resident-registration extract (legacy Korean encoding),
//! normalizes its thousands-grouped numerals into typed records, and computes
//! the region, ranking and total views the dashboard charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod session;
pub mod views;

pub use config::{ColumnSchema, ConfigError, DashboardConfig};
pub use data::{Dataset, NumericField, Record};
pub use error::DashboardError;
pub use session::Session;
