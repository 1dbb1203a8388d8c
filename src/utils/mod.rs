// Utility functions module
pub mod config;
pub mod formatters;
pub mod kv_store;
pub mod stat_value;
pub mod thresholds;
