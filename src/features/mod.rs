// Player lookup features
pub mod aggregator;
pub mod error;
pub mod history;
pub mod lookup;
pub mod resolver;
