// Data models
pub mod history;
pub mod player;
pub mod stats;
