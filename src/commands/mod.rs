// Slash commands
pub mod faceit;
pub mod help;
pub mod history;
