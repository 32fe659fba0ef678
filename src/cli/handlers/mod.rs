//! Command handlers, separated from parsing and validation.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
