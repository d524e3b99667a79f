//! Command handlers, one module per CLI subcommand

pub mod breaks;
pub mod focus;
pub mod history;
pub mod report;
pub mod tasks;
