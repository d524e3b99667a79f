//! focustrack - Pomodoro-style study timer CLI library
//!
//! This library provides the core functionality for focustrack: session
//! persistence and statistics, the countdown timer, break content
//! fetching, task management, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: session records and the persisted session store
//! - `timer`: countdown engine for focus and break intervals
//! - `content`: break content fetching with API fallbacks
//! - `tasks`: to-do task model and store
//! - `report`: report formatting and the weekly chart
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use focustrack::session::{SessionKind, SessionStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = SessionStore::new()?;
//!     store.append_focus(1500.0, true);
//!     println!("streak: {} days", store.current_streak());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod report;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod timer;

// Re-export commonly used types
pub use config::Config;
pub use content::{BreakContent, BreakContentService};
pub use error::{FocustrackError, Result};
pub use session::{DayStat, SessionKind, SessionRecord, SessionStore};
pub use tasks::{TaskStore, TodoTask};
