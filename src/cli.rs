//! Command-line interface definition for focustrack
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for running timers, viewing reports and history,
//! and managing the task list.

use clap::{Parser, Subcommand};

/// focustrack - Pomodoro-style study timer CLI
///
/// Run focus and break countdowns, review session history and reports,
/// and manage a to-do list.
#[derive(Parser, Debug, Clone)]
#[command(name = "focustrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the database file (overrides config and data dir)
    #[arg(long, env = "FOCUSTRACK_DB")]
    pub storage_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for focustrack
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a focus countdown and record the session
    Focus {
        /// Override the focus length from config
        #[arg(short, long)]
        minutes: Option<u64>,
    },

    /// Fetch break content and run a break countdown
    Break {
        /// Take a long break instead of a short one
        #[arg(short, long)]
        long: bool,

        /// Override the break length from config
        #[arg(short, long)]
        minutes: Option<u64>,
    },

    /// Show streak, focus totals and the weekly chart
    Report,

    /// Inspect or manage recorded session history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Manage the to-do task list
    Tasks {
        /// Task subcommand
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List recorded sessions
    List,

    /// Delete all recorded history
    Clear,

    /// Dump all stored data as JSON
    Export,
}

/// Task management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        details: Option<String>,

        /// Due date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks, pending first
    List,

    /// Mark a task as done
    Done {
        /// Task id from `tasks list`
        id: i64,
    },

    /// Remove a task
    Remove {
        /// Task id from `tasks list`
        id: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: None,
            storage_path: None,
            verbose: false,
            command: Commands::Report,
        }
    }
}
