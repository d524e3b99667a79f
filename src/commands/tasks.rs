//! The `tasks` command: manage the to-do list

use crate::cli::TaskCommand;
use crate::error::Result;
use crate::tasks::TaskStore;
use anyhow::anyhow;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle task commands
pub fn handle_tasks(command: TaskCommand, store: &TaskStore) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            details,
            due,
        } => {
            let due_date = match due {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|e| anyhow!("Invalid due date '{}', expected YYYY-MM-DD: {}", raw, e))?,
                None => Local::now().date_naive(),
            };

            let task = store.add(&title, details.as_deref().unwrap_or(""), due_date)?;
            println!(
                "{}",
                format!("Added task {}: {}", task.id, task.title).green()
            );
        }
        TaskCommand::List => {
            let tasks = store.list()?;

            if tasks.is_empty() {
                println!("{}", "No tasks yet.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "ID".bold(),
                "Title".bold(),
                "Details".bold(),
                "Due".bold(),
                "Status".bold()
            ]);

            for task in tasks {
                let status = if task.is_done {
                    "done".green()
                } else if task.is_overdue() {
                    "overdue".red()
                } else {
                    "pending".normal()
                };

                table.add_row(prettytable::row![
                    task.id,
                    task.title,
                    task.details,
                    task.due_date.format("%Y-%m-%d"),
                    status
                ]);
            }

            table.printstd();
        }
        TaskCommand::Done { id } => {
            if store.set_done(id)? {
                println!("{}", format!("Task {} marked as done.", id).green());
            } else {
                println!("{}", format!("No task with id {}.", id).yellow());
            }
        }
        TaskCommand::Remove { id } => {
            if store.remove(id)? {
                println!("{}", format!("Task {} removed.", id).green());
            } else {
                println!("{}", format!("No task with id {}.", id).yellow());
            }
        }
    }

    Ok(())
}
