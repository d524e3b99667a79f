//! The `history` command: list, clear and export session records

use crate::cli::HistoryCommand;
use crate::error::Result;
use crate::report::format_time;
use crate::session::SessionStore;
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub fn handle_history(command: HistoryCommand, store: &SessionStore) -> Result<()> {
    match command {
        HistoryCommand::List => {
            let records = store.records();

            if records.is_empty() {
                println!("{}", "No session history recorded yet.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "Date".bold(),
                "Time".bold(),
                "Kind".bold(),
                "Length".bold(),
                "Completed".bold()
            ]);

            // Most recent first.
            for record in records.iter().rev() {
                let completed = if record.completed_successfully() {
                    "yes".green()
                } else {
                    "no".yellow()
                };

                table.add_row(prettytable::row![
                    record.date_string(),
                    record.time_string(),
                    record.kind().display_name(),
                    record.formatted_duration(),
                    completed
                ]);
            }

            println!("\nSession History:");
            table.printstd();
            println!();
            println!(
                "Total focus {}, total breaks {}.",
                format_time(store.total_focus_time()).cyan(),
                format_time(store.total_break_time()).cyan()
            );
            println!();
        }
        HistoryCommand::Clear => {
            store.clear_all();
            println!("{}", "Session history cleared.".green());
        }
        HistoryCommand::Export => {
            println!("{}", serde_json::to_string_pretty(&store.export_data())?);
        }
    }

    Ok(())
}
