//! The `focus` command: run a focus countdown and record the session

use crate::config::Config;
use crate::content;
use crate::error::Result;
use crate::session::SessionStore;
use crate::timer::{Countdown, CountdownOutcome};
use colored::Colorize;
use std::time::Duration;

/// Run a focus session
///
/// A completed countdown records a successful session. An early stop
/// records a partial (unsuccessful) session when more than the configured
/// threshold elapsed; shorter attempts are discarded.
pub async fn run_focus(config: &Config, store: &SessionStore, minutes: Option<u64>) -> Result<()> {
    let minutes = minutes.unwrap_or(config.timer.focus_minutes);
    let planned = Duration::from_secs(minutes * 60);

    println!(
        "Focusing for {} minutes. Press Ctrl-C to stop early.\n",
        minutes
    );

    let countdown = Countdown::new(planned, "Focus");
    match countdown.run().await? {
        CountdownOutcome::Completed => {
            let record = store.append_focus(planned.as_secs_f64(), true);
            tracing::info!("focus session {} recorded", record.id());

            println!("\n{}", "Focus session complete!".green().bold());
            println!("{}", content::random_local_quote().italic());
            println!(
                "\nTime for a break: {}",
                "focustrack break".cyan()
            );
        }
        CountdownOutcome::Stopped { elapsed } => {
            if elapsed.as_secs() > config.timer.partial_save_secs {
                let record = store.append_focus(elapsed.as_secs_f64(), false);
                println!("\n{}", "Session stopped early.".yellow());
                println!(
                    "Partial session of {} recorded.",
                    record.formatted_duration()
                );
            } else {
                println!(
                    "\n{}",
                    "Session stopped early, nothing recorded.".yellow()
                );
            }
        }
    }

    Ok(())
}
