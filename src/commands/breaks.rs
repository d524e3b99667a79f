//! The `break` command: show break content and run a break countdown

use crate::config::Config;
use crate::content::BreakContentService;
use crate::error::Result;
use crate::session::{SessionKind, SessionStore};
use crate::timer::{Countdown, CountdownOutcome};
use colored::Colorize;
use std::time::Duration;

/// Run a break session
///
/// Break content is fetched (with fallbacks) and shown before the
/// countdown starts. Only breaks that run to completion are recorded,
/// always as successful.
pub async fn run_break(
    config: &Config,
    store: &SessionStore,
    long: bool,
    minutes: Option<u64>,
) -> Result<()> {
    let kind = if long {
        SessionKind::LongBreak
    } else {
        SessionKind::ShortBreak
    };
    let minutes = minutes.unwrap_or(if long {
        config.timer.long_break_minutes
    } else {
        config.timer.short_break_minutes
    });
    let planned = Duration::from_secs(minutes * 60);

    let service = BreakContentService::new(config.content.clone());
    let break_content = service.fetch_break_content().await;

    println!("{} ({} minutes)\n", kind.display_name().bold(), minutes);
    println!("  {}", break_content.suggestion);
    println!("  {}", break_content.quote.italic());
    println!("  {}\n", break_content.fun_fact.dimmed());

    let countdown = Countdown::new(planned, kind.display_name());
    match countdown.run().await? {
        CountdownOutcome::Completed => {
            let record = store.append_break(planned.as_secs_f64(), kind);
            tracing::info!("break session {} recorded", record.id());

            println!("\n{}", "Break finished, back to work!".green().bold());
        }
        CountdownOutcome::Stopped { .. } => {
            println!("\n{}", "Break cut short, not recorded.".yellow());
        }
    }

    Ok(())
}
