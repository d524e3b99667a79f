//! Countdown timer for focus and break intervals
//!
//! Ticks once per second, redrawing the remaining time in place, and
//! races Ctrl-C so an interval can be stopped early. The caller decides
//! what to record from the outcome.

use crate::error::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;
use tokio::time::{interval, Instant};

/// How a countdown ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownOutcome {
    /// The planned duration fully elapsed
    Completed,
    /// Ctrl-C arrived first; `elapsed` is the time actually spent
    Stopped { elapsed: Duration },
}

/// A single countdown over a planned duration
pub struct Countdown {
    planned: Duration,
    label: String,
}

impl Countdown {
    /// Create a countdown
    ///
    /// # Arguments
    ///
    /// * `planned` - Planned interval length
    /// * `label` - Short label shown next to the clock
    pub fn new(planned: Duration, label: impl Into<String>) -> Self {
        Self {
            planned,
            label: label.into(),
        }
    }

    /// Run the countdown to completion or early stop
    ///
    /// # Errors
    ///
    /// Returns an error only if the Ctrl-C handler cannot be installed.
    pub async fn run(&self) -> Result<CountdownOutcome> {
        let started = Instant::now();
        let mut ticker = interval(Duration::from_secs(1));

        for remaining in (0..=self.planned.as_secs()).rev() {
            tokio::select! {
                _ = ticker.tick() => {
                    print!(
                        "\r  {}  {}   ",
                        self.label.bold(),
                        format_clock(remaining).cyan()
                    );
                    std::io::stdout().flush().ok();
                }
                result = tokio::signal::ctrl_c() => {
                    result?;
                    println!();
                    return Ok(CountdownOutcome::Stopped {
                        elapsed: started.elapsed(),
                    });
                }
            }
        }

        println!();
        Ok(CountdownOutcome::Completed)
    }
}

/// Render whole seconds as `MM:SS`
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[tokio::test]
    async fn test_zero_duration_countdown_completes() {
        let countdown = Countdown::new(Duration::from_secs(0), "test");
        let outcome = countdown.run().await.expect("countdown failed");
        assert_eq!(outcome, CountdownOutcome::Completed);
    }

    #[tokio::test]
    async fn test_one_second_countdown_completes() {
        let countdown = Countdown::new(Duration::from_secs(1), "test");
        let started = std::time::Instant::now();
        let outcome = countdown.run().await.expect("countdown failed");
        assert_eq!(outcome, CountdownOutcome::Completed);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
