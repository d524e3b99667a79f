//! The `report` command: streak, totals and the weekly chart

use crate::report::{format_time, render_week_chart};
use crate::session::SessionStore;
use crate::timer::format_clock;
use chrono::Local;
use colored::Colorize;
use prettytable::{format, Table};

/// Print the reports screen
pub fn run_report(store: &SessionStore) {
    let streak = store.current_streak();
    let streak_text = if streak > 0 {
        format!("{} days", streak)
    } else {
        "Start today!".to_string()
    };

    let today_focus = store.total_focus_time_for_date(Local::now().date_naive());
    let weekly = store.weekly_stats();
    let weekly_focus: f64 = weekly.iter().map(|day| day.focus_time).sum();
    let average = store.average_focus_session_duration();

    println!("\n{}\n", "Reports".bold());
    println!("Current streak:   {}", streak_text.cyan());
    println!("Focus today:      {}", format_time(today_focus).cyan());
    println!("Focus this week:  {}", format_time(weekly_focus).cyan());
    println!(
        "Average session:  {}",
        format_clock(average as u64).cyan()
    );
    println!();

    print!("{}", render_week_chart(&weekly));
    println!();

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "Day".bold(),
        "Sessions".bold(),
        "Focus".bold()
    ]);

    for day in &weekly {
        table.add_row(prettytable::row![
            day.date.format("%a %b %d"),
            day.sessions,
            format_time(day.focus_time)
        ]);
    }

    table.printstd();
}
