//! Report formatting and the weekly text chart

use crate::session::DayStat;
use colored::Colorize;

/// Widest bar drawn in the weekly chart, in blocks
const CHART_WIDTH: usize = 24;

/// Render seconds as `Xh Ym`, `Ym`, or `0m`
pub fn format_time(seconds: f64) -> String {
    let hours = seconds as i64 / 3600;
    let minutes = (seconds as i64 % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "0m".to_string()
    }
}

/// Compact form of [`format_time`], hours only when present
pub fn format_time_short(seconds: f64) -> String {
    let hours = seconds as i64 / 3600;
    let minutes = (seconds as i64 % 3600) / 60;

    if hours > 0 {
        format!("{}h", hours)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "0m".to_string()
    }
}

/// Render the 7-day focus history as a horizontal bar chart
///
/// One row per day, oldest first, bars scaled to the week's maximum
/// focus time.
pub fn render_week_chart(stats: &[DayStat]) -> String {
    let max_focus = stats.iter().map(|s| s.focus_time).fold(0.0, f64::max);

    let mut out = String::new();
    out.push_str(&format!("{}\n", "7-Day Focus History".bold()));

    if max_focus <= 0.0 {
        out.push_str("Start your first focus session to see your progress!\n");
        return out;
    }

    for day in stats {
        let ratio = day.focus_time / max_focus;
        let label = if day.focus_time > 0.0 {
            format_time_short(day.focus_time)
        } else {
            "0m".to_string()
        };

        out.push_str(&format!(
            "{}  {}  {}\n",
            day.date.format("%a"),
            colored_bar(ratio),
            label.dimmed()
        ));
    }

    out
}

// Padded to CHART_WIDTH before coloring so the escape codes never skew
// the column alignment.
fn colored_bar(ratio: f64) -> String {
    let blocks = ((ratio * CHART_WIDTH as f64).round() as usize).min(CHART_WIDTH);
    let bar = format!("{:<width$}", "█".repeat(blocks), width = CHART_WIDTH);
    if blocks == 0 {
        return bar;
    }

    if ratio > 0.7 {
        bar.yellow().to_string()
    } else if ratio > 0.4 {
        bar.normal().to_string()
    } else {
        bar.dimmed().to_string()
    }
}
