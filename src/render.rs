//! Plain-text rendering for the terminal.

use std::fmt::Write;

use crate::compare::{MetricRow, MetricValue, ProfileReport, Scorecard, ValueFormat, Winner};
use crate::models::UserRecord;

const TROPHY: &str = "🏆";
const VALUE_WIDTH: usize = 14;
const LABEL_WIDTH: usize = 28;

pub fn format_value(value: &MetricValue, format: ValueFormat) -> String {
    match (value, format) {
        (MetricValue::Text(text), _) => text.clone(),
        (MetricValue::Missing, _) => "-".to_string(),
        (_, ValueFormat::OneDecimal) => format!("{:.1}", value.as_number()),
        (MetricValue::Int(v), ValueFormat::Plain) => v.to_string(),
        (MetricValue::Float(v), ValueFormat::Plain) => v.to_string(),
    }
}

fn user_card(out: &mut String, report: &ProfileReport, is_winner: bool) {
    let profile = &report.profile;
    if is_winner {
        let _ = writeln!(out, "  {TROPHY} WINNER");
    }
    let _ = writeln!(out, "  {} (@{})", profile.display_name(), profile.login);
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "  \"{bio}\"");
    }
    let _ = writeln!(out, "  Overall Score: {}", report.score);
}

fn metric_line(out: &mut String, row: &MetricRow) {
    let mark = |side: Winner| if row.winner == side { TROPHY } else { "  " };
    let _ = writeln!(
        out,
        "{} {:>vw$} | {:^lw$} | {:<vw$} {}",
        mark(Winner::Left),
        format_value(&row.left, row.format),
        row.label,
        format_value(&row.right, row.format),
        mark(Winner::Right),
        vw = VALUE_WIDTH,
        lw = LABEL_WIDTH,
    );
}

/// Side-by-side scorecard.
pub fn scorecard(card: &Scorecard) -> String {
    let mut out = String::new();

    user_card(&mut out, &card.left, card.winner == Winner::Left);
    out.push_str("\n  VS\n\n");
    user_card(&mut out, &card.right, card.winner == Winner::Right);

    out.push_str("\nDetailed Comparison\n");
    for row in &card.rows {
        metric_line(&mut out, row);
    }
    let _ = writeln!(
        out,
        "   {:>vw$} | {:^lw$} | {:<vw$}",
        card.top_languages.0.to_string(),
        "Top Language",
        card.top_languages.1.to_string(),
        vw = VALUE_WIDTH,
        lw = LABEL_WIDTH,
    );

    match card.winning_report() {
        Some(report) => {
            let _ = writeln!(out, "\nOverall winner: @{}", report.profile.login);
        }
        None => out.push_str("\nOverall: tie\n"),
    }
    out
}

/// One block per user record, in the order given.
pub fn user_grid(records: &[&UserRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No matching profiles.\n");
        return out;
    }
    for record in records {
        let _ = writeln!(out, "{} (@{})", record.display_name(), record.login.username);
        let _ = writeln!(out, "  {} · {}", record.location.country, record.gender);
        let _ = writeln!(out, "  {}", record.email);
        let _ = writeln!(out, "  {}", record.phone);
        let _ = writeln!(out, "  registered {}", record.registered.date.format("%Y-%m-%d"));
    }
    let _ = writeln!(out, "{} profile(s)", records.len());
    out
}
