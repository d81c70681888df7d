//! Terminal output formatting.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use visibility_core::{
    report::{self, PREVIEW_ROWS},
    AnalysisRow, BrandProfile, QueryCount, Summary, NEGATIVE, NEUTRAL, POSITIVE,
};

/// Full-width length of a 100% bar in the sentiment chart.
const CHART_WIDTH: usize = 40;

const QUERY_WIDTH: usize = 44;
const URLS_WIDTH: usize = 40;

pub fn print_banner() {
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║        Search Visibility Agent         ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn print_step(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_inputs(profile: &BrandProfile, count: QueryCount) {
    println!("{}: {}", "Brand".bold(), profile.brand);
    println!("{}: {}", "Products".bold(), profile.products);
    println!("{}: {}", "Category".bold(), profile.category);
    println!("{}: {}", "Competitors".bold(), profile.competitors);
    println!("{}: {}", "Queries".bold(), count.get());
    println!();
}

/// Progress bar for a loop over `len` items.
pub fn progress_bar(len: usize, message: &'static str) -> Result<ProgressBar> {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    bar.set_message(message);
    Ok(bar)
}

pub fn print_summary(summary: &Summary) {
    println!();
    println!("{}", "Results Summary".cyan().bold());
    println!(
        "{}: {}",
        "Brand Visibility Rate".bold(),
        format!("{:.1}%", summary.visibility_rate).green()
    );
    if let Some(share) = summary.positive_share() {
        println!(
            "{}: {}",
            "Positive Mentions".bold(),
            format!("{:.1}%", share).green()
        );
    }
}

fn colored_label(label: &str, width: usize) -> ColoredString {
    let padded = format!("{:<width$}", label);
    match label {
        POSITIVE => padded.green(),
        NEGATIVE => padded.red(),
        NEUTRAL => padded.yellow(),
        _ => padded.normal(),
    }
}

fn bar_width(percent: f64) -> usize {
    ((percent / 100.0) * CHART_WIDTH as f64).round() as usize
}

pub fn print_sentiment_chart(summary: &Summary) {
    println!();
    println!("{}", "Sentiment Distribution".bold());

    if summary.sentiment.is_empty() {
        println!("{}", "No answers analyzed.".dimmed());
        return;
    }

    for share in &summary.sentiment {
        println!(
            "  {} {:<width$} {:>5.1}% ({})",
            colored_label(&share.label, 10),
            "█".repeat(bar_width(share.percent)),
            share.percent,
            share.count,
            width = CHART_WIDTH
        );
    }
}

/// Print the first rows of the result set as a table.
pub fn print_results_table(rows: &[AnalysisRow]) {
    println!();
    println!("{}", "Detailed Results".bold());

    if rows.is_empty() {
        println!("{}", "No results.".dimmed());
        return;
    }

    println!(
        "{:<qw$} {:<8} {:<10} {}",
        "Query",
        "Visible",
        "Sentiment",
        "URLs",
        qw = QUERY_WIDTH
    );
    println!("{}", "─".repeat(QUERY_WIDTH + URLS_WIDTH + 21));

    for row in report::preview(rows) {
        let visible = if row.visible {
            format!("{:<8}", "yes").green()
        } else {
            format!("{:<8}", "no").dimmed()
        };

        println!(
            "{:<qw$} {} {} {}",
            truncate(&row.query, QUERY_WIDTH),
            visible,
            colored_label(&row.sentiment, 10),
            truncate(&row.urls, URLS_WIDTH).dimmed(),
            qw = QUERY_WIDTH
        );
    }

    if rows.len() > PREVIEW_ROWS {
        println!(
            "{}",
            format!("Showing first {} of {} rows.", PREVIEW_ROWS, rows.len()).dimmed()
        );
    }
}

pub fn print_export(path: &Path) {
    println!();
    println!(
        "{} {}",
        "Results exported to".bold(),
        path.display().to_string().cyan()
    );
}

/// Shorten to at most `max_chars` characters, ending with `...` when cut.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a longer query text", 10), "a longe...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(100.0), CHART_WIDTH);
        assert_eq!(bar_width(50.0), CHART_WIDTH / 2);
        assert_eq!(bar_width(0.0), 0);
    }
}
