use crate::adapter::LogQueryResult;
use crate::cli::logs::constants::{MAX_BAR_WIDTH, MAX_FACET_VALUES};
use crate::compute::{FieldFacet, HistogramResult};
use crate::entry::{LogEntry, LogLevel, LogSource};
use crate::logging::LogMode;
use crate::parse::{TIMESTAMP_FORMAT, format_log_line};
use owo_colors::OwoColorize;

pub fn render_entry(entry: &LogEntry, mode: LogMode, color: bool) -> String {
    match mode {
        LogMode::Raw => format_log_line(entry),
        LogMode::Pretty => render_pretty(entry, color),
    }
}

/// `2024/01/01 10:00:00 ERROR train#1  message`
pub fn render_pretty(entry: &LogEntry, color: bool) -> String {
    let ts = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
    let level = format!("{:<5}", entry.labels.level.as_str().to_ascii_uppercase());

    let mut origin = entry.labels.task.clone().unwrap_or_else(|| "-".to_string());
    if entry.labels.retry != "0" {
        origin.push('#');
        origin.push_str(&entry.labels.retry);
    }
    if entry.labels.source == LogSource::Osmo {
        origin.push_str(" [osmo]");
    }

    if !color {
        return format!("{ts} {level} {origin}  {}", entry.message);
    }

    let level = match entry.labels.level {
        LogLevel::Debug => level.dimmed().to_string(),
        LogLevel::Info => level.green().to_string(),
        LogLevel::Warn => level.yellow().to_string(),
        LogLevel::Error => level.red().to_string(),
        LogLevel::Fatal => level.red().bold().to_string(),
    };
    format!(
        "{} {level} {}  {}",
        ts.dimmed(),
        origin.cyan(),
        entry.message
    )
}

pub fn render_stats(result: &LogQueryResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Workflow Logs\n\
         =============\n\
         entries: {} of {} | buckets: {} x {}s\n\n",
        result.entries.len(),
        result.total,
        result.histogram.buckets.len(),
        result.histogram.interval_secs
    ));

    out.push_str(&render_histogram(&result.histogram));
    out.push('\n');
    out.push_str(&render_level_totals(&result.histogram));

    for facet in &result.facets {
        out.push('\n');
        out.push_str(&render_facet(facet));
    }

    out
}

fn render_histogram(histogram: &HistogramResult) -> String {
    let Some(peak) = histogram.buckets.iter().map(|b| b.total).max() else {
        return "Histogram: <no entries>\n".to_string();
    };

    let mut out = String::from("Histogram:\n");
    for bucket in &histogram.buckets {
        let bar = if peak == 0 {
            0
        } else {
            ((bucket.total as f64 / peak as f64) * MAX_BAR_WIDTH as f64).ceil() as usize
        };
        out.push_str(&format!(
            "  {} {:<width$} {:>6}\n",
            bucket.timestamp.format(TIMESTAMP_FORMAT),
            "█".repeat(bar),
            bucket.total,
            width = MAX_BAR_WIDTH
        ));
    }
    out
}

fn render_level_totals(histogram: &HistogramResult) -> String {
    let mut out = String::from("Levels:");
    for level in LogLevel::ALL {
        let count: u64 = histogram
            .buckets
            .iter()
            .map(|b| b.counts.get(&level).copied().unwrap_or(0))
            .sum();
        out.push_str(&format!(" {level}={count}"));
    }
    out.push('\n');
    out
}

fn render_facet(facet: &FieldFacet) -> String {
    let mut out = format!("{}:\n", facet.field.as_str());
    if facet.values.is_empty() {
        out.push_str("  <none>\n");
        return out;
    }

    for v in facet.values.iter().take(MAX_FACET_VALUES) {
        out.push_str(&format!("  {:<24} {:>6}\n", v.value, v.count));
    }
    let rest = facet.values.len().saturating_sub(MAX_FACET_VALUES);
    if rest > 0 {
        out.push_str(&format!("  … {rest} more\n"));
    }
    out
}
