use crate::entry::LogEntry;
use crate::parse::line::LineParser;

/// Parse a block of newline-separated text, keeping the backend's order.
///
/// Entries are never re-sorted: the backend is trusted to deliver them in
/// order. Debug builds only warn when the batch looks inverted.
pub fn parse_log_batch(text: &str, parser: &mut LineParser) -> Vec<LogEntry> {
    let entries: Vec<LogEntry> = text
        .split('\n')
        .filter_map(|line| parser.parse_line(line))
        .collect();

    if cfg!(debug_assertions) {
        warn_if_inverted(&entries, parser.workflow());
    }

    entries
}

fn warn_if_inverted(entries: &[LogEntry], workflow: &str) {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return;
    };

    if last.timestamp < first.timestamp {
        tracing::warn!(
            workflow,
            first = %first.timestamp,
            last = %last.timestamp,
            count = entries.len(),
            "log batch appears to be in reverse order"
        );
    }
}
