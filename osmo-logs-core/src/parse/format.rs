use crate::entry::{IoType, LogEntry};
use crate::parse::line::{CONTROL_MARKER, TIMESTAMP_FORMAT};

/// Rebuild the text line an entry was parsed from.
///
/// Structured entries come back as
/// `{ts} [{task}[ retry-N]][ [osmo]] {level_prefix}{message}`. Dump entries
/// have no structure to restore, so they format to their message.
///
/// The output is canonical rather than byte-exact. The parser accepts lines
/// with no space before the message (`[t]msg`) or an explicit `retry-0`, and
/// those come back as `[t] msg` and `[t]`. ANSI escapes stripped while
/// parsing are not restored either.
pub fn format_log_line(entry: &LogEntry) -> String {
    let labels = &entry.labels;
    let Some(task) = labels.task.as_deref() else {
        return entry.message.clone();
    };

    let mut out = String::with_capacity(entry.message.len() + task.len() + 32);
    out.push_str(&entry.timestamp.format(TIMESTAMP_FORMAT).to_string());
    out.push_str(" [");
    out.push_str(task);
    if labels.retry != "0" {
        out.push_str(" retry-");
        out.push_str(&labels.retry);
    }
    out.push(']');

    if labels.io_type == IoType::OsmoCtrl {
        out.push(' ');
        out.push_str(CONTROL_MARKER);
    }

    out.push(' ');
    if let Some(prefix) = &labels.level_prefix {
        out.push_str(prefix);
    }
    out.push_str(&entry.message);
    out
}
