use crate::entry::{EntryIdGenerator, IoType, LogEntry, LogLabels, LogLevel};
use crate::parse::ansi::strip_ansi;
use crate::parse::level::{detect_level, split_level_prefix};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// `YYYY/MM/DD HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const TIMESTAMP_LEN: usize = 19;

pub const CONTROL_MARKER: &str = "[osmo]";
const RETRY_MARKER: &str = " retry-";

/// Source of "now" for lines that carry no timestamp of their own.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone)]
pub struct ParseContext {
    pub workflow: String,
    pub clock: Arc<dyn Clock>,
}

impl ParseContext {
    pub fn new(workflow: impl Into<String>) -> Self {
        Self {
            workflow: workflow.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl fmt::Debug for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("workflow", &self.workflow)
            .finish_non_exhaustive()
    }
}

/// The pieces of a line that matched the structured format.
struct StructuredLine<'a> {
    timestamp: DateTime<Utc>,
    task: &'a str,
    retry: &'a str,
    control: bool,
    message: &'a str,
}

/// Turns raw lines into [`LogEntry`] values for one workflow.
///
/// A parser owns its id counter, so use one parser per stream or batch and
/// ids stay unique across it.
#[derive(Debug)]
pub struct LineParser {
    ctx: ParseContext,
    ids: EntryIdGenerator,
}

impl LineParser {
    pub fn new(ctx: ParseContext) -> Self {
        Self {
            ctx,
            ids: EntryIdGenerator::new(),
        }
    }

    pub fn workflow(&self) -> &str {
        &self.ctx.workflow
    }

    /// Parse one line. Blank lines yield `None`; anything that does not match
    /// the structured format becomes a dump entry instead of an error.
    pub fn parse_line(&mut self, line: &str) -> Option<LogEntry> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            return None;
        }

        let entry = match split_structured(line) {
            Some(parts) => self.structured_entry(parts),
            None => self.dump_entry(line),
        };
        Some(entry)
    }

    fn structured_entry(&mut self, parts: StructuredLine<'_>) -> LogEntry {
        let io_type = if parts.control {
            IoType::OsmoCtrl
        } else {
            IoType::Stdout
        };

        let cleaned = strip_ansi(parts.message);
        let (level, level_prefix, message) = match split_level_prefix(&cleaned) {
            Some(prefix) => (
                prefix.level,
                Some(prefix.raw.to_string()),
                prefix.rest.to_string(),
            ),
            None => (LogLevel::default(), None, cleaned.to_string()),
        };

        LogEntry {
            id: self.ids.next_id(parts.timestamp),
            timestamp: parts.timestamp,
            message,
            labels: LogLabels {
                workflow: self.ctx.workflow.clone(),
                task: Some(parts.task.to_string()),
                retry: parts.retry.to_string(),
                level,
                io_type,
                source: io_type.source(),
                level_prefix,
            },
        }
    }

    fn dump_entry(&mut self, line: &str) -> LogEntry {
        let timestamp = self.ctx.clock.now();
        let message = strip_ansi(line).into_owned();

        LogEntry {
            id: self.ids.next_id(timestamp),
            timestamp,
            labels: LogLabels {
                workflow: self.ctx.workflow.clone(),
                task: None,
                retry: "0".to_string(),
                level: detect_level(&message),
                io_type: IoType::Dump,
                source: IoType::Dump.source(),
                level_prefix: None,
            },
            message,
        }
    }
}

fn split_structured(line: &str) -> Option<StructuredLine<'_>> {
    if !line.as_bytes().first()?.is_ascii_digit() {
        return None;
    }

    let (ts_text, rest) = line.split_at_checked(TIMESTAMP_LEN)?;
    let timestamp = parse_timestamp(ts_text)?;
    let rest = rest.strip_prefix(' ')?.strip_prefix('[')?;

    let close = rest.find(']')?;
    let (task, retry) = split_retry(&rest[..close]);
    if task.trim().is_empty() {
        return None;
    }
    let mut rest = &rest[close + 1..];

    let control = match rest
        .strip_prefix(' ')
        .and_then(|r| r.strip_prefix(CONTROL_MARKER))
    {
        Some(after) => {
            rest = after;
            true
        }
        None => false,
    };

    Some(StructuredLine {
        timestamp,
        task,
        retry,
        control,
        message: rest.strip_prefix(' ').unwrap_or(rest),
    })
}

/// Strict `YYYY/MM/DD HH:MM:SS`; chrono alone would accept unpadded fields.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let shape_ok = text.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'/',
        10 => b == b' ',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// `"train retry-2"` → `("train", "2")`; no suffix → retry `"0"`.
fn split_retry(token: &str) -> (&str, &str) {
    if let Some(idx) = token.rfind(RETRY_MARKER) {
        let n = &token[idx + RETRY_MARKER.len()..];
        if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) {
            return (&token[..idx], n);
        }
    }
    (token, "0")
}
