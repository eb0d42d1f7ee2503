use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One parsed unit of workflow log output.
///
/// Entries are immutable once the parser hands them out. Their order is the
/// order the backend produced them in; nothing downstream re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub labels: LogLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLabels {
    pub workflow: String,
    /// `None` for unstructured dump lines.
    pub task: Option<String>,
    /// Kept as a string because it is a filter/facet value, never arithmetic.
    pub retry: String,
    pub level: LogLevel,
    pub io_type: IoType,
    pub source: LogSource,
    /// Exact text stripped from the front of the message (e.g. `"ERROR: "`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_prefix: Option<String>,
}

impl LogLabels {
    /// Value of a label as it appears in facets and filters.
    pub fn get(&self, field: LabelField) -> Option<&str> {
        match field {
            LabelField::Workflow => Some(self.workflow.as_str()),
            LabelField::Task => self.task.as_deref(),
            LabelField::Retry => Some(self.retry.as_str()),
            LabelField::Level => Some(self.level.as_str()),
            LabelField::IoType => Some(self.io_type.as_str()),
            LabelField::Source => Some(self.source.as_str()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLabelValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" | "critical" => Ok(LogLevel::Fatal),
            _ => Err(UnknownLabelValue::new("level", s)),
        }
    }
}

/// Which channel of the task produced the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IoType {
    /// Regular task output.
    Stdout,
    /// Lines tagged with the `[osmo]` control marker.
    OsmoCtrl,
    /// Lines that did not match the structured format.
    Dump,
}

impl IoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IoType::Stdout => "stdout",
            IoType::OsmoCtrl => "osmo_ctrl",
            IoType::Dump => "dump",
        }
    }

    pub fn source(&self) -> LogSource {
        match self {
            IoType::OsmoCtrl => LogSource::Osmo,
            IoType::Stdout | IoType::Dump => LogSource::User,
        }
    }
}

impl FromStr for IoType {
    type Err = UnknownLabelValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(IoType::Stdout),
            "osmo_ctrl" => Ok(IoType::OsmoCtrl),
            "dump" => Ok(IoType::Dump),
            _ => Err(UnknownLabelValue::new("io_type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    User,
    Osmo,
}

impl LogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::User => "user",
            LogSource::Osmo => "osmo",
        }
    }
}

impl FromStr for LogSource {
    type Err = UnknownLabelValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(LogSource::User),
            "osmo" => Ok(LogSource::Osmo),
            _ => Err(UnknownLabelValue::new("source", s)),
        }
    }
}

/// Label keys usable for facets and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelField {
    Workflow,
    Task,
    Retry,
    Level,
    IoType,
    Source,
}

impl LabelField {
    pub const ALL: [LabelField; 6] = [
        LabelField::Workflow,
        LabelField::Task,
        LabelField::Retry,
        LabelField::Level,
        LabelField::IoType,
        LabelField::Source,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelField::Workflow => "workflow",
            LabelField::Task => "task",
            LabelField::Retry => "retry",
            LabelField::Level => "level",
            LabelField::IoType => "io_type",
            LabelField::Source => "source",
        }
    }
}

impl FromStr for LabelField {
    type Err = UnknownLabelValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabelField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownLabelValue::new("field", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabelValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLabelValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
