mod filter_tests;

use crate::entry::{IoType, LogEntry, LogLabels, LogLevel};
use chrono::{TimeZone, Utc};

pub(crate) struct EntrySpec<'a> {
    pub secs: u32,
    pub level: LogLevel,
    pub task: Option<&'a str>,
    pub retry: &'a str,
    pub io_type: IoType,
    pub message: &'a str,
}

impl Default for EntrySpec<'_> {
    fn default() -> Self {
        Self {
            secs: 0,
            level: LogLevel::Info,
            task: Some("task-a"),
            retry: "0",
            io_type: IoType::Stdout,
            message: "hello",
        }
    }
}

/// Entry `secs` seconds after 2024-01-01 10:00:00 UTC.
pub(crate) fn entry(spec: EntrySpec<'_>) -> LogEntry {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
        + chrono::TimeDelta::seconds(i64::from(spec.secs));

    LogEntry {
        id: format!("{}-{}", timestamp.timestamp_millis(), spec.secs),
        timestamp,
        message: spec.message.to_string(),
        labels: LogLabels {
            workflow: "wf-1".to_string(),
            task: spec.task.map(str::to_string),
            retry: spec.retry.to_string(),
            level: spec.level,
            io_type: spec.io_type,
            source: spec.io_type.source(),
            level_prefix: None,
        },
    }
}

pub(crate) fn sample() -> Vec<LogEntry> {
    vec![
        entry(EntrySpec {
            secs: 0,
            message: "starting up",
            ..Default::default()
        }),
        entry(EntrySpec {
            secs: 30,
            level: LogLevel::Error,
            message: "CUDA out of memory",
            ..Default::default()
        }),
        entry(EntrySpec {
            secs: 61,
            task: Some("task-b"),
            retry: "1",
            level: LogLevel::Warn,
            message: "retrying download",
            ..Default::default()
        }),
        entry(EntrySpec {
            secs: 90,
            task: Some("task-b"),
            io_type: IoType::OsmoCtrl,
            message: "Uploading outputs",
            ..Default::default()
        }),
        entry(EntrySpec {
            secs: 200,
            task: None,
            io_type: IoType::Dump,
            level: LogLevel::Error,
            message: "Traceback (most recent call last):",
            ..Default::default()
        }),
    ]
}
