use crate::compute::FilterParams;
use crate::entry::{IoType, LabelField, LogLevel, LogSource};
use crate::logging::LogMode;
use crate::parse::TIMESTAMP_FORMAT;
use crate::stream::LogRequest;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Workflow id
    #[arg(long, short)]
    pub workflow: String,

    /// Restrict to one task group
    #[arg(long)]
    pub group: Option<String>,

    /// Restrict to one task
    #[arg(long)]
    pub task: Option<String>,
}

impl RequestArgs {
    pub fn to_request(&self, tail: bool) -> LogRequest {
        let mut request = LogRequest::new(&self.workflow).tail(tail);
        if let Some(group) = &self.group {
            request = request.with_group(group);
        }
        if let Some(task) = &self.task {
            request = request.with_task(task);
        }
        request
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep entries with this level (repeatable)
    #[arg(long = "level", value_name = "LEVEL")]
    pub levels: Vec<LogLevel>,

    /// Keep entries from this task (repeatable)
    #[arg(long = "task-filter", value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Keep entries from this retry (repeatable)
    #[arg(long = "retry", value_name = "N")]
    pub retries: Vec<String>,

    /// Keep entries from this source: user or osmo (repeatable)
    #[arg(long = "source", value_name = "SOURCE")]
    pub sources: Vec<LogSource>,

    /// Keep entries from this io type: stdout, osmo_ctrl or dump (repeatable)
    #[arg(long = "io-type", value_name = "IO_TYPE")]
    pub io_types: Vec<IoType>,

    /// Case-insensitive text to search for in messages
    #[arg(long)]
    pub search: Option<String>,

    /// Treat --search as a regular expression
    #[arg(long, requires = "search")]
    pub regex: bool,

    /// Earliest timestamp to keep ("YYYY/MM/DD HH:MM:SS" or RFC 3339, UTC)
    #[arg(long, value_parser = parse_time_arg)]
    pub since: Option<DateTime<Utc>>,

    /// Latest timestamp to keep ("YYYY/MM/DD HH:MM:SS" or RFC 3339, UTC)
    #[arg(long, value_parser = parse_time_arg)]
    pub until: Option<DateTime<Utc>>,
}

impl FilterArgs {
    pub fn to_params(&self) -> FilterParams {
        FilterParams::new()
            .with_levels(self.levels.iter().copied())
            .with_tasks(self.tasks.iter().cloned())
            .with_retries(self.retries.iter().cloned())
            .with_sources(self.sources.iter().copied())
            .with_io_types(self.io_types.iter().copied())
            .with_search(self.search.as_deref().unwrap_or_default(), self.regex)
            .with_time_range(self.since, self.until)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print reconstructed log lines
    #[arg(long, conflicts_with = "pretty")]
    pub raw: bool,

    /// Print colored, column-aligned entries
    #[arg(long)]
    pub pretty: bool,
}

impl OutputArgs {
    pub fn mode(&self) -> LogMode {
        LogMode::from_flags(self.raw, self.pretty)
    }
}

#[derive(Args, Debug, Clone)]
pub struct TailArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print histogram and facets instead of entries
    #[arg(long)]
    pub stats: bool,

    /// Print the full result as JSON
    #[arg(long, conflicts_with = "stats")]
    pub json: bool,

    /// Label field to facet on (repeatable)
    #[arg(long = "facet", value_name = "FIELD")]
    pub facets: Vec<LabelField>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Log file to read (stdin when omitted)
    pub file: Option<PathBuf>,

    /// Workflow label to attach to parsed entries
    #[arg(long, short, default_value = crate::cli::logs::constants::LOCAL_WORKFLOW)]
    pub workflow: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Label field to facet on (repeatable)
    #[arg(long = "facet", value_name = "FIELD")]
    pub facets: Vec<LabelField>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn parse_time_arg(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("invalid timestamp '{s}', expected \"YYYY/MM/DD HH:MM:SS\" or RFC 3339"))
}
