use crate::compute::search::SearchPattern;
use crate::entry::{IoType, LogEntry, LogLevel, LogSource};
use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Filter criteria for a view over log entries.
///
/// Dimensions are ANDed together; values inside one multi-value dimension are
/// ORed. An empty dimension does not constrain anything. Time bounds are
/// inclusive. Filtering never touches the entries themselves.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub levels: SmallVec<[LogLevel; 4]>,
    pub tasks: Vec<String>,
    pub retries: Vec<String>,
    pub sources: SmallVec<[LogSource; 2]>,
    pub io_types: SmallVec<[IoType; 3]>,
    pub search: Option<SearchPattern>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.levels.extend(levels);
        self
    }

    pub fn with_tasks<S: Into<String>>(mut self, tasks: impl IntoIterator<Item = S>) -> Self {
        self.tasks.extend(tasks.into_iter().map(Into::into));
        self
    }

    pub fn with_retries<S: Into<String>>(mut self, retries: impl IntoIterator<Item = S>) -> Self {
        self.retries.extend(retries.into_iter().map(Into::into));
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = LogSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    pub fn with_io_types(mut self, io_types: impl IntoIterator<Item = IoType>) -> Self {
        self.io_types.extend(io_types);
        self
    }

    /// Blank text clears the search.
    pub fn with_search(mut self, text: &str, regex: bool) -> Self {
        self.search = if text.is_empty() {
            None
        } else {
            Some(SearchPattern::new(text, regex))
        };
        self
    }

    pub fn with_time_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// True when no dimension constrains the view.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
            && self.tasks.is_empty()
            && self.retries.is_empty()
            && self.sources.is_empty()
            && self.io_types.is_empty()
            && self.search.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        let labels = &entry.labels;

        if !self.levels.is_empty() && !self.levels.contains(&labels.level) {
            return false;
        }

        if !self.tasks.is_empty() {
            match labels.task.as_deref() {
                Some(task) if self.tasks.iter().any(|t| t == task) => {}
                _ => return false,
            }
        }

        if !self.retries.is_empty() && !self.retries.iter().any(|r| *r == labels.retry) {
            return false;
        }

        if !self.sources.is_empty() && !self.sources.contains(&labels.source) {
            return false;
        }

        if !self.io_types.is_empty() && !self.io_types.contains(&labels.io_type) {
            return false;
        }

        if self.start.is_some_and(|start| entry.timestamp < start) {
            return false;
        }

        if self.end.is_some_and(|end| entry.timestamp > end) {
            return false;
        }

        match &self.search {
            Some(pattern) => pattern.is_match(&entry.message),
            None => true,
        }
    }
}

/// Apply `params` to `entries`, keeping their order.
///
/// With no active filter the input slice is handed back borrowed, so callers
/// can skip re-rendering when nothing changed.
pub fn filter_entries<'a>(entries: &'a [LogEntry], params: &FilterParams) -> Cow<'a, [LogEntry]> {
    if params.is_empty() {
        return Cow::Borrowed(entries);
    }

    Cow::Owned(
        entries
            .iter()
            .filter(|entry| params.matches(entry))
            .cloned()
            .collect(),
    )
}
