//! The log adapter: one injected instance per backend instead of a process
//! wide default. It ties a transport to the parser, the compute layer and
//! the streaming client.

#[cfg(test)]
mod tests;

use crate::compute::{
    FieldFacet, FilterParams, HistogramOptions, HistogramResult, compute_facets,
    compute_histogram, filter_entries,
};
use crate::conf::AdapterConfig;
use crate::entry::{LabelField, LogEntry};
use crate::parse::{Clock, LineParser, ParseContext, SystemClock, parse_log_batch};
use crate::stream::{HttpTransport, LogRequest, LogStream, LogTransport, StreamError};
use anyhow::Context;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

/// A filtered view plus the aggregates a log panel renders next to it.
#[derive(Debug, Clone, Serialize)]
pub struct LogQueryResult {
    pub entries: Vec<LogEntry>,
    /// Entries before filtering.
    pub total: usize,
    pub histogram: HistogramResult,
    pub facets: Vec<FieldFacet>,
}

pub struct LogAdapter {
    transport: Arc<dyn LogTransport>,
    config: AdapterConfig,
    clock: Arc<dyn Clock>,
}

impl LogAdapter {
    pub fn new(transport: Arc<dyn LogTransport>, config: AdapterConfig) -> Self {
        Self {
            transport,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Build an adapter talking HTTP to `config.endpoint.base_url`.
    pub fn from_config(config: AdapterConfig) -> anyhow::Result<Self> {
        let base_url = config.base_url()?;
        let transport = HttpTransport::new(base_url, config.request_timeout())
            .context("failed to create log transport")?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn parser(&self, workflow: &str) -> LineParser {
        LineParser::new(ParseContext::new(workflow).with_clock(self.clock.clone()))
    }

    /// Fetch and parse every entry currently available for `request`.
    pub async fn fetch_entries(&self, request: &LogRequest) -> Result<Vec<LogEntry>, StreamError> {
        let text = self.transport.fetch_text(request).await?;
        let entries = parse_log_batch(&text, &mut self.parser(&request.workflow_id));

        tracing::debug!(
            workflow = %request.workflow_id,
            bytes = text.len(),
            entries = entries.len(),
            "fetched workflow logs"
        );
        Ok(entries)
    }

    /// Fetch, then filter and aggregate.
    pub async fn query(
        &self,
        request: &LogRequest,
        filters: &FilterParams,
        fields: &[LabelField],
    ) -> Result<LogQueryResult, StreamError> {
        let entries = self.fetch_entries(request).await?;
        Ok(self.summarize(entries, filters, fields))
    }

    /// Filter and aggregate entries that are already in memory.
    ///
    /// When the filter pins both ends of a time range the histogram covers
    /// exactly that range.
    pub fn summarize(
        &self,
        entries: Vec<LogEntry>,
        filters: &FilterParams,
        fields: &[LabelField],
    ) -> LogQueryResult {
        summarize(entries, filters, fields, self.histogram_options(filters))
    }

    fn histogram_options(&self, filters: &FilterParams) -> HistogramOptions {
        HistogramOptions {
            range: filters.start.zip(filters.end),
            ..self.config.histogram_options()
        }
    }

    /// A streaming client sharing this adapter's transport and settings.
    pub fn stream(&self) -> LogStream {
        LogStream::new(self.transport.clone(), self.config.stream_config())
            .with_clock(self.clock.clone())
    }
}

pub fn summarize(
    entries: Vec<LogEntry>,
    filters: &FilterParams,
    fields: &[LabelField],
    histogram: HistogramOptions,
) -> LogQueryResult {
    let total = entries.len();
    let filtered = filter_entries(&entries, filters);
    let histogram = compute_histogram(&filtered, &histogram);
    let facets = compute_facets(&filtered, fields);

    // an unfiltered view is the input itself; avoid cloning it
    let narrowed = match filtered {
        Cow::Owned(v) => Some(v),
        Cow::Borrowed(_) => None,
    };
    let entries = narrowed.unwrap_or(entries);

    LogQueryResult {
        entries,
        total,
        histogram,
        facets,
    }
}
