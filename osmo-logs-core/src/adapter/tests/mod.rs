use crate::adapter::LogAdapter;
use crate::compute::FilterParams;
use crate::conf::AdapterConfig;
use crate::entry::{LabelField, LogLevel};
use crate::parse::FixedClock;
use crate::stream::tests::{Script, ScriptedTransport};
use crate::stream::{LogRequest, StreamError, StreamState};
use chrono::{TimeZone, Utc};
use http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

const LOG_TEXT: &[u8] = b"2024/01/01 10:00:00 [prep] [osmo] Downloading inputs\n\
2024/01/01 10:00:05 [train] INFO: epoch 1\n\
2024/01/01 10:01:10 [train] ERROR: nan loss\n\
2024/01/01 10:02:00 [train retry-1] INFO: epoch 1\n\
Traceback (most recent call last):\n";

fn adapter(script: Script) -> LogAdapter {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 10, 3, 0).unwrap());
    LogAdapter::new(Arc::new(ScriptedTransport::new(script)), AdapterConfig::default())
        .with_clock(Arc::new(clock))
}

#[tokio::test]
async fn fetch_entries_parses_the_whole_body() {
    let adapter = adapter(Script::Chunks(vec![&LOG_TEXT[..30], &LOG_TEXT[30..]]));

    let entries = adapter
        .fetch_entries(&LogRequest::new("wf-9"))
        .await
        .unwrap();

    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|e| e.labels.workflow == "wf-9"));
    assert_eq!(entries[0].message, "Downloading inputs");
    assert_eq!(entries[4].labels.task, None);
}

#[tokio::test]
async fn unfiltered_query_covers_everything() {
    let adapter = adapter(Script::Chunks(vec![LOG_TEXT]));

    let result = adapter
        .query(&LogRequest::new("wf-9"), &FilterParams::default(), &LabelField::ALL)
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.entries.len(), 5);
    assert_eq!(result.histogram.total(), 5);
    assert_eq!(result.facets.len(), LabelField::ALL.len());
}

#[tokio::test]
async fn query_aggregates_the_filtered_view() {
    let adapter = adapter(Script::Chunks(vec![LOG_TEXT]));
    let filters = FilterParams::new()
        .with_tasks(["train"])
        .with_levels([LogLevel::Info]);

    let result = adapter
        .query(&LogRequest::new("wf-9"), &filters, &[LabelField::Retry])
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.entries.len(), 2);
    assert_eq!(result.histogram.total(), 2);

    let retries: Vec<(&str, u64)> = result.facets[0]
        .values
        .iter()
        .map(|v| (v.value.as_str(), v.count))
        .collect();
    assert_eq!(retries, vec![("0", 1), ("1", 1)]);
}

#[tokio::test]
async fn pinned_time_range_pins_the_histogram() {
    let adapter = adapter(Script::Chunks(vec![LOG_TEXT]));
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 10, 9, 59).unwrap();

    let result = adapter
        .query(
            &LogRequest::new("wf-9"),
            &FilterParams::new().with_time_range(Some(start), Some(end)),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(result.histogram.buckets.len(), 10);
    assert_eq!(result.histogram.total(), 5);
}

#[tokio::test]
async fn query_surfaces_transport_errors() {
    let adapter = adapter(Script::OpenStatus(StatusCode::FOUND));

    let err = adapter
        .query(&LogRequest::new("wf-9"), &FilterParams::default(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Status { .. }));
}

#[tokio::test]
async fn stream_uses_adapter_settings() {
    let mut config = AdapterConfig::default();
    config.stream.max_entries = 2;
    config.stream.flush_interval_ms = 1;
    let adapter = LogAdapter::new(
        Arc::new(ScriptedTransport::new(Script::Chunks(vec![LOG_TEXT]))),
        config,
    );

    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();
    stream.start(LogRequest::new("wf-9").tail(true));

    let snap = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.state.is_finished()))
        .await
        .unwrap()
        .unwrap()
        .clone();

    assert_eq!(snap.state, StreamState::Complete);
    assert_eq!(snap.entries.len(), 2);
    assert_eq!(snap.evicted, 3);
}
