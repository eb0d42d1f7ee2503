use integration_tests::harness::{MockLogServer, MockResponse};
use osmo_logs_core::entry::{IoType, LogLevel, LogSource};
use osmo_logs_core::stream::{LogRequest, StreamError, StreamState};
use pretty_assertions::assert_eq;
use std::time::Duration;

mod common;

#[tokio::test(flavor = "multi_thread")]
async fn stream_reassembles_lines_split_across_chunks() {
    // Arrange
    let server = MockLogServer::start(MockResponse::chunked([
        "2024/01/01 10:00:00 [train] hel",
        "lo\n2024/01/01 10:00:01 [train retry-1] [osmo] ERROR: boom\nunstruc",
        "tured tail\n",
    ]))
    .await;
    let adapter = common::adapter_for(&server.base_url);
    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();

    // Act
    stream.start(LogRequest::new("wf-1").tail(true));
    let snap = common::wait_for_state(&mut rx, StreamState::Complete).await;

    // Assert
    let messages: Vec<_> = snap.entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["hello", "boom", "unstructured tail"]);

    let boom = &snap.entries[1];
    assert_eq!(boom.labels.level, LogLevel::Error);
    assert_eq!(boom.labels.retry, "1");
    assert_eq!(boom.labels.io_type, IoType::OsmoCtrl);
    assert_eq!(boom.labels.source, LogSource::Osmo);
    assert_eq!(snap.entries[2].labels.io_type, IoType::Dump);

    assert_eq!(snap.received, 3);
    assert!(snap.error.is_none());
    assert_eq!(server.requests(), vec!["/api/workflow/wf-1/logs?tail=true"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn final_line_without_newline_is_kept() {
    let server = MockLogServer::start(MockResponse::chunked([
        "2024/01/01 10:00:00 [train] one\n",
        "2024/01/01 10:00:01 [train] two",
    ]))
    .await;
    let adapter = common::adapter_for(&server.base_url);
    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();

    stream.start(LogRequest::new("wf-1"));
    let snap = common::wait_for_state(&mut rx, StreamState::Complete).await;

    let messages: Vec<_> = snap.entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["one", "two"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn redirect_is_reported_as_expired_session() {
    let server = MockLogServer::start(MockResponse::Redirect("/login".to_string())).await;
    let adapter = common::adapter_for(&server.base_url);
    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();

    stream.start(LogRequest::new("wf-1"));
    let snap = common::wait_for_state(&mut rx, StreamState::Error).await;

    let err = snap.error.expect("error state carries an error");
    assert!(err.is_auth_expired());
    assert!(matches!(
        err.as_ref(),
        StreamError::Redirect { location: Some(l), .. } if l == "/login"
    ));
    assert!(snap.entries.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_workflow_is_an_error() {
    let server = MockLogServer::start(MockResponse::Status(404)).await;
    let adapter = common::adapter_for(&server.base_url);
    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();

    stream.start(LogRequest::new("nope"));
    let snap = common::wait_for_state(&mut rx, StreamState::Error).await;

    let err = snap.error.expect("error state carries an error");
    assert!(matches!(
        err.as_ref(),
        StreamError::Status { status } if status.as_u16() == 404
    ));
    assert!(!err.is_auth_expired());
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_aborts_an_open_stream_and_keeps_entries() {
    let server = MockLogServer::start(MockResponse::hanging([
        "2024/01/01 10:00:00 [train] still running\n",
    ]))
    .await;
    let adapter = common::adapter_for(&server.base_url);
    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();

    stream.start(LogRequest::new("wf-1").tail(true));
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.entries.len() == 1))
        .await
        .expect("timed out waiting for the first entry")
        .expect("stream handle dropped");
    assert_eq!(stream.state(), StreamState::Streaming);

    stream.stop();

    let snap = stream.snapshot();
    assert_eq!(snap.state, StreamState::Idle);
    assert_eq!(snap.entries.len(), 1);

    // nothing from the aborted run may land after stop
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(stream.state(), StreamState::Idle);
}

#[tokio::test(flavor = "multi_thread")]
async fn restarting_replaces_the_previous_run() {
    let server = MockLogServer::start(MockResponse::chunked([
        "2024/01/01 10:00:00 [train] only line\n",
    ]))
    .await;
    let adapter = common::adapter_for(&server.base_url);
    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();

    stream.start(LogRequest::new("wf-1"));
    let first = common::wait_for_state(&mut rx, StreamState::Complete).await;

    stream.start(LogRequest::new("wf-1"));
    let second = common::wait_for_state(&mut rx, StreamState::Complete).await;

    assert!(second.generation > first.generation);
    assert_eq!(second.entries.len(), 1);
    assert_eq!(second.received, 1);
    assert_eq!(server.requests().len(), 2);
}
