use chrono::{TimeZone, Utc};
use osmo_logs_core::LogAdapter;
use osmo_logs_core::conf::AdapterConfig;
use osmo_logs_core::parse::FixedClock;
use osmo_logs_core::stream::{StreamSnapshot, StreamState};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub fn adapter_for(base_url: &str) -> LogAdapter {
    let cfg = AdapterConfig::from_str(&format!(
        "[endpoint]\nbase_url = \"{base_url}\"\nrequest_timeout_secs = 5\n"
    ))
    .expect("invalid test config");

    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    LogAdapter::from_config(cfg)
        .expect("failed to build adapter")
        .with_clock(Arc::new(clock))
}

#[allow(dead_code)]
pub async fn wait_for_state(
    rx: &mut watch::Receiver<StreamSnapshot>,
    state: StreamState,
) -> StreamSnapshot {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.state == state))
        .await
        .expect("timed out waiting for stream state")
        .expect("stream handle dropped")
        .clone()
}
