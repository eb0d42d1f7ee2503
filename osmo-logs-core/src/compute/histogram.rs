use crate::entry::{LogEntry, LogLevel};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_TARGET_BUCKETS: u32 = 50;
pub const DEFAULT_MIN_INTERVAL: TimeDelta = TimeDelta::seconds(60);

#[derive(Debug, Clone)]
pub struct HistogramOptions {
    pub target_buckets: u32,
    /// Lower bound for the bucket width.
    pub min_interval: TimeDelta,
    /// Pin the histogram bounds instead of deriving them from the entries.
    /// Entries outside the range are not counted.
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            target_buckets: DEFAULT_TARGET_BUCKETS,
            min_interval: DEFAULT_MIN_INTERVAL,
            range: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    /// Start of the bucket (inclusive).
    pub timestamp: DateTime<Utc>,
    pub counts: BTreeMap<LogLevel, u64>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramResult {
    pub buckets: Vec<HistogramBucket>,
    pub interval_secs: i64,
}

impl HistogramResult {
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.total).sum()
    }
}

/// Bucket entries by time with per-level counts.
///
/// The bucket width is `max(min_interval, range / target_buckets)` rounded up
/// to whole seconds. The first bucket is aligned down to a multiple of the
/// width and every bucket up to the last timestamp is present, empty or not.
pub fn compute_histogram(entries: &[LogEntry], opts: &HistogramOptions) -> HistogramResult {
    let min_interval_ms = opts.min_interval.num_milliseconds().max(1000);

    let bounds = opts.range.or_else(|| time_bounds(entries));
    let Some((min, max)) = bounds.filter(|(min, max)| min <= max) else {
        return HistogramResult {
            buckets: Vec::new(),
            interval_secs: min_interval_ms / 1000,
        };
    };

    let (min_ms, max_ms) = (min.timestamp_millis(), max.timestamp_millis());
    let target = i64::from(opts.target_buckets.max(1));
    let by_target = ceil_div(max_ms - min_ms, target);
    let interval_ms = ceil_div(min_interval_ms.max(by_target), 1000) * 1000;

    let start_ms = min_ms.div_euclid(interval_ms) * interval_ms;
    let bucket_count = ((max_ms - start_ms) / interval_ms + 1) as usize;

    let mut buckets: Vec<HistogramBucket> = (0..bucket_count)
        .map(|i| HistogramBucket {
            timestamp: DateTime::from_timestamp_millis(start_ms + i as i64 * interval_ms)
                .unwrap_or(min),
            counts: LogLevel::ALL.into_iter().map(|l| (l, 0)).collect(),
            total: 0,
        })
        .collect();

    for entry in entries {
        let ts = entry.timestamp.timestamp_millis();
        if ts < min_ms || ts > max_ms {
            continue;
        }

        let bucket = &mut buckets[((ts - start_ms) / interval_ms) as usize];
        *bucket.counts.entry(entry.labels.level).or_insert(0) += 1;
        bucket.total += 1;
    }

    HistogramResult {
        buckets,
        interval_secs: interval_ms / 1000,
    }
}

fn time_bounds(entries: &[LogEntry]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    entries.iter().fold(None, |acc, e| match acc {
        None => Some((e.timestamp, e.timestamp)),
        Some((lo, hi)) => Some((lo.min(e.timestamp), hi.max(e.timestamp))),
    })
}

fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1).div_euclid(d)
}
