use super::sample;
use crate::compute::{FilterParams, filter_entries};
use crate::entry::{IoType, LogLevel, LogSource};
use chrono::{TimeZone, Utc};
use std::borrow::Cow;

fn messages(entries: &[crate::entry::LogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.message.as_str()).collect()
}

#[test]
fn no_filters_returns_input_unchanged() {
    let entries = sample();

    let out = filter_entries(&entries, &FilterParams::default());

    match out {
        Cow::Borrowed(slice) => assert!(std::ptr::eq(slice, entries.as_slice())),
        Cow::Owned(_) => panic!("expected the borrowed fast path"),
    }
}

#[test]
fn values_within_a_dimension_are_ored() {
    let entries = sample();
    let params = FilterParams::new().with_levels([LogLevel::Warn, LogLevel::Error]);

    let out = filter_entries(&entries, &params);

    assert_eq!(
        messages(&out),
        vec![
            "CUDA out of memory",
            "retrying download",
            "Traceback (most recent call last):"
        ]
    );
}

#[test]
fn dimensions_are_anded() {
    let entries = sample();
    let params = FilterParams::new()
        .with_levels([LogLevel::Warn, LogLevel::Error])
        .with_tasks(["task-a"]);

    let out = filter_entries(&entries, &params);

    assert_eq!(messages(&out), vec!["CUDA out of memory"]);
}

#[test]
fn task_filter_excludes_entries_without_task() {
    let entries = sample();
    let params = FilterParams::new().with_tasks(["task-a", "task-b"]);

    let out = filter_entries(&entries, &params);

    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|e| e.labels.task.is_some()));
}

#[test]
fn retry_source_and_io_type_filters() {
    let entries = sample();

    let retried = filter_entries(&entries, &FilterParams::new().with_retries(["1"]));
    let osmo = filter_entries(&entries, &FilterParams::new().with_sources([LogSource::Osmo]));
    let dumps = filter_entries(&entries, &FilterParams::new().with_io_types([IoType::Dump]));

    assert_eq!(messages(&retried), vec!["retrying download"]);
    assert_eq!(messages(&osmo), vec!["Uploading outputs"]);
    assert_eq!(messages(&dumps), vec!["Traceback (most recent call last):"]);
}

#[test]
fn time_bounds_are_inclusive() {
    let entries = sample();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 30).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 10, 1, 30).unwrap();

    let out = filter_entries(
        &entries,
        &FilterParams::new().with_time_range(Some(start), Some(end)),
    );

    assert_eq!(
        messages(&out),
        vec!["CUDA out of memory", "retrying download", "Uploading outputs"]
    );
}

#[test]
fn substring_search_is_case_insensitive() {
    let entries = sample();

    let out = filter_entries(&entries, &FilterParams::new().with_search("cuda", false));

    assert_eq!(messages(&out), vec!["CUDA out of memory"]);
}

#[test]
fn regex_search_is_case_insensitive() {
    let entries = sample();

    let out = filter_entries(
        &entries,
        &FilterParams::new().with_search("^(uploading|retrying)", true),
    );

    assert_eq!(messages(&out), vec!["retrying download", "Uploading outputs"]);
}

#[test]
fn invalid_regex_falls_back_to_substring() {
    let entries = sample();
    let params = FilterParams::new().with_search("(most", true);

    let out = filter_entries(&entries, &params);

    assert!(!params.search.as_ref().unwrap().is_regex());
    assert_eq!(messages(&out), vec!["Traceback (most recent call last):"]);
}

#[test]
fn empty_search_text_is_not_a_filter() {
    let params = FilterParams::new().with_search("", true);

    assert!(params.is_empty());
}

#[test]
fn filtering_never_reorders() {
    let mut entries = sample();
    entries.reverse();

    let out = filter_entries(&entries, &FilterParams::new().with_levels([LogLevel::Error]));

    assert_eq!(
        messages(&out),
        vec!["Traceback (most recent call last):", "CUDA out of memory"]
    );
}
