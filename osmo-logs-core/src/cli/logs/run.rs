use crate::adapter::{LogAdapter, LogQueryResult, summarize};
use crate::cli::logs::args::{QueryArgs, StatsArgs, TailArgs};
use crate::cli::logs::constants::DEFAULT_FACETS;
use crate::cli::logs::render::{render_entry, render_stats};
use crate::compute::{FilterParams, HistogramOptions};
use crate::conf::load_config_or_default;
use crate::entry::LabelField;
use crate::logging::LogMode;
use crate::parse::{LineParser, ParseContext, parse_log_batch};
use crate::stream::{StreamSnapshot, StreamState};
use anyhow::{Context, Result, anyhow};
use std::io::{self, IsTerminal, Write};
use tokio::io::AsyncReadExt;

/// Follow a workflow's logs until the backend closes the stream or the user
/// hits Ctrl-C.
pub async fn run_tail(args: TailArgs) -> Result<()> {
    let cfg = load_config_or_default(args.config.as_deref())?;
    let adapter = LogAdapter::from_config(cfg)?;
    let filters = args.filters.to_params();
    let mode = args.output.mode();
    let color = io::stdout().is_terminal();

    let mut stream = adapter.stream();
    let mut rx = stream.subscribe();
    stream.start(args.request.to_request(true));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut printed = 0;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snap = rx.borrow_and_update().clone();
                printed = print_new_entries(&snap, printed, &filters, mode, color)?;

                match snap.state {
                    StreamState::Complete => return Ok(()),
                    StreamState::Error => return Err(stream_failure(&snap)),
                    _ => {}
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!(workflow = %args.request.workflow, "interrupted, stopping log stream");
                stream.stop();
                return Ok(());
            }
        }
    }
}

/// Print entries appended since `printed`, returning the new high-water mark.
fn print_new_entries(
    snap: &StreamSnapshot,
    printed: u64,
    filters: &FilterParams,
    mode: LogMode,
    color: bool,
) -> Result<u64> {
    let fresh = snap.received.saturating_sub(printed);
    let available = snap.entries.len() as u64;
    if fresh > available {
        tracing::warn!(
            skipped = fresh - available,
            "log buffer overflowed before entries were printed"
        );
    }

    let start = (available - fresh.min(available)) as usize;
    let mut stdout = io::stdout().lock();
    for entry in &snap.entries[start..] {
        if filters.matches(entry) {
            writeln!(stdout, "{}", render_entry(entry, mode, color))?;
        }
    }
    stdout.flush()?;
    Ok(snap.received)
}

fn stream_failure(snap: &StreamSnapshot) -> anyhow::Error {
    match &snap.error {
        Some(err) if err.is_auth_expired() => {
            anyhow!("{err}; the session has expired, sign in again")
        }
        Some(err) => anyhow!("{err}"),
        None => anyhow!("log stream failed"),
    }
}

/// Fetch a workflow's logs once, filter them and print the result.
pub async fn run_query(args: QueryArgs) -> Result<()> {
    let cfg = load_config_or_default(args.config.as_deref())?;
    let adapter = LogAdapter::from_config(cfg)?;
    let request = args.request.to_request(false);

    let result = adapter
        .query(&request, &args.filters.to_params(), &facet_fields(&args.facets))
        .await
        .with_context(|| format!("failed to fetch logs for workflow {}", request.workflow_id))?;

    tracing::debug!(
        workflow = %request.workflow_id,
        total = result.total,
        matched = result.entries.len(),
        "log query complete"
    );

    if args.json {
        print_json(&result)
    } else if args.stats {
        println!("{}", render_stats(&result));
        Ok(())
    } else {
        print_entries(&result, args.output.mode())
    }
}

/// Summarize a log file (or stdin) without talking to a backend.
pub async fn run_stats(args: StatsArgs) -> Result<()> {
    let cfg = load_config_or_default(args.config.as_deref())?;
    let text = read_input(&args).await?;

    let mut parser = LineParser::new(ParseContext::new(args.workflow.as_str()));
    let entries = parse_log_batch(&text, &mut parser);

    let filters = args.filters.to_params();
    let histogram = HistogramOptions {
        range: filters.start.zip(filters.end),
        ..cfg.histogram_options()
    };
    let result = summarize(entries, &filters, &facet_fields(&args.facets), histogram);

    if args.json {
        print_json(&result)
    } else {
        println!("{}", render_stats(&result));
        Ok(())
    }
}

async fn read_input(args: &StatsArgs) -> Result<String> {
    let bytes = match &args.file {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn facet_fields(requested: &[LabelField]) -> Vec<LabelField> {
    if requested.is_empty() {
        DEFAULT_FACETS.to_vec()
    } else {
        requested.to_vec()
    }
}

fn print_entries(result: &LogQueryResult, mode: LogMode) -> Result<()> {
    let color = io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();
    for entry in &result.entries {
        writeln!(stdout, "{}", render_entry(entry, mode, color))?;
    }
    stdout.flush()?;
    Ok(())
}

fn print_json(result: &LogQueryResult) -> Result<()> {
    let s = serde_json::to_string_pretty(result)?;
    println!("{s}");
    Ok(())
}
