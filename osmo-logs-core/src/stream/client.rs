use crate::entry::LogEntry;
use crate::parse::{Clock, LineParser, ParseContext, SystemClock};
use crate::stream::buffer::EntryBuffer;
use crate::stream::decoder::LineDecoder;
use crate::stream::error::StreamError;
use crate::stream::request::LogRequest;
use crate::stream::state::StreamState;
use crate::stream::transport::LogTransport;
use futures_util::StreamExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_MAX_ENTRIES: usize = 100_000;
/// Roughly one display frame.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub max_entries: usize,
    pub flush_interval: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}

/// What subscribers see after every flush or state change.
#[derive(Debug, Clone)]
pub struct StreamSnapshot {
    pub state: StreamState,
    /// Shared with the stream's buffer; cloning a snapshot copies no entry data.
    pub entries: Arc<Vec<Arc<LogEntry>>>,
    /// Entries dropped to respect `max_entries`.
    pub evicted: u64,
    /// Entries appended since the stream started, evicted ones included.
    pub received: u64,
    pub error: Option<Arc<StreamError>>,
    pub generation: u64,
}

impl StreamSnapshot {
    fn idle() -> Self {
        Self {
            state: StreamState::Idle,
            entries: Arc::new(Vec::new()),
            evicted: 0,
            received: 0,
            error: None,
            generation: 0,
        }
    }
}

/// Publication channel shared between the handle and its running task.
///
/// Every stream run gets a generation number. Updates tagged with an older
/// generation are dropped, so a task that has been replaced or stopped can
/// never overwrite newer state.
struct Shared {
    generation: AtomicU64,
    tx: watch::Sender<StreamSnapshot>,
}

impl Shared {
    fn update(&self, generation: u64, f: impl FnOnce(&mut StreamSnapshot)) -> bool {
        self.tx.send_if_modified(|snap| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            f(snap);
            true
        })
    }

    fn transition(&self, generation: u64, next: StreamState) {
        self.update(generation, |snap| {
            if !snap.state.can_transition_to(next) {
                tracing::warn!(from = %snap.state, to = %next, "unexpected log stream transition");
            }
            snap.state = next;
        });
    }

    fn flush(&self, generation: u64, buffer: &mut EntryBuffer, pending: &mut Vec<LogEntry>) {
        if pending.is_empty() {
            return;
        }

        let evicted = buffer.extend(std::mem::take(pending));
        if evicted > 0 {
            tracing::trace!(evicted, max = buffer.max_entries(), "log buffer full, dropped oldest");
        }

        let entries = Arc::new(buffer.to_vec());
        self.update(generation, |snap| {
            snap.entries = entries;
            snap.evicted = buffer.evicted();
            snap.received = buffer.received();
        });
    }
}

/// Live log stream for one workflow.
///
/// Owns at most one running stream at a time: `start` replaces whatever was
/// running, `stop` (or dropping the handle) aborts it and returns to
/// [`StreamState::Idle`]. Parsed entries are delivered through a watch
/// channel, batched so subscribers see at most one update per
/// `flush_interval`.
///
/// Must be used from within a tokio runtime.
pub struct LogStream {
    transport: Arc<dyn LogTransport>,
    config: StreamConfig,
    clock: Arc<dyn Clock>,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl LogStream {
    pub fn new(transport: Arc<dyn LogTransport>, config: StreamConfig) -> Self {
        let (tx, _rx) = watch::channel(StreamSnapshot::idle());
        Self {
            transport,
            config,
            clock: Arc::new(SystemClock),
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                tx,
            }),
            task: None,
        }
    }

    /// Clock used to stamp unstructured lines.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn subscribe(&self) -> watch::Receiver<StreamSnapshot> {
        self.shared.tx.subscribe()
    }

    pub fn snapshot(&self) -> StreamSnapshot {
        self.shared.tx.borrow().clone()
    }

    pub fn state(&self) -> StreamState {
        self.shared.tx.borrow().state
    }

    /// Start streaming `request`, replacing any stream already running.
    pub fn start(&mut self, request: LogRequest) {
        self.abort_task();

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.tx.send_modify(|snap| {
            *snap = StreamSnapshot {
                state: StreamState::Connecting,
                generation,
                ..StreamSnapshot::idle()
            };
        });

        tracing::debug!(
            workflow = %request.workflow_id,
            generation,
            "starting log stream"
        );

        let task = StreamTask {
            transport: self.transport.clone(),
            parser: LineParser::new(
                ParseContext::new(request.workflow_id.clone()).with_clock(self.clock.clone()),
            ),
            request,
            config: self.config.clone(),
            shared: self.shared.clone(),
            generation,
        };
        self.task = Some(tokio::spawn(task.run()));
    }

    /// Abort the running stream, if any, and go back to idle.
    ///
    /// Entries received so far stay visible until the next `start`.
    pub fn stop(&mut self) {
        self.abort_task();

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.tx.send_modify(|snap| {
            snap.state = StreamState::Idle;
            snap.error = None;
            snap.generation = generation;
        });
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        self.abort_task();
    }
}

struct StreamTask {
    transport: Arc<dyn LogTransport>,
    parser: LineParser,
    request: LogRequest,
    config: StreamConfig,
    shared: Arc<Shared>,
    generation: u64,
}

impl StreamTask {
    async fn run(mut self) {
        let generation = self.generation;
        let workflow = self.request.workflow_id.clone();

        let mut body = match self.transport.open(&self.request).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%workflow, error = %e, "failed to open log stream");
                self.fail(e);
                return;
            }
        };
        self.shared.transition(generation, StreamState::Streaming);

        let mut decoder = LineDecoder::new();
        let mut buffer = EntryBuffer::new(self.config.max_entries);
        let mut pending: Vec<LogEntry> = Vec::new();

        let mut ticker = tokio::time::interval(self.config.flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                chunk = body.next() => match chunk {
                    Some(Ok(bytes)) => {
                        for line in decoder.push(&bytes) {
                            pending.extend(self.parser.parse_line(&line));
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(%workflow, error = %e, "log stream interrupted");
                        self.shared.flush(generation, &mut buffer, &mut pending);
                        self.fail(e);
                        return;
                    }
                    None => break,
                },
                _ = ticker.tick(), if !pending.is_empty() => {
                    self.shared.flush(generation, &mut buffer, &mut pending);
                }
            }
        }

        if let Some(line) = decoder.finish() {
            pending.extend(self.parser.parse_line(&line));
        }
        self.shared.flush(generation, &mut buffer, &mut pending);
        self.shared.transition(generation, StreamState::Complete);

        tracing::debug!(
            %workflow,
            received = buffer.received(),
            evicted = buffer.evicted(),
            "log stream complete"
        );
    }

    fn fail(&self, error: StreamError) {
        let error = Arc::new(error);
        self.shared.update(self.generation, |snap| {
            snap.state = StreamState::Error;
            snap.error = Some(error);
        });
    }
}
