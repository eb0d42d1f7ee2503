use crate::entry::LogEntry;
use std::collections::VecDeque;
use std::sync::Arc;

/// Bounded in-memory entry store; the oldest entries go first.
///
/// Entries are held behind `Arc` so snapshots share them with the buffer
/// instead of copying their contents.
#[derive(Debug)]
pub struct EntryBuffer {
    entries: VecDeque<Arc<LogEntry>>,
    max_entries: usize,
    evicted: u64,
    received: u64,
}

impl EntryBuffer {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(4096)),
            max_entries,
            evicted: 0,
            received: 0,
        }
    }

    /// Append a batch in order, evicting from the front to stay within bounds.
    /// Returns how many entries were evicted by this call.
    pub fn extend(&mut self, batch: Vec<LogEntry>) -> u64 {
        let incoming = batch.len();
        self.received += incoming as u64;

        let overflow = (self.entries.len() + incoming).saturating_sub(self.max_entries);
        let from_existing = overflow.min(self.entries.len());
        self.entries.drain(..from_existing);

        // a batch bigger than the whole buffer only keeps its newest tail
        let skip = overflow - from_existing;
        self.entries
            .extend(batch.into_iter().skip(skip).map(Arc::new));

        self.evicted += overflow as u64;
        overflow as u64
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Total entries dropped to respect the bound.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Total entries ever appended, evicted or not.
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().map(|e| e.as_ref())
    }

    /// Shared handles to the current entries, oldest first.
    pub fn to_vec(&self) -> Vec<Arc<LogEntry>> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.evicted = 0;
        self.received = 0;
    }
}
