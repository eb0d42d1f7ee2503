use chrono::{DateTime, Utc};

/// Produces `"{unix_millis}-{counter}"` ids.
///
/// The counter is per generator and never resets, so ids stay unique even when
/// many lines share a timestamp (or when dump lines all get "now").
#[derive(Debug, Default)]
pub struct EntryIdGenerator {
    counter: u64,
}

impl EntryIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, timestamp: DateTime<Utc>) -> String {
        let id = format!("{}-{}", timestamp.timestamp_millis(), self.counter);
        self.counter = self.counter.wrapping_add(1);
        id
    }

    pub fn issued(&self) -> u64 {
        self.counter
    }
}
