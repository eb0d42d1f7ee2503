//! Live log streaming.
//!
//! transport (chunked HTTP body)
//! LineDecoder (bytes → complete lines, partial line carried over)
//! LineParser
//! pending batch
//! EntryBuffer (bounded, flushed at most once per interval)
//! StreamSnapshot (watch channel)

mod buffer;
mod client;
mod decoder;
mod error;
mod request;
mod state;
mod transport;

#[cfg(test)]
pub(crate) mod tests;

pub use buffer::EntryBuffer;
pub use client::{
    DEFAULT_FLUSH_INTERVAL, DEFAULT_MAX_ENTRIES, LogStream, StreamConfig, StreamSnapshot,
};
pub use decoder::LineDecoder;
pub use error::StreamError;
pub use request::LogRequest;
pub use state::StreamState;
pub use transport::{ByteStream, HttpTransport, LogTransport};
