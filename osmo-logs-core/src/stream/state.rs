use serde::Serialize;
use std::fmt;

/// Lifecycle of a log stream.
///
/// `Idle → Connecting → Streaming → {Complete | Error}`. `Idle` is re-entered
/// whenever the stream is stopped, and a restart may begin from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamState {
    Idle,
    Connecting,
    Streaming,
    Complete,
    Error,
}

impl StreamState {
    pub fn can_transition_to(self, next: StreamState) -> bool {
        use StreamState::*;
        match (self, next) {
            (_, Idle) | (_, Connecting) => true,
            (Connecting, Streaming) => true,
            (Connecting, Error) => true,
            (Streaming, Complete) | (Streaming, Error) => true,
            _ => false,
        }
    }

    /// Connecting or streaming.
    pub fn is_active(self) -> bool {
        matches!(self, StreamState::Connecting | StreamState::Streaming)
    }

    pub fn is_finished(self) -> bool {
        matches!(self, StreamState::Complete | StreamState::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamState::Idle => "idle",
            StreamState::Connecting => "connecting",
            StreamState::Streaming => "streaming",
            StreamState::Complete => "complete",
            StreamState::Error => "error",
        }
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
