mod decoder_tests;

use crate::stream::{ByteStream, LogRequest, LogTransport, StreamError};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) enum Script {
    /// Deliver the chunks, then end the body.
    Chunks(Vec<&'static [u8]>),
    /// Deliver the chunks, then never produce anything again.
    ChunksThenHang(Vec<&'static [u8]>),
    /// Deliver the chunks, then fail the body.
    ChunksThenError(Vec<&'static [u8]>, &'static str),
    /// Wait before each chunk, then never produce anything again.
    PacedThenHang(Vec<(Duration, &'static [u8])>),
    /// Fail before any body is available.
    OpenStatus(StatusCode),
}

pub(crate) struct ScriptedTransport {
    script: Script,
    pub opened: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            opened: AtomicUsize::new(0),
        }
    }
}

fn chunk_stream(chunks: &[&'static [u8]]) -> ByteStream {
    let chunks: Vec<Result<Bytes, StreamError>> = chunks
        .iter()
        .map(|c| Ok(Bytes::from_static(c)))
        .collect();
    stream::iter(chunks).boxed()
}

#[async_trait]
impl LogTransport for ScriptedTransport {
    async fn open(&self, _request: &LogRequest) -> Result<ByteStream, StreamError> {
        self.opened.fetch_add(1, Ordering::SeqCst);

        match &self.script {
            Script::Chunks(chunks) => Ok(chunk_stream(chunks)),
            Script::ChunksThenHang(chunks) => {
                Ok(chunk_stream(chunks).chain(stream::pending()).boxed())
            }
            Script::ChunksThenError(chunks, reason) => {
                let reason = *reason;
                Ok(chunk_stream(chunks)
                    .chain(stream::once(async move {
                        Err(StreamError::interrupted(reason))
                    }))
                    .boxed())
            }
            Script::PacedThenHang(chunks) => Ok(stream::iter(chunks.clone())
                .then(|(delay, chunk)| async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, StreamError>(Bytes::from_static(chunk))
                })
                .chain(stream::pending())
                .boxed()),
            Script::OpenStatus(status) => Err(StreamError::Status { status: *status }),
        }
    }
}
