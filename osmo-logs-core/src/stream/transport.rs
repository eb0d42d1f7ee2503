use crate::stream::error::StreamError;
use crate::stream::request::LogRequest;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{BoxStream, StreamExt};
use http::header::{ACCEPT, LOCATION};
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

pub type ByteStream = BoxStream<'static, Result<Bytes, StreamError>>;

/// Where log text comes from. The HTTP implementation is the production one;
/// tests swap in scripted chunk sources.
#[async_trait]
pub trait LogTransport: Send + Sync {
    /// Open the log body as a stream of raw chunks.
    async fn open(&self, request: &LogRequest) -> Result<ByteStream, StreamError>;

    /// Fetch the whole body as text.
    async fn fetch_text(&self, request: &LogRequest) -> Result<String, StreamError> {
        let mut body = self.open(request).await?;
        let mut buf = Vec::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, StreamError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|source| StreamError::Client { source })?;

        Ok(Self {
            client,
            base_url,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        request: &LogRequest,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, StreamError> {
        let url = request.url(&self.base_url)?;
        tracing::debug!(%url, tail = request.tail, "requesting workflow logs");

        let mut builder = self.client.get(url.clone()).header(ACCEPT, "text/plain");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| StreamError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            return Err(StreamError::Redirect { status, location });
        }
        if !status.is_success() {
            return Err(StreamError::Status { status });
        }

        Ok(response)
    }
}

#[async_trait]
impl LogTransport for HttpTransport {
    async fn open(&self, request: &LogRequest) -> Result<ByteStream, StreamError> {
        // no timeout: a tail stays open as long as the workflow runs
        let response = self.send(request, None).await?;

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|source| StreamError::Body { source }))
            .boxed())
    }

    async fn fetch_text(&self, request: &LogRequest) -> Result<String, StreamError> {
        let response = self.send(request, Some(self.request_timeout)).await?;
        response
            .text()
            .await
            .map_err(|source| StreamError::Body { source })
    }
}
