use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    //-------------------------------------------------------------------------
    // Request construction
    //-------------------------------------------------------------------------
    #[error("log endpoint base url cannot carry a path: {url}")]
    BaseUrl { url: String },

    #[error("failed to build http client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    //-------------------------------------------------------------------------
    // Response
    //-------------------------------------------------------------------------
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Redirects are never followed: the backend redirects to the login page
    /// once the session has expired.
    #[error("log endpoint redirected ({status}) to {}; authentication has likely expired", location.as_deref().unwrap_or("<unknown>"))]
    Redirect {
        status: StatusCode,
        location: Option<String>,
    },

    #[error("log endpoint returned {status}")]
    Status { status: StatusCode },

    //-------------------------------------------------------------------------
    // Body
    //-------------------------------------------------------------------------
    #[error("error reading log body: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
    },

    #[error("log stream interrupted: {reason}")]
    Interrupted { reason: String },
}

impl StreamError {
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// True when the error means the user has to log in again.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, StreamError::Redirect { .. })
            || matches!(self, StreamError::Status { status } if *status == StatusCode::UNAUTHORIZED)
    }
}
