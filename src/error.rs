use reqwest::StatusCode;
use std::fmt::{Display, Formatter};
use std::{fmt, io};

/// Errors surfaced by the API client. Every failure is local to the
/// triggering call; the only global side effect is the forced logout on
/// [`ApiError::Unauthorized`], which the transport performs before the
/// error reaches the caller.
#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    Io(io::Error),
    /// HTTP 401. The session has already been cleared and navigation to
    /// the login screen triggered when this is returned.
    Unauthorized { body: String },
    /// Any other non-2xx response, carrying the backend status and body
    /// verbatim.
    Unexpected { status: StatusCode, body: String },
    /// Enveloped endpoint answered without a `data` payload.
    EmptyData { code: i64, msg: String },
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "network error: {e}"),
            ApiError::Json(e) => write!(f, "json error: {e}"),
            ApiError::Io(e) => write!(f, "io error: {e}"),
            ApiError::Unauthorized { body } => write!(f, "unauthorized: {body}"),
            ApiError::Unexpected { status, body } => {
                write!(f, "unexpected http status {status}: {body}")
            }
            ApiError::EmptyData { code, msg } => {
                write!(f, "backend returned no data (code {code}): {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e)
    }
}
impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}
impl From<io::Error> for ApiError {
    fn from(e: io::Error) -> Self {
        ApiError::Io(e)
    }
}

impl ApiError {
    /// True for the globally-intercepted authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
