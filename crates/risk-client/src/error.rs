use serde_json::{json, Value};
use thiserror::Error;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// The request never produced an HTTP response.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timeout: bool,
    pub connect: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            connect: false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            timeout: err.is_timeout(),
            connect: err.is_connect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("base url is empty")]
    EmptyBaseUrl,
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Structured failure of a single request. Stays inside the client; callers
/// only ever see the [`RiskError`] derived from it.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    #[error("Http failure response for {url}: 0 {source}")]
    Transport {
        url: String,
        source: TransportError,
    },
    #[error("Http failure response for {url}: {status} {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
        body: Option<Value>,
    },
    #[error("Http failure during parsing for {url}: {detail}")]
    Decode { url: String, detail: String },
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(u16),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::UnexpectedStatus(status) => Some(*status),
            RequestError::Transport { .. } | RequestError::Decode { .. } => None,
        }
    }

    /// Loose JSON view of the failure: `error` carries the parsed response
    /// body (if any), `message` the display string.
    pub fn to_value(&self) -> Value {
        let body = match self {
            RequestError::Status { body, .. } => body.clone().unwrap_or(Value::Null),
            _ => Value::Null,
        };
        json!({
            "status": self.status().unwrap_or(0),
            "message": self.to_string(),
            "error": body,
        })
    }
}

/// Parses an error response body the way a browser HTTP client would expose
/// it: JSON when it parses, raw text otherwise, nothing when empty.
pub(crate) fn parse_error_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

/// Reduces any failure value to one human-readable message.
///
/// Precedence: nested `error.message`, then top-level `message`, then the
/// value itself when it is a string, then [`UNKNOWN_ERROR_MESSAGE`]. Empty
/// strings count as absent.
pub fn normalize_error(failure: &Value) -> String {
    let nested = failure.get("error").and_then(|error| error.get("message"));
    non_empty_text(nested)
        .or_else(|| non_empty_text(failure.get("message")))
        .or_else(|| non_empty_text(Some(failure)))
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// The only failure shape that leaves the client: a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RiskError {
    message: String,
}

impl RiskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_value(failure: &Value) -> Self {
        Self::new(normalize_error(failure))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<&RequestError> for RiskError {
    fn from(err: &RequestError) -> Self {
        Self::from_value(&err.to_value())
    }
}

impl From<RequestError> for RiskError {
    fn from(err: RequestError) -> Self {
        Self::from(&err)
    }
}
