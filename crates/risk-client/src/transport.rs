use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use crate::error::{BuildError, TransportError};

static HTTP_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }

    /// POST with an empty body.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: default_reason(status).to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn default_reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown")
}

/// Anything that can carry a request to the risk API and hand back the raw
/// status and body. Non-2xx statuses are responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(request_timeout: Option<Duration>) -> Result<Self, BuildError> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let request_id = HTTP_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let method = request.method.as_str();
        debug!(request_id, method, url = %request.url, "http request start");

        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url).body(Vec::new()),
        };
        let response = match builder.header(ACCEPT, "application/json").send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(
                    request_id,
                    method,
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    error = %err,
                    "http request failed"
                );
                return Err(TransportError::from(err));
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let body = response.text().await.map_err(|err| {
            debug!(request_id, method, error = %err, "http body read failed");
            TransportError::from(err)
        })?;
        debug!(
            request_id,
            method,
            status = status.as_u16(),
            content_type = %content_type,
            body_len = body.len(),
            "http request done"
        );
        Ok(ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        })
    }
}

pub fn join_base_path(base: &str, path: &str) -> Result<String, BuildError> {
    if base.trim().is_empty() {
        return Err(BuildError::EmptyBaseUrl);
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}
