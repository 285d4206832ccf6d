//! HTTP client for the risk job API: runs the risk job (with bounded
//! exponential backoff) and initializes risk, collapsing every failure into a
//! single display message.

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;

pub use client::{RiskApi, RiskJobClient};
pub use error::{normalize_error, BuildError, RiskError, UNKNOWN_ERROR_MESSAGE};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
