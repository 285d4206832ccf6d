use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use risk_protocol::config::ClientConfig;
use risk_protocol::{BorrowerRisk, INIT_RISK_PATH, RUN_RISK_JOB_PATH};
use tracing::{debug, info, warn};

use crate::error::{parse_error_body, BuildError, RequestError, RiskError};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::transport::{join_base_path, ApiRequest, ApiResponse, HttpTransport, Transport};

/// The two operations the console can trigger.
#[async_trait]
pub trait RiskApi: Send + Sync {
    async fn run_risk_job(&self) -> Result<Vec<BorrowerRisk>, RiskError>;
    async fn init_risk(&self) -> Result<(), RiskError>;
}

pub struct RiskJobClient {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    base_url: String,
    run_url: String,
    init_url: String,
}

impl RiskJobClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self, BuildError> {
        let timeout = config.request_timeout_ms().map(Duration::from_millis);
        let transport = HttpTransport::new(timeout)?;
        let retry = RetryPolicy::new(
            config.max_attempts(),
            Duration::from_millis(config.base_delay_ms()),
        );
        Self::with_transport(&config.api_url, Arc::new(transport), retry)
    }

    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
        retry: RetryPolicy,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            transport,
            retry,
            base_url: base_url.trim().to_string(),
            run_url: join_base_path(base_url, RUN_RISK_JOB_PATH)?,
            init_url: join_base_path(base_url, INIT_RISK_PATH)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    async fn fetch_risks(&self, attempt: u32) -> Result<Vec<BorrowerRisk>, RequestError> {
        debug!(attempt, url = %self.run_url, "requesting risk job run");
        let response = self
            .transport
            .send(ApiRequest::get(&self.run_url))
            .await
            .map_err(|source| RequestError::Transport {
                url: self.run_url.clone(),
                source,
            })?;
        if !response.is_success() {
            return Err(status_error(&self.run_url, response));
        }
        decode_risks(&self.run_url, &response.body)
    }

    fn surface(&self, operation: &str, err: RequestError) -> RiskError {
        let error = RiskError::from(&err);
        warn!(
            operation,
            status = ?err.status(),
            cause = %err,
            message = %error.message(),
            "risk request failed"
        );
        error
    }
}

#[async_trait]
impl RiskApi for RiskJobClient {
    async fn run_risk_job(&self) -> Result<Vec<BorrowerRisk>, RiskError> {
        let result =
            retry_with_backoff(&self.retry, |_: &RequestError| true, |attempt| {
                self.fetch_risks(attempt)
            })
            .await;
        match result {
            Ok(risks) => {
                info!(count = risks.len(), "risk job returned borrowers");
                Ok(risks)
            }
            Err(err) if err.status() == Some(404) => {
                info!(
                    attempts = self.retry.max_attempts,
                    "risk job returned 404 after retries; treating as no borrowers"
                );
                Ok(Vec::new())
            }
            Err(err) => Err(self.surface("run-risk-job", err)),
        }
    }

    async fn init_risk(&self) -> Result<(), RiskError> {
        debug!(url = %self.init_url, "requesting risk init");
        let response = self
            .transport
            .send(ApiRequest::post(&self.init_url))
            .await
            .map_err(|source| {
                self.surface(
                    "init-risk",
                    RequestError::Transport {
                        url: self.init_url.clone(),
                        source,
                    },
                )
            })?;
        match response.status {
            200 | 204 => {
                info!(status = response.status, "risk init accepted");
                Ok(())
            }
            status => Err(self.surface("init-risk", RequestError::UnexpectedStatus(status))),
        }
    }
}

fn status_error(url: &str, response: ApiResponse) -> RequestError {
    RequestError::Status {
        url: url.to_string(),
        status: response.status,
        reason: response.reason,
        body: parse_error_body(&response.body),
    }
}

fn decode_risks(url: &str, body: &str) -> Result<Vec<BorrowerRisk>, RequestError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<BorrowerRisk>> =
        serde_json::from_str(body).map_err(|err| RequestError::Decode {
            url: url.to_string(),
            detail: err.to_string(),
        })?;
    Ok(parsed.unwrap_or_default())
}
