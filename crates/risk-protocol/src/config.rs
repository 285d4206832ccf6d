use serde::Deserialize;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub retry: Option<RetryConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub base_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    pub request_timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            retry: None,
            http: None,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.retry
            .as_ref()
            .and_then(|retry| retry.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    pub fn base_delay_ms(&self) -> u64 {
        self.retry
            .as_ref()
            .and_then(|retry| retry.base_delay_ms)
            .unwrap_or(DEFAULT_BASE_DELAY_MS)
    }

    pub fn request_timeout_ms(&self) -> Option<u64> {
        self.http.as_ref().and_then(|http| http.request_timeout_ms)
    }
}

pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    matches!(rest, Some(host) if !host.trim_matches('/').is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config: ClientConfig = toml::from_str(r#"api_url = "http://localhost:5000""#).unwrap();
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.base_delay_ms(), 1000);
        assert_eq!(config.request_timeout_ms(), None);
    }

    #[test]
    fn partial_retry_section_keeps_other_defaults() {
        let input = r#"
api_url = "http://localhost:5000"

[retry]
base_delay_ms = 10

[http]
request_timeout_ms = 2500
"#;
        let config: ClientConfig = toml::from_str(input).unwrap();
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.base_delay_ms(), 10);
        assert_eq!(config.request_timeout_ms(), Some(2500));
    }

    #[test]
    fn config_requires_api_url() {
        let parsed: Result<ClientConfig, _> = toml::from_str("[retry]\nmax_attempts = 1\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn http_url_check() {
        assert!(is_http_url("http://localhost:5000"));
        assert!(is_http_url("https://risk.example.com/"));
        assert!(!is_http_url("localhost:5000"));
        assert!(!is_http_url("http://"));
        assert!(!is_http_url(""));
    }
}
