use anyhow::Context;
use risk_protocol::config::{is_http_url, ClientConfig};
use std::path::Path;

fn validate_client_config(config: &ClientConfig) -> anyhow::Result<()> {
    let api_url = config.api_url.trim();
    if api_url.is_empty() {
        anyhow::bail!("api_url must be set");
    }
    if !is_http_url(api_url) {
        anyhow::bail!("api_url must start with http:// or https:// (got {api_url})");
    }
    if config.max_attempts() == 0 {
        anyhow::bail!("retry.max_attempts must be at least 1");
    }
    if config.request_timeout_ms() == Some(0) {
        anyhow::bail!("http.request_timeout_ms must be greater than 0");
    }
    Ok(())
}

/// Reads the TOML config, applying `api_url_override` on top. A missing file
/// is accepted when the override supplies the URL.
pub(crate) fn load_client_config(
    path: &Path,
    api_url_override: Option<&str>,
) -> anyhow::Result<ClientConfig> {
    let mut config = if path.exists() || api_url_override.is_none() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str::<ClientConfig>(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?
    } else {
        tracing::info!(
            config = %path.display(),
            "config file not found; using --api-url with default retry policy"
        );
        ClientConfig::new(String::new())
    };
    if let Some(api_url) = api_url_override {
        config.api_url = api_url.to_string();
    }
    validate_client_config(&config)?;
    Ok(config)
}
