use risk_client::RiskApi;
use std::io::Write;

use crate::app::{loaded_message, INIT_SUCCESS_MESSAGE};
use crate::cli::Command;

/// Executes one action without the TUI. Records go to `out` as JSON lines
/// followed by the status message; a failure returns the normalized message.
pub(crate) async fn run_once(
    command: Command,
    api: &dyn RiskApi,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Run => {
            let risks = api.run_risk_job().await?;
            for risk in &risks {
                writeln!(out, "{}", serde_json::to_string(risk)?)?;
            }
            writeln!(out, "{}", loaded_message(risks.len()))?;
        }
        Command::Init => {
            api.init_risk().await?;
            writeln!(out, "{INIT_SUCCESS_MESSAGE}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use risk_client::RiskError;
    use risk_protocol::BorrowerRisk;
    use serde_json::json;

    struct StaticApi {
        risks: Vec<BorrowerRisk>,
        init_error: Option<String>,
    }

    #[async_trait]
    impl RiskApi for StaticApi {
        async fn run_risk_job(&self) -> Result<Vec<BorrowerRisk>, RiskError> {
            Ok(self.risks.clone())
        }

        async fn init_risk(&self) -> Result<(), RiskError> {
            match &self.init_error {
                Some(message) => Err(RiskError::new(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn run_prints_records_then_count() {
        let api = StaticApi {
            risks: vec![
                serde_json::from_value(json!({"borrowerId": 1, "riskScore": 0.5})).unwrap(),
                serde_json::from_value(json!({"borrowerId": 2, "riskScore": 0.7})).unwrap(),
            ],
            init_error: None,
        };
        let mut out = Vec::new();
        run_once(Command::Run, &api, &mut out).await.unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed,
            "{\"borrowerId\":1,\"riskScore\":0.5}\n{\"borrowerId\":2,\"riskScore\":0.7}\nLoaded 2 borrower(s).\n"
        );
    }

    #[tokio::test]
    async fn init_failure_surfaces_message() {
        let api = StaticApi {
            risks: Vec::new(),
            init_error: Some("Unexpected response status: 500".to_string()),
        };
        let mut out = Vec::new();
        let err = run_once(Command::Init, &api, &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response status: 500");
        assert!(out.is_empty());
    }
}
