use risk_client::RiskApi;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::{AppState, RiskAction, UiEvent};

/// Starts requests on the runtime and reports their outcome back to the UI
/// loop as [`UiEvent`]s.
#[derive(Clone)]
pub(crate) struct ActionRunner {
    api: Arc<dyn RiskApi>,
    event_tx: mpsc::Sender<UiEvent>,
}

impl ActionRunner {
    pub(crate) fn new(api: Arc<dyn RiskApi>, event_tx: mpsc::Sender<UiEvent>) -> Self {
        Self { api, event_tx }
    }

    pub(crate) fn trigger(&self, app: &mut AppState, action: RiskAction) {
        app.begin(action);
        info!(action = action.label(), "action started");
        let api = Arc::clone(&self.api);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match action {
                RiskAction::Run => UiEvent::RunFinished(api.run_risk_job().await),
                RiskAction::Init => UiEvent::InitFinished(api.init_risk().await),
            };
            if event_tx.send(event).await.is_err() {
                warn!(action = action.label(), "ui closed before action finished");
            }
        });
    }

    pub(crate) fn run_risk_job(&self, app: &mut AppState) {
        self.trigger(app, RiskAction::Run);
    }

    pub(crate) fn init_risk(&self, app: &mut AppState) {
        self.trigger(app, RiskAction::Init);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use risk_client::RiskError;
    use risk_protocol::BorrowerRisk;
    use serde_json::json;
    use std::time::Duration;

    struct FakeApi {
        run: Result<Vec<BorrowerRisk>, RiskError>,
        init: Result<(), RiskError>,
        delay: Duration,
    }

    #[async_trait]
    impl RiskApi for FakeApi {
        async fn run_risk_job(&self) -> Result<Vec<BorrowerRisk>, RiskError> {
            tokio::time::sleep(self.delay).await;
            self.run.clone()
        }

        async fn init_risk(&self) -> Result<(), RiskError> {
            tokio::time::sleep(self.delay).await;
            self.init.clone()
        }
    }

    fn runner(api: FakeApi) -> (ActionRunner, mpsc::Receiver<UiEvent>) {
        let (event_tx, event_rx) = mpsc::channel(8);
        (ActionRunner::new(Arc::new(api), event_tx), event_rx)
    }

    async fn settle(app: &mut AppState, event_rx: &mut mpsc::Receiver<UiEvent>) {
        let event = event_rx.recv().await.expect("event");
        app.handle_event(event);
    }

    #[tokio::test(start_paused = true)]
    async fn run_sets_loading_until_result_arrives() {
        let record: BorrowerRisk = serde_json::from_value(json!({"borrowerId": 5})).unwrap();
        let (runner, mut event_rx) = runner(FakeApi {
            run: Ok(vec![record.clone()]),
            init: Ok(()),
            delay: Duration::from_secs(1),
        });
        let mut app = AppState::new("http://localhost:5000");

        runner.run_risk_job(&mut app);
        assert!(app.loading);
        assert_eq!(app.message, None);
        assert_eq!(app.error, None);

        settle(&mut app, &mut event_rx).await;
        assert!(!app.loading);
        assert_eq!(app.risks, vec![record]);
        assert_eq!(app.message.as_deref(), Some("Loaded 1 borrower(s)."));
        assert_eq!(app.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn init_failure_reports_error_only() {
        let (runner, mut event_rx) = runner(FakeApi {
            run: Ok(Vec::new()),
            init: Err(RiskError::new("Unexpected response status: 500")),
            delay: Duration::ZERO,
        });
        let mut app = AppState::new("http://localhost:5000");
        app.message = Some("Loaded 4 borrower(s).".to_string());

        runner.init_risk(&mut app);
        assert!(app.loading);
        assert_eq!(app.message, None);

        settle(&mut app, &mut event_rx).await;
        assert!(!app.loading);
        assert_eq!(app.error.as_deref(), Some("Unexpected response status: 500"));
        assert_eq!(app.message, None);
    }

    #[tokio::test(start_paused = true)]
    async fn init_success_reports_message_only() {
        let (runner, mut event_rx) = runner(FakeApi {
            run: Ok(Vec::new()),
            init: Ok(()),
            delay: Duration::ZERO,
        });
        let mut app = AppState::new("http://localhost:5000");
        app.error = Some("previous failure".to_string());

        runner.init_risk(&mut app);
        assert_eq!(app.error, None);
        settle(&mut app, &mut event_rx).await;
        assert_eq!(app.message.as_deref(), Some("Init request sent successfully."));
        assert_eq!(app.error, None);
    }
}
