mod actions;
mod app;
mod cli;
mod config;
mod headless;
mod logging;
mod ui;

use crate::actions::ActionRunner;
use crate::app::{AppState, UiEvent};
use crate::cli::Args;
use crate::config::load_client_config;
use crate::headless::run_once;
use crate::logging::init_tracing;
use crate::ui::{draw_ui, handle_key_event, restore_terminal, setup_terminal};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use risk_client::{RiskApi, RiskJobClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _file_guard = init_tracing(&args.log_dir, args.log_to_stderr)?;

    let config = load_client_config(&args.config, args.api_url.as_deref())
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let client = RiskJobClient::from_config(&config).context("failed to build risk client")?;
    info!(
        api_url = %client.base_url(),
        max_attempts = client.retry_policy().max_attempts,
        base_delay_ms = client.retry_policy().base_delay.as_millis() as u64,
        "risk console starting"
    );
    let api: Arc<dyn RiskApi> = Arc::new(client);

    if let Some(command) = args.command {
        let mut stdout = std::io::stdout();
        return run_once(command, api.as_ref(), &mut stdout).await;
    }

    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(32);
    let runner = ActionRunner::new(api, ui_tx);

    let mut terminal = setup_terminal()?;
    let mut app = AppState::new(config.api_url.trim());

    let tick_rate = Duration::from_millis(100);
    let result: anyhow::Result<()> = loop {
        while let Ok(event) = ui_rx.try_recv() {
            app.handle_event(event);
        }

        if let Err(err) = terminal.draw(|frame| draw_ui(frame, &mut app)) {
            break Err(err.into());
        }

        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, &mut app, &runner) {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(err) => break Err(err.into()),
            },
            Ok(false) => {}
            Err(err) => break Err(err.into()),
        }
    };

    restore_terminal(&mut terminal)?;
    info!("risk console exiting");
    result
}
