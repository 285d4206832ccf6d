use ratatui::widgets::ListState;
use risk_client::RiskError;
use risk_protocol::BorrowerRisk;
use std::time::{Instant, SystemTime};

pub(crate) const INIT_SUCCESS_MESSAGE: &str = "Init request sent successfully.";
const RUN_FAILURE_FALLBACK: &str = "Failed to run risk job";
const INIT_FAILURE_FALLBACK: &str = "Failed to init risk";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RiskAction {
    Run,
    Init,
}

impl RiskAction {
    pub(crate) fn label(self) -> &'static str {
        match self {
            RiskAction::Run => "run risk job",
            RiskAction::Init => "init risk",
        }
    }
}

#[derive(Debug)]
pub(crate) enum UiEvent {
    RunFinished(Result<Vec<BorrowerRisk>, RiskError>),
    InitFinished(Result<(), RiskError>),
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ViewMode {
    #[default]
    Normal,
    DetailFullscreen,
}

pub(crate) fn loaded_message(count: usize) -> String {
    format!("Loaded {count} borrower(s).")
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) api_url: String,
    pub(crate) risks: Vec<BorrowerRisk>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) in_flight: Option<(RiskAction, Instant)>,
    pub(crate) last_completed: Option<SystemTime>,
    pub(crate) selected: usize,
    pub(crate) list_state: ListState,
    pub(crate) view_mode: ViewMode,
    pub(crate) detail_scroll: usize,
    pub(crate) detail_max_scroll: usize,
    pub(crate) detail_total_lines: usize,
    pub(crate) detail_view_height: u16,
    pub(crate) pending_g: bool,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Enters the in-flight state for `action`. A second invocation while one
    /// is outstanding is not rejected; whichever result arrives last wins.
    pub(crate) fn begin(&mut self, action: RiskAction) {
        self.loading = true;
        self.error = None;
        self.message = None;
        self.in_flight = Some((action, Instant::now()));
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::RunFinished(Ok(risks)) => {
                self.message = Some(loaded_message(risks.len()));
                self.error = None;
                self.risks = risks;
                self.selected = 0;
                self.detail_scroll = 0;
                self.sync_selection();
            }
            UiEvent::RunFinished(Err(err)) => self.fail(err, RUN_FAILURE_FALLBACK),
            UiEvent::InitFinished(Ok(())) => {
                self.message = Some(INIT_SUCCESS_MESSAGE.to_string());
                self.error = None;
            }
            UiEvent::InitFinished(Err(err)) => self.fail(err, INIT_FAILURE_FALLBACK),
        }
        self.loading = false;
        self.in_flight = None;
        self.last_completed = Some(SystemTime::now());
    }

    fn fail(&mut self, err: RiskError, fallback: &str) {
        let message = err.into_message();
        self.error = Some(if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        });
        self.message = None;
    }

    pub(crate) fn selected_risk(&self) -> Option<&BorrowerRisk> {
        self.risks.get(self.selected)
    }

    pub(crate) fn select_next(&mut self) {
        if self.risks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.risks.len();
        self.detail_scroll = 0;
        self.sync_selection();
    }

    pub(crate) fn select_prev(&mut self) {
        if self.risks.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.risks.len() - 1;
        } else {
            self.selected -= 1;
        }
        self.detail_scroll = 0;
        self.sync_selection();
    }

    pub(crate) fn enter_detail_fullscreen(&mut self) {
        if self.selected_risk().is_none() {
            return;
        }
        self.view_mode = ViewMode::DetailFullscreen;
        self.detail_scroll = 0;
        self.pending_g = false;
        self.confirm_quit = false;
    }

    pub(crate) fn exit_detail_fullscreen(&mut self) {
        self.view_mode = ViewMode::Normal;
        self.pending_g = false;
    }

    pub(crate) fn set_detail_metrics(&mut self, total_lines: usize, view_height: u16) {
        let total_lines = total_lines.max(1);
        self.detail_total_lines = total_lines;
        self.detail_view_height = view_height;
        self.detail_max_scroll = total_lines.saturating_sub(view_height as usize);
        if self.detail_scroll > self.detail_max_scroll {
            self.detail_scroll = self.detail_max_scroll;
        }
    }

    pub(crate) fn scroll_down(&mut self, lines: usize) {
        self.detail_scroll = (self.detail_scroll + lines).min(self.detail_max_scroll);
        self.pending_g = false;
    }

    pub(crate) fn scroll_up(&mut self, lines: usize) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
        self.pending_g = false;
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.detail_scroll = 0;
        self.pending_g = false;
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.detail_scroll = self.detail_max_scroll;
        self.pending_g = false;
    }

    pub(crate) fn page_size(&self) -> usize {
        let height = self.detail_view_height.max(1) as usize;
        height.saturating_sub(1).max(1)
    }

    fn sync_selection(&mut self) {
        if self.risks.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.risks.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}
