//! The dashboard's single source of truth.
//!
//! A [`Controller`] turns user intent ([`Action`]) into backend [`Request`]s
//! and folds the answers back into [`AppState`], the [`Dashboard`] view model
//! and the [`PriceChart`]. It never touches the network on its own schedule:
//! callers run requests either inline ([`Controller::perform`]) or on tasks
//! of their own, and report back through [`Controller::complete`].
//!
//! Every reconciliation overwrites the affected state wholesale, and the
//! [`RequestLedger`] drops answers that arrive after a newer one.

pub mod ledger;

use std::{collections::VecDeque, sync::Arc, time::Instant};

use snafu::OptionExt;
use tracing::{debug, error, info, warn};

use crate::{
    api::{
        RecorderApi,
        request::{Request, RequestKind, Response},
    },
    chart::PriceChart,
    config::DashboardConfig,
    errors::{ClientError, FailureKind, ValidationSnafu},
    state::AppState,
    view::{Dashboard, files::file_rows, severity::Severity, table::candle_rows},
};

pub use ledger::{RequestLedger, Ticket, Verdict};

/// Something the user (or the poll timer) asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CheckStatus,
    Connect,
    Disconnect,
    LoadSymbols,
    LoadTimeframes,
    StartRecording,
    StopRecording,
    LoadLatestData,
    LoadSavedFiles,
}

pub struct Controller {
    api: Arc<dyn RecorderApi>,
    state: AppState,
    dashboard: Dashboard,
    chart: PriceChart,
    ledger: RequestLedger,
    default_timeframe: String,
}

impl Controller {
    pub fn new(api: Arc<dyn RecorderApi>, config: &DashboardConfig) -> Self {
        let mut dashboard = Dashboard::new(config.log_capacity, config.toast_lifetime());
        dashboard.path_input = config.terminal_path.clone();
        dashboard.log("Application initialized. Ready to connect.", Severity::Info);

        Self {
            api,
            state: AppState::default(),
            dashboard,
            chart: PriceChart::new(),
            ledger: RequestLedger::default(),
            default_timeframe: config.default_timeframe.clone(),
        }
    }

    pub fn api(&self) -> Arc<dyn RecorderApi> {
        Arc::clone(&self.api)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn chart(&self) -> &PriceChart {
        &self.chart
    }

    /// Whether the control behind `action` is currently enabled. Actions
    /// without a control are always allowed.
    pub fn is_enabled(&self, action: Action) -> bool {
        let controls = &self.dashboard.controls;
        match action {
            Action::Connect => controls.connect,
            Action::Disconnect => controls.disconnect,
            Action::StartRecording => controls.start_recording,
            Action::StopRecording => controls.stop_recording,
            _ => true,
        }
    }

    // ---- operations, run inline -------------------------------------------

    pub async fn check_status(&mut self) {
        self.perform(Action::CheckStatus).await
    }

    /// Connects using `path`, which also becomes the path input's content.
    pub async fn connect(&mut self, path: &str) {
        self.dashboard.path_input = path.to_string();
        self.perform(Action::Connect).await
    }

    pub async fn disconnect(&mut self) {
        self.perform(Action::Disconnect).await
    }

    pub async fn get_symbols(&mut self) {
        self.perform(Action::LoadSymbols).await
    }

    pub async fn get_timeframes(&mut self) {
        self.perform(Action::LoadTimeframes).await
    }

    pub async fn start_recording(&mut self) {
        self.perform(Action::StartRecording).await
    }

    pub async fn stop_recording(&mut self) {
        self.perform(Action::StopRecording).await
    }

    pub async fn get_latest_data(&mut self) {
        self.perform(Action::LoadLatestData).await
    }

    pub async fn get_saved_files(&mut self) {
        self.perform(Action::LoadSavedFiles).await
    }

    /// Runs `action` and every follow-up it triggers to completion, one
    /// request at a time.
    pub async fn perform(&mut self, action: Action) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            let Some(request) = self.prepare(action) else {
                continue;
            };
            let ticket = self.issue(&request);
            let outcome = request.execute(self.api.as_ref()).await;
            pending.extend(self.complete(ticket, outcome));
        }
    }

    // ---- request lifecycle ---------------------------------------------------

    /// Validates `action` and builds its request. `None` means nothing should
    /// be sent (validation failed and has been reported).
    pub fn prepare(&mut self, action: Action) -> Option<Request> {
        let request = match action {
            Action::CheckStatus => Request::Status,
            Action::Connect => {
                self.dashboard.log("Connecting to MT5...", Severity::Info);
                Request::Connect {
                    path: self.dashboard.path_input.trim().to_string(),
                }
            }
            Action::Disconnect => {
                self.dashboard.log("Disconnecting from MT5...", Severity::Info);
                Request::Disconnect
            }
            Action::LoadSymbols => Request::Symbols,
            Action::LoadTimeframes => Request::Timeframes,
            Action::StartRecording => {
                let (symbol, timeframe) = match self.recording_selection() {
                    Ok(selection) => selection,
                    Err(e) => {
                        debug!(error = %e, "start recording rejected locally");
                        self.dashboard.toast("Error", e.to_string(), Severity::Error);
                        return None;
                    }
                };
                self.dashboard.log(
                    format!("Starting recording for {symbol} ({timeframe})..."),
                    Severity::Info,
                );
                Request::StartRecording { symbol, timeframe }
            }
            Action::StopRecording => {
                self.dashboard.log("Stopping recording...", Severity::Info);
                Request::StopRecording
            }
            Action::LoadLatestData => Request::LatestData,
            Action::LoadSavedFiles => Request::SavedFiles,
        };
        Some(request)
    }

    fn recording_selection(&self) -> Result<(String, String), ClientError> {
        let symbol = self.dashboard.symbols.selected().context(ValidationSnafu {
            message: "Please select a symbol",
        })?;
        let timeframe = self.dashboard.timeframes.selected().context(ValidationSnafu {
            message: "Please select a timeframe",
        })?;
        Ok((symbol.to_string(), timeframe.to_string()))
    }

    /// Whether a request of `kind` has been issued and not yet settled.
    pub fn is_in_flight(&self, kind: RequestKind) -> bool {
        self.ledger.is_in_flight(kind)
    }

    /// Registers `request` as in flight, superseding any older one of its kind.
    pub fn issue(&mut self, request: &Request) -> Ticket {
        let ticket = self.ledger.issue(request.kind());
        debug!(seq = ticket.seq, kind = ?ticket.kind, "request issued");
        ticket
    }

    /// Folds a finished request back in and returns the follow-up actions it
    /// triggers. Stale answers are dropped without touching anything.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Response, ClientError>,
    ) -> Vec<Action> {
        let verdict = self.ledger.settle(ticket);
        if verdict != Verdict::Apply {
            debug!(seq = ticket.seq, kind = ?ticket.kind, ?verdict, "discarding stale response");
            return Vec::new();
        }

        match outcome {
            Ok(response) => self.apply(ticket.kind, response),
            Err(e) => {
                self.report_failure(ticket.kind, &e);
                Vec::new()
            }
        }
    }

    fn apply(&mut self, kind: RequestKind, response: Response) -> Vec<Action> {
        if kind.changes_state() {
            self.ledger.mark_state_change();
        }

        let mut follow_ups = Vec::new();
        match response {
            Response::Status(report) => {
                self.dashboard.apply_status(&report);
                if self.state.apply_status(&report) {
                    info!("backend reports a new connection");
                    follow_ups.extend([
                        Action::LoadSymbols,
                        Action::LoadTimeframes,
                        Action::LoadSavedFiles,
                    ]);
                }
                if self.state.recording {
                    follow_ups.push(Action::LoadLatestData);
                }
            }
            Response::Connected { message } => {
                info!(%message, "connected");
                self.dashboard
                    .log("Connected to MT5 successfully.", Severity::Success);
                self.dashboard
                    .toast("Success", "Connected to MT5", Severity::Success);
                follow_ups.extend([
                    Action::LoadSymbols,
                    Action::LoadTimeframes,
                    Action::LoadSavedFiles,
                ]);
            }
            Response::Disconnected { message } => {
                info!(%message, "disconnected");
                self.dashboard.log("Disconnected from MT5.", Severity::Success);
                self.dashboard
                    .toast("Success", "Disconnected from MT5", Severity::Success);
                self.dashboard.symbols.clear();
                self.dashboard.controls.symbol_select = false;
                self.chart.reset_caption();
            }
            Response::Symbols(symbols) => {
                let count = symbols.len();
                self.dashboard
                    .symbols
                    .replace_options(symbols.into_iter().map(|s| (s.clone(), s)));
                self.dashboard.controls.symbol_select = true;
                self.dashboard
                    .log(format!("Loaded {count} symbols from MT5."), Severity::Info);
            }
            Response::Timeframes(timeframes) => {
                self.dashboard
                    .timeframes
                    .replace_options(timeframes.into_iter().map(|tf| (tf.value, tf.label)));
                self.dashboard.controls.timeframe_select = true;
                self.dashboard.timeframes.select(&self.default_timeframe);
                self.dashboard.log("Loaded timeframes.", Severity::Info);
            }
            Response::RecordingStarted {
                message,
                symbol,
                timeframe,
            } => {
                info!(%symbol, %timeframe, "recording started");
                self.dashboard.log(message.clone(), Severity::Success);
                self.dashboard.toast("Success", message, Severity::Success);
                self.state.recording = true;
                self.state.current_symbol = Some(symbol);
                self.state.current_timeframe = Some(timeframe);
                self.refresh_controls();
                follow_ups.push(Action::LoadLatestData);
            }
            Response::RecordingStopped { message } => {
                info!("recording stopped");
                self.dashboard.log(message.clone(), Severity::Success);
                self.dashboard.toast("Success", message, Severity::Success);
                self.state.recording = false;
                self.refresh_controls();
                follow_ups.push(Action::LoadSavedFiles);
            }
            Response::LatestData(candles) => {
                self.dashboard.candles = candle_rows(&candles);
                self.chart.update_chart(Some(&candles));
            }
            Response::SavedFiles(files) => {
                self.dashboard.files = file_rows(&files);
            }
        }
        follow_ups
    }

    fn report_failure(&mut self, kind: RequestKind, e: &ClientError) {
        match e.kind() {
            FailureKind::Backend | FailureKind::Validation => {
                warn!(kind = ?kind, error = %e, "backend refused request");
                let text = kind.failure_message(&e.to_string());
                self.dashboard.log(text.clone(), Severity::Error);
                if kind.user_initiated() {
                    self.dashboard.toast("Error", text, Severity::Error);
                }
            }
            FailureKind::Transport => {
                error!(kind = ?kind, error = %e, "request failed");
                self.dashboard
                    .log(kind.error_message(&e.to_string()), Severity::Error);
                if kind == RequestKind::Connect {
                    self.dashboard
                        .toast("Error", kind.short_failure(), Severity::Error);
                }
            }
        }
    }

    // ---- local interactions ----------------------------------------------------

    pub fn clear_logs(&mut self) {
        self.dashboard.logs.clear();
        self.dashboard.log("Logs cleared.", Severity::Info);
    }

    pub fn path_input_mut(&mut self) -> &mut String {
        &mut self.dashboard.path_input
    }

    /// Steps the symbol selector. Returns `false` when it is disabled.
    pub fn cycle_symbol(&mut self, forward: bool) -> bool {
        if !self.dashboard.controls.symbol_select {
            return false;
        }
        if forward {
            self.dashboard.symbols.select_next();
        } else {
            self.dashboard.symbols.select_prev();
        }
        self.refresh_start_control();
        true
    }

    /// Steps the timeframe selector. Returns `false` when it is disabled.
    pub fn cycle_timeframe(&mut self, forward: bool) -> bool {
        if !self.dashboard.controls.timeframe_select {
            return false;
        }
        if forward {
            self.dashboard.timeframes.select_next();
        } else {
            self.dashboard.timeframes.select_prev();
        }
        true
    }

    /// Picks `symbol` in the selector. Returns whether it was available.
    pub fn select_symbol(&mut self, symbol: &str) -> bool {
        let found = self.dashboard.symbols.select(symbol);
        self.refresh_start_control();
        found
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        self.dashboard.toast.expire(now)
    }

    // A selection change only affects the start control; the selectors keep
    // whatever the last status or list reply gave them.
    fn refresh_start_control(&mut self) {
        self.dashboard.controls.start_recording = self.state.connected
            && !self.state.recording
            && self.dashboard.symbol_selected();
    }

    fn refresh_controls(&mut self) {
        self.dashboard
            .refresh_controls(self.state.connected, self.state.recording);
    }

    /// Final request to send when the dashboard closes: stop an active
    /// recording so the backend does not keep writing unattended.
    pub fn teardown(&mut self) -> Option<Request> {
        if self.state.recording {
            info!("stopping active recording on exit");
            Some(Request::StopRecording)
        } else {
            None
        }
    }
}
