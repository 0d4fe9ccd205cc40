//! Renderer-agnostic model of everything the dashboard shows.
//!
//! The controller writes into a [`Dashboard`]; the terminal front end only
//! reads it. Nothing in here performs I/O.

pub mod controls;
pub mod files;
pub mod log_view;
pub mod severity;
pub mod table;
pub mod toast;

use std::time::Duration;

use crate::{
    models::status::StatusReport,
    view::{
        controls::{ControlStates, SYMBOL_PLACEHOLDER, SelectControl, TIMEFRAME_PLACEHOLDER},
        files::FileRow,
        log_view::LogView,
        severity::Severity,
        table::CandleRow,
        toast::ToastSlot,
    },
};

/// Connection/recording lights and the last-update text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indicators {
    pub connected: bool,
    pub recording: bool,
    pub last_update: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Terminal installation path typed by the user.
    pub path_input: String,
    pub symbols: SelectControl,
    pub timeframes: SelectControl,
    pub controls: ControlStates,
    pub indicators: Indicators,
    pub candles: Vec<CandleRow>,
    pub files: Vec<FileRow>,
    pub logs: LogView,
    pub toast: ToastSlot,
}

impl Dashboard {
    pub fn new(log_capacity: usize, toast_lifetime: Duration) -> Self {
        Self {
            path_input: String::new(),
            symbols: SelectControl::new(SYMBOL_PLACEHOLDER),
            timeframes: SelectControl::new(TIMEFRAME_PLACEHOLDER),
            controls: ControlStates::derive(false, false, false),
            indicators: Indicators::default(),
            candles: Vec::new(),
            files: Vec::new(),
            logs: LogView::new(log_capacity),
            toast: ToastSlot::new(toast_lifetime),
        }
    }

    pub fn log(&mut self, message: impl Into<String>, severity: Severity) {
        self.logs.push(message, severity);
    }

    pub fn toast(&mut self, title: &str, message: impl Into<String>, severity: Severity) {
        self.toast.show(title, message, severity);
    }

    pub fn symbol_selected(&self) -> bool {
        self.symbols.selected().is_some()
    }

    /// Recomputes every enabled flag from the given state.
    pub fn refresh_controls(&mut self, connected: bool, recording: bool) {
        self.controls = ControlStates::derive(connected, recording, self.symbol_selected());
    }

    /// Mirrors a status report onto the lights and controls. The last-update
    /// text is only replaced when the report carries one.
    pub fn apply_status(&mut self, status: &StatusReport) {
        self.indicators.connected = status.connected;
        self.indicators.recording = status.recording;
        if let Some(ts) = &status.last_update {
            self.indicators.last_update = Some(ts.clone());
        }
        self.refresh_controls(status.connected, status.recording);
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(log_view::DEFAULT_LOG_CAPACITY, toast::DEFAULT_TOAST_LIFETIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_without_timestamp_keeps_previous_one() {
        let mut d = Dashboard::default();
        d.apply_status(&StatusReport {
            connected: true,
            last_update: Some("2024-01-01 10:00:00".into()),
            ..Default::default()
        });
        d.apply_status(&StatusReport {
            connected: true,
            ..Default::default()
        });
        assert_eq!(d.indicators.last_update.as_deref(), Some("2024-01-01 10:00:00"));
    }

    #[test]
    fn start_needs_a_symbol_even_when_connected() {
        let mut d = Dashboard::default();
        d.apply_status(&StatusReport {
            connected: true,
            ..Default::default()
        });
        assert!(!d.controls.start_recording);

        d.symbols
            .replace_options([("EURUSD".to_string(), "EURUSD".to_string())]);
        d.symbols.select("EURUSD");
        d.refresh_controls(true, false);
        assert!(d.controls.start_recording);
    }
}
