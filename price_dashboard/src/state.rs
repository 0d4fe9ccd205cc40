use crate::models::status::StatusReport;

/// What the client believes about the backend. Owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub connected: bool,
    pub recording: bool,
    pub current_symbol: Option<String>,
    pub current_timeframe: Option<String>,
    pub last_update: Option<String>,
}

impl AppState {
    /// Copies a status report in. Returns `true` on a not-connected to
    /// connected transition.
    ///
    /// The timeframe is not part of the status payload and is left alone.
    pub fn apply_status(&mut self, status: &StatusReport) -> bool {
        let just_connected = status.connected && !self.connected;
        self.connected = status.connected;
        self.recording = status.recording;
        self.current_symbol = status.current_symbol.clone();
        self.last_update = status.last_update.clone();
        just_connected
    }
}
