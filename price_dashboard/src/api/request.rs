//! Requests as values.
//!
//! The controller decides *what* to ask for by building a [`Request`]; whoever
//! owns the event loop decides *where* it runs (inline in tests, on a spawned
//! task in the terminal front end) and hands the [`Response`] back.

use crate::{
    api::RecorderApi,
    errors::ClientError,
    models::{
        candle::Candle, saved_file::SavedFile, status::StatusReport,
        timeframe::TimeframeOption,
    },
};

/// Which endpoint a request targets. One request per kind may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Status,
    Connect,
    Disconnect,
    Symbols,
    Timeframes,
    StartRecording,
    StopRecording,
    LatestData,
    SavedFiles,
}

/// How a kind of request is described in user-facing failure messages.
struct Phrasing {
    /// "Failed to {verb}: ..."
    verb: &'static str,
    /// "Error {gerund}: ..."
    gerund: &'static str,
}

impl RequestKind {
    pub const ALL: [RequestKind; 9] = [
        RequestKind::Status,
        RequestKind::Connect,
        RequestKind::Disconnect,
        RequestKind::Symbols,
        RequestKind::Timeframes,
        RequestKind::StartRecording,
        RequestKind::StopRecording,
        RequestKind::LatestData,
        RequestKind::SavedFiles,
    ];

    pub fn path(self) -> &'static str {
        match self {
            RequestKind::Status => "/api/status",
            RequestKind::Connect => "/api/connect",
            RequestKind::Disconnect => "/api/disconnect",
            RequestKind::Symbols => "/api/symbols",
            RequestKind::Timeframes => "/api/timeframes",
            RequestKind::StartRecording => "/api/start_recording",
            RequestKind::StopRecording => "/api/stop_recording",
            RequestKind::LatestData => "/api/latest_data",
            RequestKind::SavedFiles => "/api/saved_files",
        }
    }

    /// Successful responses of these kinds change backend state, so status
    /// reports requested before they were applied are out of date.
    pub fn changes_state(self) -> bool {
        matches!(
            self,
            RequestKind::Connect
                | RequestKind::Disconnect
                | RequestKind::StartRecording
                | RequestKind::StopRecording
        )
    }

    /// Kinds refreshed on every poll. A new one is not sent while the previous
    /// one is still running, so a slow backend still gets to answer.
    pub fn polled(self) -> bool {
        matches!(self, RequestKind::Status | RequestKind::LatestData)
    }

    /// Kinds triggered directly by a user action; their failures get a toast.
    pub fn user_initiated(self) -> bool {
        self.changes_state()
    }

    fn phrasing(self) -> Phrasing {
        let (verb, gerund) = match self {
            RequestKind::Status => ("check status", "checking status"),
            RequestKind::Connect => ("connect to MT5", "connecting to MT5"),
            RequestKind::Disconnect => ("disconnect from MT5", "disconnecting from MT5"),
            RequestKind::Symbols => ("get symbols", "getting symbols"),
            RequestKind::Timeframes => ("get timeframes", "getting timeframes"),
            RequestKind::StartRecording => ("start recording", "starting recording"),
            RequestKind::StopRecording => ("stop recording", "stopping recording"),
            RequestKind::LatestData => ("get latest data", "getting latest data"),
            RequestKind::SavedFiles => ("get saved files", "getting saved files"),
        };
        Phrasing { verb, gerund }
    }

    /// `Failed to start recording: <message>`
    pub fn failure_message(self, message: &str) -> String {
        format!("Failed to {}: {message}", self.phrasing().verb)
    }

    /// `Error starting recording: <message>`
    pub fn error_message(self, message: &str) -> String {
        format!("Error {}: {message}", self.phrasing().gerund)
    }

    /// `Failed to start recording` (no detail).
    pub fn short_failure(self) -> String {
        format!("Failed to {}", self.phrasing().verb)
    }
}

/// A backend call the controller wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Status,
    Connect { path: String },
    Disconnect,
    Symbols,
    Timeframes,
    StartRecording { symbol: String, timeframe: String },
    StopRecording,
    LatestData,
    SavedFiles,
}

/// A trusted (success-gated) backend answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Status(StatusReport),
    Connected { message: String },
    Disconnected { message: String },
    Symbols(Vec<String>),
    Timeframes(Vec<TimeframeOption>),
    RecordingStarted {
        message: String,
        symbol: String,
        timeframe: String,
    },
    RecordingStopped { message: String },
    LatestData(Vec<Candle>),
    SavedFiles(Vec<SavedFile>),
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Status => RequestKind::Status,
            Request::Connect { .. } => RequestKind::Connect,
            Request::Disconnect => RequestKind::Disconnect,
            Request::Symbols => RequestKind::Symbols,
            Request::Timeframes => RequestKind::Timeframes,
            Request::StartRecording { .. } => RequestKind::StartRecording,
            Request::StopRecording => RequestKind::StopRecording,
            Request::LatestData => RequestKind::LatestData,
            Request::SavedFiles => RequestKind::SavedFiles,
        }
    }

    /// Performs the call and applies the `success` gate.
    pub async fn execute(self, api: &dyn RecorderApi) -> Result<Response, ClientError> {
        let response = match self {
            Request::Status => Response::Status(api.status().await?),
            Request::Connect { path } => {
                let reply = api.connect(&path).await?.accept()?;
                Response::Connected {
                    message: reply.message_or("Connected to MT5 successfully"),
                }
            }
            Request::Disconnect => {
                let reply = api.disconnect().await?.accept()?;
                Response::Disconnected {
                    message: reply.message_or("Disconnected from MT5"),
                }
            }
            Request::Symbols => Response::Symbols(api.symbols().await?.accept()?.body.symbols),
            Request::Timeframes => {
                Response::Timeframes(api.timeframes().await?.accept()?.body.timeframes)
            }
            Request::StartRecording { symbol, timeframe } => {
                let reply = api.start_recording(&symbol, &timeframe).await?.accept()?;
                Response::RecordingStarted {
                    message: reply.message_or(&format!("Started recording {symbol} ({timeframe})")),
                    symbol,
                    timeframe,
                }
            }
            Request::StopRecording => {
                let reply = api.stop_recording().await?.accept()?;
                Response::RecordingStopped {
                    message: reply.message_or("Stopped recording"),
                }
            }
            Request::LatestData => Response::LatestData(api.latest_data().await?.accept()?.body.data),
            Request::SavedFiles => Response::SavedFiles(api.saved_files().await?.accept()?.body.files),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_actions_change_state() {
        let changing: Vec<_> = RequestKind::ALL
            .into_iter()
            .filter(|k| k.changes_state())
            .collect();
        assert_eq!(
            changing,
            vec![
                RequestKind::Connect,
                RequestKind::Disconnect,
                RequestKind::StartRecording,
                RequestKind::StopRecording
            ]
        );
    }

    #[test]
    fn only_refreshes_are_polled() {
        let polled: Vec<_> = RequestKind::ALL.into_iter().filter(|k| k.polled()).collect();
        assert_eq!(polled, vec![RequestKind::Status, RequestKind::LatestData]);
    }

    #[test]
    fn failure_wording() {
        assert_eq!(
            RequestKind::StartRecording.failure_message("Symbol is required"),
            "Failed to start recording: Symbol is required"
        );
        assert_eq!(
            RequestKind::Status.error_message("timed out"),
            "Error checking status: timed out"
        );
        assert_eq!(RequestKind::Connect.short_failure(), "Failed to connect to MT5");
    }

    #[test]
    fn every_kind_has_an_api_path() {
        for kind in RequestKind::ALL {
            assert!(kind.path().starts_with("/api/"), "{kind:?}");
        }
    }
}
