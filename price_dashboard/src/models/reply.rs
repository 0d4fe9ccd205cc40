//! The `{ success, message, ... }` envelope shared by every endpoint except
//! `/api/status`.

use serde::{Deserialize, Serialize};

use crate::{
    errors::ClientError,
    models::{candle::Candle, saved_file::SavedFile, timeframe::TimeframeOption},
};

/// Message used when the backend fails without saying why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A backend reply: the success gate, an optional human-readable message and
/// the endpoint-specific body.
///
/// A missing `success` field is treated as `false`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reply<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Reply<T> {
    pub fn ok(body: T) -> Self {
        Self {
            success: true,
            message: None,
            body,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Passes the reply through only when the backend vouched for it.
    pub fn accept(self) -> Result<Self, ClientError> {
        if self.success {
            Ok(self)
        } else {
            Err(ClientError::Backend {
                message: self.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            })
        }
    }

    /// Message to show for a successful action, falling back to `default`.
    pub fn message_or(&self, default: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

impl<T: Default> Reply<T> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            body: T::default(),
        }
    }
}

/// Body of the action endpoints (connect, disconnect, start/stop recording).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ack {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SymbolList {
    #[serde(default)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeframeList {
    #[serde(default)]
    pub timeframes: Vec<TimeframeOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CandleList {
    #[serde(default)]
    pub data: Vec<Candle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<SavedFile>,
}
