use snafu::{Backtrace, Snafu};

/// Broad class of a [`ClientError`], used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend answered with `success: false`.
    Backend,
    /// The request never produced a usable JSON payload.
    Transport,
    /// The request was rejected locally and never sent.
    Validation,
}

/// The unified error type for talking to the recorder backend.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Network failure, timeout or a non-success HTTP status.
    #[snafu(display("Request to {endpoint} failed: {source}"))]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The body was not the JSON shape we expected.
    #[snafu(display("Invalid response from {endpoint}: {source}"))]
    Decode {
        endpoint: &'static str,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The backend reported a failure (`success: false`).
    #[snafu(display("{message}"))]
    Backend { message: String },

    /// A required selection or input was missing.
    #[snafu(display("{message}"))]
    Validation { message: String },
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Backend { .. } => FailureKind::Backend,
            ClientError::Validation { .. } => FailureKind::Validation,
            ClientError::ClientBuild { .. }
            | ClientError::Transport { .. }
            | ClientError::Decode { .. } => FailureKind::Transport,
        }
    }
}
