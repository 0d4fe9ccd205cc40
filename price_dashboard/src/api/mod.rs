//! Access to the price-recording backend.
//!
//! [`RecorderApi`] is the seam between the controller and the network: the
//! production implementation is [`http::HttpRecorderApi`], tests provide
//! scripted ones. Implementations return the raw [`Reply`] envelopes; the
//! `success` gate is applied once, in [`request::Request::execute`].

pub mod http;
pub mod request;

use async_trait::async_trait;

use crate::{
    errors::ClientError,
    models::{
        reply::{Ack, CandleList, FileList, Reply, SymbolList, TimeframeList},
        status::StatusReport,
    },
};

/// Trait for the backend endpoints the dashboard consumes.
///
/// Implementations must be shareable across tasks: every request runs on its
/// own task and holds a reference to the API for its duration.
#[async_trait]
pub trait RecorderApi: Send + Sync {
    /// `GET /api/status`
    async fn status(&self) -> Result<StatusReport, ClientError>;

    /// `POST /api/connect {path}`
    async fn connect(&self, path: &str) -> Result<Reply<Ack>, ClientError>;

    /// `POST /api/disconnect`
    async fn disconnect(&self) -> Result<Reply<Ack>, ClientError>;

    /// `GET /api/symbols`
    async fn symbols(&self) -> Result<Reply<SymbolList>, ClientError>;

    /// `GET /api/timeframes`
    async fn timeframes(&self) -> Result<Reply<TimeframeList>, ClientError>;

    /// `POST /api/start_recording {symbol, timeframe}`
    async fn start_recording(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Reply<Ack>, ClientError>;

    /// `POST /api/stop_recording`
    async fn stop_recording(&self) -> Result<Reply<Ack>, ClientError>;

    /// `GET /api/latest_data`
    async fn latest_data(&self) -> Result<Reply<CandleList>, ClientError>;

    /// `GET /api/saved_files`
    async fn saved_files(&self) -> Result<Reply<FileList>, ClientError>;
}
