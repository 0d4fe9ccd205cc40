use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    api::{RecorderApi, request::RequestKind},
    errors::{ClientBuildSnafu, ClientError, DecodeSnafu, TransportSnafu},
    models::{
        reply::{Ack, CandleList, FileList, Reply, SymbolList, TimeframeList},
        status::StatusReport,
    },
};

/// [`RecorderApi`] over HTTP/JSON using a shared `reqwest` client.
pub struct HttpRecorderApi {
    client: Client,
    base_url: String,
}

impl HttpRecorderApi {
    /// Creates a client for the backend rooted at `base_url`
    /// (e.g. `http://127.0.0.1:5000`). Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, kind: RequestKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    async fn get<T: DeserializeOwned>(&self, kind: RequestKind) -> Result<T, ClientError> {
        debug!(endpoint = kind.path(), "GET");
        let response = self
            .client
            .get(self.url(kind))
            .send()
            .await
            .context(TransportSnafu {
                endpoint: kind.path(),
            })?;
        decode(kind, response).await
    }

    async fn post<B, T>(&self, kind: RequestKind, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(endpoint = kind.path(), "POST");
        let mut request = self.client.post(self.url(kind));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.context(TransportSnafu {
            endpoint: kind.path(),
        })?;
        decode(kind, response).await
    }
}

async fn decode<T: DeserializeOwned>(kind: RequestKind, response: Response) -> Result<T, ClientError> {
    let response = response.error_for_status().context(TransportSnafu {
        endpoint: kind.path(),
    })?;
    response.json::<T>().await.context(DecodeSnafu {
        endpoint: kind.path(),
    })
}

#[async_trait]
impl RecorderApi for HttpRecorderApi {
    async fn status(&self) -> Result<StatusReport, ClientError> {
        self.get(RequestKind::Status).await
    }

    async fn connect(&self, path: &str) -> Result<Reply<Ack>, ClientError> {
        self.post(RequestKind::Connect, Some(&json!({ "path": path })))
            .await
    }

    async fn disconnect(&self) -> Result<Reply<Ack>, ClientError> {
        self.post::<(), _>(RequestKind::Disconnect, None).await
    }

    async fn symbols(&self) -> Result<Reply<SymbolList>, ClientError> {
        self.get(RequestKind::Symbols).await
    }

    async fn timeframes(&self) -> Result<Reply<TimeframeList>, ClientError> {
        self.get(RequestKind::Timeframes).await
    }

    async fn start_recording(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Reply<Ack>, ClientError> {
        let body = json!({ "symbol": symbol, "timeframe": timeframe });
        self.post(RequestKind::StartRecording, Some(&body)).await
    }

    async fn stop_recording(&self) -> Result<Reply<Ack>, ClientError> {
        self.post::<(), _>(RequestKind::StopRecording, None).await
    }

    async fn latest_data(&self) -> Result<Reply<CandleList>, ClientError> {
        self.get(RequestKind::LatestData).await
    }

    async fn saved_files(&self) -> Result<Reply<FileList>, ClientError> {
        self.get(RequestKind::SavedFiles).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let api = HttpRecorderApi::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(
            api.url(RequestKind::StartRecording),
            "http://localhost:5000/api/start_recording"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_failure() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = HttpRecorderApi::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = api.status().await.unwrap_err();
        assert_eq!(err.kind(), crate::errors::FailureKind::Transport);
        assert!(err.to_string().contains("/api/status"));
    }
}
