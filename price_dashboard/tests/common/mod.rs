#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use price_dashboard::{
    api::RecorderApi,
    config::DashboardConfig,
    controller::Controller,
    errors::ClientError,
    models::{
        candle::Candle,
        reply::{Ack, CandleList, FileList, Reply, SymbolList, TimeframeList},
        saved_file::SavedFile,
        status::StatusReport,
        timeframe::TimeframeOption,
    },
};

/// Canned replies, one per endpoint.
#[derive(Debug, Clone)]
pub struct Script {
    pub status: StatusReport,
    /// How long `status()` takes to answer.
    pub status_delay: Option<Duration>,
    pub connect: Reply<Ack>,
    pub disconnect: Reply<Ack>,
    pub symbols: Reply<SymbolList>,
    pub timeframes: Reply<TimeframeList>,
    pub start: Reply<Ack>,
    pub stop: Reply<Ack>,
    pub latest: Reply<CandleList>,
    pub files: Reply<FileList>,
}

pub fn candle(datetime: &str, open: f64, close: f64) -> Candle {
    Candle {
        datetime: datetime.to_string(),
        symbol: "EURUSD".to_string(),
        timeframe: "M1".to_string(),
        open,
        high: open.max(close) + 0.0005,
        low: open.min(close) - 0.0005,
        close,
        volume: 120.0,
    }
}

impl Default for Script {
    fn default() -> Self {
        Self {
            status: StatusReport::default(),
            status_delay: None,
            connect: Reply::ok(Ack {}).with_message("Connected to MT5 successfully"),
            disconnect: Reply::ok(Ack {}).with_message("Disconnected from MT5"),
            symbols: Reply::ok(SymbolList {
                symbols: vec!["EURUSD".into(), "GBPUSD".into()],
            }),
            timeframes: Reply::ok(TimeframeList {
                timeframes: vec![
                    TimeframeOption {
                        value: "M1".into(),
                        label: "1 Minute".into(),
                    },
                    TimeframeOption {
                        value: "H1".into(),
                        label: "1 Hour".into(),
                    },
                ],
            }),
            start: Reply::ok(Ack {}).with_message("Started recording EURUSD (M1)"),
            stop: Reply::ok(Ack {}).with_message("Stopped recording"),
            latest: Reply::ok(CandleList {
                data: vec![
                    candle("2024-01-01 10:00", 1.1000, 1.1010),
                    candle("2024-01-01 09:59", 1.1005, 1.1000),
                ],
            }),
            files: Reply::ok(FileList {
                files: vec![SavedFile {
                    symbol: "EURUSD".into(),
                    timeframe: "M1".into(),
                    size: 1536,
                    modified: "2024-01-01 10:00:00".into(),
                }],
            }),
        }
    }
}

/// A [`RecorderApi`] that answers from a [`Script`] and records each call.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedApi {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn edit(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) -> Script {
        self.calls.lock().unwrap().push(name);
        self.script.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecorderApi for ScriptedApi {
    async fn status(&self) -> Result<StatusReport, ClientError> {
        let script = self.record("status");
        if let Some(delay) = script.status_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(script.status)
    }

    async fn connect(&self, _path: &str) -> Result<Reply<Ack>, ClientError> {
        Ok(self.record("connect").connect)
    }

    async fn disconnect(&self) -> Result<Reply<Ack>, ClientError> {
        Ok(self.record("disconnect").disconnect)
    }

    async fn symbols(&self) -> Result<Reply<SymbolList>, ClientError> {
        Ok(self.record("symbols").symbols)
    }

    async fn timeframes(&self) -> Result<Reply<TimeframeList>, ClientError> {
        Ok(self.record("timeframes").timeframes)
    }

    async fn start_recording(
        &self,
        _symbol: &str,
        _timeframe: &str,
    ) -> Result<Reply<Ack>, ClientError> {
        Ok(self.record("start_recording").start)
    }

    async fn stop_recording(&self) -> Result<Reply<Ack>, ClientError> {
        Ok(self.record("stop_recording").stop)
    }

    async fn latest_data(&self) -> Result<Reply<CandleList>, ClientError> {
        Ok(self.record("latest_data").latest)
    }

    async fn saved_files(&self) -> Result<Reply<FileList>, ClientError> {
        Ok(self.record("saved_files").files)
    }
}

pub fn controller(api: &Arc<ScriptedApi>) -> Controller {
    let api: Arc<dyn RecorderApi> = api.clone();
    Controller::new(api, &DashboardConfig::default())
}

pub fn connected() -> StatusReport {
    StatusReport {
        connected: true,
        ..Default::default()
    }
}

pub fn recording(symbol: &str) -> StatusReport {
    StatusReport {
        connected: true,
        recording: true,
        current_symbol: Some(symbol.to_string()),
        last_update: Some("2024-01-01 10:00:05".to_string()),
    }
}
