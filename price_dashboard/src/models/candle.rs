//! Wire representation of one recorded OHLCV bar.
//!
//! Candles arrive from `/api/latest_data` newest-first and are never mutated
//! after decoding; the table keeps that order and the chart reverses it.

use serde::{Deserialize, Serialize};

/// A single recorded price bar for a symbol/timeframe bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start as formatted by the backend, e.g. `"2024-01-01 10:00"`.
    pub datetime: String,
    pub symbol: String,
    pub timeframe: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// `true` when the bar closed at or above its open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    /// Time-of-day portion of [`Candle::datetime`].
    ///
    /// Takes the token after the first space; without a (non-empty) second
    /// token the leading token is used, which is the whole string when there
    /// is no space at all.
    pub fn time_label(&self) -> &str {
        let mut parts = self.datetime.split(' ');
        let head = parts.next().unwrap_or_default();
        parts.next().filter(|t| !t.is_empty()).unwrap_or(head)
    }
}
