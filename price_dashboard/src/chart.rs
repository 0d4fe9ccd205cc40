//! Line chart of close prices with OHLCV tooltips.

use crate::models::candle::Candle;

pub const NO_SYMBOL: &str = "No Symbol Selected";

/// One plotted point: the close as `y` plus the whole bar for the tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub y: f64,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    pub v: f64,
}

impl From<&Candle> for ChartPoint {
    fn from(candle: &Candle) -> Self {
        Self {
            y: candle.close,
            o: candle.open,
            h: candle.high,
            l: candle.low,
            c: candle.close,
            v: candle.volume,
        }
    }
}

impl ChartPoint {
    pub fn tooltip_lines(&self) -> [String; 5] {
        [
            format!("Open: {}", self.o),
            format!("High: {}", self.h),
            format!("Low: {}", self.l),
            format!("Close: {}", self.c),
            format!("Volume: {}", self.v),
        ]
    }
}

/// Axis ranges for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone)]
pub struct PriceChart {
    labels: Vec<String>,
    points: Vec<ChartPoint>,
    caption: String,
    revision: u64,
}

impl PriceChart {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            points: Vec::new(),
            caption: NO_SYMBOL.to_string(),
            revision: 0,
        }
    }

    /// Replaces the whole series with `candles` (given newest-first).
    ///
    /// `None` or an empty slice leaves the chart untouched.
    pub fn update_chart(&mut self, candles: Option<&[Candle]>) {
        let Some(candles) = candles.filter(|c| !c.is_empty()) else {
            return;
        };

        let chronological = candles.iter().rev();
        self.labels = chronological.clone().map(|c| c.time_label().to_string()).collect();
        self.points = chronological.map(ChartPoint::from).collect();

        let newest = &candles[0];
        self.caption = format!("{} ({})", newest.symbol, newest.timeframe);
        self.request_redraw();
    }

    pub fn reset_caption(&mut self) {
        self.caption = NO_SYMBOL.to_string();
        self.request_redraw();
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Bumped on every change; renderers compare it to skip redundant work.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tooltip(&self, index: usize) -> Option<[String; 5]> {
        self.points.get(index).map(ChartPoint::tooltip_lines)
    }

    /// `(x, close)` pairs, x being the point's position.
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.y))
            .collect()
    }

    /// Axis ranges with a little headroom around the closes.
    pub fn bounds(&self) -> Option<ChartBounds> {
        let first = self.points.first()?;
        let (lo, hi) = self
            .points
            .iter()
            .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let pad = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.001 };
        Some(ChartBounds {
            x: [0.0, (self.points.len().saturating_sub(1)).max(1) as f64],
            y: [lo - pad, hi + pad],
        })
    }

    fn request_redraw(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for PriceChart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(datetime: &str, close: f64) -> Candle {
        Candle {
            datetime: datetime.into(),
            symbol: "EURUSD".into(),
            timeframe: "M1".into(),
            open: 1.0,
            high: 1.3,
            low: 0.9,
            close,
            volume: 25.0,
        }
    }

    #[test]
    fn newest_first_input_renders_chronologically() {
        let mut chart = PriceChart::new();
        let newest = Candle {
            symbol: "GBPUSD".into(),
            timeframe: "M5".into(),
            ..candle("2024-01-01 10:00", 1.2)
        };
        chart.update_chart(Some(&[newest, candle("2024-01-01 09:59", 1.1)]));

        assert_eq!(chart.labels(), ["09:59", "10:00"]);
        assert_eq!(chart.points()[1].y, 1.2);
        assert_eq!(chart.caption(), "GBPUSD (M5)");
        assert_eq!(chart.revision(), 1);
    }

    #[test]
    fn empty_or_absent_input_keeps_previous_data() {
        let mut chart = PriceChart::new();
        chart.update_chart(Some(&[candle("2024-01-01 10:00", 1.2)]));
        let labels = chart.labels().to_vec();
        let revision = chart.revision();

        chart.update_chart(Some(&[]));
        chart.update_chart(None);

        assert_eq!(chart.labels(), labels.as_slice());
        assert_eq!(chart.points().len(), 1);
        assert_eq!(chart.revision(), revision);
    }

    #[test]
    fn update_replaces_rather_than_appends() {
        let mut chart = PriceChart::new();
        chart.update_chart(Some(&[candle("d 10:01", 1.0), candle("d 10:00", 1.0)]));
        chart.update_chart(Some(&[candle("d 10:02", 1.0)]));
        assert_eq!(chart.labels(), ["10:02"]);
    }

    #[test]
    fn tooltip_lists_full_bar() {
        let mut chart = PriceChart::new();
        chart.update_chart(Some(&[candle("2024-01-01 10:00", 1.25)]));
        let tip = chart.tooltip(0).unwrap();
        assert_eq!(
            tip,
            ["Open: 1", "High: 1.3", "Low: 0.9", "Close: 1.25", "Volume: 25"].map(String::from)
        );
        assert!(chart.tooltip(1).is_none());
    }

    #[test]
    fn bounds_pad_flat_series() {
        let mut chart = PriceChart::new();
        assert!(chart.bounds().is_none());
        chart.update_chart(Some(&[candle("a 1", 2.0)]));
        let b = chart.bounds().unwrap();
        assert!(b.y[0] < 2.0 && b.y[1] > 2.0);
        assert_eq!(b.x, [0.0, 1.0]);
    }

    #[test]
    fn caption_resets() {
        let mut chart = PriceChart::new();
        chart.update_chart(Some(&[candle("a 1", 2.0)]));
        chart.reset_caption();
        assert_eq!(chart.caption(), NO_SYMBOL);
    }
}
