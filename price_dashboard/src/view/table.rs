use crate::models::candle::Candle;

pub const NO_DATA: &str = "No data available";

pub const COLUMNS: [&str; 8] = [
    "Datetime", "Symbol", "TF", "Open", "High", "Low", "Close", "Volume",
];

/// Direction of a bar, used to color its close price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMove {
    Up,
    Down,
}

/// One rendered table row, cells in [`COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRow {
    pub cells: [String; 8],
    pub movement: PriceMove,
}

impl From<&Candle> for CandleRow {
    fn from(c: &Candle) -> Self {
        Self {
            cells: [
                c.datetime.clone(),
                c.symbol.clone(),
                c.timeframe.clone(),
                c.open.to_string(),
                c.high.to_string(),
                c.low.to_string(),
                c.close.to_string(),
                c.volume.to_string(),
            ],
            movement: if c.is_up() {
                PriceMove::Up
            } else {
                PriceMove::Down
            },
        }
    }
}

/// Rows in the order received (newest first).
pub fn candle_rows(candles: &[Candle]) -> Vec<CandleRow> {
    candles.iter().map(CandleRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_colors_by_close() {
        let newer = Candle {
            datetime: "2024-01-01 10:00".into(),
            symbol: "EURUSD".into(),
            timeframe: "M1".into(),
            open: 1.1,
            high: 1.2,
            low: 1.0,
            close: 1.05,
            volume: 100.0,
        };
        let older = Candle {
            datetime: "2024-01-01 09:59".into(),
            close: 1.15,
            ..newer.clone()
        };

        let rows = candle_rows(&[newer, older]);
        assert_eq!(rows[0].cells[0], "2024-01-01 10:00");
        assert_eq!(rows[0].movement, PriceMove::Down);
        assert_eq!(rows[1].movement, PriceMove::Up);
        assert_eq!(rows[0].cells[7], "100");
    }
}
