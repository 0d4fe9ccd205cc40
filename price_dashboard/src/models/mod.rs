pub mod candle;
pub mod reply;
pub mod saved_file;
pub mod status;
pub mod timeframe;
