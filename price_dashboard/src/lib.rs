pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod state;
pub mod tui;
pub mod view;
