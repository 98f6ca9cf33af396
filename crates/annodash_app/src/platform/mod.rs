//! Terminal platform for the annodash dashboard: configuration, logging,
//! effect execution and the text renderer around the pure core.
mod app;
pub mod cli;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
