//! Terminal host for the upload-and-classify widget.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
