pub mod action;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod model;
#[cfg(feature = "perf-tracing")]
pub mod perf;
pub mod system;
pub mod ui;
