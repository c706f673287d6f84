//! DataMind TUI - a terminal client for the text-to-action analyst agent
//!
//! This library exposes modules for use in integration tests.

pub mod analyst;
pub mod app;
pub mod models;
pub mod state;
pub mod ui;
