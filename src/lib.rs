//! Library crate for esp-check-rs exposing reusable modules.
pub mod config;
pub mod ping;
pub mod probe;
pub mod report;
pub mod runner;
pub mod types;
