//! Library crate for scandito exposing the scan pipeline and its collaborators.
pub mod config;
pub mod error;
pub mod logging;
pub mod ports;
pub mod report;
pub mod scanner;
pub mod types;
