//! Command line front end for keepsake-core
//!
//! The binary lives in `main.rs`; this library half holds the pieces the
//! integration tests reach into: configuration loading and JSON input.

pub mod config;
pub mod input;

pub use config::{AppConfig, LayoutSettings, RankingSettings};
