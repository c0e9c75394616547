//! # franchise-report: Command Line Reports for the Franchise Dashboard
//!
//! The outer layer around `franchise-core`: reads record exports, loads
//! configuration, and prints dashboard payloads as JSON.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        franchise-report                                 │
//! │                                                                         │
//! │   args ──► cli ──► Command ──┬──► records ──► report ──► JSON stdout    │
//! │                              │                                          │
//! │   report.toml ──► config ────┤                                          │
//! │                              │                                          │
//! │   orders.json ◄──► store ◄───┴──► policy (role checks)                  │
//! │                                                                         │
//! │   logs ──► stderr (RUST_LOG)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`cli`] - Argument parsing
//! - [`config`] - Thresholds, expenses and access settings
//! - [`records`] - JSON record loading
//! - [`report`] - Dashboard and network payloads
//! - [`policy`] - Who may change order status
//! - [`store`] - File-backed order persistence
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod policy;
pub mod records;
pub mod report;
pub mod store;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr so stdout stays valid JSON.
///
/// ## Log Levels
/// - Set `RUST_LOG` to override
/// - Default: INFO, DEBUG for the franchise crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,franchise=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
