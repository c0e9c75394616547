//! # franchise-core: Pure Business Logic for the Franchise Dashboard
//!
//! Everything the dashboards compute, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Franchise Dashboard Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    React Dashboard                              │   │
//! │  │   KPIs ──► Sales ──► Orders ──► P&L ──► Transfers ──► Network   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ records fetched from backend REST      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ franchise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌───────────┐ ┌──────────┐ ┌──────────────┐    │   │
//! │  │  │order_status│ │ analytics │ │ network  │ │   transfer   │    │   │
//! │  │  │ transitions│ │ summaries │ │ tiers    │ │ import/export│    │   │
//! │  │  │ edit gates │ │ P&L trend │ │ anomalies│ │   rollups    │    │   │
//! │  │  └────────────┘ └───────────┘ └──────────┘ └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO SHARED STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderPersistence / TransitionPolicy    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Caller-supplied collaborators (backend, auth rules)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sale, order and transfer records
//! - [`money`] - Integer money
//! - [`order_status`] - Order lifecycle state machine
//! - [`analytics`] - Summaries, P&L, daily trend, categories, comparisons
//! - [`network`] - Cross-franchise classification and anomalies
//! - [`period`] - Explicit date windows
//! - [`transfer`] - Inter-franchise transfer rollups
//! - [`export`] - Report export query parameters
//! - [`validation`] - Order form checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use franchise_core::analytics::{profit_and_loss, summarize};
//! use franchise_core::Money;
//!
//! let summary = summarize(&[]);
//! let pnl = profit_and_loss(&summary, Money::zero());
//! assert_eq!(pnl.net_margin_percent, 0.0);
//! ```

pub mod analytics;
pub mod error;
pub mod export;
pub mod money;
pub mod network;
pub mod order_status;
pub mod period;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, TransitionError, ValidationError};
pub use money::Money;
pub use order_status::{OrderPersistence, TransitionPolicy};
pub use types::*;
