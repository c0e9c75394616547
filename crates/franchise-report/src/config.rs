//! # Report Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FRANCHISE_OPERATING_EXPENSES=250000                                │
//! │     FRANCHISE_UTC_OFFSET_MINUTES=330                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/dashboard/report.toml (Linux)                            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [analytics]
//! operating_expenses_minor = 0
//! utc_offset_minutes = 330
//! top_products_limit = 5
//!
//! [thresholds]
//! high_margin_bps = 1500
//! anomaly_drop_bps = 2500
//! network_high_revenue_minor = 1000000
//! network_average_floor_minor = 500000
//!
//! [access]
//! status_change_roles = ["super_admin", "manager"]
//! ```

use chrono::FixedOffset;
use franchise_core::network::{PerformanceThresholds, ANOMALY_DROP_BPS, HIGH_MARGIN_BPS};
use franchise_core::{Money, Role};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

const MAX_BPS: u32 = 10_000;

// =============================================================================
// Analytics Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Operating expenses subtracted in the P&L, in minor units.
    /// The dashboards have no expense tracking yet, so this defaults to 0.
    #[serde(default)]
    pub operating_expenses_minor: i64,

    /// Offset used to cut sales into local calendar days.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: usize,
}

fn default_top_products_limit() -> usize {
    5
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            operating_expenses_minor: 0,
            utc_offset_minutes: 0,
            top_products_limit: default_top_products_limit(),
        }
    }
}

// =============================================================================
// Threshold Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_high_margin_bps")]
    pub high_margin_bps: u32,

    #[serde(default = "default_anomaly_drop_bps")]
    pub anomaly_drop_bps: u32,

    #[serde(default = "default_network_high_revenue")]
    pub network_high_revenue_minor: i64,

    #[serde(default = "default_network_average_floor")]
    pub network_average_floor_minor: i64,
}

fn default_high_margin_bps() -> u32 {
    HIGH_MARGIN_BPS
}

fn default_anomaly_drop_bps() -> u32 {
    ANOMALY_DROP_BPS
}

fn default_network_high_revenue() -> i64 {
    PerformanceThresholds::default().network_high_revenue.minor()
}

fn default_network_average_floor() -> i64 {
    PerformanceThresholds::default().network_average_floor.minor()
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        ThresholdSettings {
            high_margin_bps: default_high_margin_bps(),
            anomaly_drop_bps: default_anomaly_drop_bps(),
            network_high_revenue_minor: default_network_high_revenue(),
            network_average_floor_minor: default_network_average_floor(),
        }
    }
}

// =============================================================================
// Access Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessSettings {
    /// Roles allowed to move orders between statuses.
    #[serde(default = "default_status_change_roles")]
    pub status_change_roles: Vec<Role>,
}

fn default_status_change_roles() -> Vec<Role> {
    vec![Role::SuperAdmin, Role::Manager]
}

impl Default for AccessSettings {
    fn default() -> Self {
        AccessSettings {
            status_change_roles: default_status_change_roles(),
        }
    }
}

// =============================================================================
// Main Report Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub analytics: AnalyticsSettings,

    #[serde(default)]
    pub thresholds: ThresholdSettings,

    #[serde(default)]
    pub access: AccessSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ReportError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> ReportResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReportError::ConfigSaveFailed(e.to_string()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| ReportError::ConfigSaveFailed(e.to_string()))?;
        info!(?path, "Report config saved");
        Ok(())
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.analytics.top_products_limit == 0 {
            return Err(ReportError::InvalidConfig(
                "top_products_limit must be greater than 0".into(),
            ));
        }
        if self.analytics.operating_expenses_minor < 0 {
            return Err(ReportError::InvalidConfig(
                "operating_expenses_minor must not be negative".into(),
            ));
        }
        if self.utc_offset().is_none() {
            return Err(ReportError::InvalidConfig(format!(
                "utc_offset_minutes out of range: {}",
                self.analytics.utc_offset_minutes
            )));
        }

        let t = &self.thresholds;
        if t.high_margin_bps > MAX_BPS || t.anomaly_drop_bps > MAX_BPS {
            return Err(ReportError::InvalidConfig(format!(
                "thresholds must be at most {MAX_BPS} bps"
            )));
        }
        if t.network_average_floor_minor > t.network_high_revenue_minor {
            return Err(ReportError::InvalidConfig(
                "network_average_floor_minor must not exceed network_high_revenue_minor".into(),
            ));
        }

        if self.access.status_change_roles.is_empty() {
            return Err(ReportError::InvalidConfig(
                "status_change_roles must name at least one role".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("FRANCHISE_OPERATING_EXPENSES") {
            match value.parse::<i64>() {
                Ok(minor) => {
                    debug!(minor, "Overriding operating expenses from environment");
                    self.analytics.operating_expenses_minor = minor;
                }
                Err(_) => {
                    warn!(value = %value, "Ignoring non-numeric FRANCHISE_OPERATING_EXPENSES")
                }
            }
        }

        if let Ok(value) = std::env::var("FRANCHISE_UTC_OFFSET_MINUTES") {
            match value.parse::<i32>() {
                Ok(minutes) => self.analytics.utc_offset_minutes = minutes,
                Err(_) => {
                    warn!(value = %value, "Ignoring non-numeric FRANCHISE_UTC_OFFSET_MINUTES")
                }
            }
        }

        if let Ok(value) = std::env::var("FRANCHISE_HIGH_MARGIN_BPS") {
            if let Ok(bps) = value.parse::<u32>() {
                self.thresholds.high_margin_bps = bps;
            }
        }

        if let Ok(value) = std::env::var("FRANCHISE_ANOMALY_DROP_BPS") {
            if let Ok(bps) = value.parse::<u32>() {
                self.thresholds.anomaly_drop_bps = bps;
            }
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "franchise", "dashboard")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.analytics.utc_offset_minutes.checked_mul(60)?)
    }

    pub fn operating_expenses(&self) -> Money {
        Money::from_minor(self.analytics.operating_expenses_minor)
    }

    pub fn performance_thresholds(&self) -> PerformanceThresholds {
        PerformanceThresholds {
            high_margin_bps: self.thresholds.high_margin_bps,
            anomaly_drop_bps: self.thresholds.anomaly_drop_bps,
            network_high_revenue: Money::from_minor(self.thresholds.network_high_revenue_minor),
            network_average_floor: Money::from_minor(self.thresholds.network_average_floor_minor),
        }
    }
}
