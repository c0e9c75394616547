//! # Network View
//!
//! Cross-franchise rollups for the super-admin dashboard: per-franchise
//! rows, performance classification, health tiers and week-over-week
//! revenue anomalies.
//!
//! ## Two Notions of "Franchise Health"
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  classify_performance()           │  network_health_tier()              │
//! │  ─────────────────────            │  ─────────────────────              │
//! │  margin based                     │  absolute revenue based             │
//! │  profit < 0        → Loss         │  revenue > ₹10,000  → High          │
//! │  margin ≥ 15%      → High         │  ₹5,000..=₹10,000   → Average       │
//! │  otherwise         → Average      │  revenue < ₹5,000   → NeedsAttention│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Both rules are in use on different screens and are kept separate.
//!
//! Threshold checks run in exact integer arithmetic, so a margin of exactly
//! 15% or a drop of exactly 25% always lands on the inclusive side.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::analytics::percent;
use crate::money::Money;
use crate::types::SaleRecord;

/// Margin at or above which a franchise is a high performer (15%).
pub const HIGH_MARGIN_BPS: u32 = 1500;

/// Week-over-week drop at or above which revenue is flagged (25%).
pub const ANOMALY_DROP_BPS: u32 = 2500;

// =============================================================================
// Thresholds
// =============================================================================

/// Tunable cut-offs for the network view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceThresholds {
    pub high_margin_bps: u32,
    pub anomaly_drop_bps: u32,
    /// Revenue strictly above this is the High tier.
    pub network_high_revenue: Money,
    /// Revenue at or above this (and not High) is the Average tier.
    pub network_average_floor: Money,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        PerformanceThresholds {
            high_margin_bps: HIGH_MARGIN_BPS,
            anomaly_drop_bps: ANOMALY_DROP_BPS,
            network_high_revenue: Money::from_major(10_000),
            network_average_floor: Money::from_major(5_000),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PerformanceStatus {
    High,
    Average,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NetworkHealthTier {
    High,
    Average,
    NeedsAttention,
}

impl PerformanceThresholds {
    /// Margin-based status. Total: every pair maps to exactly one status.
    pub fn classify_performance(&self, revenue: Money, profit: Money) -> PerformanceStatus {
        if profit.is_negative() {
            return PerformanceStatus::Loss;
        }
        // margin >= threshold  <=>  profit * 10000 >= threshold * revenue
        let meets = if revenue.is_positive() {
            profit.minor() as i128 * 10_000
                >= self.high_margin_bps as i128 * revenue.minor() as i128
        } else {
            self.high_margin_bps == 0
        };
        if meets {
            PerformanceStatus::High
        } else {
            PerformanceStatus::Average
        }
    }

    /// Absolute-revenue tier.
    pub fn network_health_tier(&self, revenue: Money) -> NetworkHealthTier {
        if revenue > self.network_high_revenue {
            NetworkHealthTier::High
        } else if revenue >= self.network_average_floor {
            NetworkHealthTier::Average
        } else {
            NetworkHealthTier::NeedsAttention
        }
    }

    /// Franchises whose revenue fell by at least the drop threshold.
    ///
    /// Franchises without prior revenue have no baseline and are skipped.
    /// Output is sorted by drop, largest first.
    pub fn detect_anomalies(&self, rows: &[WeeklyRevenue]) -> Vec<RevenueAnomaly> {
        let mut anomalies: Vec<RevenueAnomaly> = rows
            .iter()
            .filter(|row| row.previous_revenue.is_positive())
            .filter(|row| {
                let drop = (row.previous_revenue - row.current_revenue).minor() as i128;
                let baseline = row.previous_revenue.minor() as i128;
                drop * 10_000 >= self.anomaly_drop_bps as i128 * baseline
            })
            .map(|row| RevenueAnomaly {
                franchise_id: row.franchise_id.clone(),
                drop_percent: percent(
                    row.previous_revenue - row.current_revenue,
                    row.previous_revenue,
                ),
                current_revenue: row.current_revenue,
                previous_revenue: row.previous_revenue,
            })
            .collect();

        anomalies.sort_by(|a, b| {
            b.drop_percent
                .total_cmp(&a.drop_percent)
                .then_with(|| a.franchise_id.cmp(&b.franchise_id))
        });
        anomalies
    }
}

/// Margin-based status with the default 15% cut-off.
///
/// ```rust
/// use franchise_core::money::Money;
/// use franchise_core::network::{classify_franchise_performance, PerformanceStatus};
///
/// let status = classify_franchise_performance(Money::from_major(1000), Money::from_major(150));
/// assert_eq!(status, PerformanceStatus::High);
/// ```
pub fn classify_franchise_performance(revenue: Money, profit: Money) -> PerformanceStatus {
    PerformanceThresholds::default().classify_performance(revenue, profit)
}

/// Week-over-week anomalies with the default 25% cut-off.
pub fn detect_anomalies(rows: &[WeeklyRevenue]) -> Vec<RevenueAnomaly> {
    PerformanceThresholds::default().detect_anomalies(rows)
}

// =============================================================================
// Per-Franchise Rollups
// =============================================================================

/// Revenue for one franchise in two consecutive weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WeeklyRevenue {
    pub franchise_id: String,
    pub current_revenue: Money,
    pub previous_revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RevenueAnomaly {
    pub franchise_id: String,
    pub drop_percent: f64,
    pub current_revenue: Money,
    pub previous_revenue: Money,
}

/// Totals for one franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FranchiseRow {
    pub franchise_id: String,
    pub revenue: Money,
    pub profit: Money,
    pub order_count: usize,
}

/// One row of the network table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FranchisePerformance {
    #[serde(flatten)]
    pub row: FranchiseRow,
    pub margin_percent: f64,
    pub status: PerformanceStatus,
    pub tier: NetworkHealthTier,
}

/// Groups network-wide sales per franchise, sorted by franchise id.
pub fn franchise_rows(sales: &[SaleRecord]) -> Vec<FranchiseRow> {
    let mut rows: BTreeMap<&str, FranchiseRow> = BTreeMap::new();

    for sale in sales {
        let row = rows
            .entry(sale.franchise_id.as_str())
            .or_insert_with(|| FranchiseRow {
                franchise_id: sale.franchise_id.clone(),
                revenue: Money::zero(),
                profit: Money::zero(),
                order_count: 0,
            });
        row.revenue += sale.grand_total;
        row.profit += sale.total_profit;
        row.order_count += 1;
    }

    rows.into_values().collect()
}

/// Pairs this week's and last week's revenue per franchise.
///
/// A franchise present in only one week gets zero for the other.
pub fn weekly_revenue(
    current_sales: &[SaleRecord],
    previous_sales: &[SaleRecord],
) -> Vec<WeeklyRevenue> {
    let mut rows: BTreeMap<&str, (Money, Money)> = BTreeMap::new();

    for sale in current_sales {
        rows.entry(sale.franchise_id.as_str()).or_default().0 += sale.grand_total;
    }
    for sale in previous_sales {
        rows.entry(sale.franchise_id.as_str()).or_default().1 += sale.grand_total;
    }

    rows.into_iter()
        .map(|(franchise_id, (current_revenue, previous_revenue))| WeeklyRevenue {
            franchise_id: franchise_id.to_string(),
            current_revenue,
            previous_revenue,
        })
        .collect()
}

/// Franchise rows annotated with both health classifications.
pub fn network_overview(
    sales: &[SaleRecord],
    thresholds: &PerformanceThresholds,
) -> Vec<FranchisePerformance> {
    franchise_rows(sales)
        .into_iter()
        .map(|row| FranchisePerformance {
            margin_percent: percent(row.profit, row.revenue),
            status: thresholds.classify_performance(row.revenue, row.profit),
            tier: thresholds.network_health_tier(row.revenue),
            row,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
