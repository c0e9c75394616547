//! # Report Assembly
//!
//! Glues the pure aggregations in `franchise-core` into the payloads the
//! dashboards render.
//!
//! ```text
//! ┌──────────────┐   scope    ┌──────────────┐  window   ┌─────────────────┐
//! │ sales.json   │──────────► │ one franchise│─────────► │ current / prior │
//! └──────────────┘            │ or network   │           └────────┬────────┘
//!                             └──────────────┘                    │
//!          ┌──────────────┬─────────────┬──────────────┬──────────┴───┐
//!          ▼              ▼             ▼              ▼              ▼
//!       summary          P&L        daily trend    categories    top products
//! ```

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use franchise_core::analytics::{
    breakdown_by_category, bucket_by_day_with_offset, compare_periods, profit_and_loss, summarize,
    top_products, CategoryBreakdown, Comparison, PeriodBucket, ProfitAndLoss, Summary, TopProduct,
};
use franchise_core::network::{
    network_overview, weekly_revenue, FranchisePerformance, RevenueAnomaly,
};
use franchise_core::period::{sales_in_range, DateRange};
use franchise_core::SaleRecord;
use serde::Serialize;
use tracing::debug;

use crate::config::ReportConfig;
use crate::records::scope_to_franchise;

// =============================================================================
// Franchise Dashboard
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    pub summary: Summary,
    pub profit_and_loss: ProfitAndLoss,
    pub daily: Vec<PeriodBucket>,
    pub categories: Vec<CategoryBreakdown>,
    pub top_products: Vec<TopProduct>,
    /// Present only when a window was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

fn report_offset(config: &ReportConfig) -> FixedOffset {
    config.utc_offset().unwrap_or_else(|| Utc.fix())
}

/// Builds the dashboard for one franchise (or the network when
/// `franchise_id` is `None`), optionally limited to `range`.
pub fn dashboard_report(
    sales: Vec<SaleRecord>,
    franchise_id: Option<&str>,
    range: Option<DateRange>,
    config: &ReportConfig,
) -> DashboardReport {
    let offset = report_offset(config);
    let scoped = scope_to_franchise(sales, franchise_id);

    let (current, comparison) = match &range {
        Some(range) => {
            let current = sales_in_range(&scoped, range, offset);
            let prior = sales_in_range(&scoped, &range.previous(), offset);
            let comparison = compare_periods(&current, &prior);
            (current, Some(comparison))
        }
        None => (scoped, None),
    };
    debug!(sales = current.len(), ?franchise_id, "Building dashboard report");

    let summary = summarize(&current);
    DashboardReport {
        franchise_id: franchise_id.map(str::to_string),
        range,
        profit_and_loss: profit_and_loss(&summary, config.operating_expenses()),
        summary,
        daily: bucket_by_day_with_offset(&current, offset),
        categories: breakdown_by_category(&current),
        top_products: top_products(&current, config.analytics.top_products_limit),
        comparison,
    }
}

// =============================================================================
// Network View
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    pub franchises: Vec<FranchisePerformance>,
    /// Week-over-week drops, computed for the calendar week holding `anchor`.
    pub anomalies: Vec<RevenueAnomaly>,
}

pub fn network_report(
    sales: &[SaleRecord],
    range: Option<DateRange>,
    anchor: NaiveDate,
    config: &ReportConfig,
) -> NetworkReport {
    let offset = report_offset(config);
    let thresholds = config.performance_thresholds();

    let franchises = match &range {
        Some(range) => network_overview(&sales_in_range(sales, range, offset), &thresholds),
        None => network_overview(sales, &thresholds),
    };

    let this_week = sales_in_range(sales, &DateRange::this_week(anchor), offset);
    let last_week = sales_in_range(sales, &DateRange::last_week(anchor), offset);
    let anomalies = thresholds.detect_anomalies(&weekly_revenue(&this_week, &last_week));
    debug!(
        franchises = franchises.len(),
        anomalies = anomalies.len(),
        "Built network report"
    );

    NetworkReport {
        range,
        franchises,
        anomalies,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
