//! # Financial Aggregation Engine
//!
//! Turns a list of sales (already scoped to one franchise and time window
//! by the caller) into the view-ready summaries the dashboards render.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  [SaleRecord] ──┬──► summarize() ──► Summary ──► profit_and_loss()     │
//! │                 │                       │                               │
//! │                 │                       └──► compare_periods()          │
//! │                 │                                                       │
//! │                 ├──► bucket_by_day() ──► [PeriodBucket]  (trend chart)  │
//! │                 │                                                       │
//! │                 ├──► breakdown_by_category() ──► [CategoryBreakdown]    │
//! │                 │                                                       │
//! │                 └──► top_products() ──► [TopProduct]                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Every function is total over empty input and returns zero values.
//! - Every ratio goes through [`percent`]; a zero denominator yields `0.0`
//!   (or `None` for period deltas). NaN and infinity never escape.
//! - Output depends only on the input multiset: permuting the input gives
//!   identical output. No clock is read.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::SaleRecord;

// =============================================================================
// Ratio Helpers
// =============================================================================

/// `100 × part / whole`, or `0.0` when `whole` is zero.
pub fn percent(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    100.0 * part.minor() as f64 / whole.minor() as f64
}

/// `100 × (current / prior − 1)`, or `None` when `prior` is not positive.
fn delta_percent(current: f64, prior: f64) -> Option<f64> {
    if prior > 0.0 {
        Some(100.0 * (current - prior) / prior)
    } else {
        None
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Headline KPIs for a set of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Summary {
    pub total_revenue: Money,
    pub total_profit: Money,
    /// Σ buying price × quantity across all line items.
    pub total_cost: Money,
    pub total_sales: usize,
    pub avg_order_value: Money,
    pub profit_margin_percent: f64,
}

/// Computes headline KPIs.
///
/// ```rust
/// use franchise_core::analytics::summarize;
///
/// let empty = summarize(&[]);
/// assert_eq!(empty.total_sales, 0);
/// assert_eq!(empty.profit_margin_percent, 0.0);
/// ```
pub fn summarize(sales: &[SaleRecord]) -> Summary {
    let total_revenue: Money = sales.iter().map(|s| s.grand_total).sum();
    let total_profit: Money = sales.iter().map(|s| s.total_profit).sum();
    let total_cost: Money = sales.iter().map(SaleRecord::cost).sum();
    let total_sales = sales.len();

    Summary {
        total_revenue,
        total_profit,
        total_cost,
        total_sales,
        avg_order_value: total_revenue.average_over(total_sales),
        profit_margin_percent: percent(total_profit, total_revenue),
    }
}

// =============================================================================
// Profit & Loss
// =============================================================================

/// Revenue → COGS → gross profit → expenses → net profit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfitAndLoss {
    pub revenue: Money,
    pub cogs: Money,
    pub gross_profit: Money,
    pub operating_expenses: Money,
    pub net_profit: Money,
    pub gross_margin_percent: f64,
    pub net_margin_percent: f64,
}

/// Builds the P&L waterfall. `cogs` is the summary's `total_cost`.
pub fn profit_and_loss(summary: &Summary, operating_expenses: Money) -> ProfitAndLoss {
    let revenue = summary.total_revenue;
    let cogs = summary.total_cost;
    let gross_profit = revenue - cogs;
    let net_profit = gross_profit - operating_expenses;

    ProfitAndLoss {
        revenue,
        cogs,
        gross_profit,
        operating_expenses,
        net_profit,
        gross_margin_percent: percent(gross_profit, revenue),
        net_margin_percent: percent(net_profit, revenue),
    }
}

// =============================================================================
// Daily Trend
// =============================================================================

/// One calendar day of sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PeriodBucket {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
    pub order_count: usize,
}

/// Groups sales by UTC calendar day, ascending by date.
pub fn bucket_by_day(sales: &[SaleRecord]) -> Vec<PeriodBucket> {
    bucket_by(sales, |sale| sale.created_at.date_naive())
}

/// Groups sales by calendar day at the given UTC offset.
///
/// A sale at 20:00 UTC lands on the next day in IST (+05:30).
pub fn bucket_by_day_with_offset(sales: &[SaleRecord], offset: FixedOffset) -> Vec<PeriodBucket> {
    bucket_by(sales, |sale| {
        sale.created_at.with_timezone(&offset).date_naive()
    })
}

fn bucket_by<F>(sales: &[SaleRecord], day_of: F) -> Vec<PeriodBucket>
where
    F: Fn(&SaleRecord) -> NaiveDate,
{
    let mut days: BTreeMap<NaiveDate, PeriodBucket> = BTreeMap::new();

    for sale in sales {
        let date = day_of(sale);
        let bucket = days.entry(date).or_insert_with(|| PeriodBucket {
            date,
            revenue: Money::zero(),
            cost: Money::zero(),
            profit: Money::zero(),
            order_count: 0,
        });
        bucket.revenue += sale.grand_total;
        bucket.cost += sale.cost();
        bucket.profit += sale.total_profit;
        bucket.order_count += 1;
    }

    days.into_values().collect()
}

// =============================================================================
// Category Breakdown
// =============================================================================

/// Line-item totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryBreakdown {
    pub category: String,
    pub revenue: Money,
    pub cogs: Money,
    pub net_profit: Money,
    pub margin_percent: f64,
}

/// Groups every line item by category label.
///
/// Only categories that actually occur are returned, sorted by name so
/// the output is stable.
pub fn breakdown_by_category(sales: &[SaleRecord]) -> Vec<CategoryBreakdown> {
    let mut groups: BTreeMap<&str, (Money, Money, Money)> = BTreeMap::new();

    for item in sales.iter().flat_map(|sale| sale.items.iter()) {
        let entry = groups.entry(item.category_label()).or_default();
        entry.0 += item.revenue();
        entry.1 += item.cost();
        entry.2 += item.profit();
    }

    groups
        .into_iter()
        .map(|(category, (revenue, cogs, net_profit))| CategoryBreakdown {
            category: category.to_string(),
            revenue,
            cogs,
            net_profit,
            margin_percent: percent(net_profit, revenue),
        })
        .collect()
}

// =============================================================================
// Period Comparison
// =============================================================================

/// Current vs prior period, e.g. today vs yesterday.
///
/// Deltas are `None` when the prior period has no baseline; the dashboard
/// shows a placeholder instead of a trend arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Comparison {
    pub current: Summary,
    pub prior: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_delta_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_delta_percent: Option<f64>,
}

/// Compares two already-windowed sale lists.
pub fn compare_periods(current_sales: &[SaleRecord], prior_sales: &[SaleRecord]) -> Comparison {
    let current = summarize(current_sales);
    let prior = summarize(prior_sales);

    Comparison {
        revenue_delta_percent: delta_percent(
            current.total_revenue.minor() as f64,
            prior.total_revenue.minor() as f64,
        ),
        count_delta_percent: delta_percent(current.total_sales as f64, prior.total_sales as f64),
        current,
        prior,
    }
}

// =============================================================================
// Top Products
// =============================================================================

/// Best-selling product by revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopProduct {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub revenue: Money,
    pub profit: Money,
}

/// Products ranked by revenue (ties by product id), at most `limit`.
pub fn top_products(sales: &[SaleRecord], limit: usize) -> Vec<TopProduct> {
    let mut products: BTreeMap<&str, TopProduct> = BTreeMap::new();

    for item in sales.iter().flat_map(|sale| sale.items.iter()) {
        let entry = products
            .entry(item.product_id.as_str())
            .or_insert_with(|| TopProduct {
                product_id: item.product_id.clone(),
                product_name: String::new(),
                quantity: 0,
                revenue: Money::zero(),
                profit: Money::zero(),
            });
        let name = item.product_name.as_deref().unwrap_or("").trim();
        if entry.product_name.is_empty() && !name.is_empty() {
            entry.product_name = name.to_string();
        }
        entry.quantity += item.quantity;
        entry.revenue += item.revenue();
        entry.profit += item.profit();
    }

    let mut ranked: Vec<TopProduct> = products
        .into_values()
        .map(|mut product| {
            if product.product_name.is_empty() {
                product.product_name = product.product_id.clone();
            }
            product
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn line(category: Option<&str>, qty: i64, sell: i64, buy: i64) -> LineItem {
        LineItem {
            product_id: format!("p-{}", category.unwrap_or("none")),
            category: category.map(str::to_string),
            quantity: qty,
            unit_selling_price: Money::from_minor(sell),
            unit_buying_price: Money::from_minor(buy),
            ..LineItem::default()
        }
    }

    fn sale(
        id: &str,
        created_at: DateTime<Utc>,
        total: i64,
        profit: i64,
        items: Vec<LineItem>,
    ) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            created_at,
            franchise_id: "f1".to_string(),
            grand_total: Money::from_minor(total),
            total_profit: Money::from_minor(profit),
            items,
        }
    }

    fn assert_finite(values: &[f64]) {
        for value in values {
            assert!(value.is_finite(), "{value} escaped a ratio");
        }
    }

    #[test]
    fn test_summarize_single_sale() {
        let sales = vec![sale("s1", at(1, 10), 1000, 200, vec![line(None, 10, 0, 40)])];
        let summary = summarize(&sales);
        assert_eq!(summary.total_revenue.minor(), 1000);
        assert_eq!(summary.total_profit.minor(), 200);
        assert_eq!(summary.total_cost.minor(), 400);
        assert_eq!(summary.total_sales, 1);
        assert_eq!(summary.avg_order_value.minor(), 1000);
        assert_eq!(summary.profit_margin_percent, 20.0);
    }

    #[test]
    fn test_empty_input_yields_zero_views() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());

        let pnl = profit_and_loss(&summary, Money::zero());
        assert_eq!(pnl, ProfitAndLoss::default());

        assert!(bucket_by_day(&[]).is_empty());
        assert!(breakdown_by_category(&[]).is_empty());
        assert!(top_products(&[], 5).is_empty());

        let comparison = compare_periods(&[], &[]);
        assert_eq!(comparison.revenue_delta_percent, None);
        assert_eq!(comparison.count_delta_percent, None);
    }

    #[test]
    fn test_zero_revenue_guards_every_ratio() {
        // Free giveaways: sales exist but revenue is zero and profit negative.
        let sales = vec![
            sale(
                "s1",
                at(1, 10),
                0,
                -300,
                vec![line(Some("Promo"), 3, 0, 100)],
            ),
            sale("s2", at(2, 10), 0, 0, vec![]),
        ];
        let summary = summarize(&sales);
        let pnl = profit_and_loss(&summary, Money::from_minor(5_000));
        let categories = breakdown_by_category(&sales);

        assert_eq!(summary.profit_margin_percent, 0.0);
        assert_eq!(pnl.gross_margin_percent, 0.0);
        assert_eq!(pnl.net_margin_percent, 0.0);
        assert_eq!(categories[0].margin_percent, 0.0);
        assert_finite(&[
            summary.profit_margin_percent,
            pnl.gross_margin_percent,
            pnl.net_margin_percent,
            categories[0].margin_percent,
        ]);
    }

    #[test]
    fn test_profit_and_loss_waterfall() {
        let summary = Summary {
            total_revenue: Money::from_minor(10_000),
            total_cost: Money::from_minor(6_000),
            ..Summary::default()
        };
        let pnl = profit_and_loss(&summary, Money::from_minor(1_500));
        assert_eq!(pnl.gross_profit.minor(), 4_000);
        assert_eq!(pnl.net_profit.minor(), 2_500);
        assert_eq!(pnl.gross_margin_percent, 40.0);
        assert_eq!(pnl.net_margin_percent, 25.0);
    }

    #[test]
    fn test_bucket_by_day_groups_calendar_days() {
        let sales = vec![
            sale("s1", at(2, 23), 500, 50, vec![line(None, 1, 500, 300)]),
            sale("s2", at(1, 1), 100, 10, vec![]),
            sale("s3", at(2, 0), 200, 20, vec![line(None, 2, 100, 60)]),
        ];
        let buckets = bucket_by_day(&sales);
        assert_eq!(buckets.len(), 2);

        assert_eq!(
            buckets[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(buckets[0].order_count, 1);

        assert_eq!(
            buckets[1].date,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(buckets[1].revenue.minor(), 700);
        assert_eq!(buckets[1].profit.minor(), 70);
        assert_eq!(buckets[1].cost.minor(), 420);
        assert_eq!(buckets[1].order_count, 2);
    }

    #[test]
    fn test_bucket_by_day_is_order_independent() {
        let sales = vec![
            sale("s1", at(3, 9), 300, 30, vec![]),
            sale("s2", at(1, 9), 100, 10, vec![]),
            sale("s3", at(2, 9), 200, 20, vec![]),
            sale("s4", at(1, 18), 150, 15, vec![]),
        ];
        let mut permuted = sales.clone();
        permuted.reverse();
        permuted.swap(0, 2);

        assert_eq!(bucket_by_day(&sales), bucket_by_day(&permuted));
        assert_eq!(bucket_by_day(&sales), bucket_by_day(&sales));
    }

    #[test]
    fn test_bucket_by_day_with_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let sales = vec![sale("s1", at(1, 20), 100, 10, vec![])];
        let buckets = bucket_by_day_with_offset(&sales, ist);
        assert_eq!(
            buckets[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_breakdown_by_category() {
        let sales = vec![
            sale(
                "s1",
                at(1, 10),
                0,
                0,
                vec![line(Some("Dairy"), 2, 500, 300), line(None, 1, 1000, 800)],
            ),
            sale(
                "s2",
                at(1, 11),
                0,
                0,
                vec![line(Some("Dairy"), 1, 500, 300)],
            ),
        ];
        let categories = breakdown_by_category(&sales);
        assert_eq!(categories.len(), 2);

        let dairy = &categories[0];
        assert_eq!(dairy.category, "Dairy");
        assert_eq!(dairy.revenue.minor(), 1500);
        assert_eq!(dairy.cogs.minor(), 900);
        assert_eq!(dairy.net_profit.minor(), 600);
        assert_eq!(dairy.margin_percent, 40.0);

        let other = &categories[1];
        assert_eq!(other.category, "Other");
        assert_eq!(other.net_profit.minor(), 200);
    }

    #[test]
    fn test_compare_periods_without_baseline() {
        let current = vec![sale("s1", at(2, 10), 500, 50, vec![])];
        let comparison = compare_periods(&current, &[]);
        assert_eq!(comparison.current.total_revenue.minor(), 500);
        assert_eq!(comparison.revenue_delta_percent, None);
        assert_eq!(comparison.count_delta_percent, None);

        let json = serde_json::to_value(&comparison).unwrap();
        assert!(json.get("revenueDeltaPercent").is_none());
    }

    #[test]
    fn test_compare_periods_deltas() {
        let current = vec![
            sale("s1", at(2, 10), 900, 0, vec![]),
            sale("s2", at(2, 11), 600, 0, vec![]),
        ];
        let prior = vec![sale("s3", at(1, 10), 1000, 0, vec![])];
        let comparison = compare_periods(&current, &prior);
        assert_eq!(comparison.revenue_delta_percent, Some(50.0));
        assert_eq!(comparison.count_delta_percent, Some(100.0));

        let down = compare_periods(&prior, &current);
        let delta = down.revenue_delta_percent.unwrap();
        assert!((delta - (-100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_top_products_ranking() {
        let mut tea = line(Some("Beverages"), 4, 250, 150);
        tea.product_id = "tea".to_string();
        tea.product_name = Some("Masala Tea".to_string());
        let mut rice = line(Some("Grocery"), 1, 2000, 1500);
        rice.product_id = "rice".to_string();
        let mut more_tea = tea.clone();
        more_tea.quantity = 2;

        let sales = vec![
            sale("s1", at(1, 10), 0, 0, vec![tea, rice]),
            sale("s2", at(1, 12), 0, 0, vec![more_tea]),
        ];
        let ranked = top_products(&sales, 5);
        assert_eq!(ranked[0].product_id, "rice");
        assert_eq!(ranked[0].product_name, "rice");
        assert_eq!(ranked[1].product_name, "Masala Tea");
        assert_eq!(ranked[1].quantity, 6);
        assert_eq!(ranked[1].revenue.minor(), 1500);

        assert_eq!(top_products(&sales, 1).len(), 1);
    }
}
