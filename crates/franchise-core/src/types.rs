//! # Domain Types
//!
//! Record shapes the dashboards receive from the backend, plus the small
//! value types they are built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │   OrderRecord   │   │ TransferRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  franchise_id   │   │  franchise_id   │   │  from / to      │       │
//! │  │  grand_total    │   │  status         │   │  quantity       │       │
//! │  │  total_profit   │   │  totals         │   │  value()        │       │
//! │  │  items ─┐       │   │  items ─┐       │   │  status         │       │
//! │  └─────────┼───────┘   └─────────┼───────┘   └─────────────────┘       │
//! │            ▼                     ▼                                      │
//! │      LineItem              OrderItem                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Default Resolution
//! The REST payloads omit fields freely. Defaults are resolved here, once,
//! instead of in every consumer:
//! - missing or `null` money / quantity → 0
//! - missing or blank category → `"Other"`
//! - missing line profit → `(selling - buying) × quantity`
//! - missing or zero transfer total → `quantity × unit_price`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{null_as_default, Money};

/// Category label used when a line item carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (1800 bps = 18% GST).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Sale Records
// =============================================================================

/// One product line within a completed sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: String,

    /// Display name, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,

    #[serde(default, alias = "sellingPrice", deserialize_with = "null_as_default")]
    pub unit_selling_price: Money,

    /// Cost basis per unit.
    #[serde(default, alias = "buyingPrice", deserialize_with = "null_as_default")]
    pub unit_buying_price: Money,

    #[serde(default, alias = "profit", skip_serializing_if = "Option::is_none")]
    pub line_profit: Option<Money>,
}

impl LineItem {
    /// Category label, falling back to [`DEFAULT_CATEGORY`].
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Selling price × quantity.
    #[inline]
    pub fn revenue(&self) -> Money {
        self.unit_selling_price.multiply_quantity(self.quantity)
    }

    /// Buying price × quantity (COGS contribution).
    #[inline]
    pub fn cost(&self) -> Money {
        self.unit_buying_price.multiply_quantity(self.quantity)
    }

    /// Recorded line profit, or `(selling - buying) × quantity`.
    pub fn profit(&self) -> Money {
        self.line_profit.unwrap_or_else(|| {
            (self.unit_selling_price - self.unit_buying_price) * self.quantity
        })
    }
}

/// One completed sale transaction.
///
/// `grand_total` already includes delivery and tax adjustments made at
/// creation time; it is consumed as-is, never re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRecord {
    pub id: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    pub franchise_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub grand_total: Money,

    /// May be negative.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_profit: Money,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,
}

impl SaleRecord {
    /// Σ buying price × quantity over the sale's items.
    pub fn cost(&self) -> Money {
        self.items.iter().map(LineItem::cost).sum()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle state of a customer order.
///
/// ```text
/// Pending ──► Confirmed ──► Packed ──► Shipped ──► Delivered
///    │            │           │           │
///    └────────────┴───────────┴───────────┴──────► Cancelled
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "Confirmed")]
    Confirmed,
    #[serde(alias = "Packed")]
    Packed,
    #[serde(alias = "Shipped")]
    Shipped,
    #[serde(alias = "Delivered")]
    Delivered,
    #[serde(alias = "Cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Lowercase wire label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Delivered and Cancelled have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|s| s.label().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    #[serde(alias = "UPI")]
    Upi,
    #[serde(alias = "Card")]
    Card,
    /// Cash on delivery.
    #[serde(alias = "COD")]
    Cod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentStatus {
    #[serde(alias = "Paid")]
    Paid,
    #[default]
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "Failed")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payment {
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryAddress {
    pub address_line: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub pincode: String,
}

/// One product line within a customer order.
///
/// Tax is carried either as a rate or as a fixed amount; a fixed amount
/// wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<TaxRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Money>,
}

impl OrderItem {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    pub fn line_tax(&self) -> Money {
        match (self.tax_amount, self.tax_rate) {
            (Some(amount), _) => amount,
            (None, Some(rate)) => self.line_total().calculate_tax(rate),
            (None, None) => Money::zero(),
        }
    }
}

/// Order charge breakdown.
///
/// Invariant: `grand_total = item_total + tax_total + delivery_fee - discount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_total: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tax_total: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delivery_fee: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grand_total: Money,
}

impl OrderTotals {
    /// Computes totals for the given items and charges.
    ///
    /// ```rust
    /// use franchise_core::money::Money;
    /// use franchise_core::types::{OrderItem, OrderTotals, TaxRate};
    ///
    /// let items = vec![OrderItem {
    ///     product_id: "p1".into(),
    ///     product_name: "Rice 5kg".into(),
    ///     quantity: 2,
    ///     unit_price: Money::from_minor(50_000),
    ///     tax_rate: Some(TaxRate::from_bps(500)),
    ///     tax_amount: None,
    /// }];
    /// let totals = OrderTotals::compute(&items, Money::from_minor(4_000), Money::from_minor(1_000));
    /// assert_eq!(totals.grand_total.minor(), 100_000 + 5_000 + 4_000 - 1_000);
    /// ```
    pub fn compute(items: &[OrderItem], delivery_fee: Money, discount: Money) -> Self {
        let item_total: Money = items.iter().map(OrderItem::line_total).sum();
        let tax_total: Money = items.iter().map(OrderItem::line_tax).sum();
        OrderTotals {
            item_total,
            tax_total,
            delivery_fee,
            discount,
            grand_total: item_total + tax_total + delivery_fee - discount,
        }
    }

    /// Whether the stored grand total agrees with its components.
    pub fn is_consistent(&self) -> bool {
        self.grand_total == self.item_total + self.tax_total + self.delivery_fee - self.discount
    }
}

/// A customer order, distinct from a completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRecord {
    pub id: String,
    pub order_number: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    /// Fixed at creation once any item exists.
    pub franchise_id: String,

    pub customer: Customer,
    pub delivery_address: DeliveryAddress,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItem>,

    pub payment: Payment,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub totals: OrderTotals,

    /// Soft-delete marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    /// Refreshes `totals` from the current items, keeping delivery fee
    /// and discount.
    pub fn recompute_totals(&mut self) {
        self.totals =
            OrderTotals::compute(&self.items, self.totals.delivery_fee, self.totals.discount);
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

// =============================================================================
// Transfers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TransferStatus {
    Pending,
    Approved,
    InTransit,
    Completed,
    Rejected,
}

/// Stock moved from one franchise to another.
///
/// Import/export is relative to the viewing franchise; see
/// [`crate::transfer::TransferDirection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransferRecord {
    pub id: String,
    pub from_franchise_id: String,
    pub to_franchise_id: String,
    pub product_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    pub status: TransferStatus,
    #[ts(as = "String")]
    pub transfer_date: DateTime<Utc>,
}

impl TransferRecord {
    /// Declared total value, or `quantity × unit_price` when it is
    /// missing or zero.
    pub fn value(&self) -> Money {
        match self.total_value {
            Some(total) if !total.is_zero() => total,
            _ => self
                .unit_price
                .unwrap_or_default()
                .multiply_quantity(self.quantity),
        }
    }
}

// =============================================================================
// Actors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    /// Network-wide administrator.
    #[serde(alias = "superadmin", alias = "admin")]
    SuperAdmin,
    /// Manager of a single franchise.
    Manager,
    Staff,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" | "superadmin" | "admin" => Ok(Role::SuperAdmin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec![
                    "super_admin".to_string(),
                    "manager".to_string(),
                    "staff".to_string(),
                ],
            }),
        }
    }
}

/// The user asking for an order change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
    /// Franchise the user is scoped to; `None` for network-wide users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub franchise_id: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
