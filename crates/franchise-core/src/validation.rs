//! # Validation Module
//!
//! Checks applied to order forms before they are sent for persistence.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form (TypeScript)                                  │
//! │  └── Required fields, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Customer / address formats                                        │
//! │  ├── Quantities and prices                                             │
//! │  └── Totals agree with their components                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend API (authoritative)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregation engine does not call into this module: sale records
//! arriving from the backend are already validated and are consumed with
//! missing values treated as zero.

use crate::error::ValidationError;
use crate::types::{Customer, DeliveryAddress, OrderItem, OrderRecord, OrderTotals};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound on a single order line.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

// =============================================================================
// Customer & Address
// =============================================================================

fn required<'a>(field: &str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(value)
}

/// Ten-digit mobile number, optionally prefixed with `+91` or `0`.
///
/// ```rust
/// use franchise_core::validation::validate_phone;
///
/// assert!(validate_phone("9876543210").is_ok());
/// assert!(validate_phone("+91 98765 43210").is_ok());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = required("customer.phone", phone, 20)?;
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let local = digits
        .strip_prefix("+91")
        .or_else(|| digits.strip_prefix('0'))
        .unwrap_or(&digits);

    if local.len() != 10 || !local.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "customer.phone".to_string(),
            reason: "must be a 10-digit mobile number".to_string(),
        });
    }
    Ok(())
}

/// Six-digit postal code.
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let pincode = required("deliveryAddress.pincode", pincode, 6)?;
    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "deliveryAddress.pincode".to_string(),
            reason: "must be 6 digits".to_string(),
        });
    }
    Ok(())
}

pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    required("customer.name", &customer.name, 100)?;
    validate_phone(&customer.phone)?;

    let email = customer.email.as_deref().map(str::trim).unwrap_or_default();
    if !email.is_empty() {
        let valid = email
            .split_once('@')
            .map(|(user, domain)| !user.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !valid {
            return Err(ValidationError::InvalidFormat {
                field: "customer.email".to_string(),
                reason: "must look like name@example.com".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_address(address: &DeliveryAddress) -> ValidationResult<()> {
    required("deliveryAddress.addressLine", &address.address_line, 250)?;
    required("deliveryAddress.city", &address.city, 100)?;
    validate_pincode(&address.pincode)
}

// =============================================================================
// Items & Totals
// =============================================================================

pub fn validate_order_item(item: &OrderItem) -> ValidationResult<()> {
    required("items.productId", &item.product_id, 64)?;

    if item.quantity <= 0 || item.quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "items.quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    if item.unit_price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "items.unitPrice".to_string(),
        });
    }
    if item.tax_amount.is_some_and(|tax| tax.is_negative()) {
        return Err(ValidationError::MustNotBeNegative {
            field: "items.taxAmount".to_string(),
        });
    }
    if item.tax_rate.is_some_and(|rate| rate.bps() > 10_000) {
        return Err(ValidationError::OutOfRange {
            field: "items.taxRate".to_string(),
            min: 0,
            max: 10_000,
        });
    }
    Ok(())
}

/// Full check of an order form, including the grand-total invariant.
pub fn validate_order(order: &OrderRecord) -> ValidationResult<()> {
    required("orderNumber", &order.order_number, 50)?;
    required("franchiseId", &order.franchise_id, 64)?;
    validate_customer(&order.customer)?;
    validate_address(&order.delivery_address)?;

    if order.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    for item in &order.items {
        validate_order_item(item)?;
    }

    if order.totals.delivery_fee.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "totals.deliveryFee".to_string(),
        });
    }
    if order.totals.discount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "totals.discount".to_string(),
        });
    }
    if !order.totals.is_consistent() {
        return Err(ValidationError::InvalidFormat {
            field: "totals.grandTotal".to_string(),
            reason: "must equal itemTotal + taxTotal + deliveryFee - discount".to_string(),
        });
    }

    let totals = &order.totals;
    let expected = OrderTotals::compute(&order.items, totals.delivery_fee, totals.discount);
    if totals.item_total != expected.item_total {
        return Err(ValidationError::InvalidFormat {
            field: "totals.itemTotal".to_string(),
            reason: format!("stale: items sum to {}", expected.item_total),
        });
    }
    if totals.tax_total != expected.tax_total {
        return Err(ValidationError::InvalidFormat {
            field: "totals.taxTotal".to_string(),
            reason: format!("stale: items carry {} tax", expected.tax_total),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{OrderStatus, Payment, PaymentMethod, PaymentStatus, TaxRate};
    use chrono::Utc;

    fn order() -> OrderRecord {
        let mut order = OrderRecord {
            id: "o1".to_string(),
            order_number: "ORD-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            franchise_id: "f1".to_string(),
            customer: Customer {
                name: "Ravi".to_string(),
                phone: "09876543210".to_string(),
                email: Some("ravi@example.in".to_string()),
            },
            delivery_address: DeliveryAddress {
                address_line: "4 Park Street".to_string(),
                city: "Kolkata".to_string(),
                state: None,
                pincode: "700016".to_string(),
            },
            items: vec![OrderItem {
                product_id: "p1".to_string(),
                product_name: "Mustard Oil".to_string(),
                quantity: 2,
                unit_price: Money::from_minor(18_000),
                tax_rate: Some(TaxRate::from_bps(500)),
                tax_amount: None,
            }],
            payment: Payment {
                method: PaymentMethod::Cod,
                status: PaymentStatus::Pending,
                transaction_id: None,
            },
            status: OrderStatus::Pending,
            totals: OrderTotals {
                delivery_fee: Money::from_minor(4_000),
                ..OrderTotals::default()
            },
            deleted_at: None,
        };
        order.recompute_totals();
        order
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("098765-43210").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("98765abcde").is_err());
        assert!(validate_phone("98765432101").is_err());
    }

    #[test]
    fn test_validate_pincode() {
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode("56001").is_err());
        assert!(validate_pincode("5600O1").is_err());
    }

    #[test]
    fn test_validate_order_ok_after_recompute() {
        let order = order();
        assert_eq!(order.totals.grand_total.minor(), 36_000 + 1_800 + 4_000);
        assert!(validate_order(&order).is_ok());
    }

    #[test]
    fn test_validate_order_catches_stale_totals() {
        let mut order = order();
        order.items[0].quantity = 3;
        assert_eq!(
            validate_order(&order),
            Err(ValidationError::InvalidFormat {
                field: "totals.itemTotal".to_string(),
                reason: "stale: items sum to ₹540.00".to_string(),
            })
        );

        order.items[0].quantity = 2;
        order.items[0].tax_rate = Some(TaxRate::from_bps(1200));
        assert!(matches!(
            validate_order(&order),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "totals.taxTotal"
        ));

        order.recompute_totals();
        assert!(validate_order(&order).is_ok());
    }

    #[test]
    fn test_validate_order_catches_edited_grand_total() {
        let mut order = order();
        order.totals.grand_total += Money::from_minor(100);
        assert!(matches!(
            validate_order(&order),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "totals.grandTotal"
        ));
    }

    #[test]
    fn test_validate_order_rejects_bad_lines() {
        let mut order = order();
        order.items[0].quantity = 0;
        assert!(validate_order(&order).is_err());

        let mut order = self::order();
        order.items.clear();
        order.recompute_totals();
        assert_eq!(
            validate_order(&order),
            Err(ValidationError::Required {
                field: "items".to_string()
            })
        );
    }

    #[test]
    fn test_validate_customer_email() {
        let mut customer = order().customer;
        customer.email = Some("not-an-email".to_string());
        assert!(validate_customer(&customer).is_err());

        customer.email = Some(String::new());
        assert!(validate_customer(&customer).is_ok());
    }
}
