//! # Error Types
//!
//! Domain-specific error types for franchise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  franchise-core errors (this file)                                     │
//! │  ├── TransitionError  - Order status change rejected or not persisted  │
//! │  ├── CoreError        - General domain rule violations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  franchise-report errors (separate crate)                              │
//! │  └── ReportError      - Config, file and JSON failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → CLI / dashboard     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregation never fails: empty input yields zero-valued views, so
//! there is no error variant for it.

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Transition Error
// =============================================================================

/// Reasons an order status change (or an edit/delete gate) is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Target status is not reachable from the current one.
    ///
    /// ## Recovery
    /// Caller re-displays `valid_next_statuses(from)`; never retried.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Actor may not change status, or the order is locked (Delivered).
    #[error("Permission denied: {reason}")]
    Permission { reason: String },

    /// The persistence collaborator failed; the order is unchanged.
    #[error("Failed to persist status change: {0}")]
    Persistence(String),
}

impl TransitionError {
    /// Creates a Permission error.
    pub fn permission(reason: impl Into<String>) -> Self {
        TransitionError::Permission {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Franchise cannot be reassigned once the order has items.
    #[error("Order {order_id} already has items; franchise is fixed to {franchise_id}")]
    FranchiseLocked {
        order_id: String,
        franchise_id: String,
    },

    /// Status change / edit / delete rejected.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. pincode, phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Date range ends before it starts.
    #[error("{field} ends before it starts")]
    InvertedRange { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_messages() {
        let err = TransitionError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Confirmed,
        };
        assert_eq!(
            err.to_string(),
            "Cannot move order from delivered to confirmed"
        );

        let err = TransitionError::permission("staff cannot change order status");
        assert_eq!(
            err.to_string(),
            "Permission denied: staff cannot change order status"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer.name".to_string(),
        };
        assert_eq!(err.to_string(), "customer.name is required");

        let err = ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "pincode".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = TransitionError::permission("locked").into();
        assert_eq!(core_err.to_string(), "Permission denied: locked");
    }
}
