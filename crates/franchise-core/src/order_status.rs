//! # Order Status Machine
//!
//! Decides which status changes are legal and gates edits and deletes.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Current      │ Valid next                                              │
//! │  ─────────────┼───────────────────────────────                          │
//! │  Pending      │ Confirmed, Cancelled                                    │
//! │  Confirmed    │ Packed, Cancelled                                       │
//! │  Packed       │ Shipped, Cancelled                                      │
//! │  Shipped      │ Delivered, Cancelled                                    │
//! │  Delivered    │ (terminal)                                              │
//! │  Cancelled    │ (terminal)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Executing a Transition
//! ```text
//! request_transition(order, target, actor)
//!      │
//!      ├── target not in table? ──► InvalidTransition (order untouched)
//!      │
//!      ├── policy.authorize() Err ──► Permission
//!      │
//!      └── store.persist_status_change() ──► updated order (fresh updated_at)
//!                     │
//!                     └── Err ──► Persistence (order untouched)
//! ```
//!
//! Authorization policy and persistence live outside this crate; they are
//! reached through [`TransitionPolicy`] and [`OrderPersistence`].

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, TransitionError};
use crate::types::{Actor, OrderRecord, OrderStatus};

// =============================================================================
// Transition Table
// =============================================================================

/// Statuses reachable from `current`. Empty for terminal statuses.
pub fn valid_next_statuses(current: OrderStatus) -> &'static [OrderStatus] {
    match current {
        OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
        OrderStatus::Confirmed => &[OrderStatus::Packed, OrderStatus::Cancelled],
        OrderStatus::Packed => &[OrderStatus::Shipped, OrderStatus::Cancelled],
        OrderStatus::Shipped => &[OrderStatus::Delivered, OrderStatus::Cancelled],
        OrderStatus::Delivered | OrderStatus::Cancelled => &[],
    }
}

/// Same lookup for a raw status label. Unknown labels yield no options.
///
/// ```rust
/// use franchise_core::order_status::valid_next_statuses_for_label;
///
/// assert_eq!(valid_next_statuses_for_label("Packed").len(), 2);
/// assert!(valid_next_statuses_for_label("returned").is_empty());
/// ```
pub fn valid_next_statuses_for_label(label: &str) -> &'static [OrderStatus] {
    label
        .parse::<OrderStatus>()
        .map(valid_next_statuses)
        .unwrap_or(&[])
}

#[inline]
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    valid_next_statuses(from).contains(&to)
}

// =============================================================================
// Edit / Delete Gates
// =============================================================================

/// Delivered orders are frozen: no field may change.
#[inline]
pub fn is_editable(order: &OrderRecord) -> bool {
    order.status != OrderStatus::Delivered
}

/// Delivered orders can never be deleted.
#[inline]
pub fn is_deletable(order: &OrderRecord) -> bool {
    order.status != OrderStatus::Delivered
}

pub fn ensure_editable(order: &OrderRecord) -> Result<(), TransitionError> {
    if is_editable(order) {
        Ok(())
    } else {
        Err(TransitionError::permission(format!(
            "order {} is delivered and can no longer be edited",
            order.order_number
        )))
    }
}

pub fn ensure_deletable(order: &OrderRecord) -> Result<(), TransitionError> {
    if is_deletable(order) {
        Ok(())
    } else {
        Err(TransitionError::permission(format!(
            "order {} is delivered and cannot be deleted",
            order.order_number
        )))
    }
}

/// The franchise is fixed once the order holds any item.
pub fn ensure_franchise_change_allowed(
    order: &OrderRecord,
    new_franchise_id: &str,
) -> CoreResult<()> {
    ensure_editable(order)?;
    if order.franchise_id != new_franchise_id && !order.items.is_empty() {
        return Err(CoreError::FranchiseLocked {
            order_id: order.id.clone(),
            franchise_id: order.franchise_id.clone(),
        });
    }
    Ok(())
}

/// Soft-deletes the order. `now` is supplied by the caller.
pub fn mark_deleted(order: &mut OrderRecord, now: DateTime<Utc>) -> Result<(), TransitionError> {
    ensure_deletable(order)?;
    order.deleted_at = Some(now);
    order.updated_at = now;
    Ok(())
}

// =============================================================================
// Collaborator Hooks
// =============================================================================

/// Decides whether an actor may change an order's status.
///
/// The rules themselves belong to the caller; this is only the hook.
pub trait TransitionPolicy {
    /// Returns `Err(reason)` to refuse.
    fn authorize(
        &self,
        actor: &Actor,
        order: &OrderRecord,
        target: OrderStatus,
    ) -> Result<(), String>;
}

/// Persists a status change and returns the stored order.
///
/// Implementations refresh `updated_at`. On error the caller must assume
/// the stored status did not change.
pub trait OrderPersistence {
    fn persist_status_change(
        &mut self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<OrderRecord, String>;
}

/// Validates and executes a status change.
///
/// `order` is never mutated; the updated record comes back from the
/// persistence collaborator.
pub fn request_transition<P, S>(
    order: &OrderRecord,
    target: OrderStatus,
    actor: &Actor,
    policy: &P,
    store: &mut S,
) -> Result<OrderRecord, TransitionError>
where
    P: TransitionPolicy + ?Sized,
    S: OrderPersistence + ?Sized,
{
    if !can_transition(order.status, target) {
        return Err(TransitionError::InvalidTransition {
            from: order.status,
            to: target,
        });
    }

    policy
        .authorize(actor, order, target)
        .map_err(TransitionError::permission)?;

    let updated = store
        .persist_status_change(&order.id, target)
        .map_err(TransitionError::Persistence)?;

    if updated.status != target {
        return Err(TransitionError::Persistence(format!(
            "order {} stored as {} instead of {}",
            updated.id, updated.status, target
        )));
    }

    Ok(updated)
}

// =============================================================================
// Unit Tests
// =============================================================================
