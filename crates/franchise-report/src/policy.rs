//! Role-based authorization for order status changes.
//!
//! ```text
//! super_admin ──► any franchise
//! manager     ──► own franchise only
//! staff       ──► refused unless configured
//! ```

use franchise_core::{Actor, OrderRecord, OrderStatus, Role, TransitionPolicy};
use tracing::debug;

use crate::config::AccessSettings;

/// Allows configured roles to change status; scoped roles only within
/// their own franchise.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    allowed: Vec<Role>,
}

impl RolePolicy {
    pub fn new(allowed: Vec<Role>) -> Self {
        RolePolicy { allowed }
    }

    pub fn from_settings(settings: &AccessSettings) -> Self {
        Self::new(settings.status_change_roles.clone())
    }
}

impl TransitionPolicy for RolePolicy {
    fn authorize(
        &self,
        actor: &Actor,
        order: &OrderRecord,
        target: OrderStatus,
    ) -> Result<(), String> {
        if !self.allowed.contains(&actor.role) {
            debug!(user = %actor.user_id, role = %actor.role, "Role may not change order status");
            return Err(format!("role {} may not change order status", actor.role));
        }

        if actor.role != Role::SuperAdmin {
            match actor.franchise_id.as_deref() {
                Some(own) if own == order.franchise_id => {}
                Some(own) => {
                    return Err(format!(
                        "order {} belongs to franchise {}, not {}",
                        order.order_number, order.franchise_id, own
                    ))
                }
                None => {
                    return Err(format!(
                        "{} {} has no franchise assigned",
                        actor.role, actor.user_id
                    ))
                }
            }
        }

        debug!(user = %actor.user_id, order = %order.id, %target, "Status change authorized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use franchise_core::{
        Customer, DeliveryAddress, OrderTotals, Payment, PaymentMethod, PaymentStatus,
    };

    fn order(franchise_id: &str) -> OrderRecord {
        OrderRecord {
            id: "o1".to_string(),
            order_number: "ORD-7".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            franchise_id: franchise_id.to_string(),
            customer: Customer {
                name: "Meera".to_string(),
                phone: "9876543210".to_string(),
                email: None,
            },
            delivery_address: DeliveryAddress {
                address_line: "22 Residency Road".to_string(),
                city: "Bengaluru".to_string(),
                state: None,
                pincode: "560025".to_string(),
            },
            items: Vec::new(),
            payment: Payment {
                method: PaymentMethod::Upi,
                status: PaymentStatus::Paid,
                transaction_id: None,
            },
            status: OrderStatus::Pending,
            totals: OrderTotals::default(),
            deleted_at: None,
        }
    }

    fn actor(role: Role, franchise_id: Option<&str>) -> Actor {
        Actor {
            user_id: "u1".to_string(),
            role,
            franchise_id: franchise_id.map(str::to_string),
        }
    }

    #[test]
    fn test_super_admin_any_franchise() {
        let policy = RolePolicy::from_settings(&AccessSettings::default());
        let admin = actor(Role::SuperAdmin, None);
        let target = OrderStatus::Confirmed;
        assert!(policy.authorize(&admin, &order("f9"), target).is_ok());
    }

    #[test]
    fn test_manager_scoped_to_own_franchise() {
        let policy = RolePolicy::from_settings(&AccessSettings::default());
        let manager = actor(Role::Manager, Some("f1"));
        let unassigned = actor(Role::Manager, None);
        let target = OrderStatus::Confirmed;
        assert!(policy.authorize(&manager, &order("f1"), target).is_ok());
        assert!(policy.authorize(&manager, &order("f2"), target).is_err());
        assert!(policy.authorize(&unassigned, &order("f1"), target).is_err());
    }

    #[test]
    fn test_staff_refused_by_default() {
        let policy = RolePolicy::from_settings(&AccessSettings::default());
        let staff = actor(Role::Staff, Some("f1"));
        let packed = OrderStatus::Packed;
        let reason = policy.authorize(&staff, &order("f1"), packed).unwrap_err();
        assert!(reason.contains("staff"));

        let permissive = RolePolicy::new(vec![Role::Staff]);
        assert!(permissive.authorize(&staff, &order("f1"), packed).is_ok());
    }
}
