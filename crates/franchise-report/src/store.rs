//! # JSON Order Store
//!
//! File-backed order persistence for the command line.
//!
//! ```text
//! orders.json ──load──► JsonOrderStore ──persist_status_change──► memory
//!                              │
//!                              └──save──► orders.json (tmp file + rename)
//! ```
//!
//! Soft-deleted orders stay in the file with `deletedAt` set and are
//! invisible to lookups.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use franchise_core::order_status::mark_deleted;
use franchise_core::{CoreError, OrderPersistence, OrderRecord, OrderStatus};
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::records::load_orders;

pub struct JsonOrderStore {
    path: PathBuf,
    orders: Vec<OrderRecord>,
    dirty: bool,
}

impl JsonOrderStore {
    pub fn open(path: &Path) -> ReportResult<Self> {
        let orders = load_orders(path)?;
        info!(?path, count = orders.len(), "Opened order store");
        Ok(JsonOrderStore {
            path: path.to_path_buf(),
            orders,
            dirty: false,
        })
    }

    /// Live (not soft-deleted) order by id.
    pub fn find(&self, order_id: &str) -> Option<&OrderRecord> {
        self.orders
            .iter()
            .find(|o| o.id == order_id && !o.is_deleted())
    }

    pub fn get(&self, order_id: &str) -> Result<&OrderRecord, CoreError> {
        self.find(order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))
    }

    pub fn live_orders(&self) -> impl Iterator<Item = &OrderRecord> {
        self.orders.iter().filter(|o| !o.is_deleted())
    }

    /// Soft-deletes an order. Delivered orders are refused.
    pub fn delete(&mut self, order_id: &str, now: DateTime<Utc>) -> ReportResult<OrderRecord> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id && !o.is_deleted())
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        mark_deleted(order, now)?;
        self.dirty = true;
        info!(order = %order.id, "Order soft-deleted");
        Ok(order.clone())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the store back to its file if anything changed.
    pub fn save(&mut self) -> ReportResult<()> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.orders)?;
        let tmp = self.path.with_extension("json.tmp");
        let write_failed = |e: std::io::Error| ReportError::WriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        };
        std::fs::write(&tmp, json).map_err(write_failed)?;
        std::fs::rename(&tmp, &self.path).map_err(write_failed)?;

        self.dirty = false;
        debug!(path = ?self.path, "Order store saved");
        Ok(())
    }
}

impl OrderPersistence for JsonOrderStore {
    fn persist_status_change(
        &mut self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<OrderRecord, String> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id && !o.is_deleted())
            .ok_or_else(|| format!("order {order_id} not found"))?;

        order.status = new_status;
        order.updated_at = Utc::now();
        self.dirty = true;

        Ok(order.clone())
    }
}
