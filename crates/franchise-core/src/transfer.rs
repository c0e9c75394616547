//! # Inter-Franchise Transfers
//!
//! A transfer is an export for its source and an import for its
//! destination. The label depends on who is looking, so it is computed
//! against a viewing franchise and never stored on the record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{TransferRecord, TransferStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TransferDirection {
    Import,
    Export,
}

impl TransferDirection {
    /// Direction of `record` as seen from `franchise_id`, or `None` when
    /// the franchise is not a party to it.
    ///
    /// A transfer to oneself is reported as an export.
    pub fn relative_to(record: &TransferRecord, franchise_id: &str) -> Option<Self> {
        if record.from_franchise_id == franchise_id {
            Some(TransferDirection::Export)
        } else if record.to_franchise_id == franchise_id {
            Some(TransferDirection::Import)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusCount {
    pub status: TransferStatus,
    pub count: usize,
}

/// Transfer activity for one franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransferSummary {
    pub franchise_id: String,
    pub import_count: usize,
    pub import_value: Money,
    pub import_quantity: i64,
    pub export_count: usize,
    pub export_value: Money,
    pub export_quantity: i64,
    /// Only statuses that occur, in lifecycle order.
    pub by_status: Vec<StatusCount>,
}

/// Rolls up the transfers `franchise_id` takes part in.
///
/// Records between other franchises are ignored.
pub fn summarize_transfers(records: &[TransferRecord], franchise_id: &str) -> TransferSummary {
    let mut summary = TransferSummary {
        franchise_id: franchise_id.to_string(),
        import_count: 0,
        import_value: Money::zero(),
        import_quantity: 0,
        export_count: 0,
        export_value: Money::zero(),
        export_quantity: 0,
        by_status: Vec::new(),
    };
    let mut statuses: BTreeMap<TransferStatus, usize> = BTreeMap::new();

    for record in records {
        let Some(direction) = TransferDirection::relative_to(record, franchise_id) else {
            continue;
        };
        match direction {
            TransferDirection::Import => {
                summary.import_count += 1;
                summary.import_value += record.value();
                summary.import_quantity += record.quantity;
            }
            TransferDirection::Export => {
                summary.export_count += 1;
                summary.export_value += record.value();
                summary.export_quantity += record.quantity;
            }
        }
        *statuses.entry(record.status).or_default() += 1;
    }

    summary.by_status = statuses
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();
    summary
}
