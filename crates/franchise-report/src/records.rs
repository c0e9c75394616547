//! Loading record exports from disk.
//!
//! The backend exports sales, orders and transfers as JSON arrays. Files
//! are read whole; a malformed element fails the entire file.
//!
//! ## Wire Units
//! Every amount is an integer in minor units (paise): `109950` is ₹1,099.50.
//! Missing or `null` amounts and quantities read as 0. A fractional amount
//! such as `1099.5` is rejected with the offending value in the error.

use std::path::Path;

use franchise_core::{OrderRecord, SaleRecord, TransferRecord};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ReportError, ReportResult};

/// Reads a JSON array of records.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> ReportResult<Vec<T>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReportError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let records: Vec<T> =
        serde_json::from_str(&contents).map_err(|e| ReportError::MalformedRecords {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(?path, count = records.len(), "Loaded records");
    Ok(records)
}

pub fn load_sales(path: &Path) -> ReportResult<Vec<SaleRecord>> {
    load_records(path)
}

pub fn load_orders(path: &Path) -> ReportResult<Vec<OrderRecord>> {
    load_records(path)
}

pub fn load_transfers(path: &Path) -> ReportResult<Vec<TransferRecord>> {
    load_records(path)
}

/// Keeps only sales belonging to `franchise_id`; `None` keeps everything.
pub fn scope_to_franchise(sales: Vec<SaleRecord>, franchise_id: Option<&str>) -> Vec<SaleRecord> {
    match franchise_id {
        Some(id) => sales.into_iter().filter(|s| s.franchise_id == id).collect(),
        None => sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("records-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_sales_with_missing_fields() {
        let path = temp_file(
            r#"[
                {"id": "s1", "createdAt": "2026-03-02T10:00:00Z", "franchiseId": "f1",
                 "grandTotal": 10000, "totalProfit": 2500,
                 "items": [{"productId": "p1", "quantity": 2,
                            "sellingPrice": 5000, "buyingPrice": 3750}]},
                {"id": "s2", "createdAt": "2026-03-02T11:00:00Z", "franchiseId": "f2"}
            ]"#,
        );

        let sales = load_sales(&path).unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].cost().minor(), 7_500);
        assert!(sales[1].grand_total.is_zero());
        assert!(sales[1].items.is_empty());

        let scoped = scope_to_franchise(sales, Some("f2"));
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, "s2");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_sales_with_null_values() {
        let path = temp_file(
            r#"[
                {"id": "s1", "createdAt": "2026-03-02T10:00:00Z", "franchiseId": "f1",
                 "grandTotal": null, "totalProfit": 500,
                 "items": [{"productId": "p1", "quantity": null, "buyingPrice": 3750}]}
            ]"#,
        );

        let sales = load_sales(&path).unwrap();
        assert!(sales[0].grand_total.is_zero());
        assert_eq!(sales[0].total_profit.minor(), 500);
        assert!(sales[0].cost().is_zero());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_fractional_amount_names_value() {
        let path = temp_file(
            r#"[{"id": "s1", "createdAt": "2026-03-02T10:00:00Z",
                 "franchiseId": "f1", "grandTotal": 1099.5}]"#,
        );

        match load_sales(&path).unwrap_err() {
            ReportError::MalformedRecords { reason, .. } => {
                assert!(reason.contains("1099.5"), "{reason}");
                assert!(reason.contains("minor units"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = load_sales(Path::new("/nonexistent/sales.json")).unwrap_err();
        assert!(matches!(err, ReportError::ReadFailed { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_file(r#"{"not": "an array"}"#);
        let err = load_transfers(&path).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRecords { .. }));
        std::fs::remove_file(&path).unwrap();
    }
}
