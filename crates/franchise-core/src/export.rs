//! # Report Export Requests
//!
//! PDF/Excel rendering is done by an external reporting service reached
//! with an authenticated GET. This module only builds and checks the query
//! it expects: `franchise`, `startDate`, `endDate`, `format`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::period::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ExportFormat {
    Pdf,
    Excel,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(ValidationError::NotAllowed {
                field: "format".to_string(),
                allowed: vec!["pdf".to_string(), "excel".to_string()],
            }),
        }
    }
}

/// Parameters for one export download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportRequest {
    /// `None` exports the whole network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub franchise: Option<String>,
    pub range: DateRange,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn new(
        franchise: Option<String>,
        range: DateRange,
        format: ExportFormat,
    ) -> Result<Self, ValidationError> {
        if franchise.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(ValidationError::Required {
                field: "franchise".to_string(),
            });
        }
        // DateRange fields are public; the range may arrive inverted.
        let range = DateRange::new(range.start, range.end)?;
        Ok(ExportRequest {
            franchise,
            range,
            format,
        })
    }

    /// Query parameters in the order the reporting service documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(franchise) = &self.franchise {
            pairs.push(("franchise", franchise.clone()));
        }
        pairs.push(("startDate", self.range.start.to_string()));
        pairs.push(("endDate", self.range.end.to_string()));
        pairs.push(("format", self.format.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_query_pairs() {
        let request =
            ExportRequest::new(Some("f1".to_string()), range(), ExportFormat::Excel).unwrap();
        assert_eq!(
            request.query_pairs(),
            vec![
                ("franchise", "f1".to_string()),
                ("startDate", "2026-03-01".to_string()),
                ("endDate", "2026-03-31".to_string()),
                ("format", "excel".to_string()),
            ]
        );
    }

    #[test]
    fn test_network_export_omits_franchise() {
        let request = ExportRequest::new(None, range(), ExportFormat::Pdf).unwrap();
        assert_eq!(request.query_pairs()[0].0, "startDate");
    }

    #[test]
    fn test_rejects_bad_input() {
        let blank = ExportRequest::new(Some(" ".to_string()), range(), ExportFormat::Pdf);
        assert!(blank.is_err());

        let inverted = DateRange {
            start: range().end,
            end: range().start,
        };
        let inverted = ExportRequest::new(None, inverted, ExportFormat::Pdf);
        assert!(inverted.is_err());
        assert!("csv".parse::<ExportFormat>().is_err());
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
    }
}
