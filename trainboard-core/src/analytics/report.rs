//! Classification report tabulation.
//!
//! Reports arrive as a JSON object keyed by class label plus three
//! synthetic rows. Values are validated entry by entry; a malformed entry
//! renders as placeholders instead of failing the whole table.

use serde_json::Value;

use super::format::{format_percent, PLACEHOLDER};
use crate::model::ClassificationReport;

/// Synthetic summary rows, in display order.
pub const SUMMARY_KEYS: [&str; 3] = ["macro avg", "weighted avg", "accuracy"];

/// One validated report row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
    pub support: Option<u64>,
}

impl ReportRow {
    fn empty(label: &str) -> Self {
        Self {
            label: label.to_string(),
            precision: None,
            recall: None,
            f1: None,
            support: None,
        }
    }

    fn from_value(label: &str, value: Option<&Value>) -> Self {
        let mut row = Self::empty(label);
        match value {
            Some(Value::Object(fields)) => {
                row.precision = fields.get("precision").and_then(Value::as_f64);
                row.recall = fields.get("recall").and_then(Value::as_f64);
                row.f1 = fields
                    .get("f1-score")
                    .or_else(|| fields.get("f1"))
                    .and_then(Value::as_f64);
                row.support = fields.get("support").and_then(support_count);
            }
            // `accuracy` is reported as a bare number; it lives in the F1 column
            Some(Value::Number(n)) => row.f1 = n.as_f64(),
            _ => {}
        }
        row
    }

    pub fn precision_text(&self) -> String {
        self.precision.map(format_percent).unwrap_or_else(|| PLACEHOLDER.into())
    }

    pub fn recall_text(&self) -> String {
        self.recall.map(format_percent).unwrap_or_else(|| PLACEHOLDER.into())
    }

    pub fn f1_text(&self) -> String {
        self.f1.map(format_percent).unwrap_or_else(|| PLACEHOLDER.into())
    }

    pub fn support_text(&self) -> String {
        self.support
            .map(|s| s.to_string())
            .unwrap_or_else(|| PLACEHOLDER.into())
    }
}

/// Support is an integer count, but some serializers emit it as a float.
fn support_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportTable {
    /// One row per class label
    pub body: Vec<ReportRow>,
    /// `macro avg`, `weighted avg`, `accuracy`, always in that order
    pub summary: Vec<ReportRow>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.summary.iter().all(|r| r.f1.is_none())
    }
}

/// Split `report` into class rows and the summary tail.
///
/// Class rows follow `labels`; when no labels are known the report's own
/// key order is used instead.
pub fn tabulate(report: &ClassificationReport, labels: &[String]) -> ReportTable {
    let body = if labels.is_empty() {
        report
            .keys()
            .filter(|k| !SUMMARY_KEYS.contains(k))
            .map(|k| ReportRow::from_value(k, report.get(k)))
            .collect()
    } else {
        labels
            .iter()
            .map(|label| ReportRow::from_value(label, report.get(label)))
            .collect()
    };

    let summary = SUMMARY_KEYS
        .iter()
        .map(|k| ReportRow::from_value(k, report.get(k)))
        .collect();

    ReportTable { body, summary }
}
