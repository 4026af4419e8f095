//! Sortable view over the loaded row window, with CSV export.
//!
//! Sorting is client-side and only covers the rows currently loaded, not
//! the whole dataset on the service.

use std::cmp::Ordering;

use serde_json::Value;

use crate::model::{DatasetPreview, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "\u{25B2}",
            SortDirection::Descending => "\u{25BC}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// The dataset preview plus the client-side sort applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTable {
    dataset: DatasetPreview,
    limit: usize,
    sort: Option<SortSpec>,
}

impl PreviewTable {
    /// Wrap a freshly fetched preview. Any previous sort is gone.
    pub fn new(dataset: DatasetPreview, limit: usize) -> Self {
        Self {
            dataset,
            limit,
            sort: None,
        }
    }

    pub fn dataset(&self) -> &DatasetPreview {
        &self.dataset
    }

    pub fn columns(&self) -> &[String] {
        &self.dataset.columns
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.rows.is_empty()
    }

    /// Column header click: ascending on a new column, flip on the same one.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some(spec) if spec.column == column => Some(SortSpec {
                column: spec.column,
                direction: match spec.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            }),
            _ => Some(SortSpec {
                column: column.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Rows in display order.
    ///
    /// Descending is the exact reverse of ascending, so toggling a column
    /// twice mirrors the row order even when values tie.
    pub fn rows(&self) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self.dataset.rows.iter().collect();
        if let Some(spec) = &self.sort {
            rows.sort_by(|a, b| compare_cells(a.get(&spec.column), b.get(&spec.column)));
            if spec.direction == SortDirection::Descending {
                rows.reverse();
            }
        }
        rows
    }

    /// Serialize the columns and the displayed rows; `None` when there are
    /// no rows to export.
    pub fn to_csv(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let columns = self.columns();
        let mut out = String::new();
        push_csv_line(&mut out, columns.iter().map(String::as_str));
        for row in self.rows() {
            let cells: Vec<String> = columns.iter().map(|c| cell_text(row.get(c))).collect();
            push_csv_line(&mut out, cells.iter().map(String::as_str));
        }
        Some(out)
    }
}

/// Display text for a cell; missing and null cells are empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Cell ordering used for column sorts.
///
/// Missing, null and empty cells read as the empty string and come first.
/// Two numeric cells (numbers or numeric strings) compare as numbers;
/// other text compares case-insensitively. Numbers order before text so
/// the relation stays a total order on mixed columns.
pub fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (text_a, text_b) = (cell_text(a), cell_text(b));
    match (text_a.is_empty(), text_b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => text_a.to_lowercase().cmp(&text_b.to_lowercase()),
    }
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_csv_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = fields.map(escape_csv_field).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}
