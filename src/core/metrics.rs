//! Derived error metrics and the composite aggregate.
//!
//! Every usable row yields three error columns: the absolute difference
//! between each measured count and its ground truth, plus their sum. A
//! synthetic `Composite` group is appended holding one row per original site
//! with that site's mean errors, so the Composite box shows the distribution
//! of per-site means.

use crate::core::dataset::Record;

/// Name of the synthetic mean-of-each-site group.
pub const COMPOSITE_GROUP: &str = "Composite";

/// One row of derived error metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRow {
    pub group: String,
    pub detached_error: f64,
    pub attached_error: f64,
    pub total_error: f64,
}

/// The three error columns a panel can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "detached_error")]
    Detached,
    #[serde(rename = "attached_error")]
    Attached,
    #[serde(rename = "total_error")]
    Total,
}

impl ErrorKind {
    /// Fixed panel order: detached, attached, total.
    pub const ALL: [ErrorKind; 3] = [ErrorKind::Detached, ErrorKind::Attached, ErrorKind::Total];

    pub fn value(self, row: &ErrorRow) -> f64 {
        match self {
            ErrorKind::Detached => row.detached_error,
            ErrorKind::Attached => row.attached_error,
            ErrorKind::Total => row.total_error,
        }
    }

    /// Default panel title, e.g. `Detached error by Site`.
    pub fn default_title(self) -> &'static str {
        match self {
            ErrorKind::Detached => "Detached error by Site",
            ErrorKind::Attached => "Attached error by Site",
            ErrorKind::Total => "Total error by Site",
        }
    }

    pub fn default_y_label(self) -> &'static str {
        match self {
            ErrorKind::Detached => "Detached Error (%)",
            ErrorKind::Attached => "Attached Error (%)",
            ErrorKind::Total => "Total Error (%)",
        }
    }
}

/// Mean of the three error columns for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    pub group: String,
    pub rows: usize,
    pub detached_error: f64,
    pub attached_error: f64,
    pub total_error: f64,
}

/// Compute the error columns for every record.
pub fn derive_errors(records: &[Record]) -> Vec<ErrorRow> {
    records
        .iter()
        .map(|r| {
            let detached_error = (r.detached - r.detached_gt).abs();
            let attached_error = (r.attached - r.attached_gt).abs();
            ErrorRow {
                group: r.group.clone(),
                detached_error,
                attached_error,
                total_error: detached_error + attached_error,
            }
        })
        .collect()
}

/// Per-group means over the raw rows, groups visited in sorted name order.
pub fn group_means(rows: &[ErrorRow]) -> Vec<GroupMeans> {
    let mut names: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .map(|name| {
            let members: Vec<&ErrorRow> = rows.iter().filter(|r| r.group == name).collect();
            let n = members.len() as f64;
            let sum = |f: fn(&ErrorRow) -> f64| members.iter().map(|r| f(r)).sum::<f64>() / n;
            GroupMeans {
                group: name.to_string(),
                rows: members.len(),
                detached_error: sum(|r| r.detached_error),
                attached_error: sum(|r| r.attached_error),
                total_error: sum(|r| r.total_error),
            }
        })
        .collect()
}

/// Append one `Composite` row per original group, carrying that group's mean
/// errors. Must run before any group filtering so the composite always spans
/// the full dataset.
pub fn append_composite(rows: &mut Vec<ErrorRow>) {
    let composites: Vec<ErrorRow> = group_means(rows)
        .into_iter()
        .map(|m| ErrorRow {
            group: COMPOSITE_GROUP.to_string(),
            detached_error: m.detached_error,
            attached_error: m.attached_error,
            total_error: m.total_error,
        })
        .collect();
    rows.extend(composites);
}
