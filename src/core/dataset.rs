//! CSV ingestion for per-site measurement exports.
//!
//! The export carries one row per site submission with raw counts and their
//! ground-truth counterparts. Only the five required columns are read; any
//! other columns in the export are ignored. Rows where a required field is
//! blank are dropped, matching the upstream pipeline's behavior.

use crate::core::error::SiteplotError;
use std::path::Path;

/// Column holding the site (data access group) name.
pub const GROUP_COLUMN: &str = "redcap_data_access_group";

/// Numeric columns required on every usable row, in wire order.
pub const COUNT_COLUMNS: [&str; 4] = [
    "total_detached",
    "total_attached",
    "total_detached_gt",
    "total_attached_gt",
];

/// One usable row from the export: a site name plus its four counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub group: String,
    pub detached: f64,
    pub attached: f64,
    pub detached_gt: f64,
    pub attached_gt: f64,
}

/// Result of an ingestion pass.
#[derive(Debug, Clone)]
pub struct Ingest {
    pub records: Vec<Record>,
    /// Rows dropped because a required field was blank.
    pub skipped: usize,
}

/// Read the export at `path`, keeping rows where every required field is
/// present.
///
/// A missing required column is an error; so is a non-blank count field that
/// does not parse as a number (the row is named in the message). Blank
/// required fields drop the row silently apart from the `skipped` count.
pub fn read_csv(path: &Path) -> Result<Ingest, SiteplotError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let col = |name: &str| -> Result<usize, SiteplotError> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            SiteplotError::ValidationError(format!(
                "required column '{}' not found in {}",
                name,
                path.display()
            ))
        })
    };

    let group_idx = col(GROUP_COLUMN)?;
    let mut count_idx = [0usize; 4];
    for (slot, name) in count_idx.iter_mut().zip(COUNT_COLUMNS) {
        *slot = col(name)?;
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let required_blank = field(group_idx).is_empty()
            || count_idx.iter().any(|&idx| field(idx).is_empty());
        if required_blank {
            skipped += 1;
            continue;
        }

        let mut counts = [0f64; 4];
        for (value, (&idx, name)) in counts
            .iter_mut()
            .zip(count_idx.iter().zip(COUNT_COLUMNS))
        {
            *value = field(idx).parse().map_err(|_| {
                SiteplotError::ValidationError(format!(
                    "row {}: column '{}' is not numeric: '{}'",
                    row_no + 2,
                    name,
                    field(idx)
                ))
            })?;
        }

        records.push(Record {
            group: field(group_idx).to_string(),
            detached: counts[0],
            attached: counts[1],
            detached_gt: counts[2],
            attached_gt: counts[3],
        });
    }

    Ok(Ingest { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let file = write_csv(
            "record_id,redcap_data_access_group,total_detached,total_attached,total_detached_gt,total_attached_gt,notes\n\
             1,vumc,10,20,12,18,ok\n\
             2,site_b,5,5,5,5,\n",
        );
        let ingest = read_csv(file.path()).expect("read");
        assert_eq!(ingest.skipped, 0);
        assert_eq!(ingest.records.len(), 2);
        assert_eq!(ingest.records[0].group, "vumc");
        assert_eq!(ingest.records[0].detached_gt, 12.0);
    }

    #[test]
    fn drops_rows_with_blank_required_fields() {
        let file = write_csv(
            "redcap_data_access_group,total_detached,total_attached,total_detached_gt,total_attached_gt\n\
             vumc,10,20,12,18\n\
             ,4,4,4,4\n\
             site_b,7,,7,7\n",
        );
        let ingest = read_csv(file.path()).expect("read");
        assert_eq!(ingest.skipped, 2);
        assert_eq!(ingest.records.len(), 1);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let file = write_csv("redcap_data_access_group,total_detached\nvumc,1\n");
        let err = read_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("total_attached"));
    }

    #[test]
    fn non_numeric_count_names_the_row() {
        let file = write_csv(
            "redcap_data_access_group,total_detached,total_attached,total_detached_gt,total_attached_gt\n\
             vumc,10,20,12,18\n\
             site_b,abc,1,1,1\n",
        );
        let err = read_csv(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 3"), "unexpected message: {}", msg);
        assert!(msg.contains("total_detached"));
    }

    #[test]
    fn header_only_file_yields_empty_ingest() {
        let file = write_csv(
            "redcap_data_access_group,total_detached,total_attached,total_detached_gt,total_attached_gt\n",
        );
        let ingest = read_csv(file.path()).expect("read");
        assert!(ingest.records.is_empty());
        assert_eq!(ingest.skipped, 0);
    }
}
