//! Export of a finished batch to a file.
//!
//! Tabular formats carry one row per successfully extracted school under a
//! fixed header; schools that failed extraction are left out. The JSON format
//! keeps every slot, failures included as `null`.

use crate::error::ScrapeError;
use crate::models::{BatchResult, ExportRow, SchoolRecord, EXPORT_COLUMNS};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Output document format
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    fn delimiter(self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

/// Header row followed by one row per record
pub fn render_table<'a, I>(records: I, delimiter: u8) -> Result<Vec<u8>, ScrapeError>
where
    I: IntoIterator<Item = &'a SchoolRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }

    writer.into_inner().map_err(|e| ScrapeError::Io(e.into_error()))
}

/// Render the whole batch in `format`
pub fn render(batch: &BatchResult, format: ExportFormat) -> Result<Vec<u8>, ScrapeError> {
    match format.delimiter() {
        Some(delimiter) => render_table(batch.successes(), delimiter),
        None => Ok(serde_json::to_vec_pretty(&batch.records)?),
    }
}

/// Render the batch and write it to `path` in one write
pub fn export(batch: &BatchResult, path: &Path, format: ExportFormat) -> Result<(), ScrapeError> {
    let document = render(batch, format)?;
    fs::write(path, document)?;

    log::info!(
        "Exported {} of {} schools to {}",
        batch.successes().count(),
        batch.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::RunMetrics;
    use crate::models::{ContactDetails, EntityId};

    fn record(id: &str, name: &str) -> SchoolRecord {
        SchoolRecord {
            name: name.to_string(),
            id: EntityId::from(id),
            overview: "Established 1990".to_string(),
            contact: ContactDetails {
                email: "office@example.edu.au".to_string(),
                website: "https://example.edu.au".to_string(),
                phone: "9888 1234".to_string(),
                fax: String::new(),
                principal: "Ms Jones".to_string(),
                manager: "Mr Brown".to_string(),
                address: "1 School Rd, Perth".to_string(),
            },
        }
    }

    fn batch(records: Vec<Option<SchoolRecord>>) -> BatchResult {
        BatchResult {
            records,
            metrics: RunMetrics::new(),
        }
    }

    #[test]
    fn test_single_record_csv() {
        let out = render(&batch(vec![Some(record("123", "Example School"))]), ExportFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "School Name,School Id,School Overview,Email,Website,Phone,Fax,Principal,Manager,Address"
        );
        assert_eq!(
            lines[1],
            "Example School,123,Established 1990,office@example.edu.au,https://example.edu.au,9888 1234,,Ms Jones,Mr Brown,\"1 School Rd, Perth\""
        );
    }

    #[test]
    fn test_failed_slots_are_skipped() {
        let out = render(
            &batch(vec![
                Some(record("1", "First")),
                None,
                Some(record("3", "Third")),
            ]),
            ExportFormat::Csv,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("First,1,"));
        assert!(lines[2].starts_with("Third,3,"));
    }

    #[test]
    fn test_empty_batch_still_has_header() {
        let out = render(&batch(vec![None]), ExportFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("School Name,"));
    }

    #[test]
    fn test_tsv() {
        let out = render(&batch(vec![Some(record("7", "Tab School"))]), ExportFormat::Tsv).unwrap();
        let text = String::from_utf8(out).unwrap();
        let header: Vec<&str> = text.lines().next().unwrap().split('\t').collect();
        assert_eq!(header, EXPORT_COLUMNS);
        assert!(text.contains("Tab School\t7\t"));
    }

    #[test]
    fn test_json_keeps_failed_slots() {
        let out = render(&batch(vec![Some(record("1", "First")), None]), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let slots = value.as_array().unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0]["name"], "First");
        assert_eq!(slots[0]["phone"], "9888 1234");
        assert!(slots[1].is_null());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schools.csv");

        export(&batch(vec![Some(record("1", "First"))]), &path, ExportFormat::Csv).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("School Name,School Id"));
        assert!(written.contains("First,1,"));
    }
}
