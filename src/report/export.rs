//! CSV export of the derived tables.
//!
//! Column headers come from the serde names on the record types, and no index
//! column is written.

use crate::error::ReportError;
use crate::types::{CategorizedRow, TOP_COLUMNS, TYPE_STATS_COLUMNS, TopRecord, TypeStats};
use serde::Serialize;
use std::path::Path;

fn write_records<S: Serialize>(path: &Path, records: impl IntoIterator<Item = S>) -> Result<(), ReportError> {
    let csv_err = |source: csv::Error| ReportError::Csv { path: path.to_path_buf(), source };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    Ok(())
}

/// Write the top-N table; an empty table still gets its header row
pub fn write_top_csv(path: &Path, top: &[CategorizedRow]) -> Result<(), ReportError> {
    if top.is_empty() {
        return write_header_only(path, &TOP_COLUMNS);
    }
    write_records(path, top.iter().map(TopRecord::from))
}

/// Write the per-type statistics table; absent means are empty cells
pub fn write_type_stats_csv(path: &Path, stats: &[TypeStats]) -> Result<(), ReportError> {
    if stats.is_empty() {
        return write_header_only(path, &TYPE_STATS_COLUMNS);
    }
    write_records(path, stats)
}

// serde only emits headers alongside the first record
fn write_header_only(path: &Path, headers: &[&str]) -> Result<(), ReportError> {
    let csv_err = |source: csv::Error| ReportError::Csv { path: path.to_path_buf(), source };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(headers).map_err(csv_err)?;
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Row};
    use std::fs;

    fn top_row(id: i64, name: &str, exp: i64, types: &[&str], hp: Option<i64>) -> CategorizedRow {
        CategorizedRow {
            row: Row {
                id,
                name: name.to_string(),
                base_experience: exp,
                types: types.iter().map(|t| t.to_string()).collect(),
                hp,
                attack: Some(84),
                defense: Some(78),
            },
            category: Category::from_experience(exp),
        }
    }

    #[test]
    fn test_top_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.csv");
        let rows = vec![
            top_row(6, "Charizard", 240, &["fire", "flying"], Some(78)),
            top_row(25, "Pikachu", 112, &["electric"], None),
        ];

        write_top_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "ID,Name,Base Experience,Types,HP,Attack,Defense,Category\n\
             6,Charizard,240,fire|flying,78,84,78,Strong\n\
             25,Pikachu,112,electric,,84,78,Strong\n"
        );
    }

    #[test]
    fn test_type_stats_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let stats = vec![
            TypeStats { type_name: "fire".to_string(), hp: Some(78.0), attack: Some(64.5), defense: None },
            TypeStats { type_name: "water".to_string(), hp: Some(10.33), attack: Some(50.0), defense: Some(64.0) },
        ];

        write_type_stats_csv(&path, &stats).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Type,HP,Attack,Defense\nfire,78.0,64.5,\nwater,10.33,50.0,64.0\n");
    }

    #[test]
    fn test_empty_tables_write_headers() {
        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join("top.csv");
        let stats = dir.path().join("stats.csv");

        write_top_csv(&top, &[]).unwrap();
        write_type_stats_csv(&stats, &[]).unwrap();

        assert_eq!(fs::read_to_string(&top).unwrap(), "ID,Name,Base Experience,Types,HP,Attack,Defense,Category\n");
        assert_eq!(fs::read_to_string(&stats).unwrap(), "Type,HP,Attack,Defense\n");
    }

    #[test]
    fn test_serialized_headers_match_header_only_columns() {
        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join("top.csv");
        let stats = dir.path().join("stats.csv");

        write_top_csv(&top, &[top_row(25, "Pikachu", 112, &["electric"], Some(35))]).unwrap();
        write_type_stats_csv(
            &stats,
            &[TypeStats { type_name: "fire".to_string(), hp: None, attack: None, defense: None }],
        )
        .unwrap();

        let top = fs::read_to_string(&top).unwrap();
        let stats = fs::read_to_string(&stats).unwrap();
        assert_eq!(top.lines().next(), Some(TOP_COLUMNS.join(",").as_str()));
        assert_eq!(stats.lines().next(), Some(TYPE_STATS_COLUMNS.join(",").as_str()));
    }

    #[test]
    fn test_missing_parent_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("stats.csv");
        assert!(matches!(write_type_stats_csv(&path, &[]), Err(ReportError::Csv { .. })));
    }
}
