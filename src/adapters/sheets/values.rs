//! Values Grid Codec - Worksheet Cells to Records and Back
//!
//! The values API exchanges a rectangular grid of strings. This module
//! translates that grid into `StudyRecord`s and back: header detection,
//! malformed-row tolerance, and the header-only representation of an
//! empty table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::record::{normalize, StudyRecord, DATE_FORMAT};

/// Column headers written (and recognized case-insensitively) on read.
pub const HEADERS: [&str; 2] = ["date", "hours"];

/// Wire shape of a worksheet's cell grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuesGrid {
  /// Rows of cells, outer = rows, inner = columns.
  #[serde(default)]
  pub values: Vec<Vec<String>>,
}

/// Parse a values grid into an ordered, de-duplicated record set.
///
/// A first row whose columns match the known headers (any casing) is
/// stripped. Rows that are entirely empty or fail date/number parsing
/// are skipped with a warning rather than failing the read.
pub fn parse_records(grid: &ValuesGrid) -> Vec<StudyRecord> {
  let mut rows = grid.values.as_slice();
  if let Some(first) = rows.first() {
    if is_header_row(first) {
      rows = &rows[1..];
    }
  }

  let mut records = Vec::with_capacity(rows.len());
  for row in rows {
    if row.iter().all(|cell| cell.trim().is_empty()) {
      continue;
    }
    let (Some(date_cell), Some(hours_cell)) = (row.first(), row.get(1)) else {
      warn!(?row, "Skipping short worksheet row");
      continue;
    };
    let date = match NaiveDate::parse_from_str(date_cell.trim(), DATE_FORMAT) {
      Ok(date) => date,
      Err(e) => {
        warn!(cell = %date_cell, error = %e, "Skipping row with unparseable date");
        continue;
      }
    };
    let hours = match hours_cell.trim().parse::<f64>() {
      Ok(hours) => hours,
      Err(e) => {
        warn!(cell = %hours_cell, error = %e, "Skipping row with unparseable hours");
        continue;
      }
    };
    records.push(StudyRecord::new(date, hours));
  }

  normalize(records)
}

/// Serialize records to the grid written back to the worksheet.
///
/// Always emits the header row, so an empty record set produces the
/// well-formed header-only table rather than a blank sheet.
pub fn to_grid(records: &[StudyRecord]) -> ValuesGrid {
  let mut values = Vec::with_capacity(records.len() + 1);
  values.push(HEADERS.iter().map(|h| (*h).to_string()).collect());
  for record in records {
    values.push(vec![record.date_string(), format!("{}", record.hours)]);
  }
  ValuesGrid { values }
}

fn is_header_row(row: &[String]) -> bool {
  row.len() >= 2
    && row[0].trim().eq_ignore_ascii_case(HEADERS[0])
    && row[1].trim().eq_ignore_ascii_case(HEADERS[1])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn grid(rows: &[&[&str]]) -> ValuesGrid {
    ValuesGrid {
      values: rows
        .iter()
        .map(|r| r.iter().map(|c| (*c).to_string()).collect())
        .collect(),
    }
  }

  #[test]
  fn test_parse_strips_header_any_case() {
    for header in [["date", "hours"], ["Date", "Hours"], ["DATE", "HOURS"]] {
      let g = grid(&[&header, &["2024-01-01", "2.5"]]);
      let records = parse_records(&g);
      assert_eq!(records.len(), 1);
      assert_eq!(records[0].hours, 2.5);
    }
  }

  #[test]
  fn test_parse_skips_malformed_rows() {
    let g = grid(&[
      &["date", "hours"],
      &["2024-01-01", "2.5"],
      &["not-a-date", "1.0"],
      &["2024-01-02", "lots"],
      &["", ""],
      &["2024-01-03", "3.0"],
    ]);
    let records = parse_records(&g);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].hours, 3.0);
  }

  #[test]
  fn test_parse_sorts_and_dedupes() {
    let g = grid(&[
      &["2024-01-02", "2.0"],
      &["2024-01-01", "1.0"],
      &["2024-01-02", "5.0"],
    ]);
    let records = parse_records(&g);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date_string(), "2024-01-01");
    assert_eq!(records[1].hours, 5.0);
  }

  #[test]
  fn test_header_only_grid_is_empty_set() {
    let g = grid(&[&["date", "hours"]]);
    assert!(parse_records(&g).is_empty());
  }

  #[test]
  fn test_empty_set_writes_header_only() {
    let g = to_grid(&[]);
    assert_eq!(g.values.len(), 1);
    assert_eq!(g.values[0], vec!["date", "hours"]);
  }

  #[test]
  fn test_grid_round_trip() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let records = vec![StudyRecord::new(date, 1.5)];
    let parsed = parse_records(&to_grid(&records));
    assert_eq!(parsed, records);
  }
}
