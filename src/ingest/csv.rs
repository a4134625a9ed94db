//! CSV normalization: raw delimited text into ordered canonical field maps.
//!
//! The parser splits on commas and strips one pair of surrounding double
//! quotes per cell. Embedded commas or newlines inside quoted cells are NOT
//! supported; such files need pre-processing before import. A trailing `\r`
//! is stripped per line so CRLF exports import cleanly.

use std::collections::BTreeMap;
use std::fmt;

use crate::fields;

/// Canonical field key → trimmed, de-quoted value for one data row.
pub type RecordFields = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	#[error("CSV input needs a header row and at least one data row")]
	EmptyInput,
}

/// Why a row was dropped. Skips are diagnostics, never batch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
	InsufficientColumns { expected: usize, found: usize },
	MissingProjectId,
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SkipReason::InsufficientColumns { expected, found } => {
				write!(f, "insufficient columns (expected {expected}, found {found})")
			}
			SkipReason::MissingProjectId => write!(f, "missing project_id"),
		}
	}
}

/// One skipped row. `row` is the zero-based data-row index at the stage
/// that produced the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSkip {
	pub row: usize,
	pub reason: SkipReason,
}

/// Normalized rows plus the rows dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
	pub records: Vec<RecordFields>,
	pub skipped: Vec<RowSkip>,
}

fn clean_cell(raw: &str) -> &str {
	let trimmed = raw.trim();
	trimmed
		.strip_prefix('"')
		.and_then(|s| s.strip_suffix('"'))
		.unwrap_or(trimmed)
}

/// Parse raw CSV text into canonical records.
///
/// The first line is the header; empty header cells are dropped together
/// with their value columns. Retained headers map through the field table,
/// unknown ones pass through as extension fields. Rows shorter than the
/// retained header count are skipped with a diagnostic.
pub fn parse_csv(raw: &str) -> Result<ParsedCsv, ParseError> {
	let mut lines = raw.trim().lines();
	let header_line = lines.next().ok_or(ParseError::EmptyInput)?;

	// (original column index, canonical key) for each retained header cell
	let columns: Vec<(usize, String)> = header_line
		.split(',')
		.enumerate()
		.filter_map(|(idx, cell)| {
			let name = clean_cell(cell);
			if name.is_empty() {
				None
			} else {
				Some((idx, fields::canonical_key(name).to_string()))
			}
		})
		.collect();

	let mut parsed = ParsedCsv::default();
	let mut saw_data_row = false;

	for (row, line) in lines.enumerate() {
		saw_data_row = true;
		let values: Vec<&str> = line.split(',').map(clean_cell).collect();
		if values.len() < columns.len() {
			parsed.skipped.push(RowSkip {
				row,
				reason: SkipReason::InsufficientColumns {
					expected: columns.len(),
					found: values.len(),
				},
			});
			continue;
		}

		let record: RecordFields = columns
			.iter()
			.map(|(idx, key)| {
				let value = values.get(*idx).copied().unwrap_or_default();
				(key.clone(), value.to_string())
			})
			.collect();
		parsed.records.push(record);
	}

	if !saw_data_row {
		return Err(ParseError::EmptyInput);
	}
	Ok(parsed)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn header_only_is_empty_input() {
		assert_eq!(parse_csv(""), Err(ParseError::EmptyInput));
		assert_eq!(parse_csv("Project ID,Document ID"), Err(ParseError::EmptyInput));
		assert_eq!(parse_csv("Project ID,Document ID\n"), Err(ParseError::EmptyInput));
	}

	#[test]
	fn headers_map_through_field_table() {
		let parsed =
			parse_csv("Project ID,Document Type,Document ID\n1,Requirement,R-1").unwrap();
		assert_eq!(parsed.records.len(), 1);
		let rec = &parsed.records[0];
		assert_eq!(rec["project_id"], "1");
		assert_eq!(rec["doc_type"], "Requirement");
		assert_eq!(rec["doc_id"], "R-1");
		assert!(parsed.skipped.is_empty());
	}

	#[test]
	fn unknown_headers_become_extension_fields() {
		let parsed = parse_csv("Project ID,Reviewer\n1,ana").unwrap();
		assert_eq!(parsed.records[0]["Reviewer"], "ana");
	}

	#[test]
	fn empty_header_cells_drop_their_value_column() {
		let parsed = parse_csv("Project ID,,Document ID\n1,noise,R-1\n2,noise,R-2").unwrap();
		assert_eq!(parsed.records.len(), 2);
		for rec in &parsed.records {
			assert_eq!(rec.len(), 2);
			assert!(!rec.values().any(|v| v == "noise"));
		}
		assert_eq!(parsed.records[1]["doc_id"], "R-2");
	}

	#[test]
	fn short_rows_skip_with_diagnostic() {
		let parsed = parse_csv("Project ID,Document Type,Document ID\n1,Requirement\n2,Test,T-1")
			.unwrap();
		assert_eq!(parsed.records.len(), 1);
		assert_eq!(
			parsed.skipped,
			vec![RowSkip {
				row: 0,
				reason: SkipReason::InsufficientColumns { expected: 3, found: 2 },
			}]
		);
		assert_eq!(parsed.records[0]["doc_id"], "T-1");
	}

	#[test]
	fn quotes_and_whitespace_are_stripped() {
		let parsed = parse_csv("\"Project ID\", Document ID \n\"12\" , \"R 1\"").unwrap();
		let rec = &parsed.records[0];
		assert_eq!(rec["project_id"], "12");
		assert_eq!(rec["doc_id"], "R 1");
	}

	#[test]
	fn blank_values_stay_as_empty_strings() {
		let parsed = parse_csv("Project ID,Document Type,Document ID\n1,,R-1").unwrap();
		assert_eq!(parsed.records[0]["doc_type"], "");
	}

	#[test]
	fn crlf_input_parses_cleanly() {
		let parsed = parse_csv("Project ID,Document ID\r\n1,R-1\r\n2,R-2").unwrap();
		assert_eq!(parsed.records.len(), 2);
		assert_eq!(parsed.records[1]["doc_id"], "R-2");
	}
}
