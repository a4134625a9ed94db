//! Bulk ingestion: walk normalized records in order, submit one at a time,
//! and collect per-row outcomes instead of failing the whole batch.

use std::fmt;

use log::{info, warn};

use crate::ingest::csv::{RecordFields, RowSkip, SkipReason};
use crate::model::Document;

/// One record ready for submission: cleaned fields plus the position it had
/// in the source, so the original row order survives any later sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
	pub order: u32,
	pub fields: RecordFields,
}

/// A row the store rejected. The batch keeps going past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
	pub row: usize,
	pub message: String,
}

/// Aggregate outcome of one ingestion batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
	pub created: Vec<Document>,
	pub skipped: Vec<RowSkip>,
	pub failed: Vec<RowFailure>,
}

impl BatchReport {
	pub fn summary(&self) -> String {
		format!(
			"{} created, {} skipped, {} failed",
			self.created.len(),
			self.skipped.len(),
			self.failed.len()
		)
	}
}

/// Submit `records` through `submit`, strictly one at a time.
///
/// Per record: attach `order` from its position, drop empty-valued keys,
/// skip rows without a `project_id`, then await the store's answer before
/// touching the next row. Failures are recorded, not fatal.
pub async fn run_batch<F, Fut, E>(records: Vec<RecordFields>, mut submit: F) -> BatchReport
where
	F: FnMut(CanonicalRecord) -> Fut,
	Fut: Future<Output = Result<Document, E>>,
	E: fmt::Display,
{
	let mut report = BatchReport::default();

	for (row, fields) in records.into_iter().enumerate() {
		let cleaned: RecordFields = fields
			.into_iter()
			.filter(|(_, value)| !value.is_empty())
			.collect();

		if !cleaned.contains_key("project_id") {
			warn!("row {row}: skipped, no project_id");
			report.skipped.push(RowSkip {
				row,
				reason: SkipReason::MissingProjectId,
			});
			continue;
		}

		let record = CanonicalRecord {
			order: row as u32,
			fields: cleaned,
		};
		match submit(record).await {
			Ok(doc) => report.created.push(doc),
			Err(err) => {
				warn!("row {row}: submission failed: {err}");
				report.failed.push(RowFailure {
					row,
					message: err.to_string(),
				});
			}
		}
	}

	info!("ingestion batch done: {}", report.summary());
	report
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::BTreeMap;

	use futures::executor::block_on;

	use super::*;
	use crate::ingest::csv::parse_csv;
	use crate::model::{DocType, DocumentId};

	fn stored(id: DocumentId, record: &CanonicalRecord) -> Document {
		Document {
			id,
			project_id: record.fields.get("project_id").cloned(),
			doc_type: record
				.fields
				.get("doc_type")
				.and_then(|t| t.parse().ok())
				.unwrap_or(DocType::Unknown),
			doc_id: record.fields.get("doc_id").cloned(),
			title: record.fields.get("title").cloned(),
			order: record.order,
			linked_docs: Vec::new(),
			extra: BTreeMap::new(),
		}
	}

	fn record(pairs: &[(&str, &str)]) -> RecordFields {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn two_row_csv_creates_both_in_order() {
		let parsed =
			parse_csv("Project ID,Document Type,Document ID\n1,Requirement,R-1\n2,Test,T-1")
				.unwrap();
		let submitted = RefCell::new(Vec::new());
		let report = block_on(run_batch(parsed.records, |rec| {
			submitted.borrow_mut().push(rec.clone());
			let id = submitted.borrow().len() as DocumentId;
			async move { Ok::<_, String>(stored(id, &rec)) }
		}));

		assert_eq!(report.created.len(), 2);
		assert!(report.skipped.is_empty());
		assert!(report.failed.is_empty());
		let orders: Vec<_> = report.created.iter().map(|d| d.order).collect();
		assert_eq!(orders, vec![0, 1]);
		assert_eq!(report.created[0].project_id.as_deref(), Some("1"));
		assert_eq!(report.created[1].project_id.as_deref(), Some("2"));
		assert_eq!(submitted.borrow().len(), 2);
	}

	#[test]
	fn blank_project_id_skips_row() {
		let parsed = parse_csv("Project ID,Document Type,Document ID\n,Requirement,R-1").unwrap();
		let report = block_on(run_batch(parsed.records, |rec| async move {
			Ok::<_, String>(stored(1, &rec))
		}));

		assert!(report.created.is_empty());
		assert_eq!(report.skipped.len(), 1);
		assert_eq!(report.skipped[0].reason, SkipReason::MissingProjectId);
	}

	#[test]
	fn empty_values_are_stripped_before_submit() {
		let records = vec![record(&[("project_id", "1"), ("doc_id", "R-1"), ("title", "")])];
		let submitted = RefCell::new(Vec::new());
		let report = block_on(run_batch(records, |rec| {
			submitted.borrow_mut().push(rec.clone());
			async move { Ok::<_, String>(stored(1, &rec)) }
		}));

		assert_eq!(report.created.len(), 1);
		let sent = &submitted.borrow()[0];
		assert!(!sent.fields.contains_key("title"));
		assert_eq!(sent.fields.len(), 2);
	}

	#[test]
	fn one_failure_does_not_stop_the_batch() {
		let records = vec![
			record(&[("project_id", "1"), ("doc_id", "A")]),
			record(&[("project_id", "2"), ("doc_id", "B")]),
			record(&[("project_id", "3"), ("doc_id", "C")]),
		];
		let report = block_on(run_batch(records, |rec| async move {
			if rec.fields["doc_id"] == "B" {
				Err("duplicate doc_id".to_string())
			} else {
				Ok(stored(rec.order as DocumentId + 1, &rec))
			}
		}));

		assert_eq!(report.created.len(), 2);
		assert_eq!(report.failed.len(), 1);
		assert_eq!(report.failed[0].row, 1);
		assert_eq!(report.failed[0].message, "duplicate doc_id");
		// later rows keep their true positions
		assert_eq!(report.created[1].order, 2);
		assert_eq!(report.summary(), "2 created, 0 skipped, 1 failed");
	}
}
