//! CSV ingestion pipeline: normalize raw text, then submit records to the
//! store sequentially, reporting per-row outcomes.

pub mod csv;
pub mod export;
pub mod sequencer;

use std::fmt;

pub use csv::{ParseError, ParsedCsv, RecordFields, RowSkip, SkipReason};
pub use sequencer::{BatchReport, CanonicalRecord, RowFailure};

use crate::model::Document;

/// Parse `raw` and run the full batch through `submit`. A malformed input
/// aborts before anything is submitted; row-level problems only show up in
/// the report.
pub async fn ingest_csv<F, Fut, E>(raw: &str, submit: F) -> Result<BatchReport, ParseError>
where
	F: FnMut(CanonicalRecord) -> Fut,
	Fut: Future<Output = Result<Document, E>>,
	E: fmt::Display,
{
	let parsed = csv::parse_csv(raw)?;
	let mut report = sequencer::run_batch(parsed.records, submit).await;
	// parse-stage skips come first; they were dropped earliest
	let mut skipped = parsed.skipped;
	skipped.append(&mut report.skipped);
	report.skipped = skipped;
	Ok(report)
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::model::DocType;

	#[test]
	fn parse_and_sequencer_skips_are_merged() {
		let raw = "Project ID,Document Type,Document ID\n1,Requirement\n,Test,T-1\n2,Risk,K-1";
		let report = block_on(ingest_csv(raw, |rec| async move {
			Ok::<_, String>(Document {
				id: 1,
				project_id: rec.fields.get("project_id").cloned(),
				doc_type: DocType::Unknown,
				doc_id: rec.fields.get("doc_id").cloned(),
				title: None,
				order: rec.order,
				linked_docs: Vec::new(),
				extra: Default::default(),
			})
		}))
		.unwrap();

		assert_eq!(report.created.len(), 1);
		assert_eq!(report.skipped.len(), 2);
		assert!(matches!(
			report.skipped[0].reason,
			SkipReason::InsufficientColumns { .. }
		));
		assert_eq!(report.skipped[1].reason, SkipReason::MissingProjectId);
	}

	#[test]
	fn malformed_input_blocks_the_batch() {
		let called = std::cell::Cell::new(false);
		let result = block_on(ingest_csv("Project ID,Document ID", |_rec| {
			called.set(true);
			async move {
				Err::<Document, _>("unreachable".to_string())
			}
		}));
		assert_eq!(result.unwrap_err(), ParseError::EmptyInput);
		assert!(!called.get());
	}
}
