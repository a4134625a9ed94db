//! CSV export of the rendered table. Pure string building; the download
//! trigger lives with the table view.

use crate::fields::FieldSpec;
use crate::model::Document;

fn quote(value: &str) -> String {
	format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize `documents` (already filtered/sorted by the caller) with one
/// header row of display labels and one quoted row per document.
pub fn table_to_csv(documents: &[Document], columns: &[FieldSpec]) -> String {
	let mut out = Vec::with_capacity(documents.len() + 1);
	out.push(
		columns
			.iter()
			.map(|c| quote(c.label))
			.collect::<Vec<_>>()
			.join(","),
	);
	for doc in documents {
		out.push(
			columns
				.iter()
				.map(|c| quote(&doc.field(c.key)))
				.collect::<Vec<_>>()
				.join(","),
		);
	}
	out.join("\n")
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::fields::DOCUMENT_FIELDS;
	use crate::model::DocType;

	#[test]
	fn header_row_uses_labels() {
		let csv = table_to_csv(&[], DOCUMENT_FIELDS);
		assert_eq!(
			csv,
			"\"Project ID\",\"Document Type\",\"Document ID\",\"Document Title\""
		);
	}

	#[test]
	fn values_are_quoted_and_escaped() {
		let doc = Document {
			id: 1,
			project_id: Some("9".to_string()),
			doc_type: DocType::Test,
			doc_id: Some("T-1".to_string()),
			title: Some("Pump \"wet\" test, phase 2".to_string()),
			order: 0,
			linked_docs: Vec::new(),
			extra: BTreeMap::new(),
		};
		let csv = table_to_csv(&[doc], DOCUMENT_FIELDS);
		let row = csv.lines().nth(1).unwrap();
		assert_eq!(row, "\"9\",\"Test\",\"T-1\",\"Pump \"\"wet\"\" test, phase 2\"");
	}
}
