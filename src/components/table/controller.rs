//! Table behavior without the DOM: filter, sort, and draft validation all
//! operate on the same canonical records the graph renders from.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::fields::{DOC_TYPE_PLACEHOLDER, DOCUMENT_FIELDS, REQUIRED_FIELDS};
use crate::ingest::RecordFields;
use crate::model::{DocType, Document};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
	Asc,
	Desc,
}

/// Sort and filter state. Rows are addressed by index into the document
/// list, which stays untouched; the view is recomputed, never mutated in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
	pub global_filter: String,
	pub filter_column: String,
	pub column_filter: String,
	sort: Vec<(String, SortDir)>,
}

impl Default for TableState {
	fn default() -> Self {
		Self {
			global_filter: String::new(),
			filter_column: DOCUMENT_FIELDS[0].key.to_string(),
			column_filter: String::new(),
			sort: Vec::new(),
		}
	}
}

impl TableState {
	/// Tri-state header click: ascending, then descending, then gone.
	/// Earlier-clicked columns stay primary while later ones break ties.
	pub fn toggle_sort(&mut self, key: &str) {
		match self.sort.iter().position(|(k, _)| k == key) {
			None => self.sort.push((key.to_string(), SortDir::Asc)),
			Some(i) => match self.sort[i].1 {
				SortDir::Asc => self.sort[i].1 = SortDir::Desc,
				SortDir::Desc => {
					self.sort.remove(i);
				}
			},
		}
	}

	pub fn sort_dir(&self, key: &str) -> Option<SortDir> {
		self.sort
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, dir)| *dir)
	}

	/// Indices of the documents to show, filtered then sorted. With no sort
	/// active the rows keep list (insertion) order; the sort is stable, so
	/// ties do too.
	pub fn visible_rows(&self, documents: &[Document]) -> Vec<usize> {
		let needle = self.global_filter.trim().to_lowercase();
		let column_needle = self.column_filter.trim().to_lowercase();

		let mut rows: Vec<usize> = (0..documents.len())
			.filter(|&i| {
				let doc = &documents[i];
				let global_ok = needle.is_empty()
					|| DOCUMENT_FIELDS
						.iter()
						.any(|f| doc.field(f.key).to_lowercase().contains(&needle));
				let column_ok = column_needle.is_empty()
					|| doc
						.field(&self.filter_column)
						.to_lowercase()
						.contains(&column_needle);
				global_ok && column_ok
			})
			.collect();

		if !self.sort.is_empty() {
			rows.sort_by(|&a, &b| {
				for (key, dir) in &self.sort {
					let va = documents[a].field(key).to_lowercase();
					let vb = documents[b].field(key).to_lowercase();
					let ord = match dir {
						SortDir::Asc => va.cmp(&vb),
						SortDir::Desc => vb.cmp(&va),
					};
					if ord != Ordering::Equal {
						return ord;
					}
				}
				Ordering::Equal
			});
		}
		rows
	}
}

/// Editable copy of a document's canonical fields. Edits go to the draft;
/// the row itself only changes once the store accepts the update.
pub fn draft_of(doc: &Document) -> RecordFields {
	DOCUMENT_FIELDS
		.iter()
		.map(|f| (f.key.to_string(), doc.field(f.key)))
		.collect()
}

/// Fresh fields for a create-insertion row.
pub fn empty_draft() -> RecordFields {
	DOCUMENT_FIELDS
		.iter()
		.map(|f| {
			let value = if f.key == "doc_type" {
				DOC_TYPE_PLACEHOLDER.to_string()
			} else {
				String::new()
			};
			(f.key.to_string(), value)
		})
		.collect()
}

/// Per-field validation for create and edit. An empty map means the draft
/// may be submitted; anything else blocks it.
pub fn validate(fields: &RecordFields) -> BTreeMap<String, String> {
	let mut errors = BTreeMap::new();
	for &key in REQUIRED_FIELDS {
		let value = fields.get(key).map(|v| v.trim()).unwrap_or_default();
		if key == "doc_type" {
			if value.is_empty() || value == DOC_TYPE_PLACEHOLDER {
				errors.insert(key.to_string(), "Please select a document type.".to_string());
			} else if value.parse::<DocType>().is_err() {
				errors.insert(
					key.to_string(),
					format!("\"{value}\" is not a recognized document type."),
				);
			}
		} else if value.is_empty() {
			errors.insert(key.to_string(), "This field is required.".to_string());
		}
	}
	errors
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::model::DocumentId;

	fn doc(id: DocumentId, doc_type: DocType, doc_id: &str, title: &str) -> Document {
		Document {
			id,
			project_id: Some("1".to_string()),
			doc_type,
			doc_id: Some(doc_id.to_string()),
			title: Some(title.to_string()),
			order: id as u32,
			linked_docs: Vec::new(),
			extra: BTreeMap::new(),
		}
	}

	fn fixture() -> Vec<Document> {
		vec![
			doc(1, DocType::Test, "T-2", "motor spin-up"),
			doc(2, DocType::Requirement, "R-1", "Motor torque"),
			doc(3, DocType::Design, "D-5", "gearbox layout"),
			doc(4, DocType::Requirement, "R-3", "housing seal"),
		]
	}

	#[test]
	fn third_header_click_restores_insertion_order() {
		let docs = fixture();
		let mut state = TableState::default();
		let unsorted = state.visible_rows(&docs);

		state.toggle_sort("doc_type");
		assert_eq!(state.sort_dir("doc_type"), Some(SortDir::Asc));
		let asc = state.visible_rows(&docs);
		assert_eq!(asc, vec![2, 1, 3, 0]);

		state.toggle_sort("doc_type");
		assert_eq!(state.sort_dir("doc_type"), Some(SortDir::Desc));
		let desc = state.visible_rows(&docs);
		assert_eq!(desc, vec![0, 1, 3, 2]);

		state.toggle_sort("doc_type");
		assert_eq!(state.sort_dir("doc_type"), None);
		assert_eq!(state.visible_rows(&docs), unsorted);
		assert_eq!(unsorted, vec![0, 1, 2, 3]);
	}

	#[test]
	fn sort_ties_keep_insertion_order() {
		let docs = fixture();
		let mut state = TableState::default();
		state.toggle_sort("doc_type");
		let rows = state.visible_rows(&docs);
		// the two Requirements stay in list order relative to each other
		let req_positions: Vec<_> = rows
			.iter()
			.filter(|&&i| docs[i].doc_type == DocType::Requirement)
			.collect();
		assert_eq!(req_positions, vec![&1, &3]);
	}

	#[test]
	fn later_sort_columns_break_ties() {
		let docs = fixture();
		let mut state = TableState::default();
		state.toggle_sort("doc_type");
		state.toggle_sort("doc_id");
		state.toggle_sort("doc_id");
		// Requirements sorted by doc_id descending within the type group
		assert_eq!(state.visible_rows(&docs), vec![2, 3, 1, 0]);
	}

	#[test]
	fn global_filter_matches_any_column_case_insensitively() {
		let docs = fixture();
		let mut state = TableState::default();
		state.global_filter = "MOTOR".to_string();
		assert_eq!(state.visible_rows(&docs), vec![0, 1]);
	}

	#[test]
	fn column_filter_only_searches_the_chosen_field() {
		let docs = fixture();
		let mut state = TableState::default();
		state.filter_column = "doc_id".to_string();
		state.column_filter = "r-".to_string();
		assert_eq!(state.visible_rows(&docs), vec![1, 3]);

		state.filter_column = "title".to_string();
		assert!(state.visible_rows(&docs).is_empty());
	}

	#[test]
	fn validation_reports_each_missing_field() {
		let errors = validate(&empty_draft());
		assert_eq!(errors.len(), REQUIRED_FIELDS.len());
		assert!(errors.contains_key("project_id"));
		assert!(errors.contains_key("doc_type"));
		assert!(errors.contains_key("doc_id"));
	}

	#[test]
	fn placeholder_and_unrecognized_doc_type_block_submission() {
		let mut fields = empty_draft();
		fields.insert("project_id".to_string(), "1".to_string());
		fields.insert("doc_id".to_string(), "R-9".to_string());

		fields.insert("doc_type".to_string(), DOC_TYPE_PLACEHOLDER.to_string());
		assert!(validate(&fields).contains_key("doc_type"));

		fields.insert("doc_type".to_string(), "Blueprint".to_string());
		assert!(validate(&fields).contains_key("doc_type"));

		fields.insert("doc_type".to_string(), "Requirement".to_string());
		assert!(validate(&fields).is_empty());
	}

	#[test]
	fn whitespace_only_values_do_not_pass() {
		let mut fields = empty_draft();
		fields.insert("project_id".to_string(), "   ".to_string());
		fields.insert("doc_type".to_string(), "Test".to_string());
		fields.insert("doc_id".to_string(), "T-1".to_string());
		let errors = validate(&fields);
		assert_eq!(errors.len(), 1);
		assert!(errors.contains_key("project_id"));
	}

	#[test]
	fn draft_mirrors_document_fields() {
		let d = doc(7, DocType::Risk, "K-1", "thermal runaway");
		let draft = draft_of(&d);
		assert_eq!(draft["project_id"], "1");
		assert_eq!(draft["doc_type"], "Risk");
		assert_eq!(draft["doc_id"], "K-1");
		assert_eq!(draft["title"], "thermal runaway");
	}
}
