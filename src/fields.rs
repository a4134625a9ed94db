//! Field mapping table: canonical field keys, display labels, and the
//! header lookups used by CSV ingestion and the table columns.

/// One canonical document field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
	pub key: &'static str,
	pub label: &'static str,
}

/// Canonical field list. Order here is column order in the table and the
/// export. Labels are unique so label→key and key→label stay inverses.
pub const DOCUMENT_FIELDS: &[FieldSpec] = &[
	FieldSpec { key: "project_id", label: "Project ID" },
	FieldSpec { key: "doc_type", label: "Document Type" },
	FieldSpec { key: "doc_id", label: "Document ID" },
	FieldSpec { key: "title", label: "Document Title" },
];

/// Fields that must be non-empty when creating or editing a document.
pub const REQUIRED_FIELDS: &[&str] = &["project_id", "doc_type", "doc_id"];

/// Placeholder shown in the document-type picker before a real choice.
pub const DOC_TYPE_PLACEHOLDER: &str = "---";

pub fn key_for_label(label: &str) -> Option<&'static str> {
	DOCUMENT_FIELDS
		.iter()
		.find(|f| f.label == label)
		.map(|f| f.key)
}

pub fn label_for_key(key: &str) -> Option<&'static str> {
	DOCUMENT_FIELDS
		.iter()
		.find(|f| f.key == key)
		.map(|f| f.label)
}

/// Map a raw CSV header to its canonical key. Unknown headers pass through
/// unchanged and become extension fields rather than being dropped.
pub fn canonical_key(header: &str) -> &str {
	key_for_label(header).unwrap_or(header)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn label_key_round_trip() {
		for field in DOCUMENT_FIELDS {
			let key = key_for_label(field.label).unwrap();
			assert_eq!(key, field.key);
			assert_eq!(label_for_key(key), Some(field.label));
		}
	}

	#[test]
	fn labels_are_unique() {
		for (i, a) in DOCUMENT_FIELDS.iter().enumerate() {
			for b in &DOCUMENT_FIELDS[i + 1..] {
				assert_ne!(a.label, b.label);
				assert_ne!(a.key, b.key);
			}
		}
	}

	#[test]
	fn unknown_headers_pass_through() {
		assert_eq!(canonical_key("Project ID"), "project_id");
		assert_eq!(canonical_key("Reviewer"), "Reviewer");
	}

	#[test]
	fn required_fields_are_canonical() {
		for key in REQUIRED_FIELDS {
			assert!(label_for_key(key).is_some());
		}
	}
}
