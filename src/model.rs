//! Canonical document records shared by the graph and table views.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type DocumentId = u64;

/// Order assigned to records that never went through ingestion; sorts after
/// every explicitly ordered document.
pub const ORDER_UNSET: u32 = 9999;

fn order_unset() -> u32 {
	ORDER_UNSET
}

/// Document category. Unrecognized values deserialize as `Unknown` rather
/// than failing the whole list fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
	Risk,
	Requirement,
	Specification,
	Design,
	Test,
	Task,
	Development,
	#[default]
	#[serde(other)]
	Unknown,
}

impl DocType {
	/// Categories a user may pick when creating or editing a document.
	pub const ALL: &'static [DocType] = &[
		DocType::Risk,
		DocType::Requirement,
		DocType::Specification,
		DocType::Design,
		DocType::Test,
		DocType::Task,
		DocType::Development,
	];

	/// Node color for this category.
	pub fn color(&self) -> &'static str {
		match self {
			DocType::Requirement => "#1f77b4",
			DocType::Design => "#ff7f0e",
			DocType::Test => "#2ca02c",
			DocType::Specification => "#d62728",
			DocType::Task => "#9467bd",
			DocType::Development => "#8c564b",
			DocType::Risk => "#e377c2",
			DocType::Unknown => "gray",
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			DocType::Risk => "Risk",
			DocType::Requirement => "Requirement",
			DocType::Specification => "Specification",
			DocType::Design => "Design",
			DocType::Test => "Test",
			DocType::Task => "Task",
			DocType::Development => "Development",
			DocType::Unknown => "Unknown",
		}
	}
}

impl fmt::Display for DocType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DocType {
	type Err = ();

	/// Strict parse for user input: only the real categories are accepted,
	/// never `Unknown` or a placeholder.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		DocType::ALL
			.iter()
			.copied()
			.find(|t| t.as_str() == s)
			.ok_or(())
	}
}

/// Outbound reference to another document. Extra payload on the link is
/// ignored; only the target id matters here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocLink {
	pub id: DocumentId,
}

/// A tracked document as returned by the store. Fields vary across
/// deployments, so everything beyond the named set lands in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
	pub id: DocumentId,
	#[serde(default)]
	pub project_id: Option<String>,
	#[serde(default)]
	pub doc_type: DocType,
	#[serde(default)]
	pub doc_id: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default = "order_unset")]
	pub order: u32,
	#[serde(default)]
	pub linked_docs: Vec<DocLink>,
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl Document {
	/// Stringified value of a field for display, filtering, sorting and
	/// export. Unknown keys fall back to the extension map.
	pub fn field(&self, key: &str) -> String {
		match key {
			"id" => self.id.to_string(),
			"project_id" => self.project_id.clone().unwrap_or_default(),
			"doc_type" => self.doc_type.to_string(),
			"doc_id" => self.doc_id.clone().unwrap_or_default(),
			"title" => self.title.clone().unwrap_or_default(),
			"order" => self.order.to_string(),
			other => match self.extra.get(other) {
				Some(serde_json::Value::String(s)) => s.clone(),
				Some(v) => v.to_string(),
				None => String::new(),
			},
		}
	}

	/// Display label: explicit title, then business id, then a synthesized
	/// fallback so every node gets something readable.
	pub fn label(&self) -> String {
		if let Some(title) = self.title.as_deref()
			&& !title.trim().is_empty()
		{
			return title.to_string();
		}
		if let Some(doc_id) = self.doc_id.as_deref()
			&& !doc_id.trim().is_empty()
		{
			return doc_id.to_string();
		}
		format!("Doc {}", self.id)
	}
}

/// Sort by ingestion order, ties kept in list position. Un-ordered legacy
/// records carry the sentinel and end up last.
pub fn sort_by_order(documents: &mut [Document]) {
	documents.sort_by_key(|d| d.order);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc(id: DocumentId, order: u32, doc_id: &str) -> Document {
		Document {
			id,
			project_id: None,
			doc_type: DocType::Unknown,
			doc_id: Some(doc_id.to_string()),
			title: None,
			order,
			linked_docs: Vec::new(),
			extra: BTreeMap::new(),
		}
	}

	#[test]
	fn missing_order_defaults_to_sentinel() {
		let d: Document = serde_json::from_str(r#"{"id": 7}"#).unwrap();
		assert_eq!(d.order, ORDER_UNSET);
		assert_eq!(d.doc_type, DocType::Unknown);
		assert!(d.linked_docs.is_empty());
	}

	#[test]
	fn unknown_doc_type_falls_back() {
		let d: Document =
			serde_json::from_str(r#"{"id": 1, "doc_type": "Blueprint"}"#).unwrap();
		assert_eq!(d.doc_type, DocType::Unknown);
		assert_eq!(d.doc_type.color(), "gray");
	}

	#[test]
	fn unrecognized_fields_land_in_extra() {
		let d: Document =
			serde_json::from_str(r#"{"id": 1, "created_at": "2024-01-01", "Agile PN": "A-1"}"#)
				.unwrap();
		assert_eq!(d.field("Agile PN"), "A-1");
		assert_eq!(d.field("created_at"), "2024-01-01");
		assert_eq!(d.field("nonexistent"), "");
	}

	#[test]
	fn sort_is_stable_with_sentinel_last() {
		let mut docs = vec![
			doc(1, ORDER_UNSET, "legacy-a"),
			doc(2, 1, "b"),
			doc(3, 0, "a"),
			doc(4, 1, "c"),
			doc(5, ORDER_UNSET, "legacy-b"),
		];
		sort_by_order(&mut docs);
		let ids: Vec<_> = docs.iter().map(|d| d.id).collect();
		assert_eq!(ids, vec![3, 2, 4, 1, 5]);
	}

	#[test]
	fn label_falls_back_in_order() {
		let mut d = doc(42, 0, "R-42");
		d.title = Some("Pump requirements".to_string());
		assert_eq!(d.label(), "Pump requirements");
		d.title = Some("   ".to_string());
		assert_eq!(d.label(), "R-42");
		d.doc_id = None;
		assert_eq!(d.label(), "Doc 42");
	}

	#[test]
	fn strict_parse_rejects_placeholder_and_unknown() {
		assert_eq!("Requirement".parse::<DocType>(), Ok(DocType::Requirement));
		assert!("---".parse::<DocType>().is_err());
		assert!("Unknown".parse::<DocType>().is_err());
		assert!("blueprint".parse::<DocType>().is_err());
	}
}
