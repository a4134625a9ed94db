//! Shared selection state: one document selected at a time, read and written
//! by both the graph and the table so neither view owns the other.

use std::collections::HashSet;

use crate::model::{Document, DocumentId};

/// Current selection. Lives in a signal owned by the page; views pass it
/// around explicitly instead of consulting a global.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	Idle,
	Selected(DocumentId),
}

impl Selection {
	pub fn selected(&self) -> Option<DocumentId> {
		match self {
			Selection::Idle => None,
			Selection::Selected(id) => Some(*id),
		}
	}

	/// Tap on a node or row. Replaces any previous selection.
	pub fn select(&mut self, id: DocumentId) {
		*self = Selection::Selected(id);
	}

	/// Tap on empty background, or an explicit clear.
	pub fn clear(&mut self) {
		*self = Selection::Idle;
	}

	/// Drop a selection whose document vanished from a refreshed list. The
	/// stale id is recovered from silently, never surfaced as an error.
	pub fn reconcile(&mut self, documents: &[Document]) {
		if let Selection::Selected(id) = *self
			&& !documents.iter().any(|d| d.id == id)
		{
			*self = Selection::Idle;
		}
	}
}

/// Closed neighborhood of `id`: the document itself plus every document
/// reachable over one outbound or inbound link. Ids absent from the list
/// contribute nothing, so the set never references a missing document.
pub fn connected_set(documents: &[Document], id: DocumentId) -> HashSet<DocumentId> {
	let present: HashSet<DocumentId> = documents.iter().map(|d| d.id).collect();
	if !present.contains(&id) {
		return HashSet::new();
	}

	let mut connected = HashSet::new();
	connected.insert(id);
	for doc in documents {
		for link in &doc.linked_docs {
			if doc.id == id && present.contains(&link.id) {
				connected.insert(link.id);
			} else if link.id == id {
				connected.insert(doc.id);
			}
		}
	}
	connected
}

/// Visual emphasis of a single element while a selection is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	Highlighted,
	Dimmed,
}

/// Highlighted/dimmed partition for the current selection. Every element is
/// exactly one of the two while a selection is active, and neither when idle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlights {
	active: bool,
	connected: HashSet<DocumentId>,
}

impl Highlights {
	pub fn compute(selection: Selection, documents: &[Document]) -> Self {
		match selection.selected() {
			None => Highlights::default(),
			Some(id) => Highlights {
				active: true,
				connected: connected_set(documents, id),
			},
		}
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn emphasis(&self, id: DocumentId) -> Option<Emphasis> {
		if !self.active {
			return None;
		}
		if self.connected.contains(&id) {
			Some(Emphasis::Highlighted)
		} else {
			Some(Emphasis::Dimmed)
		}
	}
}
