use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use log::warn;

use crate::api::{DocStore, auth};
use crate::components::graph::{DocumentGraphCanvas, build_graph};
use crate::components::table::DocumentTable;
use crate::ingest::{CanonicalRecord, RecordFields};
use crate::model::{Document, DocumentId, ORDER_UNSET, sort_by_order};
use crate::selection::Selection;

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Replace the list wholesale from the store, keeping the previous list on
/// failure and dropping a selection whose document is gone.
async fn load_documents(documents: RwSignal<Vec<Document>>, selection: RwSignal<Selection>) {
	let store = DocStore::from_env();
	match store.list_documents_with_links().await {
		Ok(mut docs) => {
			sort_by_order(&mut docs);
			selection.update(|sel| sel.reconcile(&docs));
			documents.set(docs);
		}
		Err(err) => {
			warn!("document fetch failed: {err}");
			alert(&format!("Failed to load documents: {err}"));
		}
	}
}

/// Traceability view: the force graph and the table render off the same
/// document list, and both read and write one shared selection.
#[component]
pub fn Traces() -> impl IntoView {
	if !auth::is_authenticated() {
		return view! { <Redirect path="/login" /> }.into_any();
	}

	let documents = RwSignal::new(Vec::<Document>::new());
	let selection = RwSignal::new(Selection::default());

	Effect::new(move |_| {
		spawn_local(load_documents(documents, selection));
	});

	let graph_data = Memo::new(move |_| documents.with(|docs| build_graph(docs)));
	let selected = Signal::derive(move || selection.get().selected());

	let on_select = Callback::new(move |sel: Option<DocumentId>| {
		selection.update(|s| match sel {
			Some(id) => s.select(id),
			None => s.clear(),
		});
	});

	let on_create = Callback::new(move |fields: RecordFields| {
		spawn_local(async move {
			// interactive creates carry the sentinel and sort last
			let record = CanonicalRecord {
				order: ORDER_UNSET,
				fields,
			};
			let store = DocStore::from_env();
			match store.create_document(&record).await {
				Ok(_) => load_documents(documents, selection).await,
				Err(err) => alert(&format!("Failed to make document: {err}")),
			}
		});
	});

	let on_update = Callback::new(move |(id, fields): (DocumentId, RecordFields)| {
		spawn_local(async move {
			let store = DocStore::from_env();
			match store.update_document(id, &fields).await {
				Ok(_) => load_documents(documents, selection).await,
				Err(err) => alert(&format!("Failed to update document: {err}")),
			}
		});
	});

	let on_delete = Callback::new(move |id: DocumentId| {
		spawn_local(async move {
			let store = DocStore::from_env();
			match store.delete_document(id).await {
				Ok(()) => load_documents(documents, selection).await,
				Err(err) => alert(&format!("Failed to delete document: {err}")),
			}
		});
	});

	// clicks that land on the page itself (not the canvas or the table)
	// clear the selection, mirroring a background tap in the graph
	let clear_on_background = move |ev: leptos::ev::MouseEvent| {
		if let (Some(target), Some(current)) = (ev.target(), ev.current_target())
			&& target == current
		{
			selection.update(|s| s.clear());
		}
	};

	view! {
		<div class="traces-page" on:mousedown=clear_on_background>
			<div class="graph-section">
				<DocumentGraphCanvas
					data=graph_data
					selected=selected
					on_select=on_select
					width=Some(960.0)
					height=Some(520.0)
				/>
			</div>
			<DocumentTable
				documents=documents
				selected=selected
				on_select=on_select
				on_create=on_create
				on_update=on_update
				on_delete=on_delete
			/>
		</div>
	}
	.into_any()
}
