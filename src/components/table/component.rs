use std::collections::BTreeMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::controller::{SortDir, TableState, draft_of, validate};
use super::input_row::InputRow;
use crate::fields::{DOC_TYPE_PLACEHOLDER, DOCUMENT_FIELDS};
use crate::ingest::{RecordFields, export};
use crate::model::{DocType, Document, DocumentId};

fn download_csv(filename: &str, contents: &str) {
	let parts = js_sys::Array::new();
	parts.push(&wasm_bindgen::JsValue::from_str(contents));
	let opts = web_sys::BlobPropertyBag::new();
	opts.set_type("text/csv");
	let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &opts) else {
		return;
	};
	let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
		return;
	};
	let document = web_sys::window().unwrap().document().unwrap();
	if let Ok(element) = document.create_element("a")
		&& let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>()
	{
		anchor.set_href(&url);
		anchor.set_download(filename);
		anchor.click();
	}
	let _ = web_sys::Url::revoke_object_url(&url);
}

/// Sortable, filterable, editable document table. Renders off the same
/// document list and selection signal as the graph.
#[component]
pub fn DocumentTable(
	#[prop(into)] documents: Signal<Vec<Document>>,
	#[prop(into)] selected: Signal<Option<DocumentId>>,
	#[prop(into)] on_select: Callback<Option<DocumentId>>,
	#[prop(into)] on_create: Callback<RecordFields>,
	#[prop(into)] on_update: Callback<(DocumentId, RecordFields)>,
	#[prop(into)] on_delete: Callback<DocumentId>,
) -> impl IntoView {
	let state = RwSignal::new(TableState::default());
	let active_input_row = RwSignal::new(None::<DocumentId>);

	let on_add = Callback::new(move |id: DocumentId| {
		active_input_row.update(|a| *a = if *a == Some(id) { None } else { Some(id) });
	});
	let close_input = Callback::new(move |_: ()| active_input_row.set(None));
	let create_and_close = Callback::new(move |fields: RecordFields| {
		on_create.run(fields);
		active_input_row.set(None);
	});

	let export_csv = move |_| {
		let docs = documents.get_untracked();
		let visible: Vec<Document> = state
			.with_untracked(|s| s.visible_rows(&docs))
			.into_iter()
			.map(|i| docs[i].clone())
			.collect();
		download_csv("documents.csv", &export::table_to_csv(&visible, DOCUMENT_FIELDS));
	};

	let headers = DOCUMENT_FIELDS
		.iter()
		.map(|field| {
			let key = field.key;
			view! {
				<th on:click=move |_| state.update(|s| s.toggle_sort(key))>
					{field.label}
					{move || match state.with(|s| s.sort_dir(key)) {
						Some(SortDir::Asc) => " ▲",
						Some(SortDir::Desc) => " ▼",
						None => "",
					}}
				</th>
			}
		})
		.collect_view();

	view! {
		<div class="filter-container">
			<div class="filter-box">
				<label for="column-select" class="filter-label">"Filter Column:"</label>
				<select
					id="column-select"
					class="filter-select"
					prop:value=move || state.with(|s| s.filter_column.clone())
					on:change=move |ev| state.update(|s| s.filter_column = event_target_value(&ev))
				>
					{DOCUMENT_FIELDS
						.iter()
						.map(|f| view! { <option value=f.key>{f.label}</option> })
						.collect_view()}
				</select>

				<label for="column-filter" class="filter-label">"Search:"</label>
				<input
					id="column-filter"
					class="filter-input"
					type="text"
					prop:value=move || state.with(|s| s.column_filter.clone())
					on:input=move |ev| state.update(|s| s.column_filter = event_target_value(&ev))
				/>

				<label for="global-filter" class="filter-label">"Search All:"</label>
				<input
					id="global-filter"
					class="filter-input"
					type="text"
					prop:value=move || state.with(|s| s.global_filter.clone())
					on:input=move |ev| state.update(|s| s.global_filter = event_target_value(&ev))
				/>

				<button type="button" class="btn-dark" on:click=export_csv>
					"Export CSV"
				</button>
			</div>

			<div class="table-section">
				<table class="data-table">
					<thead>
						<tr>
							{headers}
							<th></th>
						</tr>
					</thead>
					<tbody>
						{move || {
							let docs = documents.get();
							if docs.is_empty() {
								return view! { <InputRow on_create=on_create /> }.into_any();
							}
							let visible = state.with(|s| s.visible_rows(&docs));
							visible
								.into_iter()
								.map(|i| {
									let document = docs[i].clone();
									let id = document.id;
									view! {
										<TableRow
											document=document
											selected=selected
											on_select=on_select
											on_update=on_update
											on_delete=on_delete
											on_add=on_add
										/>
										{move || {
											(active_input_row.get() == Some(id))
												.then(|| {
													view! {
														<InputRow
															on_create=create_and_close
															on_cancel=close_input
														/>
													}
												})
										}}
									}
								})
								.collect_view()
								.into_any()
						}}
					</tbody>
				</table>
			</div>
		</div>
	}
}

/// One document row. Edits go to a local draft; the displayed row only
/// changes once the store accepts the update and the list refreshes.
#[component]
fn TableRow(
	document: Document,
	#[prop(into)] selected: Signal<Option<DocumentId>>,
	#[prop(into)] on_select: Callback<Option<DocumentId>>,
	#[prop(into)] on_update: Callback<(DocumentId, RecordFields)>,
	#[prop(into)] on_delete: Callback<DocumentId>,
	#[prop(into)] on_add: Callback<DocumentId>,
) -> impl IntoView {
	let id = document.id;
	let doc = StoredValue::new(document);
	let row_ref = NodeRef::<leptos::html::Tr>::new();
	let editing = RwSignal::new(false);
	let draft = RwSignal::new(RecordFields::new());
	let errors = RwSignal::new(BTreeMap::<String, String>::new());

	let highlighted = Memo::new(move |_| selected.get() == Some(id));

	// one deterministic scroll per selection change, driven by the signal
	Effect::new(move |_| {
		if highlighted.get()
			&& let Some(row) = row_ref.get()
		{
			let opts = ScrollIntoViewOptions::new();
			opts.set_behavior(ScrollBehavior::Smooth);
			opts.set_block(ScrollLogicalPosition::Center);
			row.scroll_into_view_with_scroll_into_view_options(&opts);
		}
	});

	let set_field = move |key: &'static str, value: String| {
		draft.update(|d| {
			d.insert(key.to_string(), value);
		});
	};

	let start_edit = move |_| {
		errors.set(BTreeMap::new());
		draft.set(doc.with_value(draft_of));
		editing.set(true);
	};

	let cancel_edit = move |_| {
		errors.set(BTreeMap::new());
		editing.set(false);
	};

	let save_edit = move |_| {
		let fields = draft.get_untracked();
		let found = validate(&fields);
		if !found.is_empty() {
			errors.set(found);
			return;
		}
		errors.set(BTreeMap::new());
		editing.set(false);
		on_update.run((id, fields));
	};

	let cells = DOCUMENT_FIELDS
		.iter()
		.map(|field| {
			let key = field.key;
			let value = move || draft.with(|d| d.get(key).cloned().unwrap_or_default());
			let error = move || errors.with(|e| e.get(key).cloned());
			view! {
				<td>
					{move || {
						if !editing.get() {
							return doc.with_value(|d| d.field(key)).into_any();
						}
						if key == "doc_type" {
							view! {
								<select
									name=key
									class="user-select-input"
									prop:value=value
									on:change=move |ev| set_field(key, event_target_value(&ev))
								>
									<option value=DOC_TYPE_PLACEHOLDER disabled=true>
										"Select Document Type"
									</option>
									{DocType::ALL
										.iter()
										.map(|t| {
											view! { <option value=t.as_str()>{t.as_str()}</option> }
										})
										.collect_view()}
								</select>
								{move || {
									error().map(|msg| view! { <div class="error-message">{msg}</div> })
								}}
							}
							.into_any()
						} else {
							view! {
								<input
									name=key
									class="user-text-input"
									prop:value=value
									on:input=move |ev| set_field(key, event_target_value(&ev))
								/>
								{move || {
									error().map(|msg| view! { <div class="error-message">{msg}</div> })
								}}
							}
							.into_any()
						}
					}}
				</td>
			}
		})
		.collect_view();

	view! {
		<tr
			node_ref=row_ref
			class:highlighted-row=move || highlighted.get()
			on:click=move |_| on_select.run(Some(id))
			style="cursor: pointer;"
		>
			{cells}
			<td class="text-center">
				{move || {
					if editing.get() {
						view! {
							<button type="button" class="icon-button done" title="Save" on:click=save_edit>
								"✓"
							</button>
							<button
								type="button"
								class="icon-button cancel"
								title="Cancel"
								on:click=cancel_edit
							>
								"✕"
							</button>
						}
						.into_any()
					} else {
						view! {
							<button
								type="button"
								class="icon-button add"
								title="Add below"
								on:click=move |_| on_add.run(id)
							>
								"+"
							</button>
							<button type="button" class="icon-button edit" title="Edit" on:click=start_edit>
								"✎"
							</button>
							<button
								type="button"
								class="icon-button delete"
								title="Delete"
								on:click=move |_| on_delete.run(id)
							>
								"🗑"
							</button>
						}
						.into_any()
					}
				}}
			</td>
		</tr>
	}
}
