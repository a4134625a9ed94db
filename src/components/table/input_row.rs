use std::collections::BTreeMap;

use leptos::prelude::*;

use super::controller::{empty_draft, validate};
use crate::fields::{DOC_TYPE_PLACEHOLDER, DOCUMENT_FIELDS};
use crate::ingest::RecordFields;
use crate::model::DocType;

/// Empty input row for creating a document. Submission is blocked until
/// every required field validates; problems show up under their own cell.
#[component]
pub fn InputRow(
	#[prop(into)] on_create: Callback<RecordFields>,
	#[prop(into, optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
	let draft = RwSignal::new(empty_draft());
	let errors = RwSignal::new(BTreeMap::<String, String>::new());

	let set_field = move |key: &'static str, value: String| {
		draft.update(|d| {
			d.insert(key.to_string(), value);
		});
	};

	let clear = move |_| {
		draft.set(empty_draft());
		errors.set(BTreeMap::new());
	};

	let cancel = move |_| {
		draft.set(empty_draft());
		errors.set(BTreeMap::new());
		if let Some(cb) = on_cancel {
			cb.run(());
		}
	};

	let submit = move |_| {
		let fields = draft.get_untracked();
		let found = validate(&fields);
		if !found.is_empty() {
			errors.set(found);
			return;
		}
		errors.set(BTreeMap::new());
		draft.set(empty_draft());
		on_create.run(fields);
		if let Some(cb) = on_cancel {
			cb.run(());
		}
	};

	let cells = DOCUMENT_FIELDS
		.iter()
		.map(|field| {
			let key = field.key;
			let value = move || draft.with(|d| d.get(key).cloned().unwrap_or_default());
			let error = move || errors.with(|e| e.get(key).cloned());
			let has_error = move || errors.with(|e| e.contains_key(key));

			if key == "doc_type" {
				view! {
					<td>
						<select
							name=key
							class="user-select-input"
							class:input-error=has_error
							prop:value=value
							on:change=move |ev| set_field(key, event_target_value(&ev))
						>
							<option value=DOC_TYPE_PLACEHOLDER>{DOC_TYPE_PLACEHOLDER}</option>
							{DocType::ALL
								.iter()
								.map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
								.collect_view()}
						</select>
						{move || error().map(|msg| view! { <div class="error-message">{msg}</div> })}
					</td>
				}
				.into_any()
			} else {
				view! {
					<td>
						<input
							type="text"
							name=key
							placeholder=field.label
							class="user-text-input"
							class:input-error=has_error
							prop:value=value
							on:input=move |ev| set_field(key, event_target_value(&ev))
						/>
						{move || error().map(|msg| view! { <div class="error-message">{msg}</div> })}
					</td>
				}
				.into_any()
			}
		})
		.collect_view();

	view! {
		<tr class="input-row">
			{cells}
			<td class="text-center">
				<button type="button" class="icon-button done" title="Submit" on:click=submit>
					"✓"
				</button>
				<button type="button" class="icon-button clear" title="Clear" on:click=clear>
					"⌫"
				</button>
				<button type="button" class="icon-button cancel" title="Cancel" on:click=cancel>
					"✕"
				</button>
			</td>
		</tr>
	}
}
