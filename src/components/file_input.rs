use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

/// File picker for CSV import. Reads the chosen file in the browser and
/// hands the raw text to the caller.
#[component]
pub fn FileInput(#[prop(into)] on_text: Callback<String>) -> impl IntoView {
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let error = RwSignal::new(String::new());

	let read_file = move |_| {
		let Some(input) = input_ref.get() else {
			return;
		};
		let Some(file) = input.files().and_then(|list| list.get(0)) else {
			error.set("Please select a file to read.".to_string());
			return;
		};
		error.set(String::new());
		spawn_local(async move {
			match JsFuture::from(file.text()).await {
				Ok(text) => on_text.run(text.as_string().unwrap_or_default()),
				Err(_) => error.set("Could not read the selected file.".to_string()),
			}
		});
	};

	view! {
		<form class="action-form" id="upload-form" on:submit=|ev| ev.prevent_default()>
			<div class="center-file-input">
				<input
					type="file"
					id="file-upload"
					name="file-upload"
					accept=".csv"
					class="custom-input"
					node_ref=input_ref
				/>
				<button type="button" class="btn-dark" on:click=read_file>
					"Read File"
				</button>
			</div>
			{move || {
				let msg = error.get();
				(!msg.is_empty()).then(|| view! { <p class="error-message">{msg}</p> })
			}}
		</form>
	}
}
