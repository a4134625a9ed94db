use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{A, Redirect};

use crate::api::{DocStore, auth};
use crate::components::file_input::FileInput;
use crate::ingest::{self, BatchReport};

/// CSV import page. Parses the uploaded file and submits rows one at a
/// time, then shows the per-batch outcome.
#[component]
pub fn Home() -> impl IntoView {
	if !auth::is_authenticated() {
		return view! { <Redirect path="/login" /> }.into_any();
	}

	let report = RwSignal::new(None::<BatchReport>);
	let parse_error = RwSignal::new(None::<String>);
	let importing = RwSignal::new(false);

	let on_text = Callback::new(move |text: String| {
		if importing.get_untracked() {
			return;
		}
		importing.set(true);
		spawn_local(async move {
			let store = DocStore::from_env();
			let outcome = ingest::ingest_csv(&text, |record| {
				let store = store.clone();
				async move { store.create_document(&record).await }
			})
			.await;
			match outcome {
				Ok(batch) => {
					parse_error.set(None);
					report.set(Some(batch));
				}
				Err(err) => {
					report.set(None);
					parse_error.set(Some(err.to_string()));
				}
			}
			importing.set(false);
		});
	});

	view! {
		<div class="import-page">
			<h1>"Import Documents"</h1>
			<p class="subtitle">"Upload a CSV with a header row; rows import in file order."</p>
			<FileInput on_text=on_text />
			{move || importing.get().then(|| view! { <p class="import-progress">"Importing..."</p> })}
			{move || parse_error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
			{move || {
				report
					.get()
					.map(|batch| {
						view! {
							<div class="import-report">
								<p class="report-summary">{batch.summary()}</p>
								<ul class="report-rows">
									{batch
										.skipped
										.iter()
										.map(|skip| {
											view! {
												<li>{format!("Row {} skipped: {}", skip.row, skip.reason)}</li>
											}
										})
										.collect_view()}
									{batch
										.failed
										.iter()
										.map(|failure| {
											view! {
												<li>{format!("Row {} failed: {}", failure.row, failure.message)}</li>
											}
										})
										.collect_view()}
								</ul>
							</div>
						}
					})
			}}
			<p>
				<A href="/">"Back to the trace view"</A>
			</p>
		</div>
	}
	.into_any()
}
