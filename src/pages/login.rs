use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{DocStore, auth};

/// Username/password exchange for the bearer-token pair. The tokens are
/// opaque here; the store is the only party that interprets them.
#[component]
pub fn Login() -> impl IntoView {
	let username = RwSignal::new(String::new());
	let password = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);
	let navigate = use_navigate();

	let submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let navigate = navigate.clone();
		spawn_local(async move {
			let user = username.get_untracked();
			let pass = password.get_untracked();
			let store = DocStore::from_env();
			match auth::login(&store, user.trim(), pass.trim()).await {
				Ok(()) => navigate("/", Default::default()),
				Err(err) => error.set(Some(format!("Login failed: {err}"))),
			}
		});
	};

	view! {
		<div class="login-page">
			<h1>"Sign In"</h1>
			<form class="login-form" on:submit=submit>
				<input
					type="text"
					name="username"
					placeholder="Username"
					prop:value=move || username.get()
					on:input=move |ev| username.set(event_target_value(&ev))
				/>
				<input
					type="password"
					name="password"
					placeholder="Password"
					prop:value=move || password.get()
					on:input=move |ev| password.set(event_target_value(&ev))
				/>
				<button type="submit" class="btn-dark">
					"Login"
				</button>
			</form>
			{move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
		</div>
	}
}
