//! Bearer-token auth collaborator. Tokens are an opaque pair held in
//! localStorage; this module only exchanges and stores them.

use serde::{Deserialize, Serialize};

use super::{ApiError, DocStore, Result};

const ACCESS_TOKEN: &str = "doctrace.access";
const REFRESH_TOKEN: &str = "doctrace.refresh";

#[derive(Serialize)]
struct LoginBody<'a> {
	username: &'a str,
	password: &'a str,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
	refresh: &'a str,
}

#[derive(Deserialize)]
struct TokenPair {
	access: String,
	refresh: String,
}

#[derive(Deserialize)]
struct AccessToken {
	access: String,
}

fn storage() -> Option<web_sys::Storage> {
	web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read(key: &str) -> Option<String> {
	storage().and_then(|s| s.get_item(key).ok().flatten())
}

fn write(key: &str, value: &str) {
	if let Some(s) = storage() {
		let _ = s.set_item(key, value);
	}
}

pub fn access_token() -> Option<String> {
	read(ACCESS_TOKEN)
}

pub fn is_authenticated() -> bool {
	access_token().is_some()
}

/// Drop both tokens; subsequent store calls go out unauthenticated.
pub fn logout() {
	if let Some(s) = storage() {
		let _ = s.remove_item(ACCESS_TOKEN);
		let _ = s.remove_item(REFRESH_TOKEN);
	}
}

/// Exchange credentials for a token pair.
pub async fn login(store: &DocStore, username: &str, password: &str) -> Result<()> {
	let url = format!("{}/api/token/", store.base_url);
	let resp = store
		.http
		.post(&url)
		.json(&LoginBody { username, password })
		.send()
		.await?;
	if !resp.status().is_success() {
		return Err(ApiError::Unauthorized);
	}
	let pair: TokenPair = resp.json().await?;
	write(ACCESS_TOKEN, &pair.access);
	write(REFRESH_TOKEN, &pair.refresh);
	Ok(())
}

/// Trade the refresh token for a fresh access token. Callers decide whether
/// to retry whatever call earned the 401.
pub async fn refresh_access(store: &DocStore) -> Result<()> {
	let Some(refresh) = read(REFRESH_TOKEN) else {
		return Err(ApiError::Unauthorized);
	};
	let url = format!("{}/api/token/refresh/", store.base_url);
	let resp = store
		.http
		.post(&url)
		.json(&RefreshBody { refresh: &refresh })
		.send()
		.await?;
	if !resp.status().is_success() {
		logout();
		return Err(ApiError::Unauthorized);
	}
	let token: AccessToken = resp.json().await?;
	write(ACCESS_TOKEN, &token.access);
	Ok(())
}
