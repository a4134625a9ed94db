//! Client for the external document store. Thin wrapper over its REST
//! surface; every call attaches the current bearer token.

pub mod auth;

use reqwest::Method;
use serde::Serialize;

use crate::ingest::{CanonicalRecord, RecordFields};
use crate::model::{Document, DocumentId};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("server error {status}: {message}")]
	Server { status: u16, message: String },

	#[error("not authenticated")]
	Unauthorized,
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Document store handle. Cheap to clone; the underlying HTTP client pools
/// connections.
#[derive(Clone)]
pub struct DocStore {
	pub(crate) base_url: String,
	pub(crate) http: reqwest::Client,
}

impl DocStore {
	pub fn new(base_url: impl Into<String>) -> Self {
		let url = base_url.into();
		Self {
			base_url: url.trim_end_matches('/').to_string(),
			http: reqwest::Client::new(),
		}
	}

	/// Base URL from `DOCTRACE_API_URL` at build time, else same origin.
	pub fn from_env() -> Self {
		let base = option_env!("DOCTRACE_API_URL")
			.map(str::to_string)
			.or_else(|| {
				web_sys::window().and_then(|w| w.location().origin().ok())
			})
			.unwrap_or_default();
		Self::new(base)
	}

	pub async fn list_documents(&self) -> Result<Vec<Document>> {
		self.request(Method::GET, "/api/documents/", None::<&()>)
			.await?
			.json()
			.await
			.map_err(ApiError::from)
	}

	/// Like [`list_documents`](Self::list_documents), with each document
	/// carrying its resolved outbound links.
	pub async fn list_documents_with_links(&self) -> Result<Vec<Document>> {
		self.request(Method::GET, "/api/documents_with_links/", None::<&()>)
			.await?
			.json()
			.await
			.map_err(ApiError::from)
	}

	pub async fn create_document(&self, record: &CanonicalRecord) -> Result<Document> {
		let mut body = serde_json::Map::new();
		for (key, value) in &record.fields {
			body.insert(key.clone(), serde_json::Value::String(value.clone()));
		}
		body.insert("order".to_string(), record.order.into());
		self.request(Method::POST, "/api/documents/", Some(&body))
			.await?
			.json()
			.await
			.map_err(ApiError::from)
	}

	/// Partial update: keys absent from `fields` keep their stored values.
	pub async fn update_document(&self, id: DocumentId, fields: &RecordFields) -> Result<Document> {
		let path = format!("/api/documents/update/{id}/");
		self.request(Method::PUT, &path, Some(fields))
			.await?
			.json()
			.await
			.map_err(ApiError::from)
	}

	pub async fn delete_document(&self, id: DocumentId) -> Result<()> {
		let path = format!("/api/documents/delete/{id}/");
		self.request(Method::DELETE, &path, None::<&()>).await?;
		Ok(())
	}

	async fn request<B: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<reqwest::Response> {
		let url = format!("{}{}", self.base_url, path);
		let mut req = self.http.request(method, &url);
		if let Some(token) = auth::access_token() {
			req = req.bearer_auth(token);
		}
		if let Some(b) = body {
			req = req.json(b);
		}

		let resp = req.send().await?;
		let status = resp.status();
		if status.is_success() {
			return Ok(resp);
		}
		if status.as_u16() == 401 {
			// the auth collaborator refreshes; the original call is not
			// retried here, the caller decides
			let _ = auth::refresh_access(self).await;
			return Err(ApiError::Unauthorized);
		}
		let message = match resp.text().await {
			Ok(text) if !text.is_empty() => text,
			_ => format!("HTTP {}", status.as_u16()),
		};
		Err(ApiError::Server {
			status: status.as_u16(),
			message,
		})
	}
}
