//! reqwest-backed admin API

use crate::config::ClientConfig;
use async_trait::async_trait;
use gallformers_admin_types::{AdminApi, ApiConfig, ApiError, DeleteResult, Entity};
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use url::Url;

/// Characters escaped when a key is appended to a path
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// Admin API talking to the site's JSON endpoints
pub struct HttpAdminApi<T, U> {
	client: reqwest::Client,
	base: Url,
	api: ApiConfig,
	_marker: PhantomData<fn() -> (T, U)>,
}

impl<T, U> HttpAdminApi<T, U> {
	/// Create a client for one entity type
	pub fn new(config: ClientConfig, api: ApiConfig) -> Result<Self, ApiError> {
		let base = Url::parse(&config.base_url).map_err(|e| {
			ApiError::NotConfigured(format!("base URL {:?} ({})", config.base_url, e))
		})?;
		let client = reqwest::Client::builder()
			.timeout(config.timeout)
			.build()
			.map_err(|e| ApiError::Network(format!("Failed to create client: {}", e)))?;

		Ok(Self {
			client,
			base,
			api,
			_marker: PhantomData,
		})
	}

	/// Endpoint configuration
	pub fn api_config(&self) -> &ApiConfig {
		&self.api
	}

	fn resolve(&self, endpoint: &str) -> Result<Url, ApiError> {
		self.base
			.join(endpoint)
			.map_err(|e| ApiError::NotConfigured(format!("{} ({})", endpoint, e)))
	}

	fn delete_url(&self, key: &str) -> Result<Url, ApiError> {
		let endpoint = format!(
			"{}{}{}",
			self.api.del_endpoint,
			utf8_percent_encode(key, PATH_SEGMENT),
			self.api.del_query_string.as_deref().unwrap_or("")
		);
		self.resolve(&endpoint)
	}

	fn template_url(&self, template: &str, placeholder: &str, value: &str) -> Result<Url, ApiError> {
		let encoded = utf8_percent_encode(value, NON_ALPHANUMERIC).to_string();
		self.resolve(&template.replace(placeholder, &encoded))
	}

	async fn send<R: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<R, ApiError> {
		let response = request
			.send()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());
			tracing::warn!(status = status.as_u16(), %body, "admin request rejected");
			return Err(ApiError::Status {
				status: status.as_u16(),
				body,
			});
		}

		response
			.json()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))
	}
}

#[async_trait]
impl<T, U> AdminApi<T, U> for HttpAdminApi<T, U>
where
	T: Entity + DeserializeOwned,
	U: Serialize + Send + Sync,
{
	async fn delete(&self, key: &str) -> Result<DeleteResult, ApiError> {
		let url = self.delete_url(key)?;
		tracing::debug!(%url, "DELETE");
		self.send(self.client.delete(url)).await
	}

	async fn upsert(&self, payload: &U) -> Result<T, ApiError> {
		let url = self.resolve(&self.api.upsert_endpoint)?;
		tracing::debug!(%url, "POST");
		self.send(self.client.post(url).json(payload)).await
	}

	async fn name_exists(&self, name: &str) -> Result<bool, ApiError> {
		let Some(template) = &self.api.name_exists_endpoint else {
			return Ok(false);
		};
		let url = self.template_url(template, "{name}", name)?;
		tracing::debug!(%url, "GET");
		let found: Vec<serde_json::Value> = self.send(self.client.get(url)).await?;
		Ok(!found.is_empty())
	}

	async fn search(&self, query: &str) -> Result<Vec<T>, ApiError> {
		let template = self
			.api
			.search_endpoint
			.as_deref()
			.ok_or_else(|| ApiError::NotConfigured("search".into()))?;
		let url = self.template_url(template, "{query}", query)?;
		tracing::debug!(%url, "GET");
		self.send(self.client.get(url)).await
	}

	async fn list(&self) -> Result<Vec<T>, ApiError> {
		let endpoint = self
			.api
			.list_endpoint
			.as_deref()
			.ok_or_else(|| ApiError::NotConfigured("list".into()))?;
		let url = self.resolve(endpoint)?;
		tracing::debug!(%url, "GET");
		self.send(self.client.get(url)).await
	}
}
