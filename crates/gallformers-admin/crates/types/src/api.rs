//! API collaborator contract
//!
//! The controller never talks HTTP itself; it goes through an [`AdminApi`]
//! implementation configured with an [`ApiConfig`].

use crate::entity::Entity;
use crate::errors::ApiError;
use crate::events::DeleteResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Endpoint configuration for one administered entity type
///
/// Templates may contain a `{name}` (name-exists) or `{query}` (search)
/// placeholder that is replaced with the URL-encoded argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
	/// Name of the entity's key field (e.g. `"name"`), reported when a
	/// submission has no key value
	pub key_prop: String,
	/// Prefix of the delete endpoint; the key is appended to it
	pub del_endpoint: String,
	/// Upsert endpoint receiving the JSON payload
	pub upsert_endpoint: String,
	/// Extra query string appended to delete requests
	#[serde(default)]
	pub del_query_string: Option<String>,
	/// Template of the name-exists endpoint
	#[serde(default)]
	pub name_exists_endpoint: Option<String>,
	/// Template of the search endpoint used by the typeahead
	#[serde(default)]
	pub search_endpoint: Option<String>,
	/// Endpoint listing every entity, used when no initial data is given
	#[serde(default)]
	pub list_endpoint: Option<String>,
}

impl ApiConfig {
	/// Create a configuration with the three mandatory endpoints
	pub fn new(
		key_prop: impl Into<String>,
		del_endpoint: impl Into<String>,
		upsert_endpoint: impl Into<String>,
	) -> Self {
		Self {
			key_prop: key_prop.into(),
			del_endpoint: del_endpoint.into(),
			upsert_endpoint: upsert_endpoint.into(),
			del_query_string: None,
			name_exists_endpoint: None,
			search_endpoint: None,
			list_endpoint: None,
		}
	}

	/// Set the query string appended to delete requests
	pub fn with_del_query_string(mut self, query: impl Into<String>) -> Self {
		self.del_query_string = Some(query.into());
		self
	}

	/// Set the name-exists endpoint template
	pub fn with_name_exists_endpoint(mut self, template: impl Into<String>) -> Self {
		self.name_exists_endpoint = Some(template.into());
		self
	}

	/// Set the search endpoint template
	pub fn with_search_endpoint(mut self, template: impl Into<String>) -> Self {
		self.search_endpoint = Some(template.into());
		self
	}

	/// Set the list endpoint
	pub fn with_list_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.list_endpoint = Some(endpoint.into());
		self
	}
}

/// Remote operations the admin controller relies on
///
/// Implementations must reject every non-success response with an
/// [`ApiError`]; the controller treats `Ok` as a server-confirmed change.
#[async_trait]
pub trait AdminApi<T, U>: Send + Sync
where
	T: Entity,
	U: Serialize + Send + Sync,
{
	/// Delete the record whose key field equals `key`
	async fn delete(&self, key: &str) -> Result<DeleteResult, ApiError>;

	/// Create or update a record, returning the persisted entity
	async fn upsert(&self, payload: &U) -> Result<T, ApiError>;

	/// Whether any record already uses `name`
	///
	/// Defaults to `false` for entity types without a uniqueness check.
	async fn name_exists(&self, name: &str) -> Result<bool, ApiError> {
		let _ = name;
		Ok(false)
	}

	/// Entities matching a typeahead query
	async fn search(&self, query: &str) -> Result<Vec<T>, ApiError> {
		let _ = query;
		Err(ApiError::NotConfigured("search".into()))
	}

	/// Every entity of this type
	async fn list(&self) -> Result<Vec<T>, ApiError> {
		Err(ApiError::NotConfigured("list".into()))
	}
}
