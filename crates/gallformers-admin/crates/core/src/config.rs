//! Controller configuration
//!
//! [`AdminConfig`] can be built in code or loaded from a TOML table:
//!
//! ```toml
//! model_type = "Host"
//! reload_on_update = false
//!
//! [api]
//! key_prop = "name"
//! del_endpoint = "../api/host/"
//! upsert_endpoint = "../api/host/upsert"
//! name_exists_endpoint = "../api/host?name={name}"
//! ```

use gallformers_admin_types::ApiConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	/// A required setting was not provided
	#[error("Missing required setting: {0}")]
	Missing(&'static str),

	/// The configuration source could not be parsed
	#[error("Invalid admin configuration: {0}")]
	Parse(String),
}

/// Configuration of one admin controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
	/// Display name of the administered type, used in notifications
	pub model_type: String,
	/// Endpoint configuration
	pub api: ApiConfig,
	/// Reload the page (non-shallow navigation) after an upsert
	#[serde(default)]
	pub reload_on_update: bool,
}

impl AdminConfig {
	/// Create a configuration from a type name and its endpoints
	pub fn new(model_type: impl Into<String>, api: ApiConfig) -> Self {
		Self {
			model_type: model_type.into(),
			api,
			reload_on_update: false,
		}
	}

	/// Start building a configuration
	pub fn builder() -> AdminConfigBuilder {
		AdminConfigBuilder::default()
	}

	/// Parse a configuration from TOML
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: AdminConfig =
			toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
		if config.model_type.trim().is_empty() {
			return Err(ConfigError::Missing("model_type"));
		}
		Ok(config)
	}
}

/// Builder for [`AdminConfig`]
#[derive(Debug, Default)]
pub struct AdminConfigBuilder {
	model_type: Option<String>,
	key_prop: Option<String>,
	del_endpoint: Option<String>,
	upsert_endpoint: Option<String>,
	del_query_string: Option<String>,
	name_exists_endpoint: Option<String>,
	search_endpoint: Option<String>,
	list_endpoint: Option<String>,
	reload_on_update: bool,
}

impl AdminConfigBuilder {
	/// Set the display name of the administered type
	pub fn model_type(mut self, name: impl Into<String>) -> Self {
		self.model_type = Some(name.into());
		self
	}

	/// Set the key field name
	///
	/// If not set, defaults to "name".
	pub fn key_prop(mut self, prop: impl Into<String>) -> Self {
		self.key_prop = Some(prop.into());
		self
	}

	/// Set the delete endpoint prefix
	pub fn del_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.del_endpoint = Some(endpoint.into());
		self
	}

	/// Set the upsert endpoint
	pub fn upsert_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.upsert_endpoint = Some(endpoint.into());
		self
	}

	/// Set the query string appended to delete requests
	pub fn del_query_string(mut self, query: impl Into<String>) -> Self {
		self.del_query_string = Some(query.into());
		self
	}

	/// Set the name-exists endpoint template (`{name}` placeholder)
	pub fn name_exists_endpoint(mut self, template: impl Into<String>) -> Self {
		self.name_exists_endpoint = Some(template.into());
		self
	}

	/// Set the search endpoint template (`{query}` placeholder)
	pub fn search_endpoint(mut self, template: impl Into<String>) -> Self {
		self.search_endpoint = Some(template.into());
		self
	}

	/// Set the list endpoint used for the initial fetch
	pub fn list_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.list_endpoint = Some(endpoint.into());
		self
	}

	/// Reload the page after an upsert instead of a shallow URL update
	pub fn reload_on_update(mut self, reload: bool) -> Self {
		self.reload_on_update = reload;
		self
	}

	/// Build the configuration
	pub fn build(self) -> Result<AdminConfig, ConfigError> {
		let api = ApiConfig {
			key_prop: self.key_prop.unwrap_or_else(|| "name".into()),
			del_endpoint: self.del_endpoint.ok_or(ConfigError::Missing("del_endpoint"))?,
			upsert_endpoint: self
				.upsert_endpoint
				.ok_or(ConfigError::Missing("upsert_endpoint"))?,
			del_query_string: self.del_query_string,
			name_exists_endpoint: self.name_exists_endpoint,
			search_endpoint: self.search_endpoint,
			list_endpoint: self.list_endpoint,
		};
		Ok(AdminConfig {
			model_type: self.model_type.ok_or(ConfigError::Missing("model_type"))?,
			api,
			reload_on_update: self.reload_on_update,
		})
	}
}
