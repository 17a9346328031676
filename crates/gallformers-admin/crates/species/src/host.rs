//! Host (plant species) administration
//!
//! Maps [`HostApi`] records onto the host admin form and the species upsert
//! payload.

use crate::taxonomy::{Fgs, TaxonomyEntry, TaxonomySource};
use async_trait::async_trait;
use gallformers_admin_core::ModelAdmin;
use gallformers_admin_types::{AdminError, AdminFormFields, AdminResult, Entity, EntityId, NEW_ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Abundance classification of a species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbundanceApi {
	pub id: i64,
	pub abundance: String,
	#[serde(default)]
	pub description: String,
}

/// Alternative name of a species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasApi {
	pub id: i64,
	pub name: String,
	/// "common" or "scientific"
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub description: String,
}

impl AliasApi {
	/// Alias recording the name a species had before a rename
	pub fn previous_name(name: impl Into<String>) -> Self {
		Self {
			id: NEW_ID,
			name: name.into(),
			kind: "scientific".into(),
			description: "Previous name".into(),
		}
	}
}

/// A host species as served by the host endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostApi {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub datacomplete: bool,
	#[serde(default)]
	pub abundance: Option<AbundanceApi>,
	#[serde(default)]
	pub aliases: Vec<AliasApi>,
	/// Taxonomy; empty when the list endpoint did not include it
	#[serde(default)]
	pub fgs: Fgs,
}

impl HostApi {
	/// Unsaved host with the given name
	pub fn new_named(name: impl Into<String>) -> Self {
		Self {
			id: NEW_ID,
			name: name.into(),
			datacomplete: false,
			abundance: None,
			aliases: Vec::new(),
			fgs: Fgs::default(),
		}
	}
}

impl Entity for HostApi {
	fn id(&self) -> EntityId {
		EntityId::Int(self.id)
	}

	fn key(&self) -> &str {
		&self.name
	}
}

/// Values of the host admin form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostFormFields {
	pub name: String,
	pub genus: Option<TaxonomyEntry>,
	pub family: Option<TaxonomyEntry>,
	pub section: Option<TaxonomyEntry>,
	pub abundance: Option<AbundanceApi>,
	pub datacomplete: bool,
	pub aliases: Vec<AliasApi>,
	pub del: bool,
}

impl AdminFormFields for HostFormFields {
	fn key(&self) -> Option<String> {
		Some(self.name.trim().to_string()).filter(|n| !n.is_empty())
	}

	fn is_delete(&self) -> bool {
		self.del
	}

	fn set_delete(&mut self, del: bool) {
		self.del = del;
	}
}

/// Payload of the species upsert endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesUpsertFields {
	pub id: i64,
	pub name: String,
	pub datacomplete: bool,
	pub abundance: Option<String>,
	pub aliases: Vec<AliasApi>,
	pub fgs: Fgs,
}

/// Host administration
#[derive(Default)]
pub struct HostAdmin {
	taxonomy: Option<Arc<dyn TaxonomySource>>,
}

impl HostAdmin {
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up taxonomy for hosts loaded without it
	pub fn with_taxonomy(mut self, source: Arc<dyn TaxonomySource>) -> Self {
		self.taxonomy = Some(source);
		self
	}

	/// Taxonomy of `host`, fetched when the record does not carry it
	pub async fn resolve_fgs(&self, host: &HostApi) -> AdminResult<Fgs> {
		match &self.taxonomy {
			Some(source) if host.fgs.is_empty() && !host.is_new() => {
				tracing::debug!(id = host.id, "fetching taxonomy");
				source.taxonomy_for(host.id).await
			}
			_ => Ok(host.fgs.clone()),
		}
	}
}

fn non_empty(entry: &TaxonomyEntry) -> Option<TaxonomyEntry> {
	(!entry.is_empty()).then(|| entry.clone())
}

#[async_trait]
impl ModelAdmin for HostAdmin {
	type Entity = HostApi;
	type Fields = HostFormFields;
	type Upsert = SpeciesUpsertFields;

	fn empty_form(&self) -> HostFormFields {
		HostFormFields::default()
	}

	async fn form_fields(&self, host: &HostApi) -> AdminResult<HostFormFields> {
		let fgs = self.resolve_fgs(host).await.map_err(|e| {
			AdminError::Binding(format!(
				"Failed to fetch taxonomy for the selected species. {}",
				e
			))
		})?;
		Ok(HostFormFields {
			name: host.name.clone(),
			genus: non_empty(&fgs.genus),
			family: non_empty(&fgs.family),
			section: fgs.section.clone(),
			abundance: host.abundance.clone(),
			datacomplete: host.datacomplete,
			aliases: host.aliases.clone(),
			del: false,
		})
	}

	fn to_upsert_fields(&self, fields: &HostFormFields, key: &str, id: EntityId) -> SpeciesUpsertFields {
		SpeciesUpsertFields {
			id: id.as_i64().unwrap_or(NEW_ID),
			name: key.to_string(),
			datacomplete: fields.datacomplete,
			abundance: fields.abundance.as_ref().map(|a| a.abundance.clone()),
			aliases: fields.aliases.clone(),
			fgs: Fgs {
				family: fields.family.clone().unwrap_or_default(),
				genus: fields.genus.clone().unwrap_or_default(),
				section: fields.section.clone(),
			},
		}
	}

	fn validate(&self, fields: &HostFormFields) -> AdminResult<()> {
		if fields.name.trim().is_empty() {
			return Err(AdminError::Validation(
				"Name is required and must be in standard binomial form, e.g., Gallus gallus".into(),
			));
		}
		if fields.family.is_none() {
			return Err(AdminError::Validation("The Family name is required".into()));
		}
		Ok(())
	}

	fn create_new(&self, name: &str) -> Option<HostApi> {
		Some(HostApi::new_named(name))
	}
}
