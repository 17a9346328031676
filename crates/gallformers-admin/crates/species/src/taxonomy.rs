//! Taxonomy types
//!
//! Species hang off a family, a genus, and optionally a section (FGS).

use async_trait::async_trait;
use gallformers_admin_types::{AdminResult, NEW_ID};
use serde::{Deserialize, Serialize};

/// Rank of a taxonomy entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyType {
	#[default]
	Family,
	Section,
	Genus,
}

/// A family, section or genus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(rename = "type")]
	pub kind: TaxonomyType,
	#[serde(default)]
	pub parent: Option<Box<TaxonomyEntry>>,
}

impl TaxonomyEntry {
	/// Create an entry without a parent
	pub fn new(id: i64, name: impl Into<String>, kind: TaxonomyType) -> Self {
		Self {
			id,
			name: name.into(),
			description: String::new(),
			kind,
			parent: None,
		}
	}

	/// Unsaved genus that the server creates together with the species
	pub fn placeholder_genus(name: impl Into<String>, family: &TaxonomyEntry) -> Self {
		Self {
			parent: Some(Box::new(family.clone())),
			..Self::new(NEW_ID, name, TaxonomyType::Genus)
		}
	}

	/// Whether this is the blank entry used before taxonomy is known
	pub fn is_empty(&self) -> bool {
		self.id == NEW_ID && self.name.is_empty()
	}
}

impl Default for TaxonomyEntry {
	fn default() -> Self {
		Self::new(NEW_ID, "", TaxonomyType::Family)
	}
}

/// Family, genus and section of a species
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fgs {
	pub family: TaxonomyEntry,
	pub genus: TaxonomyEntry,
	#[serde(default)]
	pub section: Option<TaxonomyEntry>,
}

impl Fgs {
	/// Whether no taxonomy has been loaded
	pub fn is_empty(&self) -> bool {
		self.family.is_empty() && self.genus.is_empty()
	}
}

/// Genus part of a binomial name (the first word)
///
/// # Examples
///
/// ```
/// use gallformers_admin_species::extract_genus;
///
/// assert_eq!(extract_genus("Quercus alba"), "Quercus");
/// assert_eq!(extract_genus("Quercus"), "Quercus");
/// ```
pub fn extract_genus(name: &str) -> &str {
	name.split_whitespace().next().unwrap_or("")
}

/// Source of taxonomy for species that were loaded without it
#[async_trait]
pub trait TaxonomySource: Send + Sync {
	/// Family, genus and section of the species with `species_id`
	async fn taxonomy_for(&self, species_id: i64) -> AdminResult<Fgs>;
}
