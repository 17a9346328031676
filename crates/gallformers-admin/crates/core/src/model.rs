//! Per-entity administration contract
//!
//! This module defines how an entity type maps onto the admin form and the
//! upsert payload.

use async_trait::async_trait;
use gallformers_admin_types::{AdminFormFields, AdminResult, Entity, EntityId};
use serde::Serialize;

/// Trait for configuring the administration of one entity type
///
/// Implement this trait to plug an entity into [`AdminController`](crate::AdminController).
#[async_trait]
pub trait ModelAdmin: Send + Sync + 'static {
	/// Cached entity type
	type Entity: Entity;
	/// Editable form view-model
	type Fields: AdminFormFields;
	/// Wire payload sent to the upsert endpoint
	type Upsert: Serialize + Send + Sync;

	/// Canonical empty form shown when nothing is selected
	fn empty_form(&self) -> Self::Fields;

	/// Form values for an entity
	///
	/// May fetch supplementary data (joined taxonomy, aliases, ...). Called
	/// once per selection change and again after a rename resolves.
	async fn form_fields(&self, entity: &Self::Entity) -> AdminResult<Self::Fields>;

	/// Build the upsert payload
	///
	/// `key` is the key-field value taken from the form and `id` is the
	/// submitted entity's id (the selection, or the entity being renamed),
	/// or [`EntityId::NEW`] for a new record.
	fn to_upsert_fields(&self, fields: &Self::Fields, key: &str, id: EntityId) -> Self::Upsert;

	/// Validate form values before submission
	fn validate(&self, fields: &Self::Fields) -> AdminResult<()> {
		let _ = fields;
		Ok(())
	}

	/// Create an unsaved entity from a name typed into the main field
	///
	/// Returning `None` disables "add new" from the typeahead.
	fn create_new(&self, name: &str) -> Option<Self::Entity> {
		let _ = name;
		None
	}
}
