//! Transaction executor
//!
//! Submissions are dispatched on the form's `del` flag: a delete keyed by
//! the key field value, or an upsert of the payload built by the model.
//! Successful responses are reconciled into the cache; failures only set
//! the error and leave cache, selection and form as they were.
//!
//! Submissions are not single-flight. Two overlapping submits both reach
//! the server; the cache reflects every confirmed response, but only a
//! submit started under the current selection moves the selection.

use crate::controller::{AdminController, BusyGuard};
use crate::model::ModelAdmin;
use gallformers_admin_types::{
	AdminApi, AdminError, AdminFormFields, AdminResult, ConfirmationOptions, DeleteResult, Entity,
	EntityId,
};
use serde::Serialize;

/// Raw outcome of a delete-or-upsert call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
	/// The record keyed by `key` was deleted
	Deleted {
		/// Key field value the delete was issued for
		key: String,
		/// Server report
		result: DeleteResult,
	},
	/// The record was created or updated
	Upserted(T),
}

/// Outcome of a controller submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
	/// The selected record was deleted
	Deleted(DeleteResult),
	/// The record was created or updated
	Upserted(T),
	/// The user declined a confirmation prompt
	Cancelled,
}

/// Issue a delete or an upsert depending on the form's `del` flag
///
/// `key_prop` names the key field, `id` is the selected entity's id, or
/// [`EntityId::NEW`] for a new record. Forms without a key value are
/// rejected before any request is made.
pub async fn delete_or_upsert<T, U, F, A>(
	api: &A,
	key_prop: &str,
	fields: &F,
	id: EntityId,
	to_upsert: impl FnOnce(&F, &str, EntityId) -> U + Send,
) -> AdminResult<ApiOutcome<T>>
where
	T: Entity,
	U: Serialize + Send + Sync,
	F: AdminFormFields,
	A: AdminApi<T, U> + ?Sized,
{
	let key = fields
		.key()
		.map(|k| k.trim().to_string())
		.filter(|k| !k.is_empty())
		.ok_or_else(|| AdminError::Validation(format!("The {} is required", key_prop)))?;

	if fields.is_delete() {
		tracing::debug!(key_prop, %key, "deleting");
		let result = api.delete(&key).await?;
		Ok(ApiOutcome::Deleted { key, result })
	} else {
		tracing::debug!(key_prop, %key, %id, "upserting");
		let payload = to_upsert(fields, &key, id);
		let entity = api.upsert(&payload).await?;
		Ok(ApiOutcome::Upserted(entity))
	}
}

impl<M: ModelAdmin> AdminController<M> {
	/// Submit form values
	///
	/// Deletes when `fields` is flagged for deletion, upserts otherwise.
	/// Failures are recorded for display and returned.
	pub async fn submit(&self, fields: M::Fields) -> AdminResult<SubmitOutcome<M::Entity>> {
		let (generation, id) = {
			let state = self.state.lock();
			let id = state
				.cache
				.selected()
				.map(Entity::id)
				.unwrap_or(EntityId::NEW);
			(state.generation, id)
		};
		self.submit_for(fields, id, generation).await
	}

	/// Submit form values on behalf of the entity with `id`
	///
	/// `generation` is the selection generation the submission belongs to;
	/// reconciliation only moves the selection while it is still current.
	pub(crate) async fn submit_for(
		&self,
		fields: M::Fields,
		id: EntityId,
		generation: u64,
	) -> AdminResult<SubmitOutcome<M::Entity>> {
		let _busy = BusyGuard::enter(&self.in_flight);
		let model = &self.model;
		let outcome = delete_or_upsert(
			self.api.as_ref(),
			&self.config.api.key_prop,
			&fields,
			id.clone(),
			|f, key, id| model.to_upsert_fields(f, key, id),
		)
		.await;

		match outcome {
			Ok(ApiOutcome::Deleted { key, result }) => {
				self.post_delete(generation, &id, &key, result.clone()).await;
				Ok(SubmitOutcome::Deleted(result))
			}
			Ok(ApiOutcome::Upserted(entity)) => {
				self.post_update(generation, entity.clone()).await;
				Ok(SubmitOutcome::Upserted(entity))
			}
			Err(err) => {
				self.record_error(&err);
				Err(err)
			}
		}
	}

	/// Validate the current form values and submit them
	pub async fn submit_form(&self) -> AdminResult<SubmitOutcome<M::Entity>> {
		let fields = self.form_values();
		if let Err(err) = self.model.validate(&fields) {
			self.record_error(&err);
			return Err(err);
		}
		self.submit(fields).await
	}

	/// Ask for confirmation, then delete the selected record
	///
	/// Declining the prompt is not an error and returns
	/// [`SubmitOutcome::Cancelled`].
	pub async fn delete_selected(&self) -> AdminResult<SubmitOutcome<M::Entity>> {
		let options = ConfirmationOptions::danger(
			"Are you sure want to delete?",
			format!(
				"This will delete the current {} and all associated data. Do you want to continue?",
				self.config.model_type
			),
		);
		match self.confirm.confirm(options).await {
			Ok(()) => {}
			Err(AdminError::Cancelled) => {
				tracing::debug!("delete cancelled");
				return Ok(SubmitOutcome::Cancelled);
			}
			Err(err) => {
				self.record_error(&err);
				return Err(err);
			}
		}
		let fields = self.form_values().for_delete();
		self.submit(fields).await
	}

	/// Reconcile a successful delete
	///
	/// The entity is removed by `id`, or by `key` when the submission was
	/// not tied to a cached entity.
	pub(crate) async fn post_delete(
		&self,
		generation: u64,
		id: &EntityId,
		key: &str,
		result: DeleteResult,
	) {
		let current = {
			let mut state = self.state.lock();
			let removed = state.cache.remove(id).is_some() || state.cache.remove_by_key(key).is_some();
			if !removed {
				tracing::debug!(%key, "deleted entity was not cached");
			}
			state.error = None;
			state.delete_result = Some(result);
			if state.generation == generation {
				state.cache.clear_selection();
				state.generation += 1;
				state.form.reset_to_default();
				Some(state.generation)
			} else {
				None
			}
		};

		self.notifier
			.success(&format!("{} deleted", self.config.model_type));
		match current {
			Some(generation) => {
				self.publish_location(None, true);
				// Binding the empty form cannot fail.
				let _ = self.bind_form(generation, None).await;
			}
			None => tracing::debug!(%key, "selection changed during delete"),
		}
	}

	/// Reconcile a successful upsert
	///
	/// The returned entity replaces the cached one with the same id, or is
	/// appended, and becomes the selection.
	pub(crate) async fn post_update(&self, generation: u64, entity: M::Entity) {
		let id = entity.id();
		let current = {
			let mut state = self.state.lock();
			state.cache.upsert(entity.clone());
			state.error = None;
			if state.generation == generation {
				state.cache.select_id(&id);
				state.generation += 1;
				state.delete_result = None;
				state.form.reset_to_default();
				Some(state.generation)
			} else {
				None
			}
		};

		self.notifier
			.success(&format!("{} Updated", self.config.model_type));
		match current {
			Some(generation) => {
				self.publish_location(Some(id), !self.config.reload_on_update);
				// A failed rebind is recorded; the upsert itself succeeded.
				let _ = self.bind_form(generation, Some(entity)).await;
			}
			None => tracing::debug!(%id, "selection changed during upsert"),
		}
	}
}
