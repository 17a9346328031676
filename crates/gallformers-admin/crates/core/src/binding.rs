//! Form binding
//!
//! Every selection change bumps the controller's generation and recomputes
//! the form from the new selection. The computation is asynchronous; a
//! result that lands after a newer selection change is discarded, so the
//! visible form always belongs to the latest selection.

use crate::controller::AdminController;
use crate::model::ModelAdmin;
use gallformers_admin_types::{AdminError, AdminResult, Entity, EntityId};

/// Typeahead event on the page's main field
#[derive(Debug, Clone, PartialEq)]
pub enum MainFieldChoice<T> {
	/// The field was cleared
	Cleared,
	/// An existing entity was chosen
	Existing(T),
	/// A name that matches nothing was entered ("Add a new ...")
	New(String),
}

impl<M: ModelAdmin> AdminController<M> {
	/// Change the selection and rebind the form
	///
	/// `entity` must be cached or be an unsaved draft. Drafts clear the
	/// location indicator.
	pub async fn set_selected(&self, entity: Option<M::Entity>) -> AdminResult<()> {
		let selected = {
			let mut state = self.state.lock();
			match state.cache.select(entity) {
				Ok(()) => {
					state.generation += 1;
					state.delete_result = None;
					Ok((
						state.generation,
						state.cache.selected().cloned(),
						state.cache.selected_id().cloned(),
					))
				}
				Err(err) => Err(err),
			}
		};
		let (generation, selected, id) = match selected {
			Ok(change) => change,
			Err(err) => {
				self.record_error(&err);
				return Err(err);
			}
		};
		self.publish_location(id, true);
		self.bind_form(generation, selected).await
	}

	/// Select a cached entity by id and rebind the form
	///
	/// An unknown id clears the selection and returns `false`.
	pub async fn select_id(&self, id: &EntityId) -> AdminResult<bool> {
		let (found, generation, selected) = {
			let mut state = self.state.lock();
			let found = state.cache.select_id(id);
			state.generation += 1;
			state.delete_result = None;
			(found, state.generation, state.cache.selected().cloned())
		};
		if !found {
			tracing::debug!(%id, "id is not part of the loaded data");
		}
		self.publish_location(found.then(|| id.clone()), true);
		self.bind_form(generation, selected).await?;
		Ok(found)
	}

	/// Apply a typeahead event from the main field
	pub async fn on_main_field_change(&self, choice: MainFieldChoice<M::Entity>) -> AdminResult<()> {
		match choice {
			MainFieldChoice::Cleared => self.set_selected(None).await,
			MainFieldChoice::Existing(entity) => self.set_selected(Some(entity)).await,
			MainFieldChoice::New(name) => match self.model.create_new(&name) {
				Some(draft) => self.set_selected(Some(draft)).await,
				None => {
					let err = AdminError::Validation(format!(
						"Adding a new {} from here is not supported",
						self.config.model_type
					));
					self.record_error(&err);
					Err(err)
				}
			},
		}
	}

	/// Recompute the form for `selected`
	///
	/// The result only applies while `generation` is still current. A
	/// failure leaves the form at its last reset.
	pub(crate) async fn bind_form(
		&self,
		generation: u64,
		selected: Option<M::Entity>,
	) -> AdminResult<()> {
		let result = match &selected {
			None => Ok(self.model.empty_form()),
			Some(entity) => self.model.form_fields(entity).await,
		};

		let mut state = self.state.lock();
		if state.generation != generation {
			tracing::debug!(
				generation,
				current = state.generation,
				"discarding stale form binding"
			);
			return Ok(());
		}
		match result {
			Ok(fields) => {
				state.form.reset(fields);
				Ok(())
			}
			Err(err) => {
				drop(state);
				let err = match err {
					AdminError::Binding(_) => err,
					other => AdminError::Binding(other.to_string()),
				};
				tracing::error!(
					id = ?selected.as_ref().map(Entity::id),
					error = %err,
					"failed to bind form"
				);
				self.state.lock().error = Some(err.clone());
				Err(err)
			}
		}
	}
}
