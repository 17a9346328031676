//! Rename protocol
//!
//! A rename changes the selected entity's key field. The entity-specific
//! part (aliases, cascading taxonomy changes, confirmation prompts) lives in
//! a [`RenameHandler`]; once it resolves, the renamed entity goes through
//! the normal upsert path.
//!
//! ```text
//! Idle -> Requested -> (ConfirmationPending)? -> Applying -> Idle
//!                                                        \-> Failed
//! ```

use crate::confirm::Confirm;
use crate::controller::{AdminController, BusyGuard};
use crate::executor::SubmitOutcome;
use crate::model::ModelAdmin;
use async_trait::async_trait;
use gallformers_admin_types::{
	AdminError, AdminFormFields, AdminResult, ConfirmationOptions, Entity, RenameEvent,
};
use parking_lot::Mutex;

/// Observable state of the rename protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameState {
	/// No rename in progress
	#[default]
	Idle,
	/// The entity-specific rename step is running
	Requested,
	/// Waiting for the user to answer a confirmation prompt
	ConfirmationPending,
	/// The renamed entity is being submitted
	Applying,
	/// The last rename failed; the error is recorded on the controller
	Failed,
}

/// Result of a rename request
#[derive(Debug, Clone, PartialEq)]
pub enum RenameOutcome<T> {
	/// The renamed entity was saved
	Renamed(T),
	/// The user declined a confirmation prompt; nothing changed
	Cancelled,
	/// The selection changed before the rename could be applied; nothing
	/// was saved
	Superseded,
}

/// Entity-specific rename semantics
///
/// Returns the entity as it should be saved. Returning
/// [`AdminError::Cancelled`] aborts the rename silently.
#[async_trait]
pub trait RenameHandler<T: Entity>: Send + Sync {
	/// Apply `event` to `selected`, asking `confirm` where needed
	async fn rename(&self, selected: &T, event: &RenameEvent, confirm: &dyn Confirm)
	-> AdminResult<T>;
}

/// Confirmation wrapper exposing the pending prompt as rename state
struct TrackedConfirm<'a> {
	inner: &'a dyn Confirm,
	state: &'a Mutex<RenameState>,
}

#[async_trait]
impl Confirm for TrackedConfirm<'_> {
	async fn confirm(&self, options: ConfirmationOptions) -> AdminResult<()> {
		*self.state.lock() = RenameState::ConfirmationPending;
		let answer = self.inner.confirm(options).await;
		*self.state.lock() = RenameState::Requested;
		answer
	}
}

impl<M: ModelAdmin> AdminController<M> {
	/// Run the rename protocol on the selected entity
	///
	/// Failures are recorded like submit failures. A cancelled prompt
	/// returns [`RenameOutcome::Cancelled`] and leaves every piece of
	/// controller state as it was. The renamed entity is upserted under its
	/// own id; if the selection moves while the handler runs, the rename is
	/// dropped with [`RenameOutcome::Superseded`].
	pub async fn rename(&self, event: RenameEvent) -> AdminResult<RenameOutcome<M::Entity>> {
		let _busy = BusyGuard::enter(&self.in_flight);
		self.set_rename_state(RenameState::Requested);

		let (generation, selected) = {
			let state = self.state.lock();
			(state.generation, state.cache.selected().cloned())
		};
		let (renamer, selected) = match (self.renamer.clone(), selected) {
			(Some(renamer), Some(selected)) => (renamer, selected),
			(None, _) => {
				return Err(self.fail_rename(AdminError::InvariantViolation(
					"No rename handler is configured.".into(),
				)));
			}
			(_, None) => {
				return Err(self.fail_rename(AdminError::InvariantViolation(
					"The current selection is invalid in the middle of a rename operation.".into(),
				)));
			}
		};
		tracing::debug!(id = %selected.id(), old = ?event.old, new = %event.new, "rename requested");

		let confirm = TrackedConfirm {
			inner: self.confirm.as_ref(),
			state: &self.rename_state,
		};
		let renamed = match renamer.rename(&selected, &event, &confirm).await {
			Ok(renamed) => renamed,
			Err(AdminError::Cancelled) => {
				tracing::debug!(new = %event.new, "rename cancelled");
				self.set_rename_state(RenameState::Idle);
				return Ok(RenameOutcome::Cancelled);
			}
			Err(err) => return Err(self.fail_rename(err)),
		};

		if self.is_stale(generation) {
			return Ok(RenameOutcome::Superseded);
		}
		self.set_rename_state(RenameState::Applying);
		let mut fields = match self.model.form_fields(&renamed).await {
			Ok(fields) => fields,
			Err(err) => return Err(self.fail_rename(AdminError::Rename(err.to_string()))),
		};
		fields.set_delete(false);

		if self.is_stale(generation) {
			return Ok(RenameOutcome::Superseded);
		}
		match self.submit_for(fields, renamed.id(), generation).await {
			Ok(SubmitOutcome::Upserted(saved)) => {
				self.set_rename_state(RenameState::Idle);
				Ok(RenameOutcome::Renamed(saved))
			}
			Ok(_) => Err(self.fail_rename(AdminError::InvariantViolation(
				"A rename did not produce an upsert.".into(),
			))),
			Err(err) => {
				// Already recorded by submit.
				self.set_rename_state(RenameState::Failed);
				Err(err)
			}
		}
	}

	/// Whether the selection changed since `generation`
	///
	/// A stale rename returns to `Idle` without touching the server.
	fn is_stale(&self, generation: u64) -> bool {
		let current = self.state.lock().generation;
		if current == generation {
			return false;
		}
		tracing::debug!(generation, current, "discarding rename for a previous selection");
		self.set_rename_state(RenameState::Idle);
		true
	}

	fn set_rename_state(&self, next: RenameState) {
		*self.rename_state.lock() = next;
	}

	fn fail_rename(&self, err: AdminError) -> AdminError {
		self.record_error(&err);
		self.set_rename_state(RenameState::Failed);
		err
	}
}
