//! Admin controller
//!
//! [`AdminController`] composes the entity cache, the form binding, the
//! transaction executor and the rename protocol into the object an admin
//! page drives. Operations are implemented in [`binding`](crate::binding),
//! [`executor`](crate::executor) and [`rename`](crate::rename).

use crate::cache::{EntityCache, Selection};
use crate::config::AdminConfig;
use crate::confirm::{Confirm, ConfirmModalState};
use crate::form::FormState;
use crate::location::{LocationAdapter, NoopLocation, id_from_query};
use crate::model::ModelAdmin;
use crate::notify::{Notifier, TracingNotifier};
use crate::rename::{RenameHandler, RenameState};
use gallformers_admin_types::{AdminApi, AdminError, AdminResult, ApiError, DeleteResult, EntityId};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

/// Mutable controller state
///
/// Always locked briefly and never across an `.await`.
pub(crate) struct AdminState<T, F> {
	pub(crate) cache: EntityCache<T>,
	pub(crate) form: FormState<F>,
	/// Incremented on every selection change
	pub(crate) generation: u64,
	pub(crate) error: Option<AdminError>,
	pub(crate) delete_result: Option<DeleteResult>,
	pub(crate) show_rename_modal: bool,
	/// Incremented on every search request
	pub(crate) search_generation: u64,
}

/// Tracks in-flight operations on a counter
pub(crate) struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
	pub(crate) fn enter(counter: &'a AtomicUsize) -> Self {
		counter.fetch_add(1, Ordering::SeqCst);
		Self(counter)
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

/// Generic entity administration controller
pub struct AdminController<M: ModelAdmin> {
	pub(crate) model: Arc<M>,
	pub(crate) config: AdminConfig,
	pub(crate) api: Arc<dyn AdminApi<M::Entity, M::Upsert>>,
	pub(crate) confirm: Arc<dyn Confirm>,
	pub(crate) modal: Option<Arc<ConfirmModalState>>,
	pub(crate) notifier: Arc<dyn Notifier>,
	pub(crate) location: Arc<dyn LocationAdapter>,
	pub(crate) renamer: Option<Arc<dyn RenameHandler<M::Entity>>>,
	pub(crate) state: Mutex<AdminState<M::Entity, M::Fields>>,
	pub(crate) rename_state: Mutex<RenameState>,
	pub(crate) in_flight: AtomicUsize,
	pub(crate) searching: AtomicUsize,
	pub(crate) current_id: watch::Sender<Option<EntityId>>,
	initial_id: Option<EntityId>,
	needs_fetch: bool,
}

impl<M: ModelAdmin> AdminController<M> {
	/// Start building a controller
	pub fn builder(
		model: M,
		config: AdminConfig,
		api: Arc<dyn AdminApi<M::Entity, M::Upsert>>,
	) -> AdminControllerBuilder<M> {
		AdminControllerBuilder {
			model,
			config,
			api,
			initial_data: None,
			initial_id: None,
			confirm: None,
			notifier: None,
			location: None,
			renamer: None,
		}
	}

	/// Configuration this controller was built with
	pub fn config(&self) -> &AdminConfig {
		&self.config
	}

	/// The administered model
	pub fn model(&self) -> &M {
		&self.model
	}

	/// Snapshot of the cached entities
	pub fn data(&self) -> Vec<M::Entity> {
		self.state.lock().cache.data().to_vec()
	}

	/// Currently selected entity, draft included
	pub fn selected(&self) -> Option<M::Entity> {
		self.state.lock().cache.selected().cloned()
	}

	/// Current selection state
	pub fn selection(&self) -> Selection<M::Entity> {
		self.state.lock().cache.selection().clone()
	}

	/// Current form values
	pub fn form_values(&self) -> M::Fields {
		self.state.lock().form.values().clone()
	}

	/// Overwrite the form values with user input
	pub fn set_form_values(&self, values: M::Fields) {
		self.state.lock().form.set_values(values);
	}

	/// Edit the form values in place
	pub fn update_form(&self, edit: impl FnOnce(&mut M::Fields)) {
		self.state.lock().form.update(edit);
	}

	/// Number of times the form has been reset
	pub fn form_reset_count(&self) -> u64 {
		self.state.lock().form.reset_count()
	}

	/// Whether the current form values pass validation
	pub fn is_valid(&self) -> bool {
		let values = self.form_values();
		self.model.validate(&values).is_ok()
	}

	/// Last recorded failure
	pub fn error(&self) -> Option<AdminError> {
		self.state.lock().error.clone()
	}

	/// Human-readable error string, empty when there is none
	pub fn error_message(&self) -> String {
		self.state
			.lock()
			.error
			.as_ref()
			.map(AdminError::user_message)
			.unwrap_or_default()
	}

	/// Clear the recorded failure
	pub fn clear_error(&self) {
		self.state.lock().error = None;
	}

	/// Outcome of the last delete
	pub fn delete_result(&self) -> Option<DeleteResult> {
		self.state.lock().delete_result.clone()
	}

	/// Clear the outcome of the last delete
	pub fn clear_delete_result(&self) {
		self.state.lock().delete_result = None;
	}

	/// Whether the rename modal is shown
	pub fn show_rename_modal(&self) -> bool {
		self.state.lock().show_rename_modal
	}

	/// Show or hide the rename modal
	pub fn set_show_rename_modal(&self, show: bool) {
		self.state.lock().show_rename_modal = show;
	}

	/// Current rename protocol state
	pub fn rename_state(&self) -> RenameState {
		*self.rename_state.lock()
	}

	/// Whether a submit or rename is in flight
	pub fn is_busy(&self) -> bool {
		self.in_flight.load(Ordering::SeqCst) > 0
	}

	/// Whether a search is in flight
	pub fn is_loading(&self) -> bool {
		self.searching.load(Ordering::SeqCst) > 0
	}

	/// Id currently reflected into the page location
	pub fn current_id(&self) -> Option<EntityId> {
		self.current_id.borrow().clone()
	}

	/// Subscribe to changes of the current id
	pub fn subscribe_current_id(&self) -> watch::Receiver<Option<EntityId>> {
		self.current_id.subscribe()
	}

	/// Modal state backing the default confirmation capability
	///
	/// `None` when a custom [`Confirm`] was supplied.
	pub fn confirm_modal(&self) -> Option<Arc<ConfirmModalState>> {
		self.modal.clone()
	}

	/// Seed the cache and bind the form to the initial selection
	///
	/// Fetches every entity from the list endpoint when the controller was
	/// built without initial data.
	pub async fn initialize(&self) -> AdminResult<()> {
		if self.needs_fetch {
			match self.api.list().await {
				Ok(data) => {
					let mut state = self.state.lock();
					state.cache = EntityCache::new(data, self.initial_id.as_ref());
				}
				Err(ApiError::NotConfigured(_)) => {
					tracing::debug!(model = %self.config.model_type, "no list endpoint, starting empty");
				}
				Err(err) => {
					let err = AdminError::from(err);
					self.record_error(&err);
					return Err(err);
				}
			}
		}

		let (generation, selected, id) = {
			let state = self.state.lock();
			(
				state.generation,
				state.cache.selected().cloned(),
				state.cache.selected_id().cloned(),
			)
		};
		if id.is_none() {
			if let Some(initial) = &self.initial_id {
				tracing::debug!(id = %initial, "initial id did not resolve");
			}
		}
		self.current_id.send_replace(id);
		self.bind_form(generation, selected).await
	}

	/// Whether any record already uses `name`
	pub async fn name_exists(&self, name: &str) -> AdminResult<bool> {
		self.api.name_exists(name).await.map_err(|err| {
			tracing::warn!(name, error = %err, "name lookup failed");
			AdminError::from(err)
		})
	}

	/// Replace the cache with the entities matching a typeahead query
	///
	/// The selected entity is kept even if it does not match. Results of a
	/// query that was overtaken by a newer one are dropped.
	pub async fn search(&self, query: &str) -> AdminResult<()> {
		let _loading = BusyGuard::enter(&self.searching);
		let generation = {
			let mut state = self.state.lock();
			state.search_generation += 1;
			state.search_generation
		};

		let found = self.api.search(query).await.map_err(|err| {
			tracing::warn!(query, error = %err, "search failed");
			AdminError::from(err)
		})?;

		let count = found.len();
		let applied = {
			let mut state = self.state.lock();
			let current = state.search_generation == generation;
			if current {
				state.cache.replace_all(found);
			}
			current
		};
		if applied {
			tracing::debug!(query, count, "search results");
		} else {
			tracing::debug!(query, "discarding results of an earlier search");
		}
		Ok(())
	}

	/// Record a failure for display
	///
	/// Cancellations are not failures and are never recorded.
	pub(crate) fn record_error(&self, err: &AdminError) {
		if err.is_cancelled() {
			return;
		}
		match err {
			AdminError::InvariantViolation(_) => {
				tracing::error!(model = %self.config.model_type, error = %err, "invariant violated")
			}
			_ => tracing::warn!(model = %self.config.model_type, error = %err, "admin operation failed"),
		}
		self.state.lock().error = Some(err.clone());
	}

	/// Publish the current id to subscribers and the location adapter
	pub(crate) fn publish_location(&self, id: Option<EntityId>, shallow: bool) {
		self.location.replace(id.as_ref(), shallow);
		self.current_id.send_replace(id);
	}
}

/// Builder for [`AdminController`]
pub struct AdminControllerBuilder<M: ModelAdmin> {
	model: M,
	config: AdminConfig,
	api: Arc<dyn AdminApi<M::Entity, M::Upsert>>,
	initial_data: Option<Vec<M::Entity>>,
	initial_id: Option<EntityId>,
	confirm: Option<Arc<dyn Confirm>>,
	notifier: Option<Arc<dyn Notifier>>,
	location: Option<Arc<dyn LocationAdapter>>,
	renamer: Option<Arc<dyn RenameHandler<M::Entity>>>,
}

impl<M: ModelAdmin> AdminControllerBuilder<M> {
	/// Seed the cache with server-rendered data
	///
	/// Without initial data, [`AdminController::initialize`] fetches the
	/// list endpoint.
	pub fn initial_data(mut self, data: Vec<M::Entity>) -> Self {
		self.initial_data = Some(data);
		self
	}

	/// Id to select on construction
	pub fn initial_id(mut self, id: impl Into<EntityId>) -> Self {
		self.initial_id = Some(id.into());
		self
	}

	/// Take the initial id from a query string (`?id=12`)
	pub fn initial_query(mut self, query: &str) -> Self {
		self.initial_id = id_from_query(query);
		self
	}

	/// Use a custom confirmation capability
	pub fn confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
		self.confirm = Some(confirm);
		self
	}

	/// Use a custom success notifier
	pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	/// Reflect the current id through a location adapter
	pub fn location(mut self, location: Arc<dyn LocationAdapter>) -> Self {
		self.location = Some(location);
		self
	}

	/// Enable the rename protocol
	pub fn rename(mut self, handler: Arc<dyn RenameHandler<M::Entity>>) -> Self {
		self.renamer = Some(handler);
		self
	}

	/// Build the controller
	pub fn build(self) -> AdminController<M> {
		let needs_fetch = self.initial_data.is_none();
		let cache = EntityCache::new(self.initial_data.unwrap_or_default(), self.initial_id.as_ref());
		let (confirm, modal) = match self.confirm {
			Some(confirm) => (confirm, None),
			None => {
				let modal = ConfirmModalState::new();
				let confirm: Arc<dyn Confirm> = modal.clone();
				(confirm, Some(modal))
			}
		};
		let form = FormState::new(self.model.empty_form());
		let (current_id, _) = watch::channel(cache.selected_id().cloned());

		AdminController {
			model: Arc::new(self.model),
			config: self.config,
			api: self.api,
			confirm,
			modal,
			notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
			location: self.location.unwrap_or_else(|| Arc::new(NoopLocation)),
			renamer: self.renamer,
			state: Mutex::new(AdminState {
				cache,
				form,
				generation: 0,
				error: None,
				delete_result: None,
				show_rename_modal: false,
				search_generation: 0,
			}),
			rename_state: Mutex::new(RenameState::Idle),
			in_flight: AtomicUsize::new(0),
			searching: AtomicUsize::new(0),
			current_id,
			initial_id: self.initial_id,
			needs_fetch,
		}
	}
}
