//! Shared fixtures for controller integration tests
//!
//! Provides a minimal entity type, a scriptable in-memory API, and
//! recording collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use gallformers_admin_core::{
	AdminConfig, AdminController, Confirm, LocationAdapter, ModelAdmin, Notifier,
	QueryStringLocation, RenameHandler,
};
use gallformers_admin_types::{
	AdminApi, AdminError, AdminFormFields, AdminResult, ApiConfig, ApiError, ConfirmationOptions,
	DeleteResult, Entity, EntityId, NEW_ID, RenameEvent,
};
use parking_lot::Mutex;
use rstest::fixture;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Gall {
	pub id: i64,
	pub name: String,
}

impl Entity for Gall {
	fn id(&self) -> EntityId {
		EntityId::Int(self.id)
	}

	fn key(&self) -> &str {
		&self.name
	}
}

pub fn gall(id: i64, name: &str) -> Gall {
	Gall {
		id,
		name: name.into(),
	}
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GallFields {
	pub name: Option<String>,
	pub notes: String,
	pub del: bool,
}

impl GallFields {
	pub fn named(name: &str) -> Self {
		Self {
			name: Some(name.into()),
			..Default::default()
		}
	}
}

impl AdminFormFields for GallFields {
	fn key(&self) -> Option<String> {
		self.name.clone()
	}

	fn is_delete(&self) -> bool {
		self.del
	}

	fn set_delete(&mut self, del: bool) {
		self.del = del;
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GallUpsert {
	pub id: EntityId,
	pub name: String,
	pub notes: String,
}

/// Model whose form binding can be slowed down or made to fail per id
#[derive(Default)]
pub struct GallModel {
	pub delays: Mutex<HashMap<i64, Duration>>,
	pub failing: Mutex<HashSet<i64>>,
	pub bindings: AtomicUsize,
}

impl GallModel {
	pub fn delay(&self, id: i64, delay: Duration) {
		self.delays.lock().insert(id, delay);
	}

	pub fn fail(&self, id: i64) {
		self.failing.lock().insert(id);
	}
}

#[async_trait]
impl ModelAdmin for GallModel {
	type Entity = Gall;
	type Fields = GallFields;
	type Upsert = GallUpsert;

	fn empty_form(&self) -> GallFields {
		GallFields::default()
	}

	async fn form_fields(&self, entity: &Gall) -> AdminResult<GallFields> {
		self.bindings.fetch_add(1, Ordering::SeqCst);
		let delay = self.delays.lock().get(&entity.id).copied();
		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}
		if self.failing.lock().contains(&entity.id) {
			return Err(AdminError::Validation("host lookup failed".into()));
		}
		Ok(GallFields {
			name: Some(entity.name.clone()),
			notes: format!("notes for {}", entity.id),
			del: false,
		})
	}

	fn to_upsert_fields(&self, fields: &GallFields, key: &str, id: EntityId) -> GallUpsert {
		GallUpsert {
			id,
			name: key.to_string(),
			notes: fields.notes.clone(),
		}
	}

	fn validate(&self, fields: &GallFields) -> AdminResult<()> {
		match fields.name.as_deref().map(str::trim) {
			Some(name) if !name.is_empty() => Ok(()),
			_ => Err(AdminError::Validation("The gall is required".into())),
		}
	}

	fn create_new(&self, name: &str) -> Option<Gall> {
		Some(gall(NEW_ID, name))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
	Delete(String),
	Upsert(GallUpsert),
	NameExists(String),
	Search(String),
	List,
}

/// In-memory API echoing upserts back as persisted entities
pub struct MockApi {
	next_id: AtomicI64,
	pub calls: Mutex<Vec<ApiCall>>,
	failures: Mutex<VecDeque<ApiError>>,
	upsert_delays: Mutex<VecDeque<Duration>>,
	pub search_results: Mutex<Vec<Gall>>,
	/// Results and latency per query, overriding `search_results`
	pub queries: Mutex<HashMap<String, (Duration, Vec<Gall>)>>,
	pub list_results: Mutex<Option<Vec<Gall>>>,
	pub existing_names: Mutex<HashSet<String>>,
}

impl MockApi {
	pub fn new(next_id: i64) -> Arc<Self> {
		Arc::new(Self {
			next_id: AtomicI64::new(next_id),
			calls: Mutex::new(Vec::new()),
			failures: Mutex::new(VecDeque::new()),
			upsert_delays: Mutex::new(VecDeque::new()),
			search_results: Mutex::new(Vec::new()),
			queries: Mutex::new(HashMap::new()),
			list_results: Mutex::new(None),
			existing_names: Mutex::new(HashSet::new()),
		})
	}

	/// Make the next call fail with `err`
	pub fn fail_next(&self, err: ApiError) {
		self.failures.lock().push_back(err);
	}

	/// Delay the next upsert by `delay`
	pub fn delay_next_upsert(&self, delay: Duration) {
		self.upsert_delays.lock().push_back(delay);
	}

	/// Answer `query` with `results` after `delay`
	pub fn answer_query(&self, query: &str, delay: Duration, results: Vec<Gall>) {
		self.queries.lock().insert(query.to_string(), (delay, results));
	}

	pub fn calls(&self) -> Vec<ApiCall> {
		self.calls.lock().clone()
	}

	fn record(&self, call: ApiCall) -> Result<(), ApiError> {
		self.calls.lock().push(call);
		match self.failures.lock().pop_front() {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl AdminApi<Gall, GallUpsert> for MockApi {
	async fn delete(&self, key: &str) -> Result<DeleteResult, ApiError> {
		self.record(ApiCall::Delete(key.to_string()))?;
		Ok(DeleteResult {
			kind: "gall".into(),
			name: key.to_string(),
			count: 1,
		})
	}

	async fn upsert(&self, payload: &GallUpsert) -> Result<Gall, ApiError> {
		let delay = self.upsert_delays.lock().pop_front();
		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}
		self.record(ApiCall::Upsert(payload.clone()))?;
		let id = match &payload.id {
			EntityId::Int(NEW_ID) => self.next_id.fetch_add(1, Ordering::SeqCst),
			EntityId::Int(id) => *id,
			EntityId::Str(s) => return Err(ApiError::Decode(format!("bad id {}", s))),
		};
		Ok(gall(id, &payload.name))
	}

	async fn name_exists(&self, name: &str) -> Result<bool, ApiError> {
		self.record(ApiCall::NameExists(name.to_string()))?;
		Ok(self.existing_names.lock().contains(name))
	}

	async fn search(&self, query: &str) -> Result<Vec<Gall>, ApiError> {
		self.record(ApiCall::Search(query.to_string()))?;
		let scripted = self.queries.lock().get(query).cloned();
		match scripted {
			Some((delay, results)) => {
				tokio::time::sleep(delay).await;
				Ok(results)
			}
			None => Ok(self.search_results.lock().clone()),
		}
	}

	async fn list(&self) -> Result<Vec<Gall>, ApiError> {
		self.record(ApiCall::List)?;
		self.list_results
			.lock()
			.clone()
			.ok_or_else(|| ApiError::NotConfigured("list".into()))
	}
}

#[derive(Default)]
pub struct RecordingNotifier {
	pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
	pub fn messages(&self) -> Vec<String> {
		self.messages.lock().clone()
	}
}

impl Notifier for RecordingNotifier {
	fn success(&self, message: &str) {
		self.messages.lock().push(message.to_string());
	}
}

/// Confirmation answering from a script; unscripted prompts are accepted
#[derive(Default)]
pub struct ScriptedConfirm {
	answers: Mutex<VecDeque<bool>>,
	pub prompts: Mutex<Vec<ConfirmationOptions>>,
}

impl ScriptedConfirm {
	pub fn answering(answers: &[bool]) -> Arc<Self> {
		Arc::new(Self {
			answers: Mutex::new(answers.iter().copied().collect()),
			prompts: Mutex::new(Vec::new()),
		})
	}

	pub fn prompts(&self) -> Vec<ConfirmationOptions> {
		self.prompts.lock().clone()
	}
}

#[async_trait]
impl Confirm for ScriptedConfirm {
	async fn confirm(&self, options: ConfirmationOptions) -> AdminResult<()> {
		let catch_on_cancel = options.catch_on_cancel;
		self.prompts.lock().push(options);
		let accepted = self.answers.lock().pop_front().unwrap_or(true);
		if accepted || !catch_on_cancel {
			Ok(())
		} else {
			Err(AdminError::Cancelled)
		}
	}
}

/// Renames by replacing the name; names starting with "New " need confirmation
pub struct GallRenamer;

#[async_trait]
impl RenameHandler<Gall> for GallRenamer {
	async fn rename(
		&self,
		selected: &Gall,
		event: &RenameEvent,
		confirm: &dyn Confirm,
	) -> AdminResult<Gall> {
		if event.new.trim().is_empty() {
			return Err(AdminError::Rename("The new name is empty".into()));
		}
		if event.new.starts_with("New ") {
			confirm
				.confirm(ConfirmationOptions::danger(
					"Are you sure?",
					format!("Renaming to {} needs confirmation.", event.new),
				))
				.await?;
		}
		Ok(Gall {
			id: selected.id,
			name: event.new.clone(),
		})
	}
}

pub fn config() -> AdminConfig {
	AdminConfig::new(
		"Gall",
		ApiConfig::new("name", "../api/gall/", "../api/gall/upsert"),
	)
}

/// A controller wired to recording collaborators
pub struct Harness {
	pub controller: AdminController<GallModel>,
	pub api: Arc<MockApi>,
	pub notifier: Arc<RecordingNotifier>,
	pub location: Arc<QueryStringLocation>,
	pub confirm: Arc<ScriptedConfirm>,
}

impl Harness {
	pub fn new(data: Vec<Gall>, initial_query: &str, answers: &[bool]) -> Self {
		Self::with_model(GallModel::default(), data, initial_query, answers)
	}

	pub fn with_model(model: GallModel, data: Vec<Gall>, initial_query: &str, answers: &[bool]) -> Self {
		let api = MockApi::new(100);
		let notifier = Arc::new(RecordingNotifier::default());
		let location = Arc::new(QueryStringLocation::new(initial_query));
		let confirm = ScriptedConfirm::answering(answers);
		let dyn_api: Arc<dyn AdminApi<Gall, GallUpsert>> = api.clone();
		let controller = AdminController::builder(model, config(), dyn_api)
			.initial_data(data)
			.initial_query(initial_query)
			.notifier(notifier.clone())
			.location(location.clone() as Arc<dyn LocationAdapter>)
			.confirm(confirm.clone())
			.rename(Arc::new(GallRenamer))
			.build();
		Self {
			controller,
			api,
			notifier,
			location,
			confirm,
		}
	}
}

#[fixture]
pub fn galls() -> Vec<Gall> {
	vec![gall(1, "A"), gall(2, "Andricus quercuscalifornicus")]
}
