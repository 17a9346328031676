//! Rename protocol state transition tests

#![cfg(test)]

mod common;

use common::{ApiCall, Gall, GallModel, GallRenamer, GallUpsert, Harness, MockApi, gall, galls};
use gallformers_admin_core::{AdminController, MainFieldChoice, RenameOutcome, RenameState};
use gallformers_admin_types::{AdminApi, AdminError, ApiError, EntityId, NEW_ID, RenameEvent};
use parking_lot::Mutex;
use rstest::rstest;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A tracing layer that captures formatted events
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);
		self.logs
			.lock()
			.push(format!("[{}] {}", event.metadata().level(), visitor.message));
	}
}

#[rstest]
#[tokio::test]
async fn test_rename_without_confirmation_upserts(galls: Vec<Gall>) {
	// Arrange
	let h = Harness::new(galls, "?id=2", &[]);
	h.controller.initialize().await.unwrap();

	// Act
	let outcome = h
		.controller
		.rename(RenameEvent::new(
			"Andricus quercuscalifornicus",
			"Andricus californicus",
		))
		.await
		.unwrap();

	// Assert
	assert_eq!(
		outcome,
		RenameOutcome::Renamed(gall(2, "Andricus californicus"))
	);
	assert!(h.confirm.prompts().is_empty());
	assert_eq!(
		h.api.calls(),
		vec![ApiCall::Upsert(GallUpsert {
			id: EntityId::Int(2),
			name: "Andricus californicus".into(),
			notes: "notes for 2".into(),
		})]
	);
	assert_eq!(h.controller.selected(), Some(gall(2, "Andricus californicus")));
	assert_eq!(h.controller.rename_state(), RenameState::Idle);
	assert!(!h.controller.is_busy());
}

#[rstest]
#[tokio::test]
async fn test_accepted_confirmation_proceeds(galls: Vec<Gall>) {
	// Arrange
	let h = Harness::new(galls, "?id=1", &[true]);
	h.controller.initialize().await.unwrap();

	// Act
	let outcome = h
		.controller
		.rename(RenameEvent::new("A", "New A"))
		.await
		.unwrap();

	// Assert
	assert_eq!(outcome, RenameOutcome::Renamed(gall(1, "New A")));
	assert_eq!(h.confirm.prompts().len(), 1);
	assert_eq!(h.controller.data()[0], gall(1, "New A"));
}

#[rstest]
#[tokio::test]
async fn test_cancelled_rename_changes_nothing(galls: Vec<Gall>) {
	// Arrange
	let h = Harness::new(galls, "?id=1", &[false]);
	h.controller.initialize().await.unwrap();
	h.api.fail_next(ApiError::Network("earlier failure".into()));
	let _ = h.controller.submit_form().await;
	let data = h.controller.data();
	let selected = h.controller.selected();
	let error = h.controller.error();
	let form = h.controller.form_values();
	let query = h.location.query();

	// Act
	let outcome = h
		.controller
		.rename(RenameEvent::new("A", "New A"))
		.await
		.unwrap();

	// Assert
	assert_eq!(outcome, RenameOutcome::Cancelled);
	assert_eq!(h.controller.data(), data);
	assert_eq!(h.controller.selected(), selected);
	assert_eq!(h.controller.error(), error);
	assert_eq!(h.controller.form_values(), form);
	assert_eq!(h.location.query(), query);
	assert_eq!(h.api.calls().len(), 1);
	assert_eq!(h.controller.rename_state(), RenameState::Idle);
}

#[rstest]
#[tokio::test]
async fn test_rename_without_selection_is_invariant_violation(galls: Vec<Gall>) {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let _guard = tracing_subscriber::registry()
		.with(LogCapture { logs: logs.clone() })
		.set_default();
	let h = Harness::new(galls, "", &[]);

	// Act
	let err = h
		.controller
		.rename(RenameEvent::new("A", "B"))
		.await
		.unwrap_err();

	// Assert
	assert!(matches!(err, AdminError::InvariantViolation(_)));
	assert_eq!(
		h.controller.error_message(),
		"You encountered a bug. The current selection is invalid in the middle of a rename operation."
	);
	assert_eq!(h.controller.rename_state(), RenameState::Failed);
	assert!(h.api.calls().is_empty());
	let captured = logs.lock();
	assert!(
		captured
			.iter()
			.any(|log| log.contains("ERROR") && log.contains("invariant violated")),
		"Expected an error log, but got: {:?}",
		*captured
	);
}

#[rstest]
#[tokio::test]
async fn test_rename_failure_surfaces_like_submit_failure(galls: Vec<Gall>) {
	// Arrange
	let h = Harness::new(galls, "?id=1", &[]);
	h.controller.initialize().await.unwrap();

	// Act
	let err = h
		.controller
		.rename(RenameEvent::new("A", " "))
		.await
		.unwrap_err();

	// Assert
	assert_eq!(err, AdminError::Rename("The new name is empty".into()));
	assert_eq!(
		h.controller.error_message(),
		"Failed to save changes. The new name is empty."
	);
	assert_eq!(h.controller.rename_state(), RenameState::Failed);
	assert_eq!(h.controller.selected(), Some(gall(1, "A")));
}

#[rstest]
#[tokio::test]
async fn test_failed_upsert_after_rename_marks_failed(galls: Vec<Gall>) {
	// Arrange
	let h = Harness::new(galls, "?id=1", &[]);
	h.controller.initialize().await.unwrap();
	h.api.fail_next(ApiError::Status {
		status: 409,
		body: "name taken".into(),
	});

	// Act
	let err = h
		.controller
		.rename(RenameEvent::new("A", "B"))
		.await
		.unwrap_err();

	// Assert
	assert!(matches!(err, AdminError::Api(_)));
	assert_eq!(
		h.controller.error_message(),
		"Failed to save changes. 409 name taken."
	);
	assert_eq!(h.controller.data()[0], gall(1, "A"));
	assert_eq!(h.controller.rename_state(), RenameState::Failed);

	// Act
	h.controller.rename(RenameEvent::new("A", "B")).await.unwrap();

	// Assert
	assert_eq!(h.controller.rename_state(), RenameState::Idle);
	assert_eq!(h.controller.error(), None);
}

#[rstest]
#[tokio::test]
async fn test_pending_confirmation_is_observable(galls: Vec<Gall>) {
	// Arrange
	let api = MockApi::new(1);
	let dyn_api: Arc<dyn AdminApi<Gall, GallUpsert>> = api.clone();
	let controller = Arc::new(
		AdminController::builder(GallModel::default(), common::config(), dyn_api)
			.initial_data(galls)
			.initial_id(1_i64)
			.rename(Arc::new(GallRenamer))
			.build(),
	);
	controller.initialize().await.unwrap();
	let modal = controller.confirm_modal().unwrap();

	// Act
	let renaming = {
		let controller = Arc::clone(&controller);
		tokio::spawn(async move { controller.rename(RenameEvent::new("A", "New A")).await })
	};
	modal.shown().await;

	// Assert
	assert_eq!(controller.rename_state(), RenameState::ConfirmationPending);
	assert!(controller.is_busy());
	assert!(api.calls().is_empty());

	// Act
	modal.accept();
	let outcome = renaming.await.unwrap().unwrap();

	// Assert
	assert_eq!(outcome, RenameOutcome::Renamed(gall(1, "New A")));
	assert_eq!(controller.rename_state(), RenameState::Idle);
	assert!(!controller.is_busy());
}

#[rstest]
#[tokio::test]
async fn test_selection_change_during_confirmation_drops_rename(galls: Vec<Gall>) {
	// Arrange
	let api = MockApi::new(1);
	let dyn_api: Arc<dyn AdminApi<Gall, GallUpsert>> = api.clone();
	let controller = Arc::new(
		AdminController::builder(GallModel::default(), common::config(), dyn_api)
			.initial_data(galls.clone())
			.initial_id(1_i64)
			.rename(Arc::new(GallRenamer))
			.build(),
	);
	controller.initialize().await.unwrap();
	let modal = controller.confirm_modal().unwrap();
	let renaming = {
		let controller = Arc::clone(&controller);
		tokio::spawn(async move { controller.rename(RenameEvent::new("A", "New A")).await })
	};
	modal.shown().await;

	// Act
	controller.select_id(&EntityId::Int(2)).await.unwrap();
	modal.accept();
	let outcome = renaming.await.unwrap().unwrap();

	// Assert
	assert_eq!(outcome, RenameOutcome::Superseded);
	assert!(api.calls().is_empty());
	assert_eq!(controller.data(), galls);
	assert_eq!(controller.selected(), Some(galls[1].clone()));
	assert_eq!(controller.error(), None);
	assert_eq!(controller.rename_state(), RenameState::Idle);
	assert!(!controller.is_busy());
}

#[rstest]
#[tokio::test]
async fn test_rename_of_draft_upserts_as_new(galls: Vec<Gall>) {
	// Arrange
	let h = Harness::new(galls, "", &[]);
	h.controller
		.on_main_field_change(MainFieldChoice::New("Callirhytis".into()))
		.await
		.unwrap();

	// Act
	let outcome = h
		.controller
		.rename(RenameEvent::new("Callirhytis", "Callirhytis perdens"))
		.await
		.unwrap();

	// Assert
	assert_eq!(outcome, RenameOutcome::Renamed(gall(100, "Callirhytis perdens")));
	assert_eq!(
		h.api.calls(),
		vec![ApiCall::Upsert(GallUpsert {
			id: EntityId::NEW,
			name: "Callirhytis perdens".into(),
			notes: format!("notes for {}", NEW_ID),
		})]
	);
	assert_eq!(h.controller.selected(), Some(gall(100, "Callirhytis perdens")));
}

#[rstest]
#[tokio::test]
async fn test_rename_modal_flag() {
	let h = Harness::new(vec![], "", &[]);
	assert!(!h.controller.show_rename_modal());
	h.controller.set_show_rename_modal(true);
	assert!(h.controller.show_rename_modal());
}
