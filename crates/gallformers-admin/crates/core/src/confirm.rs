//! Confirmation prompts
//!
//! The controller asks for confirmation through the [`Confirm`] trait. The
//! default implementation, [`ConfirmModalState`], holds the prompt for the
//! page to render and resumes the waiting operation once the user answers.

use async_trait::async_trait;
use gallformers_admin_types::{AdminError, AdminResult, ConfirmationOptions};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{Notify, oneshot};

/// A yes/no confirmation capability
///
/// Resolves `Ok(())` when the user accepts. A cancelled prompt resolves to
/// [`AdminError::Cancelled`] when `catch_on_cancel` is set and to `Ok(())`
/// otherwise.
#[async_trait]
pub trait Confirm: Send + Sync {
	/// Present a prompt and wait for the answer
	async fn confirm(&self, options: ConfirmationOptions) -> AdminResult<()>;
}

struct PendingPrompt {
	options: ConfirmationOptions,
	responder: oneshot::Sender<bool>,
}

/// State of the confirmation modal shown by an admin page
///
/// Only one prompt is visible at a time. Showing a new prompt cancels the
/// previous one.
///
/// # Examples
///
/// ```ignore
/// use gallformers_admin_core::ConfirmModalState;
///
/// let modal = ConfirmModalState::new();
/// // page side, once the prompt is rendered and answered:
/// modal.shown().await;
/// modal.accept();
/// ```
#[derive(Default)]
pub struct ConfirmModalState {
	pending: Mutex<Option<PendingPrompt>>,
	shown: Notify,
}

impl ConfirmModalState {
	/// Create a new confirmation modal state
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Whether a prompt is waiting for an answer
	pub fn is_visible(&self) -> bool {
		self.pending.lock().is_some()
	}

	/// Options of the visible prompt
	pub fn options(&self) -> Option<ConfirmationOptions> {
		self.pending.lock().as_ref().map(|p| p.options.clone())
	}

	/// Accept the visible prompt
	///
	/// Returns `false` if no prompt was visible.
	pub fn accept(&self) -> bool {
		self.answer(true)
	}

	/// Cancel the visible prompt
	///
	/// Returns `false` if no prompt was visible.
	pub fn cancel(&self) -> bool {
		self.answer(false)
	}

	/// Wait until a prompt is visible
	pub async fn shown(&self) {
		loop {
			let notified = self.shown.notified();
			if self.is_visible() {
				return;
			}
			notified.await;
		}
	}

	fn answer(&self, accepted: bool) -> bool {
		let pending = self.pending.lock().take();
		match pending {
			Some(prompt) => {
				// The waiting side may have gone away; nothing to resume then.
				let _ = prompt.responder.send(accepted);
				true
			}
			None => false,
		}
	}

	fn show(&self, options: ConfirmationOptions) -> oneshot::Receiver<bool> {
		let (responder, receiver) = oneshot::channel();
		let previous = self
			.pending
			.lock()
			.replace(PendingPrompt { options, responder });
		if let Some(previous) = previous {
			tracing::debug!(title = %previous.options.title, "confirmation prompt replaced");
			let _ = previous.responder.send(false);
		}
		self.shown.notify_waiters();
		receiver
	}
}

#[async_trait]
impl Confirm for ConfirmModalState {
	async fn confirm(&self, options: ConfirmationOptions) -> AdminResult<()> {
		let catch_on_cancel = options.catch_on_cancel;
		let receiver = self.show(options);
		// A dropped responder counts as a cancellation.
		let accepted = receiver.await.unwrap_or(false);
		if accepted || !catch_on_cancel {
			Ok(())
		} else {
			Err(AdminError::Cancelled)
		}
	}
}
