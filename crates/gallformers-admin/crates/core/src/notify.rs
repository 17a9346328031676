//! Success notifications

/// Transient success notifications ("Host Updated", "Host deleted")
pub trait Notifier: Send + Sync {
	/// Report a successful operation to the user
	fn success(&self, message: &str);
}

/// Notifier that emits an `info` event for every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn success(&self, message: &str) {
		tracing::info!(notification = message, "admin operation succeeded");
	}
}
