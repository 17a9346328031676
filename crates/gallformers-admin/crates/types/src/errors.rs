//! Error types for admin controllers

use thiserror::Error;

/// Failure reported by the API collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	/// The server answered with a non-success status
	#[error("{status} {body}")]
	Status {
		/// HTTP status code
		status: u16,
		/// Response body, usually the server's explanation
		body: String,
	},

	/// The request never produced a response
	#[error("Network error: {0}")]
	Network(String),

	/// The response body could not be decoded
	#[error("Invalid response: {0}")]
	Decode(String),

	/// The operation needs an endpoint that was not configured
	#[error("No endpoint configured for {0}")]
	NotConfigured(String),
}

/// Admin controller error type
///
/// Errors are cloneable so the controller can keep the last failure around
/// for display while also returning it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
	/// Internal state was inconsistent (a programming error)
	#[error("You encountered a bug. {0}")]
	InvariantViolation(String),

	/// The API collaborator failed
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Form values did not pass validation
	#[error("{0}")]
	Validation(String),

	/// Mapping a selection into form fields failed
	#[error("Failed to load the form: {0}")]
	Binding(String),

	/// An entity-specific rename step failed
	#[error("{0}")]
	Rename(String),

	/// The user declined a confirmation prompt
	#[error("Operation cancelled")]
	Cancelled,
}

impl AdminError {
	/// Whether this is a user cancellation rather than a failure
	pub fn is_cancelled(&self) -> bool {
		matches!(self, AdminError::Cancelled)
	}

	/// Human-readable message shown inline on the admin page
	///
	/// Save and rename failures share one format so the page reports them
	/// the same way.
	pub fn user_message(&self) -> String {
		match self {
			AdminError::InvariantViolation(_) | AdminError::Binding(_) => self.to_string(),
			AdminError::Cancelled => String::new(),
			AdminError::Api(_) | AdminError::Validation(_) | AdminError::Rename(_) => {
				format!("Failed to save changes. {}.", self)
			}
		}
	}
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;
