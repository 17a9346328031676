//! Event and result payloads exchanged with the admin page

use serde::{Deserialize, Serialize};

/// A proposed change of an entity's key field
///
/// `old` is only absent when the entity has never been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameEvent {
	/// Current key value
	#[serde(default)]
	pub old: Option<String>,
	/// Requested key value
	pub new: String,
	/// Keep the old value as an alias of the renamed entity
	#[serde(default)]
	pub add_alias: bool,
}

impl RenameEvent {
	/// Rename an existing entity
	pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
		Self {
			old: Some(old.into()),
			new: new.into(),
			add_alias: false,
		}
	}

	/// Keep the old name as an alias
	pub fn with_alias(mut self) -> Self {
		self.add_alias = true;
		self
	}
}

/// Outcome of a delete call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
	/// Kind of record that was deleted
	#[serde(rename = "type")]
	pub kind: String,
	/// Key of the deleted record
	pub name: String,
	/// Number of rows removed, cascades included
	pub count: u64,
}

/// Visual weight of a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmVariant {
	/// Destructive action
	Danger,
	/// Informational prompt
	#[default]
	Info,
}

/// Options for a yes/no confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationOptions {
	/// Dialog title
	pub title: String,
	/// Dialog body
	pub message: String,
	/// Visual weight
	pub variant: ConfirmVariant,
	/// Report a cancelled prompt as an error instead of resolving it
	pub catch_on_cancel: bool,
}

impl ConfirmationOptions {
	/// A destructive prompt whose cancellation is reported to the caller
	pub fn danger(title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			message: message.into(),
			variant: ConfirmVariant::Danger,
			catch_on_cancel: true,
		}
	}
}
