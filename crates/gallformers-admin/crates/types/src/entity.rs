//! Entity identity
//!
//! Every administered record carries a unique identifier and a key field
//! (usually its name) that is used for lookup, deletion and renames.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric id used for records that have not been persisted yet
pub const NEW_ID: i64 = -1;

/// Identifier of an administered record
///
/// Ids are numeric for every table on the site, but a few endpoints key
/// records by string, so both forms are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
	/// Numeric primary key
	Int(i64),
	/// String primary key
	Str(String),
}

impl EntityId {
	/// Sentinel id for a record that does not exist on the server yet
	pub const NEW: EntityId = EntityId::Int(NEW_ID);

	/// Parse an id coming from a URL parameter or form input
	///
	/// Blank input yields `None`; anything that parses as an integer becomes
	/// [`EntityId::Int`], everything else is kept verbatim.
	///
	/// # Examples
	///
	/// ```
	/// use gallformers_admin_types::EntityId;
	///
	/// assert_eq!(EntityId::parse("42"), Some(EntityId::Int(42)));
	/// assert_eq!(EntityId::parse("abc"), Some(EntityId::Str("abc".into())));
	/// assert_eq!(EntityId::parse("  "), None);
	/// ```
	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();
		if raw.is_empty() {
			return None;
		}
		Some(match raw.parse::<i64>() {
			Ok(n) => EntityId::Int(n),
			Err(_) => EntityId::Str(raw.to_string()),
		})
	}

	/// Whether this is the "not yet persisted" sentinel
	pub fn is_new(&self) -> bool {
		matches!(self, EntityId::Int(NEW_ID))
	}

	/// Numeric value, if the id is numeric
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			EntityId::Int(n) => Some(*n),
			EntityId::Str(_) => None,
		}
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EntityId::Int(n) => write!(f, "{}", n),
			EntityId::Str(s) => f.write_str(s),
		}
	}
}

impl From<i64> for EntityId {
	fn from(value: i64) -> Self {
		EntityId::Int(value)
	}
}

impl From<&str> for EntityId {
	fn from(value: &str) -> Self {
		EntityId::Str(value.to_string())
	}
}

impl From<String> for EntityId {
	fn from(value: String) -> Self {
		EntityId::Str(value)
	}
}

/// A server-owned record that can be administered
///
/// Implementations are cheap value types; the controller keeps a cached
/// copy of every entity it has seen.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
	/// Unique identifier
	fn id(&self) -> EntityId;

	/// Value of the key field (e.g. the species name)
	fn key(&self) -> &str;

	/// Whether this entity has not been persisted yet
	fn is_new(&self) -> bool {
		self.id().is_new()
	}
}
