//! Location indicator binding
//!
//! The selected entity's id is reflected into the page's query string
//! (`?id=<id>`). The controller only publishes the current id; a
//! [`LocationAdapter`] is responsible for showing it.

use gallformers_admin_types::EntityId;
use parking_lot::Mutex;
use url::form_urlencoded;

/// Collaborator reflecting the current id into the page location
pub trait LocationAdapter: Send + Sync {
	/// Replace the current location
	///
	/// `shallow` navigations must not reload the page.
	fn replace(&self, id: Option<&EntityId>, shallow: bool);
}

/// Adapter that ignores location updates
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLocation;

impl LocationAdapter for NoopLocation {
	fn replace(&self, _id: Option<&EntityId>, _shallow: bool) {}
}

/// Adapter keeping the query string in memory
///
/// Useful for server-rendered pages and tests.
#[derive(Debug, Default)]
pub struct QueryStringLocation {
	state: Mutex<(String, usize)>,
}

impl QueryStringLocation {
	/// Create an adapter starting from an existing query string
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			state: Mutex::new((query.into(), 0)),
		}
	}

	/// Current query string (`"?id=1"` or `""`)
	pub fn query(&self) -> String {
		self.state.lock().0.clone()
	}

	/// Number of non-shallow navigations performed
	pub fn reloads(&self) -> usize {
		self.state.lock().1
	}
}

impl LocationAdapter for QueryStringLocation {
	fn replace(&self, id: Option<&EntityId>, shallow: bool) {
		let mut state = self.state.lock();
		state.0 = query_for(id);
		if !shallow {
			state.1 += 1;
		}
	}
}

/// Query string representing a selection
///
/// # Examples
///
/// ```
/// use gallformers_admin_core::query_for;
/// use gallformers_admin_types::EntityId;
///
/// assert_eq!(query_for(Some(&EntityId::Int(7))), "?id=7");
/// assert_eq!(query_for(None), "");
/// ```
pub fn query_for(id: Option<&EntityId>) -> String {
	match id {
		Some(id) => {
			let encoded: String = form_urlencoded::Serializer::new(String::new())
				.append_pair("id", &id.to_string())
				.finish();
			format!("?{}", encoded)
		}
		None => String::new(),
	}
}

/// Extract the `id` parameter from a query string
///
/// The leading `?` is optional. Missing or blank values yield `None`.
pub fn id_from_query(query: &str) -> Option<EntityId> {
	let query = query.strip_prefix('?').unwrap_or(query);
	form_urlencoded::parse(query.as_bytes())
		.find(|(key, _)| key == "id")
		.and_then(|(_, value)| EntityId::parse(&value))
}
