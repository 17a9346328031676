//! HTTP client configuration

use std::time::Duration;

/// Connection settings for [`HttpAdminApi`](crate::HttpAdminApi)
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// URL of the admin page, used to resolve relative endpoints
	/// (e.g., "https://www.gallformers.org/admin/")
	pub base_url: String,

	/// Request timeout (default: 30 seconds)
	pub timeout: Duration,
}

impl ClientConfig {
	/// Create a configuration for the given base URL
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			timeout: Duration::from_secs(30),
		}
	}

	/// Set the request timeout
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}
