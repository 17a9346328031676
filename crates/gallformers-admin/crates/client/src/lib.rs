//! HTTP client for gallformers admin endpoints
//!
//! [`HttpAdminApi`] implements [`AdminApi`](gallformers_admin_types::AdminApi)
//! on top of `reqwest`. Endpoints from the
//! [`ApiConfig`](gallformers_admin_types::ApiConfig) may be relative
//! (`"../api/host/"`); they are resolved against
//! [`ClientConfig::base_url`].

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::HttpAdminApi;
