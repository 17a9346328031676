//! # gallformers
//!
//! Administration tooling for [gallformers](https://gallformers.org), the
//! catalog of plant galls and their hosts.
//!
//! Every admin page on the site (hosts, galls, sources, families, places,
//! ...) edits one entity type with the same workflow: pick an entity, edit
//! it in a form, then save, delete or rename it. This crate packages that
//! workflow as a generic controller plus the pieces a page plugs into it.
//!
//! ## Feature Flags
//!
//! - `minimal` - Controller and shared types only
//! - `full` (default) - Everything below
//! - `client` - `reqwest`-backed [`AdminApi`](admin::AdminApi) implementation
//! - `species` - Host species administration with genus-aware renames
//!
//! ## Quick Example
//!
//! ```ignore
//! use gallformers::admin::*;
//! use std::sync::Arc;
//!
//! let config = AdminConfig::builder()
//!     .model_type("Host")
//!     .del_endpoint("../api/host/")
//!     .upsert_endpoint("../api/host/upsert")
//!     .build()?;
//! let api = HttpAdminApi::new(ClientConfig::new("https://gallformers.org/admin/"), config.api.clone())?;
//!
//! let controller = AdminController::builder(HostAdmin::new(), config, Arc::new(api))
//!     .initial_data(hosts)
//!     .initial_query("?id=12")
//!     .build();
//! controller.initialize().await?;
//! ```

pub mod admin;

pub use admin::{AdminController, AdminError, AdminResult, ModelAdmin};
