//! Entity administration controller
//!
//! Every admin page (hosts, galls, sources, families, ...) drives the same
//! controller. It owns:
//!
//! - an **entity cache** with a single selection ([`cache`])
//! - a **form binding** that turns the selection into form values ([`binding`])
//! - a **transaction executor** for delete/upsert submissions ([`executor`])
//! - an optional **rename protocol** with confirmation prompts ([`rename`])
//!
//! The page supplies a [`ModelAdmin`] describing the entity type and the
//! collaborators the controller talks to: an
//! [`AdminApi`](gallformers_admin_types::AdminApi), a [`Confirm`] prompt, a
//! [`Notifier`] and a [`LocationAdapter`].
//!
//! ## Example
//!
//! ```ignore
//! use gallformers_admin_core::{AdminConfig, AdminController};
//!
//! let config = AdminConfig::builder()
//!     .model_type("Host")
//!     .key_prop("name")
//!     .del_endpoint("../api/host/")
//!     .upsert_endpoint("../api/host/upsert")
//!     .build()?;
//!
//! let controller = AdminController::builder(HostAdmin::new(), config, api)
//!     .initial_data(hosts)
//!     .initial_query("?id=12")
//!     .build();
//! controller.initialize().await?;
//! ```

pub mod binding;
pub mod cache;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod executor;
pub mod form;
pub mod location;
pub mod model;
pub mod notify;
pub mod rename;

pub use binding::MainFieldChoice;
pub use cache::{EntityCache, Selection};
pub use config::{AdminConfig, AdminConfigBuilder, ConfigError};
pub use confirm::{Confirm, ConfirmModalState};
pub use controller::{AdminController, AdminControllerBuilder};
pub use executor::{ApiOutcome, SubmitOutcome, delete_or_upsert};
pub use form::FormState;
pub use location::{LocationAdapter, NoopLocation, QueryStringLocation, id_from_query, query_for};
pub use model::ModelAdmin;
pub use notify::{Notifier, TracingNotifier};
pub use rename::{RenameHandler, RenameOutcome, RenameState};
