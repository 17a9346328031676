//! Entity administration
//!
//! Unified imports for the admin stack under `gallformers::admin`.
//!
//! ## Architecture
//!
//! - **types**: Entities, ids, events, errors and the API contract
//! - **core**: The controller and the collaborator traits it talks to
//! - **client**: HTTP implementation of the API contract
//! - **species**: Host species administration
//!
//! Submodules stay reachable for less common items:
//!
//! ```ignore
//! use gallformers::admin::core::cache::EntityCache;
//! use gallformers::admin::types::events::RenameEvent;
//! ```

pub use gallformers_admin::core;
pub use gallformers_admin::types;

#[cfg(feature = "client")]
pub use gallformers_admin::client;

#[cfg(feature = "species")]
pub use gallformers_admin::species;

pub use gallformers_admin::core::{
	AdminConfig, AdminConfigBuilder, AdminController, AdminControllerBuilder, Confirm,
	ConfirmModalState, FormState, LocationAdapter, MainFieldChoice, ModelAdmin, Notifier,
	QueryStringLocation, RenameHandler, RenameOutcome, RenameState, SubmitOutcome,
	TracingNotifier,
};
pub use gallformers_admin::types::{
	AdminApi, AdminError, AdminFormFields, AdminResult, ApiConfig, ApiError, ConfirmationOptions,
	DeleteResult, Entity, EntityId, RenameEvent,
};

#[cfg(feature = "client")]
pub use gallformers_admin::client::{ClientConfig, HttpAdminApi};

#[cfg(feature = "species")]
pub use gallformers_admin::species::{HostAdmin, HostApi, SpeciesRename, TaxonomyEntry};
