//! Species administration for gallformers
//!
//! Plugs host species into the generic admin controller:
//!
//! - [`HostAdmin`]: form and upsert mapping, taxonomy lookup
//! - [`SpeciesRename`]: renames that may create or move to another genus
//!
//! ```ignore
//! let admin = Arc::new(HostAdmin::new());
//! let controller = AdminController::builder(HostAdmin::new(), config, api)
//!     .initial_data(hosts)
//!     .rename(Arc::new(SpeciesRename::new(genera).with_admin(admin)))
//!     .build();
//! ```

pub mod host;
pub mod rename;
pub mod taxonomy;

pub use host::{AbundanceApi, AliasApi, HostAdmin, HostApi, HostFormFields, SpeciesUpsertFields};
pub use rename::SpeciesRename;
pub use taxonomy::{Fgs, TaxonomyEntry, TaxonomySource, TaxonomyType, extract_genus};
