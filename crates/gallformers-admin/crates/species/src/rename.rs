//! Genus-aware species renames
//!
//! Renaming a species may move it to another genus. An existing genus is
//! attached directly; a genus that does not exist yet is created under the
//! species' current family once the user confirms.

use crate::host::{AliasApi, HostAdmin, HostApi};
use crate::taxonomy::{TaxonomyEntry, extract_genus};
use async_trait::async_trait;
use gallformers_admin_core::{Confirm, RenameHandler};
use gallformers_admin_types::{AdminError, AdminResult, ConfirmationOptions, RenameEvent};
use parking_lot::RwLock;
use std::sync::Arc;

/// Rename handler for host species
pub struct SpeciesRename {
	genera: RwLock<Vec<TaxonomyEntry>>,
	admin: Option<Arc<HostAdmin>>,
}

impl SpeciesRename {
	/// Create a handler knowing the existing genera
	pub fn new(genera: Vec<TaxonomyEntry>) -> Self {
		Self {
			genera: RwLock::new(genera),
			admin: None,
		}
	}

	/// Resolve taxonomy of species loaded without it through `admin`
	pub fn with_admin(mut self, admin: Arc<HostAdmin>) -> Self {
		self.admin = Some(admin);
		self
	}

	/// Replace the list of known genera
	pub fn set_genera(&self, genera: Vec<TaxonomyEntry>) {
		*self.genera.write() = genera;
	}

	fn find_genus(&self, name: &str) -> Option<TaxonomyEntry> {
		self.genera.read().iter().find(|g| g.name == name).cloned()
	}
}

#[async_trait]
impl RenameHandler<HostApi> for SpeciesRename {
	async fn rename(
		&self,
		selected: &HostApi,
		event: &RenameEvent,
		confirm: &dyn Confirm,
	) -> AdminResult<HostApi> {
		let old = event.old.as_deref().ok_or_else(|| {
			AdminError::Rename("Trying to add rename but old name is missing?!".into())
		})?;

		let mut host = selected.clone();
		if let Some(admin) = &self.admin {
			host.fgs = admin.resolve_fgs(selected).await?;
		}
		host.name = event.new.clone();
		if event.add_alias {
			host.aliases.push(AliasApi::previous_name(old));
		}

		let new_genus = extract_genus(&event.new);
		if new_genus == extract_genus(old) {
			return Ok(host);
		}

		match self.find_genus(new_genus) {
			Some(genus) => {
				tracing::debug!(genus = %genus.name, "moving species to existing genus");
				host.fgs.genus = genus;
			}
			None => {
				let family = host.fgs.family.clone();
				confirm
					.confirm(ConfirmationOptions::danger(
						"Are you sure want to create a new genus?",
						format!(
							"Renaming the genus to {} will create a new genus under the current family {}. Do you want to continue?",
							new_genus, family.name
						),
					))
					.await?;
				tracing::info!(genus = new_genus, family = %family.name, "creating genus");
				host.fgs.genus = TaxonomyEntry::placeholder_genus(new_genus, &family);
			}
		}
		Ok(host)
	}
}
