//! Entity cache and selection
//!
//! The cache is an ordered list holding at most one entity per id. The
//! selection is either empty, an id present in the cache, or an unsaved
//! draft that lives outside the cache until it is upserted.

use gallformers_admin_types::{AdminError, AdminResult, Entity, EntityId};

/// What the controller currently has selected
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
	/// Nothing is selected
	None,
	/// A cached entity, referenced by id
	Persisted(EntityId),
	/// An entity that has not been saved yet
	Draft(T),
}

impl<T> Default for Selection<T> {
	fn default() -> Self {
		Selection::None
	}
}

/// Client-side copy of the administered entities
#[derive(Debug, Clone)]
pub struct EntityCache<T> {
	data: Vec<T>,
	selection: Selection<T>,
}

impl<T: Entity> EntityCache<T> {
	/// Seed the cache
	///
	/// Duplicate ids keep the last occurrence in the position of the first.
	/// An `initial` id that does not resolve leaves nothing selected.
	pub fn new(data: Vec<T>, initial: Option<&EntityId>) -> Self {
		let mut cache = Self {
			data: Vec::with_capacity(data.len()),
			selection: Selection::None,
		};
		for entity in data {
			cache.upsert(entity);
		}
		if let Some(id) = initial {
			cache.select_id(id);
		}
		cache
	}

	/// Cached entities in display order
	pub fn data(&self) -> &[T] {
		&self.data
	}

	/// Number of cached entities
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Whether the cache is empty
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Look up an entity by id
	pub fn get(&self, id: &EntityId) -> Option<&T> {
		self.data.iter().find(|e| &e.id() == id)
	}

	/// Look up an entity by key field value
	pub fn find_by_key(&self, key: &str) -> Option<&T> {
		self.data.iter().find(|e| e.key() == key)
	}

	/// Current selection state
	pub fn selection(&self) -> &Selection<T> {
		&self.selection
	}

	/// Currently selected entity, draft included
	pub fn selected(&self) -> Option<&T> {
		match &self.selection {
			Selection::None => None,
			Selection::Persisted(id) => self.get(id),
			Selection::Draft(draft) => Some(draft),
		}
	}

	/// Id of the selected persisted entity
	pub fn selected_id(&self) -> Option<&EntityId> {
		match &self.selection {
			Selection::Persisted(id) => Some(id),
			_ => None,
		}
	}

	/// Select an entity
	///
	/// The entity must either be cached (matched by id) or be a draft.
	pub fn select(&mut self, entity: Option<T>) -> AdminResult<()> {
		self.selection = match entity {
			None => Selection::None,
			Some(entity) if entity.is_new() => Selection::Draft(entity),
			Some(entity) => {
				let id = entity.id();
				if self.get(&id).is_none() {
					return Err(AdminError::InvariantViolation(format!(
						"The entity {} is not part of the loaded data.",
						id
					)));
				}
				Selection::Persisted(id)
			}
		};
		Ok(())
	}

	/// Select a cached entity by id
	///
	/// Returns `false` and clears the selection when the id is unknown.
	pub fn select_id(&mut self, id: &EntityId) -> bool {
		if self.get(id).is_some() {
			self.selection = Selection::Persisted(id.clone());
			true
		} else {
			self.selection = Selection::None;
			false
		}
	}

	/// Clear the selection
	pub fn clear_selection(&mut self) {
		self.selection = Selection::None;
	}

	/// Replace the entity with the same id in place, or append it
	///
	/// Returns `true` when an existing entry was replaced.
	pub fn upsert(&mut self, entity: T) -> bool {
		let id = entity.id();
		match self.data.iter_mut().find(|e| e.id() == id) {
			Some(existing) => {
				*existing = entity;
				true
			}
			None => {
				self.data.push(entity);
				false
			}
		}
	}

	/// Remove an entity by id
	///
	/// Clears the selection if it pointed at the removed entity.
	pub fn remove(&mut self, id: &EntityId) -> Option<T> {
		let index = self.data.iter().position(|e| &e.id() == id)?;
		if self.selected_id() == Some(id) {
			self.selection = Selection::None;
		}
		Some(self.data.remove(index))
	}

	/// Remove an entity by key field value
	pub fn remove_by_key(&mut self, key: &str) -> Option<T> {
		let id = self.find_by_key(key)?.id();
		self.remove(&id)
	}

	/// Replace the cache contents
	///
	/// A selected persisted entity missing from `data` is kept at the end
	/// so the selection stays valid.
	pub fn replace_all(&mut self, data: Vec<T>) {
		let retained = self.selected_id().and_then(|id| self.get(id)).cloned();
		self.data.clear();
		for entity in data {
			self.upsert(entity);
		}
		if let Some(entity) = retained {
			if self.get(&entity.id()).is_none() {
				self.data.push(entity);
			}
		}
	}
}

impl<T: Entity> Default for EntityCache<T> {
	fn default() -> Self {
		Self::new(Vec::new(), None)
	}
}
