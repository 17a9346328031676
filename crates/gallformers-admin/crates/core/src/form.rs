//! Form state

/// Values of the admin form plus the canonical empty form
///
/// Resets always replace every value; they never merge into what the user
/// typed before.
#[derive(Debug, Clone)]
pub struct FormState<F> {
	values: F,
	defaults: F,
	resets: u64,
}

impl<F: Clone> FormState<F> {
	/// Create a form showing its default values
	pub fn new(defaults: F) -> Self {
		Self {
			values: defaults.clone(),
			defaults,
			resets: 0,
		}
	}

	/// Current values
	pub fn values(&self) -> &F {
		&self.values
	}

	/// Canonical empty values
	pub fn defaults(&self) -> &F {
		&self.defaults
	}

	/// Overwrite the current values with user input
	pub fn set_values(&mut self, values: F) {
		self.values = values;
	}

	/// Edit the current values in place
	pub fn update(&mut self, edit: impl FnOnce(&mut F)) {
		edit(&mut self.values);
	}

	/// Replace every value
	pub fn reset(&mut self, values: F) {
		self.values = values;
		self.resets += 1;
	}

	/// Replace every value with the defaults
	pub fn reset_to_default(&mut self) {
		self.reset(self.defaults.clone());
	}

	/// Number of resets so far
	pub fn reset_count(&self) -> u64 {
		self.resets
	}
}
