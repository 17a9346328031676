//! Editable form view-models

use std::fmt;

/// Contract every admin form view-model fulfils
///
/// A form is a superset of the entity's editable fields plus a `del` flag;
/// submitting a form with the flag set is a delete request.
pub trait AdminFormFields: Clone + fmt::Debug + Send + Sync + 'static {
	/// Value of the key field currently entered in the form
	fn key(&self) -> Option<String>;

	/// Whether this submission is a delete request
	fn is_delete(&self) -> bool;

	/// Mark or unmark this submission as a delete request
	fn set_delete(&mut self, del: bool);

	/// Copy of these fields flagged for deletion
	fn for_delete(&self) -> Self {
		let mut fields = self.clone();
		fields.set_delete(true);
		fields
	}
}
