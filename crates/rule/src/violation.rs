use nullinit_model::{FieldKind, Location};
use serde::Serialize;

use crate::meta::Severity;

/// A nullable field without a default in a marked class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
	pub rule_id: &'static str,
	pub field: String,
	pub field_kind: FieldKind,
	/// Qualified name of the enclosing class.
	pub class: String,
	/// Location of the field name.
	pub location: Location,
	pub message: String,
	pub severity: Severity,
}

/// Message for a field of the given kind.
pub fn message_for(kind: FieldKind) -> &'static str {
	match kind {
		FieldKind::ConstructorProperty => "Should initialize nullable constructor property in Kotlinx Serializable class",
		FieldKind::Property | FieldKind::Parameter => "Should initialize nullable property in Kotlinx Serializable class",
	}
}
