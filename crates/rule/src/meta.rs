//! Rule identity and registration metadata.

use std::fmt;

use nullinit_model::FieldKind;
use serde::{Deserialize, Serialize};

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Hint,
	Info,
	Warning,
	Error,
}

impl Severity {
	/// Label used in text reports.
	pub fn label(self) -> &'static str {
		match self {
			Self::Hint => "Hint",
			Self::Info => "Information",
			Self::Warning => "Warning",
			Self::Error => "Error",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Issue category shown by hosts when grouping rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
	Correctness,
}

/// Static description of a rule, handed to the host at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleMeta {
	/// Stable identifier, used in reports and suppression.
	pub id: &'static str,
	/// One-line title.
	pub brief: &'static str,
	/// Full explanation; may contain markdown.
	pub explanation: &'static str,
	pub category: Category,
	/// 1 (lowest) to 10 (highest).
	pub priority: u8,
	pub severity: Severity,
	/// Field kinds the rule wants to observe.
	pub observes: &'static [FieldKind],
}

impl RuleMeta {
	/// Returns true if the rule looks at declarations of this kind.
	pub fn observes(&self, kind: FieldKind) -> bool {
		self.observes.contains(&kind)
	}
}

/// The serializable nullable-field rule.
pub const SERIALIZABLE_NULLABLE_FIELD: RuleMeta = RuleMeta {
	id: "SerializableNullableFieldInitialize",
	brief: "Nullable field without default in serializable class",
	explanation: "Nullable properties of a `@Serializable` class should declare a default value, \
		usually `= null`. Without one, the property is required during decoding, so payloads \
		produced before the property existed (or by peers that omit nulls) fail to decode.",
	category: Category::Correctness,
	priority: 6,
	severity: Severity::Warning,
	observes: &[FieldKind::Property, FieldKind::ConstructorProperty],
};
