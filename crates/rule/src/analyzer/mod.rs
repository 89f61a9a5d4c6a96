//! Field nullability and default-value classification.
//!
//! Structure wins over text: a producer that knows the declared type or the
//! initializer state answers directly. Raw declaration text is consulted only
//! for what the structure leaves open, see [`text`].

pub mod text;

use nullinit_model::FieldDecl;

/// Nullability annotation carried by the compiled view of a nullable property.
pub const JETBRAINS_NULLABLE: &str = "org.jetbrains.annotations.Nullable";
/// Counterpart of [`JETBRAINS_NULLABLE`] for non-null properties.
pub const JETBRAINS_NOT_NULL: &str = "org.jetbrains.annotations.NotNull";

/// Classification of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldShape {
	pub nullable: bool,
	/// Only meaningful when `nullable`; always false otherwise.
	pub has_default: bool,
}

impl FieldShape {
	pub const NOT_NULLABLE: Self = Self {
		nullable: false,
		has_default: false,
	};

	pub const fn nullable(has_default: bool) -> Self {
		Self {
			nullable: true,
			has_default,
		}
	}

	/// Nullable without a default.
	pub fn needs_default(self) -> bool {
		self.nullable && !self.has_default
	}
}

/// Stateless classifier for field declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAnalyzer;

impl FieldAnalyzer {
	pub fn new() -> Self {
		Self
	}

	/// Classifies a field, or returns `None` when neither structure nor text
	/// can answer.
	///
	/// Nullability is decided first; non-nullable fields never look at their
	/// default.
	pub fn classify(&self, field: &FieldDecl) -> Option<FieldShape> {
		let mut parsed = None;
		let mut from_text = || *parsed.get_or_insert_with(|| field.text.as_deref().and_then(|text| text::parse(text, &field.name)));

		let nullable = match structural_nullability(field) {
			Some(nullable) => nullable,
			None => from_text()?.nullable,
		};
		if !nullable {
			return Some(FieldShape::NOT_NULLABLE);
		}

		let has_default = match field.initializer.is_present() {
			Some(present) => present,
			None => from_text()?.has_default,
		};
		Some(FieldShape::nullable(has_default))
	}
}

fn structural_nullability(field: &FieldDecl) -> Option<bool> {
	if let Some(ty) = &field.declared_type {
		return Some(ty.nullable);
	}
	field.annotations.iter().find_map(|ann| {
		if ann.is(JETBRAINS_NULLABLE) {
			Some(true)
		} else if ann.is(JETBRAINS_NOT_NULL) {
			Some(false)
		} else {
			None
		}
	})
}
