//! Class and field declarations.

use serde::Serialize;

use crate::location::Location;
use crate::unit::{ClassId, FieldId};

/// An annotation applied to a class or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Annotation {
	/// Fully qualified name, e.g. `kotlinx.serialization.Serializable`.
	///
	/// Producers that cannot resolve a name keep it as written.
	pub qualified_name: String,
	/// Name as it appeared in source, e.g. `Serializable`.
	pub written: String,
}

impl Annotation {
	pub fn new(qualified_name: impl Into<String>) -> Self {
		let qualified_name = qualified_name.into();
		let written = qualified_name.rsplit('.').next().unwrap_or(&qualified_name).to_string();
		Self { qualified_name, written }
	}

	/// Annotation whose written form differs from its resolved name.
	pub fn resolved(qualified_name: impl Into<String>, written: impl Into<String>) -> Self {
		Self {
			qualified_name: qualified_name.into(),
			written: written.into(),
		}
	}

	/// Exact, case-sensitive match against a qualified name.
	pub fn is(&self, qualified_name: &str) -> bool {
		self.qualified_name == qualified_name
	}
}

/// What sort of class-like declaration this is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
	#[default]
	Class,
	Interface,
	Object,
	EnumClass,
	AnnotationClass,
}

/// A class-like declaration and the fields it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
	pub name: String,
	/// Package-qualified name including enclosing classes, e.g. `pkg.Outer.Inner`.
	pub qualified_name: String,
	pub kind: ClassKind,
	pub annotations: Vec<Annotation>,
	/// Constructor properties first, then body properties, each in source order.
	pub fields: Vec<FieldId>,
	/// Enclosing class for nested and companion declarations.
	pub parent: Option<ClassId>,
	pub location: Option<Location>,
}

impl ClassDecl {
	pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			qualified_name: qualified_name.into(),
			kind: ClassKind::Class,
			annotations: Vec::new(),
			fields: Vec::new(),
			parent: None,
			location: None,
		}
	}

	pub fn with_kind(mut self, kind: ClassKind) -> Self {
		self.kind = kind;
		self
	}

	pub fn with_annotation(mut self, annotation: Annotation) -> Self {
		self.annotations.push(annotation);
		self
	}

	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}
}

/// How a field-like declaration was declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	/// Property declared in a class body.
	#[default]
	Property,
	/// `val`/`var` parameter of a primary constructor.
	ConstructorProperty,
	/// Plain parameter without `val`/`var`; not stored on the instance.
	Parameter,
}

impl FieldKind {
	/// Returns true for declarations that become part of the instance state.
	pub fn is_property(self) -> bool {
		matches!(self, Self::Property | Self::ConstructorProperty)
	}
}

/// Declared type of a field, when the producer knows it structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeclaredType {
	/// Type as written, e.g. `List<String>?`.
	pub text: String,
	/// True if the outermost type admits null.
	pub nullable: bool,
}

impl DeclaredType {
	pub fn new(text: impl Into<String>, nullable: bool) -> Self {
		Self {
			text: text.into(),
			nullable,
		}
	}
}

/// Initializer state of a field declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "expr")]
pub enum Initializer {
	/// Producer did not inspect the initializer.
	#[default]
	Unknown,
	/// Declaration has no initializer.
	Absent,
	/// Declaration has an initializer; holds the expression text.
	Present(String),
}

impl Initializer {
	/// `Some(true)` if present, `Some(false)` if absent, `None` if unknown.
	pub fn is_present(&self) -> Option<bool> {
		match self {
			Self::Unknown => None,
			Self::Absent => Some(false),
			Self::Present(_) => Some(true),
		}
	}
}

/// A property or parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
	pub name: String,
	pub kind: FieldKind,
	pub annotations: Vec<Annotation>,
	/// Raw source of the whole declaration, annotations through initializer.
	pub text: Option<String>,
	pub declared_type: Option<DeclaredType>,
	pub initializer: Initializer,
	/// Location of the field name.
	pub location: Option<Location>,
	/// Back-reference to the enclosing class.
	pub owner: Option<ClassId>,
}

impl FieldDecl {
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			annotations: Vec::new(),
			text: None,
			declared_type: None,
			initializer: Initializer::Unknown,
			location: None,
			owner: None,
		}
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn with_type(mut self, declared_type: DeclaredType) -> Self {
		self.declared_type = Some(declared_type);
		self
	}

	pub fn with_initializer(mut self, initializer: Initializer) -> Self {
		self.initializer = initializer;
		self
	}

	pub fn with_annotation(mut self, annotation: Annotation) -> Self {
		self.annotations.push(annotation);
		self
	}

	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}
}
