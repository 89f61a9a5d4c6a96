//! Declaration model for the nullinit rule.
//!
//! The model is the minimal structural view of a source file the rule needs:
//! class-like declarations with their annotations, and the field-like
//! declarations (properties and constructor parameters) they own.
//!
//! # Architecture
//!
//! * [`location`]: Zero-based positions, spans and file locations
//! * [`decl`]: [`ClassDecl`], [`FieldDecl`], [`Annotation`] and friends
//! * [`unit`]: [`SourceUnit`], the arena that owns one file's declarations
//! * [`Extractor`]: the seam a host implements to turn source text into a unit
//!
//! Everything here is plain data. Producers (parsers, IDE hosts) build it;
//! the rule only reads it.

pub mod decl;
pub mod location;
pub mod unit;

use std::path::Path;

pub use decl::{Annotation, ClassDecl, ClassKind, DeclaredType, FieldDecl, FieldKind, Initializer};
pub use location::{Location, Position, Span};
pub use unit::{ClassId, Declaration, FieldId, SourceUnit};

/// Turns the text of one source file into a [`SourceUnit`].
///
/// Extraction never fails: constructs the extractor cannot make sense of are
/// left out of the unit.
pub trait Extractor {
	/// Language name, e.g. `"kotlin"`.
	fn language(&self) -> &'static str;

	/// File extensions (without the dot) this extractor handles.
	fn extensions(&self) -> &'static [&'static str];

	/// Extracts the declarations of `source`, located at `path`.
	fn extract(&self, path: &Path, source: &str) -> SourceUnit;

	/// Returns true if `path` has one of [`Extractor::extensions`].
	fn handles(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| self.extensions().contains(&ext))
	}
}
