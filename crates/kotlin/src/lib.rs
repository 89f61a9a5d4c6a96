//! Kotlin source extraction for the nullinit rule.
//!
//! Turns Kotlin source text into a [`SourceUnit`]: class-like declarations
//! (classes, interfaces, objects, companions, nested classes) with their
//! resolved annotations, primary constructor parameters, and body
//! properties that have a backing field.
//!
//! Source is parsed with tree-sitter and the Kotlin grammar. Only
//! declarations are read from the tree; function bodies are never entered,
//! and malformed input produces a partial unit rather than an error.
//!
//! ```
//! use std::path::Path;
//!
//! use nullinit_kotlin::KotlinExtractor;
//! use nullinit_model::{Extractor, FieldKind};
//!
//! let src = "class User(val name: String?, age: Int)";
//! let unit = KotlinExtractor.extract(Path::new("User.kt"), src);
//! let kinds: Vec<_> = unit.fields().map(|(_, field)| field.kind).collect();
//! assert_eq!(kinds, [FieldKind::ConstructorProperty, FieldKind::Parameter]);
//! ```

mod imports;
mod lines;
mod scan;
mod syntax;

use std::path::Path;

use nullinit_model::{Extractor, SourceUnit};

use crate::scan::Scanner;

/// [`Extractor`] for `.kt` and `.kts` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinExtractor;

impl Extractor for KotlinExtractor {
	fn language(&self) -> &'static str {
		"kotlin"
	}

	fn extensions(&self) -> &'static [&'static str] {
		&["kt", "kts"]
	}

	fn extract(&self, path: &Path, source: &str) -> SourceUnit {
		extract(path, source)
	}
}

/// Extracts the declarations of one Kotlin file.
pub fn extract(path: &Path, source: &str) -> SourceUnit {
	let scanner = Scanner::new(path, source);
	match syntax::parse(source) {
		Ok(tree) => scanner.scan(&tree),
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "Kotlin source not parsed");
			scanner.finish()
		}
	}
}
