//! Serializable-marker resolution.

use nullinit_model::ClassDecl;

use crate::config::DEFAULT_MARKER;

/// Decides whether a class opts into the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerResolver {
	marker: String,
}

impl Default for MarkerResolver {
	fn default() -> Self {
		Self::new(DEFAULT_MARKER)
	}
}

impl MarkerResolver {
	pub fn new(marker: impl Into<String>) -> Self {
		Self { marker: marker.into() }
	}

	pub fn marker(&self) -> &str {
		&self.marker
	}

	/// True iff one of the class annotations is exactly the marker.
	///
	/// Annotations that only contain the marker name (`MySerializable`, or an
	/// unresolved `Serializable`) do not count.
	pub fn is_marked(&self, class: &ClassDecl) -> bool {
		class.annotations.iter().any(|ann| ann.is(&self.marker))
	}
}

#[cfg(test)]
mod tests {
	use nullinit_model::Annotation;
	use rstest::rstest;

	use super::*;

	fn class_with(annotations: &[&str]) -> ClassDecl {
		annotations
			.iter()
			.fold(ClassDecl::new("Sample", "pkg.Sample"), |class, name| class.with_annotation(Annotation::new(*name)))
	}

	#[rstest]
	#[case(&["kotlinx.serialization.Serializable"], true)]
	#[case(&["kotlinx.parcelize.Parcelize", "kotlinx.serialization.Serializable"], true)]
	#[case(&[], false)]
	#[case(&["Serializable"], false)]
	#[case(&["kotlinx.serialization.SerializableX"], false)]
	#[case(&["com.example.kotlinx.serialization.Serializable"], false)]
	#[case(&["kotlinx.serialization.serializable"], false)]
	#[case(&["kotlinx.serialization.Transient"], false)]
	fn test_exact_marker_match(#[case] annotations: &[&str], #[case] expected: bool) {
		let resolver = MarkerResolver::default();
		assert_eq!(resolver.is_marked(&class_with(annotations)), expected);
	}

	#[test]
	fn test_custom_marker() {
		let resolver = MarkerResolver::new("com.example.Wire");
		assert!(resolver.is_marked(&class_with(&["com.example.Wire"])));
		assert!(!resolver.is_marked(&class_with(&["kotlinx.serialization.Serializable"])));
	}
}
