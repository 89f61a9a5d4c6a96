//! Annotation name resolution against a file's package and imports.
//!
//! There is no classpath here, so resolution is best effort: explicit
//! imports and aliases are exact, star imports resolve only for packages
//! whose annotation names are known, and anything else keeps the name as
//! written. A name that stays simple never matches a qualified marker.

use std::collections::HashMap;

/// Annotation names of well-known packages, used to resolve star imports.
const KNOWN_PACKAGES: &[(&str, &[&str])] = &[
	(
		"kotlinx.serialization",
		&[
			"Contextual",
			"EncodeDefault",
			"Polymorphic",
			"Required",
			"SerialInfo",
			"SerialName",
			"Serializable",
			"Transient",
			"UseContextualSerialization",
			"UseSerializers",
		],
	),
	("org.jetbrains.annotations", &["NotNull", "Nullable"]),
	("androidx.annotation", &["DrawableRes", "IntRange", "Keep", "NonNull", "Nullable", "StringRes"]),
];

/// Annotations visible in every Kotlin file without an import.
const DEFAULT_IMPORTS: &[(&str, &str)] = &[
	("Deprecated", "kotlin.Deprecated"),
	("Suppress", "kotlin.Suppress"),
	("JvmField", "kotlin.jvm.JvmField"),
	("JvmStatic", "kotlin.jvm.JvmStatic"),
	("Transient", "kotlin.jvm.Transient"),
	("Volatile", "kotlin.jvm.Volatile"),
];

#[derive(Debug, Clone, Default)]
pub struct Imports {
	package: Option<String>,
	/// Simple name or alias to qualified name.
	explicit: HashMap<String, String>,
	stars: Vec<String>,
}

impl Imports {
	pub fn set_package(&mut self, package: impl Into<String>) {
		self.package = Some(package.into());
	}

	pub fn package(&self) -> Option<&str> {
		self.package.as_deref()
	}

	/// Records `import path` or `import path as alias`. A path ending in `.*`
	/// is a star import.
	pub fn add(&mut self, path: &str, alias: Option<&str>) {
		if let Some(package) = path.strip_suffix(".*") {
			self.stars.push(package.to_string());
			return;
		}
		let simple = alias.unwrap_or_else(|| path.rsplit('.').next().unwrap_or(path));
		self.explicit.insert(simple.to_string(), path.to_string());
	}

	/// Fully qualifies an annotation name as written in the source.
	///
	/// `local` names classes declared in this file, which resolve into the
	/// file's package.
	pub fn resolve(&self, written: &str, local: impl Fn(&str) -> bool) -> String {
		let (head, rest) = match written.split_once('.') {
			Some((head, rest)) => (head, Some(rest)),
			None => (written, None),
		};
		if let Some(qualified) = self.explicit.get(head) {
			return match rest {
				Some(rest) => format!("{qualified}.{rest}"),
				None => qualified.clone(),
			};
		}
		if rest.is_some() {
			return written.to_string();
		}
		if local(written) {
			return match &self.package {
				Some(package) => format!("{package}.{written}"),
				None => written.to_string(),
			};
		}
		let star = self.stars.iter().find(|package| {
			KNOWN_PACKAGES
				.iter()
				.any(|(known, names)| known == package && names.contains(&written))
		});
		if let Some(package) = star {
			return format!("{package}.{written}");
		}
		DEFAULT_IMPORTS
			.iter()
			.find(|(simple, _)| *simple == written)
			.map_or_else(|| written.to_string(), |(_, qualified)| qualified.to_string())
	}
}
