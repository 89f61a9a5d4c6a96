//! Rule configuration, loaded from TOML.
//!
//! ```toml
//! [rules.SerializableNullableFieldInitialize]
//! enabled = true
//! marker = "kotlinx.serialization.Serializable"
//! ```
//!
//! Every key is optional; missing sections fall back to [`RuleConfig::default`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::meta::SERIALIZABLE_NULLABLE_FIELD;

/// Fully qualified name of the kotlinx.serialization class marker.
pub const DEFAULT_MARKER: &str = "kotlinx.serialization.Serializable";

/// Settings of the serializable nullable-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
	/// Turns the rule off entirely when false.
	pub enabled: bool,
	/// Qualified name of the class annotation that opts a class into the rule.
	pub marker: String,
}

impl Default for RuleConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			marker: DEFAULT_MARKER.to_string(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	rules: HashMap<String, toml::Value>,
}

impl RuleConfig {
	/// Parse a TOML document, picking out this rule's table.
	///
	/// Tables of other rules are ignored.
	pub fn parse(input: &str) -> Result<Self> {
		let file: ConfigFile = toml::from_str(input)?;
		let config = match file.rules.get(SERIALIZABLE_NULLABLE_FIELD.id) {
			Some(table) => table.clone().try_into::<RuleConfig>()?,
			None => RuleConfig::default(),
		};
		config.validate()
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %path.display(), enabled = config.enabled, marker = %config.marker, "Loaded rule config");
		Ok(config)
	}

	fn validate(mut self) -> Result<Self> {
		let trimmed = self.marker.trim();
		if trimmed.is_empty() {
			return Err(ConfigError::EmptyMarker);
		}
		if trimmed.len() != self.marker.len() {
			self.marker = trimmed.to_string();
		}
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn test_empty_document_uses_defaults() {
		let config = RuleConfig::parse("").unwrap();
		assert_eq!(config, RuleConfig::default());
		assert!(config.enabled);
		assert_eq!(config.marker, DEFAULT_MARKER);
	}

	#[test]
	fn test_rule_table_overrides() {
		let config = RuleConfig::parse(
			r#"
            [rules.SerializableNullableFieldInitialize]
            enabled = false
            marker = "com.example.Wire"

            [rules.SomethingElse]
            level = "error"
            "#,
		)
		.unwrap();
		assert!(!config.enabled);
		assert_eq!(config.marker, "com.example.Wire");
	}

	#[test]
	fn test_partial_table_keeps_other_defaults() {
		let config = RuleConfig::parse("[rules.SerializableNullableFieldInitialize]\nenabled = false\n").unwrap();
		assert!(!config.enabled);
		assert_eq!(config.marker, DEFAULT_MARKER);
	}

	#[test]
	fn test_marker_is_trimmed() {
		let config = RuleConfig::parse("[rules.SerializableNullableFieldInitialize]\nmarker = \" a.B \"\n").unwrap();
		assert_eq!(config.marker, "a.B");
	}

	#[test]
	fn test_empty_marker_rejected() {
		let err = RuleConfig::parse("[rules.SerializableNullableFieldInitialize]\nmarker = \"  \"\n").unwrap_err();
		assert!(matches!(err, ConfigError::EmptyMarker));
	}

	#[test]
	fn test_unknown_key_rejected() {
		let err = RuleConfig::parse("[rules.SerializableNullableFieldInitialize]\nmarkers = []\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn test_invalid_toml() {
		assert!(matches!(RuleConfig::parse("rules = ["), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[rules.SerializableNullableFieldInitialize]").unwrap();
		writeln!(file, "marker = \"com.example.Wire\"").unwrap();
		let config = RuleConfig::load(file.path()).unwrap();
		assert_eq!(config.marker, "com.example.Wire");
	}

	#[test]
	fn test_load_missing_file() {
		let err = RuleConfig::load("/definitely/not/here.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
