//! Error types for rule configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading rule configuration.
///
/// Analysis itself has no error path; only configuration can fail.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("failed to parse rule config: {0}")]
	Parse(#[from] toml::de::Error),

	/// The marker annotation name is empty.
	#[error("marker annotation name must not be empty")]
	EmptyMarker,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
