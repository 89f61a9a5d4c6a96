// Analysis runs inside host processes - report through tracing or sinks, never stderr
#![deny(clippy::print_stderr, clippy::print_stdout)]

//! Nullable fields without defaults in serializable classes.
//!
//! A nullable property of a `@Serializable` class that declares no default
//! is still required when decoding. Payloads written before the property
//! existed then fail to decode. This crate detects such properties.
//!
//! # Architecture
//!
//! * [`marker`]: decides whether a class carries the serializable marker
//! * [`analyzer`]: decides whether a field is nullable and has a default
//! * [`engine`]: the per-field decision procedure over a [`SourceUnit`]
//! * [`report`]: sinks for violations (collect, `tracing`, plain text)
//! * [`lsp`]: LSP diagnostic conversion (feature `lsp`)
//! * [`meta`]: rule id, description, severity
//! * [`config`]: TOML configuration
//!
//! # Usage
//!
//! ```
//! use std::path::Path;
//!
//! use nullinit_model::{Annotation, ClassDecl, DeclaredType, FieldDecl, FieldKind, Initializer, Location, Position, SourceUnit, Span};
//! use nullinit_rule::RuleEngine;
//!
//! let mut unit = SourceUnit::new(Path::new("Sample.kt"));
//! let class = unit.add_class(ClassDecl::new("Sample", "pkg.Sample").with_annotation(Annotation::new("kotlinx.serialization.Serializable")));
//! let field = FieldDecl::new("b", FieldKind::ConstructorProperty)
//! 	.with_type(DeclaredType::new("String?", true))
//! 	.with_initializer(Initializer::Absent)
//! 	.with_location(Location::new(Path::new("Sample.kt"), Span::on_line(Position::new(3, 8), 1)));
//! unit.add_field(Some(class), field);
//!
//! let violations = RuleEngine::default().check_unit(&unit);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].field, "b");
//! ```
//!
//! [`SourceUnit`]: nullinit_model::SourceUnit

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "lsp")]
pub mod lsp;
pub mod marker;
pub mod meta;
pub mod report;
mod violation;

pub use analyzer::{FieldAnalyzer, FieldShape};
pub use config::{DEFAULT_MARKER, RuleConfig};
pub use engine::{RuleEngine, RunSummary, Skip, Verdict};
pub use error::{ConfigError, Result};
#[cfg(feature = "lsp")]
pub use lsp::LspReporter;
pub use marker::MarkerResolver;
pub use meta::{Category, RuleMeta, SERIALIZABLE_NULLABLE_FIELD, Severity};
pub use report::{Reporter, TextReporter, TracingReporter};
pub use violation::{Violation, message_for};
