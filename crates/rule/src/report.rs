//! Violation sinks.
//!
//! A [`Reporter`] receives each violation exactly once, in the order the
//! engine found them. Sinks never merge or drop violations.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use nullinit_model::SourceUnit;

use crate::meta::Severity;
use crate::violation::Violation;

/// Receives violations from [`crate::RuleEngine::run`].
pub trait Reporter {
	fn report(&mut self, violation: Violation);
}

impl Reporter for Vec<Violation> {
	fn report(&mut self, violation: Violation) {
		self.push(violation);
	}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
	fn report(&mut self, violation: Violation) {
		(**self).report(violation);
	}
}

/// Emits each violation as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
	fn report(&mut self, violation: Violation) {
		let loc = &violation.location;
		match violation.severity {
			Severity::Error => tracing::error!(
				rule = violation.rule_id,
				file = %loc.path.display(),
				line = loc.display_line(),
				column = loc.display_column(),
				field = %violation.field,
				class = %violation.class,
				"{}",
				violation.message
			),
			_ => tracing::warn!(
				rule = violation.rule_id,
				file = %loc.path.display(),
				line = loc.display_line(),
				column = loc.display_column(),
				field = %violation.field,
				class = %violation.class,
				"{}",
				violation.message
			),
		}
	}
}

/// Renders violations in the plain-text lint format:
///
/// ```text
/// src/Sample.kt:9: Warning: Should initialize nullable constructor property in Kotlinx Serializable class [SerializableNullableFieldInitialize]
///     val b: String?,
///         ~
/// 0 errors, 1 warnings
/// ```
///
/// The source line and underline appear only for files registered with
/// [`TextReporter::add_source`].
#[derive(Debug, Default)]
pub struct TextReporter {
	sources: HashMap<Arc<Path>, Arc<str>>,
	out: String,
	errors: usize,
	warnings: usize,
}

impl TextReporter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes the text of `unit` available for snippets, if it carries any.
	pub fn add_source(&mut self, unit: &SourceUnit) {
		if let Some(source) = unit.source() {
			self.sources.insert(unit.path_arc(), Arc::from(source));
		}
	}

	/// Returns the rendered report, closed by the summary line.
	pub fn finish(mut self) -> String {
		if self.errors == 0 && self.warnings == 0 {
			self.out.push_str("No warnings.\n");
		} else {
			let _ = writeln!(self.out, "{} errors, {} warnings", self.errors, self.warnings);
		}
		self.out
	}

	fn snippet(&mut self, violation: &Violation) {
		let loc = &violation.location;
		let Some(source) = self.sources.get(&loc.path) else {
			return;
		};
		let Some(line) = source.lines().nth(loc.span.start.line as usize) else {
			return;
		};
		let start = loc.span.start.column as usize;
		let width = if loc.span.is_single_line() {
			(loc.span.end.column.saturating_sub(loc.span.start.column) as usize).max(1)
		} else {
			line.chars().count().saturating_sub(start).max(1)
		};
		let _ = writeln!(self.out, "    {}", line.trim_end());
		let _ = writeln!(self.out, "    {}{}", " ".repeat(start), "~".repeat(width));
	}
}

impl Reporter for TextReporter {
	fn report(&mut self, violation: Violation) {
		match violation.severity {
			Severity::Error => self.errors += 1,
			Severity::Warning => self.warnings += 1,
			Severity::Info | Severity::Hint => {}
		}
		let loc = &violation.location;
		let _ = writeln!(
			self.out,
			"{}:{}: {}: {} [{}]",
			loc.path.display(),
			loc.display_line(),
			violation.severity,
			violation.message,
			violation.rule_id
		);
		self.snippet(&violation);
	}
}

#[cfg(test)]
mod tests {
	use nullinit_model::{FieldKind, Location, Position, Span};
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::violation::message_for;

	fn violation(path: &Path, line: u32, column: u32, len: u32) -> Violation {
		Violation {
			rule_id: "SerializableNullableFieldInitialize",
			field: "b".into(),
			field_kind: FieldKind::ConstructorProperty,
			class: "pkg.Sample".into(),
			location: Location::new(path, Span::on_line(Position::new(line, column), len)),
			message: message_for(FieldKind::ConstructorProperty).into(),
			severity: Severity::Warning,
		}
	}

	#[test]
	fn test_vec_collects_in_order() {
		let mut sink: Vec<Violation> = Vec::new();
		let path = Path::new("A.kt");
		sink.report(violation(path, 1, 0, 1));
		sink.report(violation(path, 0, 0, 1));
		assert_eq!(sink.len(), 2);
		assert_eq!(sink[0].location.span.start.line, 1);
	}

	#[test]
	fn test_text_report_with_snippet() {
		let path = Path::new("src/Sample.kt");
		let unit = SourceUnit::new(path).with_source("@Serializable\ndata class Sample(\n    val b: String?,\n)\n");
		let mut reporter = TextReporter::new();
		reporter.add_source(&unit);
		reporter.report(violation(path, 2, 8, 1));

		let expected = "\
src/Sample.kt:3: Warning: Should initialize nullable constructor property in Kotlinx Serializable class [SerializableNullableFieldInitialize]
        val b: String?,
            ~
0 errors, 1 warnings
";
		assert_eq!(reporter.finish(), expected);
	}

	#[test]
	fn test_text_report_without_source() {
		let mut reporter = TextReporter::new();
		reporter.report(violation(Path::new("A.kt"), 0, 4, 3));
		reporter.report(violation(Path::new("A.kt"), 1, 4, 3));
		let report = reporter.finish();
		assert_eq!(report.lines().count(), 3);
		assert!(report.ends_with("0 errors, 2 warnings\n"));
	}

	#[test]
	fn test_empty_text_report() {
		assert_eq!(TextReporter::new().finish(), "No warnings.\n");
	}
}
