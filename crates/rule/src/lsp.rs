//! Conversion of violations into LSP diagnostics.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};
use nullinit_model::SourceUnit;

use crate::meta::Severity;
use crate::report::Reporter;
use crate::violation::Violation;

/// Value of `Diagnostic::source` for every diagnostic this crate produces.
pub const DIAGNOSTIC_SOURCE: &str = "nullinit";

impl From<Severity> for DiagnosticSeverity {
	fn from(severity: Severity) -> Self {
		match severity {
			Severity::Error => DiagnosticSeverity::ERROR,
			Severity::Warning => DiagnosticSeverity::WARNING,
			Severity::Info => DiagnosticSeverity::INFORMATION,
			Severity::Hint => DiagnosticSeverity::HINT,
		}
	}
}

/// Builds the LSP diagnostic for a violation. Positions stay zero-based.
///
/// With the file text in `source`, columns are converted to UTF-16 code
/// units, the protocol's default position encoding. Without it they stay
/// counted in Unicode scalar values, which matches only clients that
/// negotiated the `utf-32` encoding.
pub fn to_diagnostic(violation: &Violation, source: Option<&str>) -> Diagnostic {
	let span = violation.location.span;
	Diagnostic {
		range: Range {
			start: lsp_position(source, span.start),
			end: lsp_position(source, span.end),
		},
		severity: Some(violation.severity.into()),
		code: Some(NumberOrString::String(violation.rule_id.to_string())),
		source: Some(DIAGNOSTIC_SOURCE.to_string()),
		message: violation.message.clone(),
		..Default::default()
	}
}

fn lsp_position(source: Option<&str>, pos: nullinit_model::Position) -> Position {
	let character = source
		.and_then(|src| src.lines().nth(pos.line as usize))
		.map_or(pos.column, |line| {
			line.chars().take(pos.column as usize).map(char::len_utf16).sum::<usize>() as u32
		});
	Position {
		line: pos.line,
		character,
	}
}

/// Collects diagnostics grouped by file, ready for `textDocument/publishDiagnostics`.
#[derive(Debug, Default)]
pub struct LspReporter {
	sources: HashMap<Arc<Path>, Arc<str>>,
	by_path: BTreeMap<PathBuf, Vec<Diagnostic>>,
}

impl LspReporter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes the text of `unit` available for UTF-16 column conversion.
	pub fn add_source(&mut self, unit: &SourceUnit) {
		if let Some(source) = unit.source() {
			self.sources.insert(unit.path_arc(), Arc::from(source));
		}
	}

	/// Diagnostics for one file, in report order.
	pub fn diagnostics_for(&self, path: &Path) -> &[Diagnostic] {
		self.by_path.get(path).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn into_inner(self) -> BTreeMap<PathBuf, Vec<Diagnostic>> {
		self.by_path
	}
}

impl Reporter for LspReporter {
	fn report(&mut self, violation: Violation) {
		let source = self.sources.get(&violation.location.path).map(|text| text.as_ref());
		let diagnostic = to_diagnostic(&violation, source);
		self.by_path.entry(violation.location.path_buf()).or_default().push(diagnostic);
	}
}

#[cfg(test)]
mod tests {
	use nullinit_model::{FieldKind, Location, Position as SrcPosition, Span};

	use super::*;

	fn violation(path: &str, line: u32) -> Violation {
		Violation {
			rule_id: "SerializableNullableFieldInitialize",
			field: "b".into(),
			field_kind: FieldKind::Property,
			class: "pkg.Sample".into(),
			location: Location::new(Path::new(path), Span::on_line(SrcPosition::new(line, 8), 1)),
			message: "msg".into(),
			severity: Severity::Warning,
		}
	}

	#[test]
	fn test_to_diagnostic() {
		let diag = to_diagnostic(&violation("A.kt", 3), None);
		assert_eq!(diag.range.start, Position { line: 3, character: 8 });
		assert_eq!(diag.range.end, Position { line: 3, character: 9 });
		assert_eq!(diag.severity, Some(DiagnosticSeverity::WARNING));
		assert_eq!(diag.code, Some(NumberOrString::String("SerializableNullableFieldInitialize".into())));
		assert_eq!(diag.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
		assert_eq!(diag.message, "msg");
	}

	#[test]
	fn test_columns_become_utf16() {
		let src = "class A(/* 😀 */ val b: String?)";
		let mut v = violation("A.kt", 0);
		v.location = Location::new(Path::new("A.kt"), Span::on_line(SrcPosition::new(0, 20), 1));

		let diag = to_diagnostic(&v, Some(src));
		assert_eq!(diag.range.start, Position { line: 0, character: 21 });
		assert_eq!(diag.range.end, Position { line: 0, character: 22 });
		assert_eq!(to_diagnostic(&v, None).range.start.character, 20);
	}

	#[test]
	fn test_reporter_groups_by_path() {
		let mut reporter = LspReporter::new();
		reporter.report(violation("A.kt", 1));
		reporter.report(violation("B.kt", 2));
		reporter.report(violation("A.kt", 0));

		let a = reporter.diagnostics_for(Path::new("A.kt"));
		assert_eq!(a.len(), 2);
		assert_eq!(a[0].range.start.line, 1);
		assert_eq!(a[1].range.start.line, 0);
		assert!(reporter.diagnostics_for(Path::new("C.kt")).is_empty());
		assert_eq!(reporter.into_inner().len(), 2);
	}
}
