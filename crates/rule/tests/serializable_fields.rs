#![allow(unused_crate_dependencies)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use nullinit_model::{FieldKind, SourceUnit};
use nullinit_rule::{LspReporter, RuleConfig, RuleEngine, RunSummary, TextReporter, TracingReporter, Violation, message_for};
use pretty_assertions::assert_eq;

fn fixture_source(name: &str) -> String {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../kotlin/tests/fixtures").join(name);
	std::fs::read_to_string(&path).expect("fixture readable")
}

fn extract(name: &str, source: &str) -> SourceUnit {
	nullinit_kotlin::extract(Path::new(name), source)
}

fn fixture(name: &str) -> SourceUnit {
	extract(name, &fixture_source(name))
}

fn flagged(violations: &[Violation]) -> Vec<(&str, u32)> {
	violations.iter().map(|v| (v.field.as_str(), v.location.display_line())).collect()
}

#[test]
fn sample_flags_nullable_constructor_properties() {
	let violations = RuleEngine::default().check_unit(&fixture("Sample.kt"));
	assert_eq!(flagged(&violations), vec![("b", 9), ("c", 10), ("d", 12)]);
	for violation in &violations {
		assert_eq!(violation.class, "com.morayl.customlint.Sample");
		assert_eq!(violation.field_kind, FieldKind::ConstructorProperty);
		assert_eq!(violation.message, message_for(FieldKind::ConstructorProperty));
	}
}

#[test]
fn defaults_silence_the_rule() {
	let violations = RuleEngine::default().check_unit(&fixture("TestClass1.kt"));
	assert_eq!(flagged(&violations), vec![("s2", 10)]);
}

#[test]
fn text_report_matches_lint_layout() {
	let unit = fixture("TestClass1.kt");
	let mut reporter = TextReporter::new();
	reporter.add_source(&unit);
	RuleEngine::default().run(&unit, &mut reporter);
	let expected = "\
TestClass1.kt:10: Warning: Should initialize nullable constructor property in Kotlinx Serializable class [SerializableNullableFieldInitialize]
        val s2: String?,
            ~~
0 errors, 1 warnings
";
	assert_eq!(reporter.finish(), expected);
}

#[test]
fn unresolved_marker_is_not_a_marker() {
	let source = fixture_source("TestClass1.kt").replace("import kotlinx.serialization.Serializable\n", "");
	assert!(RuleEngine::default().check_unit(&extract("TestClass1.kt", &source)).is_empty());
}

#[test]
fn members_fixture() {
	let unit = fixture("Members.kt");
	let mut violations: Vec<Violation> = Vec::new();
	let summary = RuleEngine::default().run(&unit, &mut violations);

	let found: Vec<_> = violations.iter().map(|v| (v.class.as_str(), v.field.as_str(), v.field_kind)).collect();
	assert_eq!(
		found,
		vec![
			("com.example.model.Profile", "nickname", FieldKind::ConstructorProperty),
			("com.example.model.Profile", "phone", FieldKind::Property),
			("com.example.model.Profile", "cached", FieldKind::Property),
			("com.example.model.Profile.Address", "street", FieldKind::ConstructorProperty),
		]
	);
	assert_eq!(violations[1].message, message_for(FieldKind::Property));
	assert_eq!(
		summary,
		RunSummary {
			fields: 14,
			clean: 6,
			skipped: 4,
			violations: 4,
		}
	);
}

#[test]
fn runs_are_deterministic() {
	let engine = RuleEngine::default();
	let unit = fixture("Members.kt");
	let first = engine.check_unit(&unit);
	assert_eq!(first, engine.check_unit(&unit));
	assert_eq!(first, engine.check_unit(&fixture("Members.kt")));
}

#[test]
fn configured_marker() {
	let config = RuleConfig::parse(
		r#"
[rules.SerializableNullableFieldInitialize]
marker = "com.acme.Wire"
"#,
	)
	.expect("valid config");
	let engine = RuleEngine::new(&config);

	let source = "package app\n\nimport com.acme.Wire\n\n@Wire\nclass Event(val id: String?)\n\n@kotlinx.serialization.Serializable\nclass Other(val x: String?)\n";
	let violations = engine.check_unit(&extract("Event.kt", source));
	assert_eq!(flagged(&violations), vec![("id", 6)]);
}

#[test]
fn disabled_by_config() {
	let config = RuleConfig::parse("[rules.SerializableNullableFieldInitialize]\nenabled = false\n").expect("valid config");
	let mut violations: Vec<Violation> = Vec::new();
	let summary = RuleEngine::new(&config).run(&fixture("Sample.kt"), &mut violations);
	assert!(violations.is_empty());
	assert_eq!(summary.skipped, 4);
}

#[test]
fn lsp_diagnostics_for_sample() {
	let unit = fixture("Sample.kt");
	let mut reporter = LspReporter::new();
	reporter.add_source(&unit);
	RuleEngine::default().run(&unit, &mut reporter);

	let diagnostics = reporter.diagnostics_for(Path::new("Sample.kt"));
	let starts: Vec<_> = diagnostics.iter().map(|d| (d.range.start.line, d.range.start.character)).collect();
	assert_eq!(starts, vec![(8, 8), (9, 8), (11, 8)]);
	assert!(diagnostics.iter().all(|d| d.source.as_deref() == Some(nullinit_rule::lsp::DIAGNOSTIC_SOURCE)));
}

#[test]
fn lsp_columns_are_utf16() {
	let source = "package p\n\nimport kotlinx.serialization.Serializable\n\n@Serializable class E(/* \u{1F600} */ val b: String?)\n";
	let unit = extract("E.kt", source);
	let violations = RuleEngine::default().check_unit(&unit);
	assert_eq!(violations[0].location.span.start.column, 34);

	let mut reporter = LspReporter::new();
	reporter.add_source(&unit);
	RuleEngine::default().run(&unit, &mut reporter);
	let diagnostic = &reporter.diagnostics_for(Path::new("E.kt"))[0];
	assert_eq!((diagnostic.range.start.line, diagnostic.range.start.character), (4, 35));
	assert_eq!(diagnostic.range.end.character, 36);
}

#[test]
fn violations_serialize() {
	let violations = RuleEngine::default().check_unit(&fixture("TestClass1.kt"));
	let json = serde_json::to_value(&violations[0]).expect("serializable");
	assert_eq!(json["rule_id"], "SerializableNullableFieldInitialize");
	assert_eq!(json["field"], "s2");
	assert_eq!(json["field_kind"], "constructor_property");
	assert_eq!(json["severity"], "warning");
	assert_eq!(json["location"]["span"]["start"]["line"], 9);
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().expect("capture lock").extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

#[test]
fn tracing_reporter_emits_warnings() {
	let capture = Capture::default();
	let writer = capture.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_ansi(false)
		.with_max_level(tracing::Level::WARN)
		.with_writer(move || writer.clone())
		.finish();

	tracing::subscriber::with_default(subscriber, || {
		RuleEngine::default().run(&fixture("TestClass1.kt"), &mut TracingReporter);
	});

	let output = String::from_utf8(capture.0.lock().expect("capture lock").clone()).expect("utf8 output");
	assert_eq!(output.lines().count(), 1);
	assert!(output.contains("WARN"));
	assert!(output.contains("field=s2"));
	assert!(output.contains("line=10"));
	assert!(output.contains(message_for(FieldKind::ConstructorProperty)));
}

#[test]
fn skipped_and_clean_fields_log_nothing() {
	let unit = fixture("Sample.kt");
	let config = RuleConfig::parse("[rules.SerializableNullableFieldInitialize]\nmarker = \"com.acme.Wire\"\n").expect("valid config");
	let capture = Capture::default();
	let writer = capture.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_ansi(false)
		.with_max_level(tracing::Level::TRACE)
		.with_writer(move || writer.clone())
		.finish();

	let summary = tracing::subscriber::with_default(subscriber, || RuleEngine::new(&config).run(&unit, &mut Vec::<Violation>::new()));

	assert_eq!(summary.skipped, 4);
	let output = String::from_utf8(capture.0.lock().expect("capture lock").clone()).expect("utf8 output");
	let lines: Vec<_> = output.lines().collect();
	assert_eq!(lines.len(), 1, "{output}");
	assert!(lines[0].contains("Checked unit"));
}
