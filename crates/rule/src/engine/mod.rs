//! The rule's decision procedure.
//!
//! Each field-like declaration walks four states, top to bottom:
//!
//! 1. scope: only properties (body or primary constructor) apply
//! 2. class membership: the field must have an enclosing class
//! 3. marker: that class must carry the serializable marker
//! 4. field: nullable without a default is a violation, anything else is clean
//!
//! Fields are independent of each other. [`RuleEngine::run`] visits them in
//! source order so the report order is stable.

use nullinit_model::{ClassDecl, Declaration, FieldDecl, SourceUnit};

use crate::analyzer::FieldAnalyzer;
use crate::config::RuleConfig;
use crate::marker::MarkerResolver;
use crate::meta::{RuleMeta, SERIALIZABLE_NULLABLE_FIELD};
use crate::report::Reporter;
use crate::violation::{Violation, message_for};

/// Why a declaration was not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skip {
	/// The rule is turned off in config.
	Disabled,
	/// Class declarations and plain parameters.
	NotFieldLike,
	NoEnclosingClass,
	/// Enclosing class lacks the marker.
	Unmarked,
	/// Neither structure nor text tells whether the field is nullable or defaulted.
	Unclassifiable,
	/// Field qualifies but has no location to report at.
	NoLocation,
}

/// Outcome of checking one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	NotApplicable(Skip),
	Clean,
	Violation(Violation),
}

impl Verdict {
	pub fn is_violation(&self) -> bool {
		matches!(self, Self::Violation(_))
	}
}

/// Counters for one [`RuleEngine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
	/// Field-like declarations visited.
	pub fields: usize,
	/// Fields found clean.
	pub clean: usize,
	/// Fields skipped for any [`Skip`] reason.
	pub skipped: usize,
	pub violations: usize,
}

/// Checks source units for nullable fields without defaults in marked classes.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
	meta: RuleMeta,
	enabled: bool,
	marker: MarkerResolver,
	analyzer: FieldAnalyzer,
}

impl Default for RuleEngine {
	fn default() -> Self {
		Self::new(&RuleConfig::default())
	}
}

impl RuleEngine {
	pub fn new(config: &RuleConfig) -> Self {
		Self {
			meta: SERIALIZABLE_NULLABLE_FIELD,
			enabled: config.enabled,
			marker: MarkerResolver::new(config.marker.clone()),
			analyzer: FieldAnalyzer::new(),
		}
	}

	/// Dispatches on the declaration kind.
	pub fn check_declaration(&self, unit: &SourceUnit, decl: Declaration<'_>) -> Verdict {
		match decl {
			Declaration::Class(..) => Verdict::NotApplicable(Skip::NotFieldLike),
			Declaration::Field(_, field) => self.check_field(unit, field),
		}
	}

	/// Runs the four-state check on one field.
	pub fn check_field(&self, unit: &SourceUnit, field: &FieldDecl) -> Verdict {
		if !self.enabled {
			return Verdict::NotApplicable(Skip::Disabled);
		}
		if !self.meta.observes(field.kind) {
			return Verdict::NotApplicable(Skip::NotFieldLike);
		}
		let Some(class) = unit.owner_of(field) else {
			return Verdict::NotApplicable(Skip::NoEnclosingClass);
		};
		if !self.marker.is_marked(class) {
			return Verdict::NotApplicable(Skip::Unmarked);
		}
		let Some(shape) = self.analyzer.classify(field) else {
			return Verdict::NotApplicable(Skip::Unclassifiable);
		};
		if !shape.needs_default() {
			return Verdict::Clean;
		}
		match self.violation(class, field) {
			Some(violation) => Verdict::Violation(violation),
			None => Verdict::NotApplicable(Skip::NoLocation),
		}
	}

	fn violation(&self, class: &ClassDecl, field: &FieldDecl) -> Option<Violation> {
		let location = field.location.clone()?;
		Some(Violation {
			rule_id: self.meta.id,
			field: field.name.clone(),
			field_kind: field.kind,
			class: class.qualified_name.clone(),
			location,
			message: message_for(field.kind).to_string(),
			severity: self.meta.severity,
		})
	}

	/// Checks every declaration of `unit` in source order, reporting each
	/// violation to `reporter`.
	pub fn run(&self, unit: &SourceUnit, reporter: &mut dyn Reporter) -> RunSummary {
		let _span = tracing::debug_span!("check_unit", path = %unit.path().display()).entered();
		let mut summary = RunSummary::default();

		for decl in unit.declarations() {
			let Declaration::Field(_, field) = decl else {
				continue;
			};
			summary.fields += 1;
			// Skipped and clean fields stay silent.
			match self.check_declaration(unit, decl) {
				Verdict::NotApplicable(_) => summary.skipped += 1,
				Verdict::Clean => summary.clean += 1,
				Verdict::Violation(violation) => {
					tracing::trace!(field = %field.name, class = %violation.class, "Nullable field without default");
					summary.violations += 1;
					reporter.report(violation);
				}
			}
		}

		tracing::debug!(
			fields = summary.fields,
			skipped = summary.skipped,
			violations = summary.violations,
			"Checked unit"
		);
		summary
	}

	/// Convenience wrapper around [`RuleEngine::run`] collecting violations.
	pub fn check_unit(&self, unit: &SourceUnit) -> Vec<Violation> {
		let mut violations: Vec<Violation> = Vec::new();
		self.run(unit, &mut violations);
		violations
	}
}
