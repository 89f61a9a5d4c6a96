//! Declaration walker over the Kotlin syntax tree.
//!
//! Visits top-level and class-body members, descending into nested
//! class-likes. Function bodies, initializer blocks and secondary
//! constructors are never entered. `ERROR` nodes are searched for
//! declarations, so malformed input yields a partial unit.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use nullinit_model::{Annotation, ClassDecl, ClassId, ClassKind, DeclaredType, FieldDecl, FieldKind, Initializer, Location, SourceUnit, Span};
use tree_sitter::{Node, Tree};

use crate::imports::Imports;
use crate::lines::LineIndex;
use crate::syntax::{children, is_comment, is_identifier, text, unquote};

const CLASS_LIKE: &[&str] = &["class_declaration", "object_declaration", "companion_object"];

/// Type nodes that may follow `:` in a declaration.
const TYPES: &[&str] = &[
	"user_type",
	"nullable_type",
	"function_type",
	"parenthesized_type",
	"non_nullable_type",
	"dynamic",
];

/// Annotations and modifier keywords of one declaration.
#[derive(Debug, Default)]
struct Modifiers<'s> {
	annotations: Vec<Annotation>,
	keywords: Vec<&'s str>,
}

impl Modifiers<'_> {
	fn has(&self, keyword: &str) -> bool {
		self.keywords.contains(&keyword)
	}
}

pub(crate) struct Scanner<'s> {
	src: &'s str,
	lines: LineIndex,
	path: Arc<Path>,
	imports: Imports,
	local_classes: HashSet<&'s str>,
	unit: SourceUnit,
}

impl<'s> Scanner<'s> {
	pub(crate) fn new(path: &Path, src: &'s str) -> Self {
		let unit = SourceUnit::new(path).with_source(src);
		Self {
			src,
			lines: LineIndex::new(src),
			path: unit.path_arc(),
			imports: Imports::default(),
			local_classes: HashSet::new(),
			unit,
		}
	}

	pub(crate) fn scan(mut self, tree: &Tree) -> SourceUnit {
		let root = tree.root_node();
		self.collect_local_classes(root);
		self.members(root, None, "");
		tracing::debug!(
			path = %self.path.display(),
			classes = self.unit.classes().count(),
			fields = self.unit.fields().count(),
			errors = root.has_error(),
			"Extracted declarations"
		);
		self.unit
	}

	/// The unit without declarations, for sources that could not be parsed.
	pub(crate) fn finish(self) -> SourceUnit {
		self.unit
	}

	/// Names of every class-like in the file, for annotation resolution.
	fn collect_local_classes(&mut self, node: Node<'_>) {
		for child in children(node) {
			if CLASS_LIKE.contains(&child.kind())
				&& let Some(name) = children(child).into_iter().find(|n| is_identifier(*n))
			{
				self.local_classes.insert(unquote(text(name, self.src)));
			}
			self.collect_local_classes(child);
		}
	}

	fn location(&self, node: Node<'_>) -> Location {
		let span = Span::new(
			self.lines.position(self.src, node.start_byte()),
			self.lines.position(self.src, node.end_byte()),
		);
		Location::new(Arc::clone(&self.path), span)
	}

	fn members(&mut self, container: Node<'_>, owner: Option<ClassId>, scope: &str) {
		for node in children(container) {
			match node.kind() {
				"class_declaration" | "object_declaration" | "companion_object" => self.class(node, owner, scope),
				"property_declaration" => self.property(node, owner),
				"package_header" if owner.is_none() => self.package(node),
				"import_header" if owner.is_none() => self.import(node),
				"import_list" | "ERROR" => self.members(node, owner, scope),
				_ => {}
			}
		}
	}

	fn package(&mut self, node: Node<'_>) {
		let name: String = header_body(text(node, self.src), "package").split_whitespace().collect();
		tracing::trace!(package = %name, "Package");
		self.imports.set_package(name.replace('`', ""));
	}

	fn import(&mut self, node: Node<'_>) {
		let words: Vec<&str> = header_body(text(node, self.src), "import").split_whitespace().collect();
		let (path, alias) = match words.as_slice() {
			[path @ .., "as", alias] if !path.is_empty() => (path.concat(), Some(unquote(alias))),
			path => (path.concat(), None),
		};
		self.imports.add(&path.replace('`', ""), alias);
	}

	/// Annotations and keywords in front of a declaration.
	fn modifiers(&self, nodes: &[Node<'_>]) -> Modifiers<'s> {
		let mut modifiers = Modifiers::default();
		for node in nodes {
			match node.kind() {
				"modifiers" => {
					for child in children(*node) {
						if child.kind() == "annotation" {
							self.annotations(child, &mut modifiers.annotations);
						} else if child.is_named() && !is_comment(child) {
							modifiers.keywords.push(text(child, self.src).trim());
						}
					}
				}
				"annotation" => self.annotations(*node, &mut modifiers.annotations),
				_ => {}
			}
		}
		modifiers
	}

	/// Resolves every name in an `annotation` node. `@[A B]` names two.
	fn annotations(&self, node: Node<'_>, out: &mut Vec<Annotation>) {
		for child in children(node) {
			match child.kind() {
				"user_type" => {
					let written = dotted(child, self.src);
					if !written.is_empty() {
						let qualified = self.imports.resolve(&written, |name| self.local_classes.contains(name));
						out.push(Annotation::resolved(qualified, written));
					}
				}
				"constructor_invocation" => self.annotations(child, out),
				_ => {}
			}
		}
	}

	fn class(&mut self, node: Node<'_>, owner: Option<ClassId>, scope: &str) {
		let nodes = children(node);
		let modifiers = self.modifiers(&nodes);
		let kind = match node.kind() {
			"object_declaration" | "companion_object" => ClassKind::Object,
			_ if nodes.iter().any(|n| n.kind() == "interface") => ClassKind::Interface,
			_ if modifiers.has("enum") => ClassKind::EnumClass,
			_ if modifiers.has("annotation") => ClassKind::AnnotationClass,
			_ => ClassKind::Class,
		};

		let (name, anchor) = match nodes.iter().copied().find(|n| is_identifier(*n)) {
			Some(ident) => (unquote(text(ident, self.src)), ident),
			None if node.kind() == "companion_object" => {
				let keyword = nodes.iter().copied().find(|n| n.kind() == "object").unwrap_or(node);
				("Companion", keyword)
			}
			None => return,
		};
		if name.is_empty() {
			return;
		}
		let qualified = match (owner, self.imports.package()) {
			(None, Some(package)) if !package.is_empty() => format!("{package}.{name}"),
			_ => format!("{scope}{name}"),
		};
		let mut decl = ClassDecl::new(name, qualified.as_str()).with_kind(kind).with_location(self.location(anchor));
		decl.annotations = modifiers.annotations;
		decl.parent = owner;
		let id = self.unit.add_class(decl);
		tracing::trace!(class = %qualified, ?kind, "Class");

		for child in &nodes {
			match child.kind() {
				"primary_constructor" => {
					let mut params = Vec::new();
					class_parameters(*child, &mut params);
					for param in params {
						self.parameter(param, id);
					}
				}
				"class_body" | "enum_class_body" => self.members(*child, Some(id), &format!("{qualified}.")),
				_ => {}
			}
		}
	}

	fn parameter(&mut self, node: Node<'_>, class: ClassId) {
		let nodes = children(node);
		let Some(ident) = nodes.iter().copied().find(|n| is_identifier(*n)) else {
			return;
		};
		let name = unquote(text(ident, self.src));
		if name.is_empty() {
			return;
		}
		let kind = if nodes.iter().any(|n| is_binding(*n)) {
			FieldKind::ConstructorProperty
		} else {
			FieldKind::Parameter
		};
		let modifiers = self.modifiers(&nodes);

		let mut field = FieldDecl::new(name, kind)
			.with_text(text(node, self.src))
			.with_initializer(self.initializer(&nodes))
			.with_location(self.location(ident));
		field.declared_type = self.declared_type(&nodes);
		field.annotations = modifiers.annotations;
		self.unit.add_field(Some(class), field);
	}

	fn property(&mut self, node: Node<'_>, owner: Option<ClassId>) {
		let nodes = children(node);
		let Some(decl_at) = nodes.iter().position(|n| n.kind() == "variable_declaration") else {
			tracing::trace!("Destructuring declaration");
			return;
		};
		let receiver = nodes[..decl_at].iter().any(|n| TYPES.contains(&n.kind()) || n.kind() == ".");
		if receiver {
			tracing::trace!("Extension property");
			return;
		}
		let decl = children(nodes[decl_at]);
		let Some(ident) = decl.iter().copied().find(|n| is_identifier(*n)) else {
			return;
		};
		let name = unquote(text(ident, self.src));
		if name.is_empty() {
			return;
		}

		let modifiers = self.modifiers(&nodes);
		let is_val = nodes.iter().any(|n| is_binding(*n) && text(*n, self.src) == "val");
		let delegated = nodes.iter().any(|n| n.kind() == "property_delegate");
		let initializer = self.initializer(&nodes);
		let getter = custom_accessor(&nodes, "getter");
		let setter = custom_accessor(&nodes, "setter");
		let uses_field = getter.into_iter().chain(setter).any(|accessor| mentions_field(accessor, self.src));

		let in_interface = owner.and_then(|id| self.unit.class(id)).is_some_and(|class| class.kind == ClassKind::Interface);
		let custom_only = getter.is_some() && (is_val || setter.is_some()) && !uses_field;
		let has_field = !delegated
			&& !in_interface
			&& !modifiers.has("abstract")
			&& !modifiers.has("expect")
			&& (initializer.is_present() == Some(true) || !custom_only);
		if !has_field {
			tracing::trace!(property = name, "Property without backing field");
			return;
		}

		// Accessors are not part of the declaration text.
		let end = nodes
			.iter()
			.filter(|n| !matches!(n.kind(), "getter" | "setter" | ";") && !is_comment(**n))
			.map(|n| n.end_byte())
			.max()
			.unwrap_or(node.end_byte());
		let declaration = self.src.get(node.start_byte()..end).unwrap_or("");

		let mut field = FieldDecl::new(name, FieldKind::Property)
			.with_text(declaration)
			.with_initializer(initializer)
			.with_location(self.location(ident));
		field.declared_type = self.declared_type(&decl);
		field.annotations = modifiers.annotations;
		self.unit.add_field(owner, field);
	}

	/// The type after `:`, including any leading type annotations.
	fn declared_type(&self, nodes: &[Node<'_>]) -> Option<DeclaredType> {
		let colon = nodes.iter().position(|n| n.kind() == ":")?;
		let rest = &nodes[colon + 1..];
		let ty = rest.iter().copied().find(|n| TYPES.contains(&n.kind()))?;
		let start = rest
			.iter()
			.find(|n| n.kind() == "type_modifiers")
			.map_or(ty.start_byte(), |n| n.start_byte().min(ty.start_byte()));
		let written = self.src.get(start..ty.end_byte())?;
		Some(DeclaredType::new(written, ty.kind() == "nullable_type"))
	}

	/// The expression after `=`. An `=` with nothing after it still counts.
	fn initializer(&self, nodes: &[Node<'_>]) -> Initializer {
		let Some(eq) = nodes.iter().position(|n| n.kind() == "=") else {
			return Initializer::Absent;
		};
		match nodes[eq + 1..].iter().find(|n| n.is_named() && !is_comment(**n) && !n.is_missing()) {
			Some(expr) => Initializer::Present(text(*expr, self.src).to_string()),
			None => Initializer::Present(String::new()),
		}
	}
}

/// `val`/`var`, whichever way the grammar exposes it.
fn is_binding(node: Node<'_>) -> bool {
	matches!(node.kind(), "val" | "var" | "binding_pattern_kind")
}

/// The keyword-stripped body of a `package` or `import` header.
fn header_body<'a>(header: &'a str, keyword: &str) -> &'a str {
	let header = header.trim();
	header.strip_prefix(keyword).unwrap_or(header).trim().trim_end_matches(';')
}

/// Dotted name of a `user_type`, without type arguments.
fn dotted(node: Node<'_>, src: &str) -> String {
	fn segments<'s>(node: Node<'_>, src: &'s str, out: &mut Vec<&'s str>) {
		for child in children(node) {
			if is_identifier(child) {
				out.push(unquote(text(child, src)));
			} else if child.kind() != "type_arguments" {
				segments(child, src, out);
			}
		}
	}
	let mut parts = Vec::new();
	segments(node, src, &mut parts);
	parts.join(".")
}

fn class_parameters<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
	for child in children(node) {
		match child.kind() {
			"class_parameter" => out.push(child),
			"class_parameters" | "ERROR" => class_parameters(child, out),
			_ => {}
		}
	}
}

/// A `get`/`set` accessor with a body.
fn custom_accessor<'t>(nodes: &[Node<'t>], kind: &str) -> Option<Node<'t>> {
	nodes
		.iter()
		.copied()
		.find(|n| n.kind() == kind && children(*n).iter().any(|c| c.kind() == "function_body"))
}

fn mentions_field(node: Node<'_>, src: &str) -> bool {
	children(node)
		.into_iter()
		.any(|child| (is_identifier(child) && text(child, src) == "field") || mentions_field(child, src))
}
