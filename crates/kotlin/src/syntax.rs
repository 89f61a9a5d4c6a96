//! Kotlin parsing through tree-sitter.

use thiserror::Error;
use tree_sitter::{Language, LanguageError, Node, Parser, Tree};
use tree_sitter_language::LanguageFn;

const GRAMMAR: LanguageFn = tree_sitter_kotlin_ng::LANGUAGE;

/// Node kinds naming a declaration.
pub const IDENTIFIERS: &[&str] = &["simple_identifier", "type_identifier", "identifier"];

/// Errors that can occur while parsing.
#[derive(Error, Debug)]
pub enum SyntaxError {
	/// The grammar was generated for an ABI the runtime does not support.
	#[error("incompatible Kotlin grammar: {0}")]
	Language(LanguageError),

	/// The parser produced no tree.
	#[error("parse error")]
	Parse,
}

/// Parses a whole file. Syntax errors end up as `ERROR` nodes in the tree.
pub fn parse(source: &str) -> Result<Tree, SyntaxError> {
	let mut parser = Parser::new();
	parser.set_language(&Language::new(GRAMMAR)).map_err(SyntaxError::Language)?;
	parser.parse(source, None).ok_or(SyntaxError::Parse)
}

pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
	source.get(node.byte_range()).unwrap_or("")
}

pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
	let mut cursor = node.walk();
	node.children(&mut cursor).collect()
}

pub fn is_comment(node: Node<'_>) -> bool {
	node.kind().ends_with("comment")
}

pub fn is_identifier(node: Node<'_>) -> bool {
	IDENTIFIERS.contains(&node.kind()) && !node.is_missing()
}

/// Backticked names lose their quotes.
pub fn unquote(name: &str) -> &str {
	name.trim_matches('`')
}
