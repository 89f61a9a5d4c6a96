use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

/// Position in line/column coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based character offset in the line.
	pub column: u32,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

/// Range with start and end positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
	/// Start position (inclusive).
	pub start: Position,
	/// End position (exclusive).
	pub end: Position,
}

impl Span {
	/// Creates a new span.
	pub const fn new(start: Position, end: Position) -> Self {
		Self { start, end }
	}

	/// Creates a zero-length span at a position.
	pub const fn point(pos: Position) -> Self {
		Self { start: pos, end: pos }
	}

	/// Single-line span covering `len` characters from `start`.
	pub const fn on_line(start: Position, len: u32) -> Self {
		Self {
			start,
			end: Position::new(start.line, start.column + len),
		}
	}

	/// Returns true if the span starts and ends on the same line.
	pub fn is_single_line(&self) -> bool {
		self.start.line == self.end.line
	}
}

/// A span inside a particular file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
	/// File the span belongs to. Shared between all locations of a unit.
	pub path: Arc<Path>,
	pub span: Span,
}

impl Location {
	pub fn new(path: impl Into<Arc<Path>>, span: Span) -> Self {
		Self { path: path.into(), span }
	}

	/// One-based line number, as shown to users.
	pub fn display_line(&self) -> u32 {
		self.span.start.line + 1
	}

	/// One-based column number, as shown to users.
	pub fn display_column(&self) -> u32 {
		self.span.start.column + 1
	}

	pub fn path_buf(&self) -> PathBuf {
		self.path.to_path_buf()
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.path.display(), self.display_line(), self.display_column())
	}
}
