//! Byte offset to line/column mapping.

use nullinit_model::Position;

/// Start offsets of every line in a source text.
pub struct LineIndex {
	starts: Vec<usize>,
}

impl LineIndex {
	pub fn new(src: &str) -> Self {
		let starts = std::iter::once(0)
			.chain(src.bytes().enumerate().filter(|&(_, b)| b == b'\n').map(|(idx, _)| idx + 1))
			.collect();
		Self { starts }
	}

	/// Zero-based line and character column of a byte offset.
	pub fn position(&self, src: &str, offset: usize) -> Position {
		let line = match self.starts.binary_search(&offset) {
			Ok(line) => line,
			Err(line) => line.saturating_sub(1),
		};
		let line_start = self.starts.get(line).copied().unwrap_or(0);
		let column = src.get(line_start..offset).map_or(0, |s| s.chars().count());
		Position::new(line as u32, column as u32)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_positions() {
		let src = "ab\ncdef\n\nf";
		let index = LineIndex::new(src);
		assert_eq!(index.position(src, 0), Position::new(0, 0));
		assert_eq!(index.position(src, 3), Position::new(1, 0));
		assert_eq!(index.position(src, 6), Position::new(1, 3));
		assert_eq!(index.position(src, src.len() - 1), Position::new(3, 0));
	}

	#[test]
	fn test_columns_count_chars() {
		let src = "val é: Int\n/* 😀 */ val x: Int";
		let index = LineIndex::new(src);
		let x = src.find('x').expect("x");
		assert_eq!(index.position(src, x), Position::new(1, 12));
		assert_eq!(index.position(src, src.find(':').expect("colon")), Position::new(0, 5));
	}
}
