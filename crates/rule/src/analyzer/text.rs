//! Fallback classification over raw declaration text.
//!
//! Used only when the producer supplies no structural type or initializer.
//! The whole declaration span is scanned at once, so a `?` and an `=` on
//! different lines are seen together:
//!
//! ```text
//! @SerialName("s")
//! val s: String?
//!     = null
//! ```
//!
//! Comments and string literal contents are blanked before matching, so
//! neither can fake a type or an initializer.

use std::sync::LazyLock;

use regex::Regex;

/// What the text says about a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDecl {
	pub nullable: bool,
	pub has_default: bool,
}

/// `val`/`var` (optional) followed by a name and a single `:`.
static DECL_HEAD: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?:^|[^\p{L}\p{N}_$`])(?:va[lr]\s+)?(?P<name>`[^`\r\n]+`|[\p{L}_][\p{L}\p{N}_]*)\s*(?P<colon>:)(?:[^:]|$)")
		.expect("declaration head pattern")
});

/// Parses the declaration of `name` out of `text`.
///
/// Returns `None` if no `name: Type` head is found.
pub fn parse(text: &str, name: &str) -> Option<TextDecl> {
	let masked = mask(text);
	let rest_start = DECL_HEAD.captures_iter(&masked).find_map(|caps| {
		let found = caps.name("name")?.as_str();
		(found.trim_matches('`') == name.trim_matches('`')).then(|| caps.name("colon").map(|m| m.end()))?
	})?;

	let rest = &masked[rest_start..];
	let (ty, tail, function) = split_type(rest);
	let ty = ty.trim();
	if ty.is_empty() {
		return None;
	}

	Some(TextDecl {
		// In `() -> T?` the `?` belongs to the return type.
		nullable: !function && ty.ends_with('?'),
		has_default: matches!(tail, Tail::Initializer | Tail::Delegate),
	})
}

/// What ends the type part of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
	/// `= expr`
	Initializer,
	/// `by delegate`
	Delegate,
	/// End of text, a separator, or an accessor.
	None,
}

/// Splits the text after `name:` into the type and whatever ends it, and
/// reports whether the type has a top-level `->`.
///
/// Brackets are tracked so `Map<K, V>` and `(A, B) -> C` stay whole.
fn split_type(rest: &str) -> (&str, Tail, bool) {
	let bytes = rest.as_bytes();
	let mut depth = 0usize;
	let mut function = false;
	let mut i = 0usize;
	while i < bytes.len() {
		match bytes[i] {
			b'<' | b'(' | b'[' | b'{' => depth += 1,
			b'-' if bytes.get(i + 1) == Some(&b'>') => {
				function |= depth == 0;
				i += 1;
			}
			b'>' | b')' | b']' | b'}' => {
				if depth == 0 {
					return (&rest[..i], Tail::None, function);
				}
				depth -= 1;
			}
			b'=' if depth == 0 => return (&rest[..i], Tail::Initializer, function),
			b',' | b';' if depth == 0 => return (&rest[..i], Tail::None, function),
			b'b' if depth == 0 && is_word_at(rest, i, "by") => return (&rest[..i], Tail::Delegate, function),
			b'g' | b's' if depth == 0 && (is_word_at(rest, i, "get") || is_word_at(rest, i, "set")) => {
				return (&rest[..i], Tail::None, function);
			}
			_ => {}
		}
		i += 1;
	}
	(rest, Tail::None, function)
}

fn is_word_at(text: &str, at: usize, word: &str) -> bool {
	let is_ident = |c: char| c.is_alphanumeric() || c == '_';
	text[at..].starts_with(word)
		&& text[..at].chars().next_back().is_none_or(|c| !is_ident(c))
		&& text[at + word.len()..].chars().next().is_none_or(|c| !is_ident(c))
}

/// Replaces comments and string/char literal contents with spaces.
///
/// Byte offsets and line breaks are preserved.
pub fn mask(text: &str) -> String {
	#[derive(Clone, Copy)]
	enum State {
		Code,
		LineComment,
		BlockComment(usize),
		Str,
		RawStr,
		Char,
	}

	let mut out = String::with_capacity(text.len());
	let mut state = State::Code;
	let mut chars = text.char_indices().peekable();
	let blank = |out: &mut String, c: char| {
		if c == '\n' || c == '\r' {
			out.push(c);
		} else {
			out.extend(std::iter::repeat_n(' ', c.len_utf8()));
		}
	};

	while let Some((idx, c)) = chars.next() {
		let next = text[idx + c.len_utf8()..].chars().next();
		match state {
			State::Code => match (c, next) {
				('/', Some('/')) => {
					state = State::LineComment;
					blank(&mut out, c);
				}
				('/', Some('*')) => {
					chars.next();
					state = State::BlockComment(1);
					out.push_str("  ");
				}
				('"', _) if text[idx..].starts_with("\"\"\"") => {
					chars.next();
					chars.next();
					state = State::RawStr;
					out.push_str("\"\"\"");
				}
				('"', _) => {
					state = State::Str;
					out.push(c);
				}
				('\'', _) => {
					state = State::Char;
					out.push(c);
				}
				_ => out.push(c),
			},
			State::LineComment => {
				if c == '\n' {
					state = State::Code;
					out.push(c);
				} else {
					blank(&mut out, c);
				}
			}
			State::BlockComment(level) => match (c, next) {
				('*', Some('/')) => {
					chars.next();
					out.push_str("  ");
					state = if level == 1 { State::Code } else { State::BlockComment(level - 1) };
				}
				('/', Some('*')) => {
					chars.next();
					out.push_str("  ");
					state = State::BlockComment(level + 1);
				}
				_ => blank(&mut out, c),
			},
			State::Str | State::Char => {
				let close = if matches!(state, State::Str) { '"' } else { '\'' };
				if c == '\\' {
					blank(&mut out, c);
					if let Some((_, escaped)) = chars.next() {
						blank(&mut out, escaped);
					}
				} else if c == close {
					state = State::Code;
					out.push(c);
				} else {
					blank(&mut out, c);
				}
			}
			State::RawStr => {
				if text[idx..].starts_with("\"\"\"") {
					chars.next();
					chars.next();
					state = State::Code;
					out.push_str("\"\"\"");
				} else {
					blank(&mut out, c);
				}
			}
		}
	}
	out
}
