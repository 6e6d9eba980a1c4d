//! Lexical line classification
//!
//! Forward-scanning heuristics over raw source lines. These are substring
//! tests, not a tokenizer: a keyword inside a comment or string literal is
//! classified the same as real code. That imprecision is a deliberate,
//! documented property of the engine, not something to fix with a lexer.

pub mod brackets;
pub mod terminators;

pub use brackets::BracketScanner;
pub use terminators::TerminatorScanner;

/// Primitive-type keywords that open a declaration.
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "int ", "char ", "float ", "double ", "long ", "short ", "struct ",
];

/// True if the line looks like a variable declaration.
pub fn is_declaration_line(line: &str) -> bool {
    DECLARATION_KEYWORDS.iter().any(|kw| line.contains(kw))
}

/// True if the line contains a plain assignment `=`.
///
/// Comparison and compound operators (`==`, `!=`, `<=`, `>=`) are excluded;
/// this is the strict default. See [`is_initialized_naive`] for the legacy
/// variant.
pub fn is_initialized(line: &str) -> bool {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'=' {
            continue;
        }
        let prev = if i > 0 { bytes[i - 1] } else { 0 };
        let next = bytes.get(i + 1).copied().unwrap_or(0);
        if prev != b'=' && prev != b'!' && prev != b'<' && prev != b'>' && next != b'=' {
            return true;
        }
    }
    false
}

/// Legacy initialization test: any `=` counts, including comparisons.
pub fn is_initialized_naive(line: &str) -> bool {
    line.contains('=')
}

/// True for blank lines and lines that open or close a comment.
pub fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with("*/")
}

/// True for preprocessor lines (`#include`, `#define`, ...).
pub fn is_preprocessor(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
