//! Tokenizer for console input.
//!
//! Console lines are split on single spaces. Repeated spaces produce empty
//! tokens, which are kept so that argument positions stay stable.

/// Splits a console line into tokens.
///
/// - `add_gold 100` → `["add_gold", "100"]`
/// - `add_gold  100` → `["add_gold", "", "100"]`
/// - `` → `[""]`
pub fn tokenize(input: &str) -> Vec<&str> {
    input.split(' ').collect()
}

/// Parses an integer argument.
///
/// Surrounding whitespace other than spaces (tabs, newlines) is ignored and a
/// leading sign is accepted. Values outside the `i32` range are rejected.
pub fn parse_int(token: &str) -> Option<i32> {
    token.trim().parse().ok()
}
