//! Single-quote tolerant input.
//!
//! `serde_json` only understands double-quoted strings. Inputs such as
//! `{'name': 'x'}` are rewritten to standard JSON before parsing. Double-quoted
//! strings pass through untouched apart from the `\'` escape, which JSON lacks.

use std::borrow::Cow;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InDouble,
    InSingle,
}

/// Rewrite single-quoted string tokens into double-quoted ones.
///
/// Inside any string token `\'` becomes a bare `'`. Inside a single-quoted
/// token a bare `"` is also escaped. Malformed input is passed along so the
/// parser reports the error.
pub fn normalize_quotes(input: &str) -> Cow<'_, str> {
    if !input.contains('\'') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    let mut state = State::Outside;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (state, c) {
            (State::Outside, '"') => {
                out.push('"');
                state = State::InDouble;
            }
            (State::Outside, '\'') => {
                out.push('"');
                state = State::InSingle;
            }
            (State::InDouble, '\\') | (State::InSingle, '\\') => match chars.next() {
                Some('\'') => out.push('\''),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            (State::InDouble, '"') => {
                out.push('"');
                state = State::Outside;
            }
            (State::InSingle, '\'') => {
                out.push('"');
                state = State::Outside;
            }
            (State::InSingle, '"') => out.push_str("\\\""),
            (_, other) => out.push(other),
        }
    }

    Cow::Owned(out)
}
