//! Helpers for the keep-previous editing convention.

use crate::error::{CodexError, CodexResult};

/// Replace `current` with `input` unless `input` is blank.
pub fn keep_previous(current: &mut String, input: &str) {
    let input = input.trim();
    if !input.is_empty() {
        *current = input.to_string();
    }
}

/// Replace an optional value with `input` unless `input` is blank.
pub fn keep_previous_opt(current: &mut Option<String>, input: &str) {
    let input = input.trim();
    if !input.is_empty() {
        *current = Some(input.to_string());
    }
}

/// Parse a non-negative whole number made of ASCII digits only.
///
/// Anything else (blank, signs, spaces inside, overflow) yields `None`.
pub fn parse_count(input: &str) -> Option<u64> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Replace a numeric value when `input` parses, otherwise keep it.
pub fn keep_previous_count(current: &mut Option<u64>, input: &str) {
    if let Some(n) = parse_count(input) {
        *current = Some(n);
    }
}

/// Remove the element at a 1-based displayed `position`.
pub fn take_position<T>(list: &mut Vec<T>, position: usize) -> CodexResult<T> {
    if position == 0 || position > list.len() {
        return Err(CodexError::IndexOutOfRange {
            position,
            len: list.len(),
        });
    }
    Ok(list.remove(position - 1))
}
