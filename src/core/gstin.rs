//! GSTIN (Indian GST identification number) format validation.
//!
//! Layout, 15 characters. Length is counted in UTF-16 code units, so a
//! character outside the Basic Multilingual Plane counts twice.
//!
//! | Pos   | Content                          |
//! |-------|----------------------------------|
//! | 1–2   | state code, digits               |
//! | 3–7   | PAN letters, `A-Z`               |
//! | 8–11  | PAN digits                       |
//! | 12    | PAN check letter, `A-Z`          |
//! | 13    | entity number, `1-9` or `A-Z`    |
//! | 14    | literal `Z`                      |
//! | 15    | checksum, `0-9` or `A-Z`         |
//!
//! The checksum character is not verified.

use std::ops::Range;

use super::validation::ValidationResult;

/// Required GSTIN length in UTF-16 code units.
pub const GSTIN_LEN: usize = 15;

/// Canonical example used in messages and guidance.
pub const GSTIN_EXAMPLE: &str = "29ABCDE1234F1Z5";

/// Input hint shown next to the GSTIN field.
pub const GSTIN_GUIDANCE: &str = "Format: 2 digits + 5 letters + 4 digits + letter + digit/letter + Z + digit/letter. Example: 29ABCDE1234F1Z5";

/// Validate a GSTIN by format (no registry lookup).
///
/// Empty input is valid because the field is optional. For a malformed value
/// the message names the first section that is wrong.
pub fn validate_gstin(value: &str) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::ok();
    }

    let units = value.encode_utf16().count();
    if units != GSTIN_LEN {
        return ValidationResult::blocking(format!(
            "GSTIN must be exactly 15 characters (currently {units})"
        ));
    }

    // Fewer than 15 chars here means a surrogate pair, which no section accepts.
    let chars: Vec<char> = value.chars().collect();
    if chars.len() == GSTIN_LEN && matches_layout(&chars) {
        return ValidationResult::ok();
    }

    let message = if !section(&chars, 0..2, is_digit) {
        "GSTIN must start with 2 digits (state code)"
    } else if !section(&chars, 2..7, is_upper) {
        "After state code, GSTIN must have 5 uppercase letters (PAN identifier)"
    } else if !section(&chars, 7..11, is_digit) {
        "GSTIN format error: After PAN characters, need 4 digits"
    } else if !chars.contains(&'Z') {
        "GSTIN must contain 'Z' at the correct position (13th character)"
    } else {
        "Invalid GSTIN format: Should follow pattern like 29ABCDE1234F1Z5"
    };
    ValidationResult::blocking(message)
}

fn matches_layout(c: &[char]) -> bool {
    run(&c[..2], is_digit)
        && run(&c[2..7], is_upper)
        && run(&c[7..11], is_digit)
        && is_upper(c[11])
        && (matches!(c[12], '1'..='9') || is_upper(c[12]))
        && c[13] == 'Z'
        && (is_digit(c[14]) || is_upper(c[14]))
}

fn run(chars: &[char], pred: fn(char) -> bool) -> bool {
    chars.iter().all(|&c| pred(c))
}

fn section(chars: &[char], range: Range<usize>, pred: fn(char) -> bool) -> bool {
    chars.get(range).is_some_and(|part| run(part, pred))
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}
