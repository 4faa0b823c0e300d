/// Tolerant number parsing for values typed by hand
/// Sales and stock figures stay as raw text until they are needed in a calculation

use std::str::FromStr;

/// Coerce a weight or stock level to a finite, non-negative value
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a hand-typed number, falling back to zero
///
/// Whitespace anywhere in the input is ignored, so `"1 000"` reads as 1000.
/// A decimal comma is accepted in place of a point. Trailing garbage after a
/// valid number is ignored (`"12pcs"` reads as 12); anything without a
/// leading number reads as 0.
pub fn parse_number(raw: &str) -> f64 {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if matches!(compact.as_str(), "" | "-" | "," | ".") {
        return 0.0;
    }

    let normalized = compact.replacen(',', ".", 1);
    let prefix = numeric_prefix(&normalized);
    match f64::from_str(prefix) {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a quantity that cannot be negative
pub fn parse_quantity(raw: &str) -> f64 {
    parse_number(raw).max(0.0)
}

/// Longest leading slice that looks like a decimal number
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when it has at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}
