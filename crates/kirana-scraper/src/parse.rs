//! Quantity-string splitting for pack sizes.
//!
//! The backend usually sends the pack size as one combined string
//! (`"1 kg"`, `"500g"`, `"2 x 1 L"`). These helpers split it into the
//! numeric part and the unit using manual byte scanning; the formats are
//! too regular to justify a regex dependency.

/// Splits a combined quantity string into `(weight, unit)`.
///
/// - `"1 kg"` → `("1", "kg")`
/// - `"500g"` → `("500", "g")`
/// - `"1.25 L"` → `("1.25", "l")`
/// - `"2 x 500 ml"` → `("500", "ml")` (per-piece size, multipliers dropped)
///
/// The unit is lowercased. Returns `None` when no leading number or no unit
/// can be found, in which case the caller falls back to separate
/// weight/unit fields.
#[must_use]
pub fn split_quantity(quantity: &str) -> Option<(String, String)> {
    let trimmed = quantity.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (number, rest) = take_number(trimmed)?;
    let rest = rest.trim_start();

    // "2 x 500 ml" style multi-packs: recurse on the per-piece part.
    if let Some(stripped) = rest
        .strip_prefix(['x', 'X', '*'])
        .map(str::trim_start)
    {
        if stripped.as_bytes().first().is_some_and(u8::is_ascii_digit) {
            return split_quantity(stripped);
        }
    }

    let unit: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if unit.is_empty() {
        return None;
    }

    Some((number, unit.to_lowercase()))
}

/// Takes a leading decimal number off `s`, returning `(number, rest)`.
fn take_number(s: &str) -> Option<(String, &str)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut has_dot = false;

    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii_digit() {
            end += 1;
        } else if b == b'.' && !has_dot && end + 1 < bytes.len() && bytes[end + 1].is_ascii_digit()
        {
            has_dot = true;
            end += 1;
        } else {
            break;
        }
    }

    if end == 0 || !bytes[0].is_ascii_digit() {
        return None;
    }

    Some((s[..end].to_string(), &s[end..]))
}
