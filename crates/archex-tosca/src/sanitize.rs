//! Key sanitization
//!
//! Entity names are free text; document keys must be flat identifiers.
//! `to_identifier` normalizes a name into a key and `to_label` turns a key
//! back into a display name. The pair is deliberately lossy: casing,
//! punctuation and collapsed whitespace do not survive a round trip.

/// Characters that never appear in a document identifier
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '#' | '>' | '-' | '.' | '_')
}

/// Normalize an entity name into a document identifier
///
/// Trims surrounding whitespace, replaces every run of whitespace and
/// disallowed characters (`#`, `>`, `-`, `.`, `_`) with a single
/// underscore, and lower-cases the rest. Pure and total: empty or
/// all-punctuation names yield an empty or underscore-only identifier,
/// which uniqueness handling downstream still disambiguates.
pub fn to_identifier(name: &str) -> String {
    let mut identifier = String::with_capacity(name.len());
    let mut last_was_separator = false;
    for ch in name.trim().chars() {
        if is_separator(ch) {
            if !last_was_separator {
                identifier.push('_');
            }
            last_was_separator = true;
        } else {
            identifier.extend(ch.to_lowercase());
            last_was_separator = false;
        }
    }
    identifier
}

/// Turn a document identifier back into a display label
///
/// Replaces underscores with spaces, upper-cases the first character and
/// each character following a space, and trims the result. Lossy by
/// design: `to_label(to_identifier(name))` is not guaranteed to equal
/// `name`.
pub fn to_label(identifier: &str) -> String {
    let mut label = String::with_capacity(identifier.len());
    let mut upper_next = true;
    for ch in identifier.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch == ' ' {
            label.push(' ');
            upper_next = true;
        } else if upper_next {
            label.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            label.push(ch);
        }
    }
    label.trim().to_string()
}
