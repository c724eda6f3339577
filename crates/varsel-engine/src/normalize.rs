//! Canonical form of option values.
//!
//! Catalog keys and UI lookups must both go through [`normalize`]; any second
//! spelling of this function would let the two drift apart.

/// Separator between normalized values in a variant key.
pub const KEY_SEPARATOR: &str = "-";

/// Canonicalizes a raw option value.
///
/// Spaces, `.` and `/` are removed, and `ß`, `ä`, `ö`, `ü` are spelled out as
/// `ss`, `ae`, `oe`, `ue`. Every other character, including its case, is kept.
///
/// ```
/// use varsel_engine::normalize::normalize;
///
/// assert_eq!(normalize("Größe 1/2"), "Groesse12");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            ' ' | '.' | '/' => {}
            'ß' => out.push_str("ss"),
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            other => out.push(other),
        }
    }
    out
}

/// Builds the variant key for a sequence of raw option values.
#[must_use]
pub fn variant_key<S: AsRef<str>>(raw_values: &[S]) -> String {
    join_key(raw_values.iter().map(|v| normalize(v.as_ref())))
}

/// Joins already-normalized values into a key.
pub(crate) fn join_key<I, S>(normalized: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for (idx, value) in normalized.into_iter().enumerate() {
        if idx > 0 {
            key.push_str(KEY_SEPARATOR);
        }
        key.push_str(value.as_ref());
    }
    key
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
