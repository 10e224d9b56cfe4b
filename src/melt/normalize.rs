//! Value-level transforms applied to individual fields
//!
//! All transforms are total: malformed input degrades to a best-effort
//! result instead of failing. The `is_valid_*` checks back the strict
//! validation mode.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static CURRENCY_NOISE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());

static CURRENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$?([0-9]{1,3}(,[0-9]{3})+|[0-9]+)(\.[0-9]+)?$").unwrap()
});

static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)",
        r"-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$",
    ))
    .unwrap()
});

const MONTHS: [(&str, &str); 12] = [
    ("Jan", "01"),
    ("Feb", "02"),
    ("Mar", "03"),
    ("Apr", "04"),
    ("May", "05"),
    ("Jun", "06"),
    ("Jul", "07"),
    ("Aug", "08"),
    ("Sep", "09"),
    ("Oct", "10"),
    ("Nov", "11"),
    ("Dec", "12"),
];

/// Map a month abbreviation to its two-digit number, e.g. `Dec` to `12`.
/// Unknown abbreviations are returned unchanged.
pub fn month_number(month: &str) -> &str {
    MONTHS
        .iter()
        .find(|(abbrev, _)| *abbrev == month)
        .map(|(_, number)| *number)
        .unwrap_or(month)
}

/// Strip a dollar amount like `$3,453.23` down to `3453.23`.
///
/// Keeps every digit and period in order and drops everything else; does
/// not check that a single period remains.
pub fn normalize_currency(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    CURRENCY_NOISE_REGEX.replace_all(value, "").into_owned()
}

/// Rewrite `Mon-DD-YY HH:MM:SS` as `YYYY-MM-DD HH:MM:SS`.
///
/// The year is assumed to be in the 2000s. Only the first token after the
/// date is kept as the time, and only the first three date components are
/// used. Input without a time token or with fewer than three date components
/// comes back trimmed but otherwise as-is.
pub fn normalize_timestamp(value: &str) -> String {
    let trimmed = value.trim();
    let mut tokens = trimmed.split(' ');
    let (Some(date), Some(time)) = (tokens.next(), tokens.next()) else {
        return trimmed.to_string();
    };

    let parts: Vec<&str> = date.split('-').collect();
    let [month, day, year, ..] = parts.as_slice() else {
        return trimmed.to_string();
    };

    format!("20{}-{}-{} {}", year, month_number(month), day, time)
}

/// Double every `"` so the value can sit inside a quoted field.
pub fn escape_quotes(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "\"\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// `$1,234.50`, `1234.50` and `12` are valid; `1,2,3`, `$` and `` are not.
pub fn is_valid_currency(value: &str) -> bool {
    CURRENCY_REGEX.is_match(value)
}

/// Exactly `Mon-DD-YY HH:MM:SS` with a known month abbreviation
pub fn is_valid_timestamp(value: &str) -> bool {
    TIMESTAMP_REGEX.is_match(value.trim())
}
