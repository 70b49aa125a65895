//! Loose, script-style coercions of JSON values to primitives.
//!
//! These follow the familiar dynamic-language rules (truthiness, numeric
//! parsing of strings, stringification of scalars) so that data coming from
//! loosely typed producers converts predictably.

use serde_json::Value;

/// Largest integer exactly representable by an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Text produced when an object is stringified without a textual form.
pub(crate) const OBJECT_MARKER: &str = "[object Object]";

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse numeric text.
///
/// - surrounding whitespace is ignored, blank text is `0`
/// - `0x` / `0o` / `0b` prefixes select the radix
/// - otherwise decimal float syntax, exponent allowed
///
/// Returns `None` for anything that does not denote a finite number.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    let prefix = s.get(..2).map(str::to_ascii_lowercase);
    let radix = match prefix.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.starts_with('+') {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }
    // `f64::from_str` also accepts "inf" and "NaN" spellings.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Build a JSON number, preferring the integer representation.
pub(crate) fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::from(n as i64));
    }
    serde_json::Number::from_f64(n).map(Value::Number)
}

/// Shortest round-trip decimal; exponent form outside `[1e-6, 1e21)`.
fn number_to_string(n: &serde_json::Number) -> String {
    let Some(f) = n.as_f64().filter(|_| n.is_f64()) else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Stringify a value. Objects yield the generic object marker.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_MARKER.to_string(),
    }
}
