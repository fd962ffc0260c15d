//! Reading record cells out of Polars `AnyValue`s.
//!
//! Record tables arrive as all-string frames, but frames built in code (and
//! the presence matrix) carry numeric and boolean cells too. These helpers
//! give every caller the same view of a cell: as display text, as a trimmed
//! label, as a number, or as a presence flag.

use polars::prelude::AnyValue;

/// Borrows the text of a string cell.
fn cell_str<'a>(value: &'a AnyValue<'_>) -> Option<&'a str> {
    match value {
        AnyValue::String(s) => Some(*s),
        AnyValue::StringOwned(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Renders a cell as display text. Missing cells render as `""`.
///
/// Floats drop trailing zeros so that `7.0` reads as `7`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use litnet_common::cell_text;
///
/// assert_eq!(cell_text(AnyValue::Null), "");
/// assert_eq!(cell_text(AnyValue::Int64(1042)), "1042");
/// assert_eq!(cell_text(AnyValue::Float64(7.0)), "7");
/// assert_eq!(cell_text(AnyValue::String("Rodents")), "Rodents");
/// ```
pub fn cell_text(value: AnyValue<'_>) -> String {
    if let Some(text) = cell_str(&value) {
        return text.to_string();
    }
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(flag) => flag.to_string(),
        AnyValue::Float32(v) => format_number(f64::from(v)),
        AnyValue::Float64(v) => format_number(v),
        other => match cell_number(other.clone()) {
            Some(v) => format_number(v),
            None => other.to_string(),
        },
    }
}

/// Reads a cell as a category label: trimmed text, `None` when blank.
pub fn cell_label(value: AnyValue<'_>) -> Option<String> {
    let text = cell_text(value);
    let label = text.trim();
    (!label.is_empty()).then(|| label.to_string())
}

/// Reads a cell as a number. Strings are parsed after trimming.
pub fn cell_number(value: AnyValue<'_>) -> Option<f64> {
    if let Some(text) = cell_str(&value) {
        return text.trim().parse::<f64>().ok();
    }
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        _ => None,
    }
}

/// Reads a cell as a presence flag.
///
/// Binary cells (`1`/`0`, `true`/`false`, numeric one and zero) map to
/// `Some`; missing cells and anything else map to `None`.
pub fn cell_presence(value: AnyValue<'_>) -> Option<bool> {
    if let Some(text) = cell_str(&value) {
        return parse_presence(text);
    }
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(flag) => Some(flag),
        other => match cell_number(other) {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

/// Parses a textual presence flag.
///
/// # Examples
///
/// ```
/// use litnet_common::parse_presence;
///
/// assert_eq!(parse_presence("1"), Some(true));
/// assert_eq!(parse_presence(" FALSE "), Some(false));
/// assert_eq!(parse_presence("Rodents"), None);
/// assert_eq!(parse_presence(""), None);
/// ```
pub fn parse_presence(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Some(true),
        "0" | "0.0" | "false" => Some(false),
        _ => None,
    }
}

/// Formats a number without trailing fractional zeros.
///
/// # Examples
///
/// ```
/// use litnet_common::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(-0.25), "-0.25");
/// ```
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        return (v as i64).to_string();
    }
    // Rust's shortest round-trip formatting never emits trailing zeros.
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_of_scalars() {
        assert_eq!(cell_text(AnyValue::Null), "");
        assert_eq!(cell_text(AnyValue::Int32(42)), "42");
        assert_eq!(cell_text(AnyValue::UInt32(9)), "9");
        assert_eq!(cell_text(AnyValue::Float64(120.0)), "120");
        assert_eq!(cell_text(AnyValue::Float64(2.5)), "2.5");
        assert_eq!(cell_text(AnyValue::Boolean(false)), "false");
    }

    #[test]
    fn labels_are_trimmed_and_blank_is_missing() {
        assert_eq!(cell_label(AnyValue::Null), None);
        assert_eq!(cell_label(AnyValue::String("  ")), None);
        assert_eq!(
            cell_label(AnyValue::String(" Human ")),
            Some("Human".to_string())
        );
        assert_eq!(cell_label(AnyValue::Int64(3)), Some("3".to_string()));
    }

    #[test]
    fn numbers_parse_from_strings() {
        assert_eq!(cell_number(AnyValue::String("  3.25  ")), Some(3.25));
        assert_eq!(cell_number(AnyValue::String("")), None);
        assert_eq!(cell_number(AnyValue::String("invalid")), None);
        assert_eq!(cell_number(AnyValue::Boolean(true)), None);
        assert_eq!(cell_number(AnyValue::Int16(-4)), Some(-4.0));
    }

    #[test]
    fn presence_flags() {
        assert_eq!(cell_presence(AnyValue::Null), None);
        assert_eq!(cell_presence(AnyValue::Boolean(true)), Some(true));
        assert_eq!(cell_presence(AnyValue::Int64(1)), Some(true));
        assert_eq!(cell_presence(AnyValue::Float64(0.0)), Some(false));
        assert_eq!(cell_presence(AnyValue::Int64(2)), None);
        assert_eq!(cell_presence(AnyValue::String("true")), Some(true));
        assert_eq!(cell_presence(AnyValue::String("X")), None);
    }
}
