//! Numeric coercion for survey cells.
//!
//! Survey sheets mix typed numbers with hand-entered text ("130", "n/a",
//! "12O"). Numeric predicates go through [`try_parse_number`], which treats
//! anything unparseable as missing instead of failing.

use crate::CellValue;

/// Returns the numeric value of a cell, or `None` when the cell is missing or
/// its text does not parse as a finite number.
///
/// # Examples
///
/// ```
/// use survey_model::{CellValue, try_parse_number};
///
/// assert_eq!(try_parse_number(&CellValue::Number(127.0)), Some(127.0));
/// assert_eq!(try_parse_number(&CellValue::Text(" 140 ".to_string())), Some(140.0));
/// assert_eq!(try_parse_number(&CellValue::Text("high".to_string())), None);
/// assert_eq!(try_parse_number(&CellValue::Missing), None);
/// ```
pub fn try_parse_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(value) if value.is_finite() => Some(*value),
        CellValue::Number(_) | CellValue::Missing => None,
        CellValue::Text(text) => parse_f64(text).filter(|value| value.is_finite()),
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use survey_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("126.5"), Some(126.5));
        assert_eq!(parse_f64("  80  "), Some(80.0));
        assert_eq!(parse_f64("eighty"), None);
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(120.0), "120");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn non_finite_values_are_missing() {
        assert_eq!(try_parse_number(&CellValue::Number(f64::NAN)), None);
        assert_eq!(try_parse_number(&CellValue::Text("inf".to_string())), None);
        assert_eq!(try_parse_number(&CellValue::Text("NaN".to_string())), None);
    }
}
