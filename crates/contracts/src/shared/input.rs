//! Coercion of user and wire input into numbers and lists.
//!
//! Malformed numbers never become errors: they turn into zero at the
//! boundary, so one bad cell cannot block the rest of a form or report.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a number written either as `1234.5` or with a decimal comma `1234,5`.
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())?;
    parsed.is_finite().then_some(parsed)
}

/// Target input from a form: anything that is not a finite, non-negative
/// number becomes 0.
pub fn coerce_target(input: &str) -> f64 {
    match parse_number(input) {
        Some(v) if v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Split a comma separated form field into trimmed, non-empty entries
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a list back to its comma separated wire form; `None` when empty
pub fn join_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(","))
    }
}

/// Serde helper: number, numeric string or null. Null and garbage give 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_number(&s).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Serde helper for form targets: like [`lenient_f64`] but negative values
/// are coerced to 0 as well.
pub fn lenient_target<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(if value >= 0.0 { value } else { 0.0 })
}

/// Serde helper for store codes, which the report sends as numbers or strings
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_target() {
        assert_eq!(coerce_target("150"), 150.0);
        assert_eq!(coerce_target(" 12,5 "), 12.5);
        assert_eq!(coerce_target("abc"), 0.0);
        assert_eq!(coerce_target(""), 0.0);
        assert_eq!(coerce_target("-10"), 0.0);
        assert_eq!(coerce_target("NaN"), 0.0);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("21, 20,,25 "), vec!["21", "20", "25"]);
        assert!(parse_list("  ").is_empty());
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&["1998".to_string()]), Some("1998".to_string()));
        assert_eq!(
            join_list(&["21".to_string(), "20".to_string()]),
            Some("21,20".to_string())
        );
        assert_eq!(join_list(&[]), None);
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "lenient_i64")]
        code: i64,
        #[serde(default, deserialize_with = "lenient_target")]
        target: f64,
    }

    #[test]
    fn test_lenient_helpers() {
        let row: Row =
            serde_json::from_str(r#"{"amount": "10,5", "code": "17", "target": -4}"#).unwrap();
        assert_eq!(row.amount, 10.5);
        assert_eq!(row.code, 17);
        assert_eq!(row.target, 0.0);

        let row: Row = serde_json::from_str(r#"{"amount": null, "code": 3.0}"#).unwrap();
        assert_eq!(row.amount, 0.0);
        assert_eq!(row.code, 3);
        assert_eq!(row.target, 0.0);
    }
}
