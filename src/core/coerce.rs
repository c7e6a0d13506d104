use serde_json::Value;

/// Coerce a JSON value to an integer
///
/// Accepts integers, floats (truncated toward zero), booleans and strings
/// holding an integer literal. Null, arrays and objects do not coerce.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a JSON value to a finite float
///
/// `"NaN"` and `"inf"` parse as floats but never coerce.
pub fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Render a JSON value as text for storage; only null has no text form
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int(&json!(35)), Some(35));
        assert_eq!(coerce_int(&json!(35.9)), Some(35));
        assert_eq!(coerce_int(&json!(-2.5)), Some(-2));
        assert_eq!(coerce_int(&json!(" 42 ")), Some(42));
        assert_eq!(coerce_int(&json!(true)), Some(1));
        assert_eq!(coerce_int(&json!("35.5")), None);
        assert_eq!(coerce_int(&json!("abc")), None);
        assert_eq!(coerce_int(&Value::Null), None);
        assert_eq!(coerce_int(&json!([1])), None);
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_float(&json!(5.5)), Some(5.5));
        assert_eq!(coerce_float(&json!(50000)), Some(50000.0));
        assert_eq!(coerce_float(&json!("0.2")), Some(0.2));
        assert_eq!(coerce_float(&json!(false)), Some(0.0));
        assert_eq!(coerce_float(&json!("")), None);
        assert_eq!(coerce_float(&json!({"a": 1})), None);
    }

    #[test]
    fn test_coerce_float_rejects_non_finite() {
        assert_eq!(coerce_float(&json!("NaN")), None);
        assert_eq!(coerce_float(&json!(" inf ")), None);
        assert_eq!(coerce_float(&json!("-infinity")), None);
        assert_eq!(coerce_float(&json!("1e400")), None);
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(&json!("PhD")).as_deref(), Some("PhD"));
        assert_eq!(coerce_text(&json!(3)).as_deref(), Some("3"));
        assert_eq!(coerce_text(&Value::Null), None);
    }
}
