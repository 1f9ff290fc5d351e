//! Loose JSON value semantics used by cloud function parameters.
//!
//! Clients send untyped params, so presence checks, equality and message
//! formatting follow scripting-language conventions rather than Rust's.

use serde_json::Value;

/// `false` for null, false, 0, NaN and the empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Equality where numbers compare by value (`96 == 96.0`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Render a value for interpolation into a message.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn display_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) => format_number(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip rendering with script-style exponent rules:
/// plain decimals for exponents in [-7, 21), `1e+21` / `1e-7` outside.
pub fn format_number(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if f < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest digits, e.g. "9.61e1" or "1e-7"
    let sci = format!("{:e}", f.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp = n - 1;
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, exp.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, exp.abs())
        }
    };
    format!("{}{}", sign, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_loose_numeric_equality() {
        assert!(loose_eq(&json!(96), &json!(96.0)));
        assert!(!loose_eq(&json!(96), &json!("96")));
        assert!(loose_eq(&json!("slots"), &json!("slots")));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&json!("Book of Ra")), "Book of Ra");
        assert_eq!(display(&json!(96)), "96");
        assert_eq!(display(&json!(96.0)), "96");
        assert_eq!(display(&json!(96.5)), "96.5");
        assert_eq!(display(&json!(true)), "true");
        assert_eq!(display(&json!([1, null, "a"])), "1,,a");
        assert_eq!(display(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_number_exponent_thresholds() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e21), "1.5e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(123456789012345680000.0), "123456789012345680000");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(1e-6), "0.000001");
        assert_eq!(format_number(0.000123), "0.000123");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(-96.0), "-96");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_display_large_and_tiny_numbers() {
        assert_eq!(display(&json!(1e21)), "1e+21");
        assert_eq!(display(&json!(0.0000001)), "1e-7");
        assert_eq!(display(&json!(-42)), "-42");
        assert_eq!(display(&json!(u64::MAX)), "18446744073709552000");
    }
}
