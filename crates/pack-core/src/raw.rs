//! 原始列（試算表列）解析

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// 原始試算表列：欄名 → 儲存格值
pub type RawRow = serde_json::Map<String, Value>;

/// 解析數值欄位
///
/// 缺值、空字串、布林值與非數字文字一律視為 0。
/// 字串採前綴解析，忽略數字之後的多餘字元（例如 `"12 יח"` → 12）。
pub fn parse_numeric(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => number_to_decimal(number),
        Value::String(text) => parse_numeric_str(text),
        _ => Decimal::ZERO,
    }
}

/// 解析數值字串（前綴解析）
pub fn parse_numeric_str(text: &str) -> Decimal {
    let prefix = numeric_prefix(text.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(prefix)
        .or_else(|_| Decimal::from_scientific(prefix))
        .or_else(|_| {
            prefix
                .parse::<f64>()
                .map_err(|e| rust_decimal::Error::ConversionTo(e.to_string()))
                .and_then(Decimal::try_from)
        })
        .unwrap_or(Decimal::ZERO)
}

/// 取得文字欄位值
pub fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                i.to_string()
            } else if let Some(u) = number.as_u64() {
                u.to_string()
            } else {
                let decimal = number_to_decimal(number);
                decimal.normalize().to_string()
            }
        }
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn number_to_decimal(number: &serde_json::Number) -> Decimal {
    if let Some(i) = number.as_i64() {
        return Decimal::from(i);
    }
    if let Some(u) = number.as_u64() {
        return Decimal::from(u);
    }
    number
        .as_f64()
        .and_then(|f| Decimal::try_from(f).ok())
        .unwrap_or(Decimal::ZERO)
}

/// 取出字串開頭的數字部分：[+-]digits[.digits][e[+-]digits]
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            // "12." 只取 "12"
            end = if frac_digits > 0 { frac_end } else { end };
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(35), "35")]
    #[case(json!(2.5), "2.5")]
    #[case(json!("12"), "12")]
    #[case(json!("  7.25"), "7.25")]
    #[case(json!("12 יח"), "12")]
    #[case(json!("-3"), "-3")]
    #[case(json!(".5"), "0.5")]
    #[case(json!("1e2"), "100")]
    #[case(json!("abc"), "0")]
    #[case(json!(""), "0")]
    #[case(json!(null), "0")]
    #[case(json!(true), "0")]
    fn test_parse_numeric(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(parse_numeric(&value), Decimal::from_str(expected).unwrap());
    }

    #[test]
    fn test_text_value() {
        assert_eq!(text_value(&json!("SKU-1")), "SKU-1");
        assert_eq!(text_value(&json!(1001)), "1001");
        assert_eq!(text_value(&json!(1.5)), "1.5");
        assert_eq!(text_value(&json!(null)), "");
    }
}
