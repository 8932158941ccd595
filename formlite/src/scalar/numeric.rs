// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Integer and floating point scalar converters

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

use super::{display_text, is_blank, ScalarConverter};
use crate::config::LocaleConfig;

static INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("integer pattern is valid"));

static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$").expect("float pattern is valid")
});

/// Largest integer exactly representable in an IEEE double
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Signed integer scalar with an inclusive range
#[derive(Debug, Clone)]
pub struct IntegerConverter {
    min: i64,
    max: i64,
    locale: LocaleConfig,
}

impl IntegerConverter {
    pub fn new(min: i64, max: i64, locale: &LocaleConfig) -> Self {
        Self {
            min,
            max,
            locale: locale.clone(),
        }
    }

    /// 8 bit
    pub fn byte(locale: &LocaleConfig) -> Self {
        Self::new(i8::MIN as i64, i8::MAX as i64, locale)
    }

    /// 16 bit
    pub fn short(locale: &LocaleConfig) -> Self {
        Self::new(i16::MIN as i64, i16::MAX as i64, locale)
    }

    /// 32 bit
    pub fn int(locale: &LocaleConfig) -> Self {
        Self::new(i32::MIN as i64, i32::MAX as i64, locale)
    }

    /// 64 bit, limited to the safe integer range
    pub fn long(locale: &LocaleConfig) -> Self {
        Self::new(-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER, locale)
    }

    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    fn parse(&self, text: &str) -> Option<i64> {
        let cleaned = self.locale.clean_number(text);
        if !INTEGER_RE.is_match(&cleaned) {
            return None;
        }
        cleaned.parse::<i64>().ok()
    }
}

impl ScalarConverter for IntegerConverter {
    fn validate(&self, value: &Value) -> Option<String> {
        if is_blank(value) {
            return None;
        }
        let text = match display_text(value) {
            Some(text) => text,
            None => return Some("Invalid integer".to_string()),
        };

        let cleaned = self.locale.clean_number(&text);
        if !INTEGER_RE.is_match(&cleaned) {
            return Some("Invalid integer".to_string());
        }

        match cleaned.parse::<i64>() {
            Ok(n) if n >= self.min && n <= self.max => None,
            _ => Some(format!(
                "Value must be between {} and {}",
                self.min, self.max
            )),
        }
    }

    fn scalar_to_value(&self, scalar: &Value) -> Value {
        match scalar {
            Value::Number(n) => Value::String(n.to_string()),
            other => other.clone(),
        }
    }

    fn value_to_scalar(&self, value: &Value) -> Value {
        match value {
            Value::Number(_) => value.clone(),
            Value::String(s) => self
                .parse(s)
                .map(|n| Value::Number(n.into()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

/// Floating point scalar: numeric-only validation
#[derive(Debug, Clone)]
pub struct FloatConverter {
    locale: LocaleConfig,
}

impl FloatConverter {
    pub fn new(locale: &LocaleConfig) -> Self {
        Self {
            locale: locale.clone(),
        }
    }
}

impl ScalarConverter for FloatConverter {
    fn validate(&self, value: &Value) -> Option<String> {
        if is_blank(value) {
            return None;
        }
        match display_text(value) {
            Some(text) if FLOAT_RE.is_match(&self.locale.clean_number(&text)) => None,
            _ => Some("Invalid number".to_string()),
        }
    }

    fn scalar_to_value(&self, scalar: &Value) -> Value {
        match scalar {
            Value::Number(n) => {
                let text = n.to_string();
                if self.locale.decimal_separator == '.' {
                    Value::String(text)
                } else {
                    Value::String(text.replace('.', &self.locale.decimal_separator.to_string()))
                }
            }
            other => other.clone(),
        }
    }

    fn value_to_scalar(&self, value: &Value) -> Value {
        match value {
            Value::Number(_) => value.clone(),
            Value::String(s) => self
                .locale
                .clean_number(s)
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_ranges() {
        let locale = LocaleConfig::default();
        let byte = IntegerConverter::byte(&locale);
        assert_eq!(byte.validate(&json!("127")), None);
        assert!(byte.validate(&json!("128")).is_some());
        assert_eq!(byte.validate(&json!("-128")), None);

        let short = IntegerConverter::short(&locale);
        assert!(short.validate(&json!("40000")).is_some());

        let int = IntegerConverter::int(&locale);
        assert_eq!(int.validate(&json!("2,147,483,647")), None);
        assert!(int.validate(&json!("2147483648")).is_some());

        let long = IntegerConverter::long(&locale);
        assert_eq!(long.validate(&json!("9007199254740991")), None);
        assert!(long.validate(&json!("9007199254740992")).is_some());
        assert!(long.validate(&json!("99999999999999999999999")).is_some());
    }

    #[test]
    fn test_integer_rejects_garbage() {
        let int = IntegerConverter::int(&LocaleConfig::default());
        assert!(int.validate(&json!("abc")).is_some());
        assert!(int.validate(&json!("1.5")).is_some());
        assert_eq!(int.validate(&json!("")), None);
        assert_eq!(int.validate(&json!(null)), None);
        assert_eq!(int.validate(&json!(12)), None);
    }

    #[test]
    fn test_integer_conversion() {
        let int = IntegerConverter::int(&LocaleConfig::default());
        assert_eq!(int.scalar_to_value(&json!(42)), json!("42"));
        assert_eq!(int.value_to_scalar(&json!("1,024")), json!(1024));
        assert_eq!(int.value_to_scalar(&json!("")), json!(null));
    }

    #[test]
    fn test_float() {
        let float = FloatConverter::new(&LocaleConfig::default());
        assert_eq!(float.validate(&json!("3.25")), None);
        assert_eq!(float.validate(&json!("-1e5")), None);
        assert!(float.validate(&json!("3.2.1")).is_some());
        assert_eq!(float.value_to_scalar(&json!("1,000.5")), json!(1000.5));
        assert_eq!(float.scalar_to_value(&json!(0.5)), json!("0.5"));
    }

    #[test]
    fn test_float_german_separators() {
        let float = FloatConverter::new(&LocaleConfig::german());
        assert_eq!(float.validate(&json!("1.000,5")), None);
        assert_eq!(float.value_to_scalar(&json!("1.000,5")), json!(1000.5));
        assert_eq!(float.scalar_to_value(&json!(0.5)), json!("0,5"));
    }
}
