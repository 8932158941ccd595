// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Fixed-point currency converter
//!
//! Currency amounts travel as integers scaled by the configured multiplier
//! (10000 by default, i.e. four implied decimal places). The display form
//! always shows at least the configured minimum of fraction digits and never
//! drops significant ones, so conversion in both directions is lossless.

use regex::Regex;
use serde_json::Value;

use super::{display_text, is_blank, ScalarConverter};
use crate::config::LocaleConfig;

#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    locale: LocaleConfig,
    scale: u32,
    pattern: Regex,
}

impl CurrencyConverter {
    pub fn new(locale: &LocaleConfig) -> Self {
        let group = regex::escape(&locale.group_separator.to_string());
        let decimal = regex::escape(&locale.decimal_separator.to_string());
        let pattern = format!(
            r"^-?(\d{{1,3}}({group}\d{{3}})+|\d+)({decimal}\d*)?$",
            group = group,
            decimal = decimal
        );
        Self {
            locale: locale.clone(),
            scale: locale.currency_scale(),
            pattern: Regex::new(&pattern).expect("currency pattern built from escaped separators"),
        }
    }

    /// Format a scaled integer amount for display
    pub fn format(&self, amount: i64) -> String {
        let multiplier = 10_i64.pow(self.scale);
        let negative = amount < 0;
        let abs = amount.unsigned_abs();
        let int_part = abs / multiplier as u64;
        let frac_part = abs % multiplier as u64;

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(&int_part.to_string(), self.locale.group_separator));

        if self.scale > 0 {
            let mut frac = format!("{:0width$}", frac_part, width = self.scale as usize);
            let min_digits = self.locale.currency_fraction_digits.min(self.scale as usize);
            while frac.len() > min_digits && frac.ends_with('0') {
                frac.pop();
            }
            if !frac.is_empty() {
                out.push(self.locale.decimal_separator);
                out.push_str(&frac);
            }
        }
        out
    }

    /// Parse a display string into a scaled integer amount using exact
    /// decimal arithmetic. Digits beyond the scale are truncated.
    pub fn parse(&self, text: &str) -> Option<i64> {
        let cleaned = self.locale.clean_number(text);
        if cleaned.is_empty() {
            return None;
        }
        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };

        let (int_digits, frac_digits) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }
        if !int_digits.bytes().all(|b| b.is_ascii_digit())
            || !frac_digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let int_value: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().ok()?
        };

        let scale = self.scale as usize;
        let mut frac: String = frac_digits.chars().take(scale).collect();
        while frac.len() < scale {
            frac.push('0');
        }
        let frac_value: i64 = if frac.is_empty() { 0 } else { frac.parse().ok()? };

        let amount = int_value
            .checked_mul(10_i64.pow(self.scale))?
            .checked_add(frac_value)?;
        Some(if negative { -amount } else { amount })
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

impl ScalarConverter for CurrencyConverter {
    fn validate(&self, value: &Value) -> Option<String> {
        if is_blank(value) {
            return None;
        }
        let text = match display_text(value) {
            Some(text) => text,
            None => return Some("Invalid currency value".to_string()),
        };
        let text = text.trim();

        if !self.pattern.is_match(text) {
            return Some("Invalid currency value".to_string());
        }

        let fraction_len = text
            .rsplit_once(self.locale.decimal_separator)
            .map(|(_, frac)| frac.len())
            .unwrap_or(0);
        if fraction_len > self.scale as usize {
            return Some(format!(
                "At most {} decimal places allowed",
                self.scale
            ));
        }

        if self.parse(text).is_none() {
            return Some("Currency value out of range".to_string());
        }
        None
    }

    fn scalar_to_value(&self, scalar: &Value) -> Value {
        match scalar {
            Value::Number(n) => {
                let amount = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.round() as i64));
                match amount {
                    Some(amount) => Value::String(self.format(amount)),
                    None => Value::Null,
                }
            }
            other => other.clone(),
        }
    }

    fn value_to_scalar(&self, value: &Value) -> Value {
        match value {
            Value::Number(_) => value.clone(),
            Value::String(s) => self
                .parse(s)
                .map(|amount| Value::Number(amount.into()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}
