// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Locale configuration for number display and placeholder text

use serde::{Deserialize, Serialize};

/// Configuration for locale dependent scalar conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Thousands grouping character in displayed numbers
    pub group_separator: char,

    /// Decimal point character in displayed numbers
    pub decimal_separator: char,

    /// Currency values are integers scaled by this power of ten
    pub currency_multiplier: i64,

    /// Minimum number of fraction digits shown for currency values
    pub currency_fraction_digits: usize,

    /// Label of the empty choice offered for nullable enum fields
    pub none_text: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            group_separator: ',',
            decimal_separator: '.',
            currency_multiplier: 10_000,
            currency_fraction_digits: 2,
            none_text: "---".to_string(),
        }
    }
}

impl LocaleConfig {
    /// English number formatting (`1,234.56`)
    pub fn english() -> Self {
        Self::default()
    }

    /// German number formatting (`1.234,56`)
    pub fn german() -> Self {
        Self {
            group_separator: '.',
            decimal_separator: ',',
            none_text: "---".to_string(),
            ..Self::default()
        }
    }

    /// Number of decimal digits carried by the currency multiplier
    /// (4 for 10000). A multiplier that is not a power of ten is rounded down
    /// to the nearest power.
    pub fn currency_scale(&self) -> u32 {
        let mut scale = 0;
        let mut m = self.currency_multiplier;
        while m >= 10 {
            m /= 10;
            scale += 1;
        }
        scale
    }

    /// Remove grouping characters and normalize the decimal separator to `.`
    pub fn clean_number(&self, text: &str) -> String {
        text.trim()
            .chars()
            .filter(|c| *c != self.group_separator && !c.is_whitespace())
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }
}
