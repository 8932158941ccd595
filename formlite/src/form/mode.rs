// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Field modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a field accepts input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldMode {
    #[default]
    Normal,
    Disabled,
    ReadOnly,
    PlainText,
}

impl FieldMode {
    /// Mode of a single field: its own override wins over the form mode
    pub fn effective(form_mode: FieldMode, field_override: Option<FieldMode>) -> FieldMode {
        field_override.unwrap_or(form_mode)
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, FieldMode::Normal)
    }

    /// Rendered as static content rather than an input control
    pub fn is_static(&self) -> bool {
        matches!(self, FieldMode::ReadOnly | FieldMode::PlainText)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldMode::Normal => "NORMAL",
            FieldMode::Disabled => "DISABLED",
            FieldMode::ReadOnly => "READ_ONLY",
            FieldMode::PlainText => "PLAIN_TEXT",
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn disabled_if(condition: bool, otherwise: FieldMode) -> FieldMode {
    if condition {
        FieldMode::Disabled
    } else {
        otherwise
    }
}

pub fn read_only_if(condition: bool, otherwise: FieldMode) -> FieldMode {
    if condition {
        FieldMode::ReadOnly
    } else {
        otherwise
    }
}

pub fn plain_text_if(condition: bool, otherwise: FieldMode) -> FieldMode {
    if condition {
        FieldMode::PlainText
    } else {
        otherwise
    }
}
