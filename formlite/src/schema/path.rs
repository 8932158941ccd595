// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Field paths
//!
//! A field path locates a value inside a value tree relative to a root input
//! type. Form field names are written either dotted (`addresses.0.city`) or
//! bracketed (`addresses[0].city`); both parse to the same path.

use crate::error::{FormError, FormResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse a dotted and/or bracketed field name
    pub fn parse(name: &str) -> FormResult<Self> {
        let invalid = |message: &str| FormError::InvalidPath {
            path: name.to_string(),
            message: message.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("empty field name"));
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = name.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if current.is_empty() {
                        // "a[0].b" leaves nothing pending before the dot
                        if !matches!(segments.last(), Some(PathSegment::Index(_))) {
                            return Err(invalid("empty segment"));
                        }
                    } else {
                        segments.push(Self::segment(&current));
                        current.clear();
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(Self::segment(&current));
                        current.clear();
                    }
                    let mut index = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        index.push(c);
                    }
                    if !closed {
                        return Err(invalid("unterminated '['"));
                    }
                    let index = index
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| invalid("list index must be a non-negative integer"))?;
                    segments.push(PathSegment::Index(index));
                }
                ']' => return Err(invalid("unexpected ']'")),
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            segments.push(Self::segment(&current));
        } else if name.ends_with('.') {
            return Err(invalid("trailing '.'"));
        }

        Ok(Self { segments })
    }

    fn segment(text: &str) -> PathSegment {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = text.parse::<usize>() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Field(text.to_string())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Last named segment, used as the field's name and default label
    pub fn field_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Read the value at this path from a JSON value tree
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match segment {
                PathSegment::Field(name) => current.as_object()?.get(name),
                PathSegment::Index(index) => current.as_array()?.get(*index),
            })
    }

    /// Write a value at this path, creating intermediate objects and lists.
    ///
    /// A list index may address an existing element or the position just past
    /// the end, which appends. Anything further out is an error and leaves
    /// `root` untouched.
    pub fn set(&self, root: &mut Value, value: Value) -> FormResult<()> {
        self.check_writable(root)?;

        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Field(name) => {
                    if !current.is_object() {
                        *current = Value::Object(serde_json::Map::new());
                    }
                    match current {
                        Value::Object(map) => map.entry(name.clone()).or_insert(Value::Null),
                        _ => unreachable!("value was just replaced by an object"),
                    }
                }
                PathSegment::Index(index) => {
                    if !current.is_array() {
                        *current = Value::Array(Vec::new());
                    }
                    match current {
                        Value::Array(items) => {
                            let len = items.len();
                            if *index == len {
                                items.push(Value::Null);
                            }
                            items
                                .get_mut(*index)
                                .ok_or_else(|| self.beyond_end(*index, len))?
                        }
                        _ => unreachable!("value was just replaced by an array"),
                    }
                }
            };
        }
        *current = value;
        Ok(())
    }

    /// Walk the existing tree and reject list indices more than one past the end
    fn check_writable(&self, root: &Value) -> FormResult<()> {
        let mut current = Some(root);
        for segment in &self.segments {
            current = match segment {
                PathSegment::Field(name) => current.and_then(|v| v.as_object()?.get(name)),
                PathSegment::Index(index) => {
                    let items = current.and_then(Value::as_array);
                    let len = items.map_or(0, Vec::len);
                    if *index > len {
                        return Err(self.beyond_end(*index, len));
                    }
                    items.and_then(|items| items.get(*index))
                }
            };
        }
        Ok(())
    }

    fn beyond_end(&self, index: usize, len: usize) -> FormError {
        FormError::InvalidPath {
            path: self.to_string(),
            message: format!("list index {} is beyond the end of the list (length {})", index, len),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        // the root path displays as ""
        if text.is_empty() {
            return Ok(FieldPath::root());
        }
        FieldPath::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
