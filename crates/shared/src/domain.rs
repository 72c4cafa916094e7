use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RangeError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(SampleIndex);

/// Three-way presence of a single column in a [`Row`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldPresence<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

impl<'a> FieldPresence<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            FieldPresence::Present(value) => Some(value),
            FieldPresence::Absent | FieldPresence::Null => None,
        }
    }
}

/// Column name to scalar mapping for one dataset row. No schema is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn presence(&self, key: &str) -> FieldPresence<'_> {
        match self.0.get(key) {
            None => FieldPresence::Absent,
            Some(Value::Null) => FieldPresence::Null,
            Some(value) => FieldPresence::Present(value),
        }
    }

    /// Column names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display title: first truthy of `title`, `Title`.
    pub fn title(&self) -> Option<String> {
        ["title", "Title"]
            .into_iter()
            .filter_map(|key| self.presence(key).value())
            .find(|value| is_truthy(value))
            .map(display_value)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sample_index: SampleIndex,
    #[serde(default, deserialize_with = "null_as_default")]
    pub row: Row,
}

impl Item {
    pub fn new(sample_index: i64, row: Row) -> Self {
        Self {
            sample_index: SampleIndex(sample_index),
            row,
        }
    }
}

/// Inclusive interval of dataset row indices, validated so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    start: i64,
    end: i64,
}

impl IndexRange {
    pub fn new(start: i64, end: i64) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }
}

/// String conversion matching how a browser prints a JSON scalar.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                number.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
