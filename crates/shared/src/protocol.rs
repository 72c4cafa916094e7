use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{is_truthy, null_as_default, IndexRange, Item, SampleIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProgressQuery {
    pub start: i64,
    pub end: i64,
}

impl From<IndexRange> for RangeProgressQuery {
    fn from(range: IndexRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

/// Progress counters. Values are kept as the server sent them; anything
/// beyond the keys below lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labeled_in_range: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_total: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_in_dataset: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgressResponse {
    /// First truthy of `total_in_dataset`, `total`; zero when neither is.
    pub fn dataset_total(&self) -> Value {
        [&self.total_in_dataset, &self.total]
            .into_iter()
            .flatten()
            .find(|total| is_truthy(total))
            .cloned()
            .unwrap_or_else(|| Value::from(0))
    }

    /// Highest row index implied by [`Self::dataset_total`], never negative.
    pub fn dataset_last_index(&self) -> i64 {
        match self.dataset_total() {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    int.saturating_sub(1).max(0)
                } else if let Some(uint) = number.as_u64() {
                    i64::try_from(uint - 1).unwrap_or(i64::MAX)
                } else {
                    number.as_f64().map_or(0, float_last_index)
                }
            }
            Value::String(text) => text.trim().parse().map_or(0, float_last_index),
            _ => 0,
        }
    }
}

// `as` saturates and maps NaN to zero.
fn float_last_index(total: f64) -> i64 {
    (total - 1.0).max(0.0) as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsQuery {
    pub start: i64,
    pub end: i64,
    pub skip_labeled: bool,
    pub show_labeled: bool,
}

impl ItemsQuery {
    pub fn new(range: IndexRange, skip_labeled: bool, show_labeled: bool) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            skip_labeled,
            show_labeled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPayload {
    pub sample_index: SampleIndex,
    #[serde(default)]
    pub critical_success_label: String,
    #[serde(default)]
    pub popular_success_label: String,
    #[serde(default)]
    pub commercial_success_label: String,
    #[serde(default)]
    pub annotator: String,
}

impl LabelPayload {
    pub fn labels_blank(&self) -> bool {
        self.critical_success_label.is_empty()
            && self.popular_success_label.is_empty()
            && self.commercial_success_label.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
