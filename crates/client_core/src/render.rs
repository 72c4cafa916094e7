//! Pure conversion of a row into titled groups of `key: value` lines.

use shared::domain::{display_value, FieldPresence, Item, Row, SampleIndex};

use crate::field_groups::{
    FieldGroupRegistry, ALWAYS_SHOWN_KEY, MISSING_PLACEHOLDER, OTHER_COLUMNS_TITLE,
};

pub const NO_TITLE: &str = "(no title)";
pub const EMPTY_INDEX_PLACEHOLDER: &str = "-";
pub const EMPTY_STORE_MESSAGE: &str = "No items in range or all skipped";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    pub key: String,
    pub value: String,
}

impl FieldLine {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGroup {
    pub title: String,
    pub lines: Vec<FieldLine>,
}

impl RenderedGroup {
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.key == key)
            .map(|line| line.value.as_str())
    }
}

/// Everything a front-end needs to draw for the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Empty,
    Item {
        sample_index: SampleIndex,
        title: String,
        groups: Vec<RenderedGroup>,
    },
}

impl Screen {
    pub fn for_item(registry: &FieldGroupRegistry, item: Option<&Item>) -> Self {
        match item {
            None => Screen::Empty,
            Some(item) => Screen::Item {
                sample_index: item.sample_index,
                title: item.row.title().unwrap_or_else(|| NO_TITLE.to_string()),
                groups: render(registry, &item.row),
            },
        }
    }

    pub fn index_label(&self) -> String {
        match self {
            Screen::Empty => EMPTY_INDEX_PLACEHOLDER.to_string(),
            Screen::Item { sample_index, .. } => sample_index.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Screen::Empty => EMPTY_STORE_MESSAGE,
            Screen::Item { title, .. } => title.as_str(),
        }
    }

    pub fn groups(&self) -> &[RenderedGroup] {
        match self {
            Screen::Empty => &[],
            Screen::Item { groups, .. } => groups.as_slice(),
        }
    }
}

/// Every registry group is emitted, even with no lines. "Other Columns" is
/// appended only when the row has keys outside all registry key lists.
pub fn render(registry: &FieldGroupRegistry, row: &Row) -> Vec<RenderedGroup> {
    let mut groups: Vec<RenderedGroup> = registry
        .groups()
        .iter()
        .map(|group| RenderedGroup {
            title: group.title.clone(),
            lines: group
                .keys
                .iter()
                .filter_map(|key| grouped_line(row, key))
                .collect(),
        })
        .collect();

    let other_keys: Vec<&str> = row.keys().filter(|key| !registry.is_grouped(key)).collect();
    if !other_keys.is_empty() {
        groups.push(RenderedGroup {
            title: OTHER_COLUMNS_TITLE.to_string(),
            lines: other_keys
                .into_iter()
                .filter_map(|key| present_line(row, key))
                .collect(),
        });
    }

    groups
}

fn grouped_line(row: &Row, key: &str) -> Option<FieldLine> {
    if key != ALWAYS_SHOWN_KEY {
        return present_line(row, key);
    }
    let value = row
        .presence(key)
        .value()
        .map(display_value)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string());
    Some(FieldLine::new(key, value))
}

fn present_line(row: &Row, key: &str) -> Option<FieldLine> {
    match row.presence(key) {
        FieldPresence::Present(value) => Some(FieldLine::new(key, display_value(value))),
        FieldPresence::Absent | FieldPresence::Null => None,
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
