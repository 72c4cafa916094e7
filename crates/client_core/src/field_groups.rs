//! Fixed field groups used to lay out a row for review.

use std::collections::BTreeSet;

/// Rendered for every item, with a placeholder when the row lacks a usable value.
pub const ALWAYS_SHOWN_KEY: &str = "is_expert";
pub const MISSING_PLACEHOLDER: &str = "(missing)";
pub const OTHER_COLUMNS_TITLE: &str = "Other Columns";

const METADATA_KEYS: &[&str] = &[
    "title",
    "author",
    "year",
    "publication_year",
    "description",
    "Genre",
];
const CRITICAL_KEYS: &[&str] = &[
    "Author_Rating",
    "total_weeks",
    "best_rank",
    "worst_rank",
    "mean_rank",
    "debut_rank",
];
const POPULAR_KEYS: &[&str] = &["average_rating", "ratings_count"];
const REVIEW_KEYS: &[&str] = &["rating", "review_text", "n_votes", ALWAYS_SHOWN_KEY];
const COMMERCIAL_KEYS: &[&str] = &[
    "Units_Sold",
    "Gross_Sales",
    "Publisher_Revenue",
    "Sale_Price",
    "Sales_Rank",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub title: String,
    pub keys: Vec<String>,
}

impl FieldGroup {
    pub fn new(title: impl Into<String>, keys: &[&str]) -> Self {
        Self {
            title: title.into(),
            keys: keys.iter().map(|key| key.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroupRegistry {
    groups: Vec<FieldGroup>,
    grouped_keys: BTreeSet<String>,
}

impl FieldGroupRegistry {
    pub fn new(groups: Vec<FieldGroup>) -> Self {
        let grouped_keys = groups
            .iter()
            .flat_map(|group| group.keys.iter().cloned())
            .collect();
        Self {
            groups,
            grouped_keys,
        }
    }

    /// The five review groups, in display order.
    pub fn standard() -> Self {
        Self::new(vec![
            FieldGroup::new("Metadata", METADATA_KEYS),
            FieldGroup::new("Critical Success Indicators", CRITICAL_KEYS),
            FieldGroup::new("Popular Success Indicators", POPULAR_KEYS),
            FieldGroup::new("Review & Expertise", REVIEW_KEYS),
            FieldGroup::new("Commercial Success Indicators", COMMERCIAL_KEYS),
        ])
    }

    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    /// Membership in any group's key list, regardless of whether a row carries it.
    pub fn is_grouped(&self, key: &str) -> bool {
        self.grouped_keys.contains(key)
    }
}

impl Default for FieldGroupRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "tests/field_groups_tests.rs"]
mod tests;
