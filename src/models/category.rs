//! Category names and category sets
//!
//! Category names are free-form user labels. Two names refer to the same
//! category when they are equal after trimming and lowercasing. A budget that
//! shares one cap across several categories holds them in a `CategorySet`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Label used for transactions without a category
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Comparison key for a category name
pub fn normalize_category(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An ordered, duplicate-free set of category names
///
/// Insertion order is kept for display. Duplicates are detected on the
/// normalized form and the first spelling wins. Blank names are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was blank or already present
    pub fn insert(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize_category(name);
        self.names.iter().any(|n| normalize_category(n) == key)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Normalized keys of every member
    pub fn normalized(&self) -> BTreeSet<String> {
        self.names.iter().map(|n| normalize_category(n)).collect()
    }

    /// Members of `self` that are also in `other`, in `self`'s order and spelling
    pub fn intersection(&self, other: &CategorySet) -> Vec<String> {
        self.names
            .iter()
            .filter(|n| other.contains(n))
            .cloned()
            .collect()
    }

    /// Human-readable label ("Food + Transport")
    pub fn label(&self) -> String {
        self.names.join(" + ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.names
    }
}
