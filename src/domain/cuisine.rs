//! Ordered, duplicate-free cuisine sets.
//!
//! Both the search filter and the restaurant form hold a set of cuisine names whose
//! iteration order matters: the search filter joins it into a query parameter and the
//! form flattens it into indexed transfer fields. [`CuisineSet`] keeps insertion order
//! and refuses duplicates so both stay deterministic.

use serde::{Deserialize, Serialize};

/// Insertion-ordered set of cuisine names.
///
/// Sizes are a handful of entries, so membership is a linear scan over a `Vec`.
///
/// # Examples
///
/// ```
/// use menuhub::domain::CuisineSet;
///
/// let set: CuisineSet = ["Pizza", "Sushi", "Pizza"].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.join(","), "Pizza,Sushi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CuisineSet {
    items: Vec<String>,
}

impl CuisineSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds `cuisine` at the end. Returns `false` if it was already present.
    pub fn insert(&mut self, cuisine: impl Into<String>) -> bool {
        let cuisine = cuisine.into();
        if self.contains(&cuisine) {
            return false;
        }
        self.items.push(cuisine);
        true
    }

    /// Removes `cuisine`. Returns `false` if it was not present.
    pub fn remove(&mut self, cuisine: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c != cuisine);
        self.items.len() != before
    }

    /// Removes `cuisine` if present, appends it otherwise.
    ///
    /// Mirrors a checkbox click in a cuisine list. Returns whether the cuisine is
    /// selected afterwards.
    pub fn toggle(&mut self, cuisine: &str) -> bool {
        if self.remove(cuisine) {
            false
        } else {
            self.items.push(cuisine.to_string());
            true
        }
    }

    /// Whether `cuisine` is selected. Comparison is exact and case-sensitive.
    #[must_use]
    pub fn contains(&self, cuisine: &str) -> bool {
        self.items.iter().any(|c| c == cuisine)
    }

    /// Number of cuisines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no cuisine is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Joins the names with `separator`, in insertion order.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.items.join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for CuisineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for cuisine in iter {
            set.insert(cuisine);
        }
        set
    }
}

impl From<Vec<String>> for CuisineSet {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<CuisineSet> for Vec<String> {
    fn from(set: CuisineSet) -> Self {
        set.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_drops_later_duplicates_and_keeps_order() {
        let set: CuisineSet = ["Thai", "Pizza", "Thai", "Burgers", "Pizza"]
            .into_iter()
            .collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Thai", "Pizza", "Burgers"]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = CuisineSet::new();
        assert!(set.toggle("Sushi"));
        assert!(set.toggle("Tacos"));
        assert!(!set.toggle("Sushi"));
        assert_eq!(set.join(","), "Tacos");
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut set = CuisineSet::new();
        assert!(set.insert("Indian"));
        assert!(!set.insert("Indian"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn deserializing_dedupes() {
        let set: CuisineSet = serde_json::from_str(r#"["Pasta","Pasta","Salads"]"#).unwrap();
        assert_eq!(set.join("|"), "Pasta|Salads");
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Pasta","Salads"]"#);
    }
}
