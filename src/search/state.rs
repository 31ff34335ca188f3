//! Composite search state and its transitions.
//!
//! [`SearchState`] bundles the free-text query, cuisine filter, sort option and page
//! into one value. It only changes through the transition methods below, each of which
//! takes the current state and returns a new one. Every transition except
//! [`SearchState::set_page`] resets `page` to 1, so narrowing a search never leaves the
//! user stranded on a page the new result set does not have.
//!
//! # Example
//!
//! ```rust
//! use menuhub::search::{SearchState, SortOption};
//!
//! let state = SearchState::default().set_page(7);
//! let narrowed = state.set_sort_option(SortOption::DeliveryPrice);
//! assert_eq!(narrowed.page(), 1);
//! ```

use crate::domain::CuisineSet;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// First page number. Pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Result ordering requested from the search endpoint.
///
/// The named variants are the options the product offers; anything else the backend
/// understands can travel as [`SortOption::Custom`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOption {
    /// Backend-defined relevance ordering.
    #[default]
    BestMatch,
    /// Cheapest delivery first.
    DeliveryPrice,
    /// Fastest delivery first.
    EstimatedDeliveryTime,
    /// Any other option, sent verbatim.
    Custom(String),
}

impl SortOption {
    /// Wire name sent as the `sortOption` parameter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BestMatch => "bestMatch",
            Self::DeliveryPrice => "deliveryPrice",
            Self::EstimatedDeliveryTime => "estimatedDeliveryTime",
            Self::Custom(value) => value,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bestMatch" => Self::BestMatch,
            "deliveryPrice" => Self::DeliveryPrice,
            "estimatedDeliveryTime" => Self::EstimatedDeliveryTime,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for SortOption {
    fn from(value: String) -> Self {
        match Self::from_str(&value) {
            Ok(option) => option,
            Err(never) => match never {},
        }
    }
}

impl From<SortOption> for String {
    fn from(option: SortOption) -> Self {
        option.as_str().to_string()
    }
}

/// The search view's filter, sort and pagination state.
///
/// Fields are private so the page-reset rule cannot be bypassed; read them through the
/// accessors and change them through the `set_*` transitions. Deserialized states go
/// through the same page clamp as [`SearchState::set_page`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SearchStateFields")]
pub struct SearchState {
    search_query: String,
    page: u32,
    selected_cuisines: CuisineSet,
    sort_option: SortOption,
}

/// Unchecked wire shape of [`SearchState`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchStateFields {
    search_query: String,
    page: u32,
    selected_cuisines: CuisineSet,
    sort_option: SortOption,
}

impl Default for SearchStateFields {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            page: FIRST_PAGE,
            selected_cuisines: CuisineSet::new(),
            sort_option: SortOption::BestMatch,
        }
    }
}

impl From<SearchStateFields> for SearchState {
    fn from(fields: SearchStateFields) -> Self {
        Self {
            search_query: fields.search_query,
            page: fields.page.max(FIRST_PAGE),
            selected_cuisines: fields.selected_cuisines,
            sort_option: fields.sort_option,
        }
    }
}

impl Default for SearchState {
    /// The state a freshly mounted search view starts with.
    fn default() -> Self {
        Self {
            search_query: String::new(),
            page: FIRST_PAGE,
            selected_cuisines: CuisineSet::new(),
            sort_option: SortOption::BestMatch,
        }
    }
}

impl SearchState {
    /// Free-text filter; empty means no filter.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current page, always `>= 1`.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Cuisine filter in click order.
    #[must_use]
    pub const fn selected_cuisines(&self) -> &CuisineSet {
        &self.selected_cuisines
    }

    /// Requested result ordering.
    #[must_use]
    pub const fn sort_option(&self) -> &SortOption {
        &self.sort_option
    }

    /// Replaces the query text and returns to the first page.
    #[must_use]
    pub fn set_search_query(&self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            page: FIRST_PAGE,
            ..self.clone()
        }
    }

    /// Replaces the cuisine filter and returns to the first page.
    ///
    /// Duplicates in `cuisines` are dropped, keeping the first occurrence.
    #[must_use]
    pub fn set_selected_cuisines<I, S>(&self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_cuisines: cuisines.into_iter().collect(),
            page: FIRST_PAGE,
            ..self.clone()
        }
    }

    /// Adds or removes a single cuisine and returns to the first page.
    #[must_use]
    pub fn toggle_cuisine(&self, cuisine: &str) -> Self {
        let mut selected_cuisines = self.selected_cuisines.clone();
        selected_cuisines.toggle(cuisine);
        Self {
            selected_cuisines,
            page: FIRST_PAGE,
            ..self.clone()
        }
    }

    /// Changes the ordering and returns to the first page.
    #[must_use]
    pub fn set_sort_option(&self, option: SortOption) -> Self {
        Self {
            sort_option: option,
            page: FIRST_PAGE,
            ..self.clone()
        }
    }

    /// Moves to `page`, leaving every other field untouched.
    ///
    /// `0` is treated as the first page.
    #[must_use]
    pub fn set_page(&self, page: u32) -> Self {
        Self {
            page: page.max(FIRST_PAGE),
            ..self.clone()
        }
    }

    /// Clears the query text and returns to the first page.
    ///
    /// Cuisine filter and sort option are kept.
    #[must_use]
    pub fn reset_query(&self) -> Self {
        self.set_search_query(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep_state() -> SearchState {
        SearchState::default()
            .set_search_query("pizza")
            .set_selected_cuisines(["Italian", "Vegan"])
            .set_sort_option(SortOption::EstimatedDeliveryTime)
            .set_page(9)
    }

    #[test]
    fn default_matches_mount_state() {
        let state = SearchState::default();
        assert_eq!(state.search_query(), "");
        assert_eq!(state.page(), 1);
        assert!(state.selected_cuisines().is_empty());
        assert_eq!(state.sort_option(), &SortOption::BestMatch);
    }

    #[test]
    fn filter_transitions_reset_page() {
        let state = deep_state();
        assert_eq!(state.page(), 9);

        assert_eq!(state.set_search_query("sushi").page(), 1);
        assert_eq!(state.set_selected_cuisines(["Thai"]).page(), 1);
        assert_eq!(state.set_sort_option(SortOption::DeliveryPrice).page(), 1);
        assert_eq!(state.toggle_cuisine("Italian").page(), 1);
        assert_eq!(state.reset_query().page(), 1);
    }

    #[test]
    fn filter_transitions_reset_page_even_when_value_is_unchanged() {
        let state = deep_state();
        let same_sort = state.set_sort_option(state.sort_option().clone());
        assert_eq!(same_sort.page(), 1);
        assert_eq!(same_sort.sort_option(), state.sort_option());
    }

    #[test]
    fn set_page_changes_only_page() {
        let state = deep_state();
        let moved = state.set_page(3);
        assert_eq!(moved.page(), 3);
        assert_eq!(moved.search_query(), state.search_query());
        assert_eq!(moved.selected_cuisines(), state.selected_cuisines());
        assert_eq!(moved.sort_option(), state.sort_option());
    }

    #[test]
    fn set_page_never_goes_below_one() {
        assert_eq!(deep_state().set_page(0).page(), 1);
    }

    #[test]
    fn deserialized_state_keeps_page_invariant() {
        let state: SearchState = serde_json::from_str(
            r#"{"searchQuery":"","page":0,"selectedCuisines":["Thai","Thai"],"sortOption":"bestMatch"}"#,
        )
        .unwrap();
        assert_eq!(state.page(), 1);
        assert_eq!(state.selected_cuisines().join(","), "Thai");

        let request = crate::query::SearchRequest::derive(&state, Some("austin")).unwrap();
        assert_eq!(request.param("page"), Some("1"));
    }

    #[test]
    fn serialized_state_reads_back_unchanged() {
        let state = deep_state();
        let text = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<SearchState>(&text).unwrap(), state);
    }

    #[test]
    fn reset_query_keeps_filters() {
        let state = deep_state();
        let reset = state.reset_query();
        assert_eq!(reset.search_query(), "");
        assert_eq!(reset.selected_cuisines(), state.selected_cuisines());
        assert_eq!(reset.sort_option(), state.sort_option());
    }

    #[test]
    fn selected_cuisines_never_contain_duplicates() {
        let state = SearchState::default().set_selected_cuisines(["Thai", "Thai", "Sushi"]);
        assert_eq!(state.selected_cuisines().join(","), "Thai,Sushi");
    }

    #[test]
    fn toggle_cuisine_preserves_click_order() {
        let state = SearchState::default()
            .toggle_cuisine("Burgers")
            .toggle_cuisine("Pizza")
            .toggle_cuisine("Sushi")
            .toggle_cuisine("Pizza");
        assert_eq!(state.selected_cuisines().join(","), "Burgers,Sushi");
    }

    #[test]
    fn sort_option_round_trips_wire_names() {
        for name in ["bestMatch", "deliveryPrice", "estimatedDeliveryTime", "rating"] {
            let option: SortOption = name.parse().unwrap();
            assert_eq!(option.to_string(), name);
        }
        assert_eq!(
            "rating".parse::<SortOption>().unwrap(),
            SortOption::Custom("rating".to_string())
        );
    }
}
