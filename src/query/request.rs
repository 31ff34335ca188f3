//! Search request descriptors.
//!
//! A [`SearchRequest`] is the comparable, fully-specified form of one outbound search:
//! the locality scoping the endpoint plus the ordered query parameters. It is derived
//! purely from a [`SearchState`] snapshot, so structurally equal inputs always produce
//! equal descriptors. That equality is what the executor de-duplicates and suppresses
//! stale responses on.

use crate::search::SearchState;
use url::form_urlencoded;

/// Path segments preceding the locality in the search endpoint.
pub const SEARCH_PATH_PREFIX: [&str; 3] = ["api", "restaurant", "search"];

/// Fully-specified search request.
///
/// # Example
///
/// ```rust
/// use menuhub::query::SearchRequest;
/// use menuhub::search::SearchState;
///
/// let request = SearchRequest::derive(&SearchState::default(), Some("austin")).unwrap();
/// assert_eq!(request.path(), "/api/restaurant/search/austin");
/// assert_eq!(
///     request.query_string(),
///     "searchQuery=&page=1&selectedCuisines=&sortOption=bestMatch"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    locality: String,
    params: Vec<(&'static str, String)>,
}

impl SearchRequest {
    /// Derives the request for `state` scoped to `locality`.
    ///
    /// Returns `None` when `locality` is absent, empty, or only whitespace: no search
    /// is eligible without a city.
    #[must_use]
    pub fn derive(state: &SearchState, locality: Option<&str>) -> Option<Self> {
        let locality = locality.filter(|l| !l.trim().is_empty())?;

        let params = vec![
            ("searchQuery", state.search_query().to_string()),
            ("page", state.page().to_string()),
            ("selectedCuisines", state.selected_cuisines().join(",")),
            ("sortOption", state.sort_option().as_str().to_string()),
        ];

        Some(Self {
            locality: locality.to_string(),
            params,
        })
    }

    /// City the search is scoped to, exactly as routed (not percent-encoded).
    #[must_use]
    pub fn locality(&self) -> &str {
        &self.locality
    }

    /// Query parameters in emission order.
    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Looks up a single parameter value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Unencoded endpoint path, for display and logging.
    ///
    /// Transport code builds the real URL from [`SearchRequest::path_segments`] so the
    /// locality is percent-encoded as a path segment.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}/{}", SEARCH_PATH_PREFIX.join("/"), self.locality)
    }

    /// Endpoint path as individual segments.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        SEARCH_PATH_PREFIX
            .into_iter()
            .chain(std::iter::once(self.locality.as_str()))
    }

    /// `application/x-www-form-urlencoded` query string.
    #[must_use]
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Stable key identifying this request, suitable for result caches.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}?{}", self.path(), self.query_string())
    }
}
