//! Restaurant search query derivation and execution planning.
//!
//! - [`request`]: deterministic request descriptors derived from search state
//! - [`executor`]: fetch eligibility, de-duplication and stale-response suppression

pub mod executor;
pub mod request;

pub use executor::{FetchDecision, QueryStatus, RestaurantQueryExecutor};
pub use request::SearchRequest;
