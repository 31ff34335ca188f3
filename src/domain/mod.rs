//! Domain layer for the Menuhub client core.
//!
//! Types shared by every subsystem, independent of transport or presentation:
//!
//! - [`error`]: Error types and result aliases
//! - [`money`]: Minor-unit money and unit conversion
//! - [`cuisine`]: Insertion-ordered cuisine sets
//! - [`restaurant`]: Restaurant entity and search result shapes
//!
//! # Examples
//!
//! ```
//! use menuhub::domain::{MinorUnits, Result};
//!
//! fn delivery_fee() -> Result<MinorUnits> {
//!     MinorUnits::from_major(2.99)
//! }
//! assert_eq!(delivery_fee().unwrap(), MinorUnits(299));
//! ```

pub mod cuisine;
pub mod error;
pub mod money;
pub mod restaurant;

pub use cuisine::CuisineSet;
pub use error::{MenuhubError, Result};
pub use money::{MinorUnits, MINOR_UNIT_FACTOR};
pub use restaurant::{MenuItem, Pagination, Restaurant, RestaurantSummary, SearchResponse};
