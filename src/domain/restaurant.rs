//! Server-owned restaurant entity and search result shapes.
//!
//! These types mirror the JSON the backend produces. Field names are camelCase on the
//! wire; monetary fields are integer minor units ([`MinorUnits`]).

use crate::domain::cuisine::CuisineSet;
use crate::domain::money::MinorUnits;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A restaurant record as persisted by the backend.
///
/// `id` and `last_updated` are server-assigned and only carried through; the client
/// never sends them back.
///
/// # Examples
///
/// ```
/// use menuhub::domain::Restaurant;
///
/// let json = r#"{
///     "restaurantName": "Casa Taco",
///     "city": "Austin",
///     "country": "USA",
///     "deliveryPrice": 299,
///     "estimatedDeliveryTime": 30,
///     "cuisines": ["Mexican"],
///     "menuItems": [{"name": "Taco", "price": 399}],
///     "imageUrl": "https://img.example/taco.png"
/// }"#;
/// let restaurant: Restaurant = serde_json::from_str(json).unwrap();
/// assert_eq!(restaurant.delivery_price.0, 299);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Server-assigned identifier; absent on records the client builds.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub restaurant_name: String,
    pub city: String,
    pub country: String,
    /// Delivery fee in minor units.
    pub delivery_price: MinorUnits,
    /// Minutes.
    pub estimated_delivery_time: u32,
    #[serde(default)]
    pub cuisines: CuisineSet,
    /// Menu in display order.
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    /// Hosted image, set by the server after an upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Last server-side modification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// One entry on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Price in minor units.
    pub price: MinorUnits,
}

/// A restaurant as listed in search results.
///
/// The search endpoint returns full records, so this is the entity shape.
pub type RestaurantSummary = Restaurant;

/// Paging metadata returned alongside search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Total number of matching restaurants.
    pub total: u64,
}

/// Body of `GET /api/restaurant/search/{locality}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching restaurants for the requested page.
    pub data: Vec<RestaurantSummary>,
    pub pagination: Pagination,
}

impl SearchResponse {
    /// `true` when the search ran but matched nothing.
    ///
    /// This is a normal outcome and must be rendered differently from a failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
