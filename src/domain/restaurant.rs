//! Restaurant domain model and the paged response returned by the sample endpoint.
//!
//! Field names follow the wire format: restaurant fields are snake_case, the page
//! envelope is camelCase.

use serde::{Deserialize, Serialize};

/// A restaurant as returned by `GET /restaurants/sample`.
///
/// Immutable once fetched. `id` is unique per restaurant, but the list built from
/// several pages is not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub icon_url: String,
}

impl Restaurant {
    /// Creates a restaurant with only an id and a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinedeck::Restaurant;
    ///
    /// let r = Restaurant::new("r1", "Bistro");
    /// assert_eq!(r.short_address(), "");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            rating: None,
            user_ratings_total: None,
            price_level: None,
            icon_url: String::new(),
        }
    }

    /// Returns the first comma-separated segment of the address (the street line).
    #[must_use]
    pub fn short_address(&self) -> &str {
        self.address.split(',').next().unwrap_or("").trim()
    }

    /// Rating formatted with one decimal, `None` when the restaurant has no rating.
    #[must_use]
    pub fn rating_label(&self) -> Option<String> {
        self.rating.map(|r| format!("{r:.1}"))
    }

    /// Price level rendered as repeated `$`, empty when unknown or zero.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.price_level.map_or_else(String::new, |level| "$".repeat(usize::from(level)))
    }
}

/// One page of the restaurant listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPage {
    #[serde(default)]
    pub total_restaurants: u32,
    pub total_pages: u32,
    pub current_page: u32,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub has_sample_limit: bool,
    #[serde(default)]
    pub fixed_sample_size: u32,
    #[serde(default)]
    pub max_records: u32,
}

impl RestaurantPage {
    /// Builds a page from its position and contents, leaving the sampling metadata zeroed.
    #[must_use]
    pub fn new(current_page: u32, total_pages: u32, restaurants: Vec<Restaurant>) -> Self {
        Self {
            total_restaurants: u32::try_from(restaurants.len()).unwrap_or(u32::MAX),
            total_pages,
            current_page,
            restaurants,
            has_sample_limit: false,
            fixed_sample_size: 0,
            max_records: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_format() {
        let json = r#"{
            "totalRestaurants": 42,
            "totalPages": 3,
            "currentPage": 1,
            "restaurants": [{
                "id": "abc",
                "name": "Pod Gričem",
                "address": "Ilica 1, Zagreb, Croatia",
                "rating": 4.55,
                "user_ratings_total": null,
                "price_level": 2,
                "icon_url": "https://example.com/a.png"
            }],
            "hasSampleLimit": true,
            "fixedSampleSize": 100,
            "maxRecords": 100
        }"#;

        let page: RestaurantPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert!(page.has_sample_limit);

        let r = &page.restaurants[0];
        assert_eq!(r.short_address(), "Ilica 1");
        assert_eq!(r.rating_label().as_deref(), Some("4.5"));
        assert_eq!(r.user_ratings_total, None);
        assert_eq!(r.price_label(), "$$");
    }

    #[test]
    fn missing_optional_fields_default() {
        let page: RestaurantPage =
            serde_json::from_str(r#"{"totalPages":0,"currentPage":1}"#).unwrap();
        assert!(page.restaurants.is_empty());
        assert_eq!(page.total_restaurants, 0);
    }
}
