//! Restaurant aggregate.
//!
//! # Responsibility
//! - Hold restaurant identity/address fields and its owned associations.
//! - Provide the write model used by insert/update paths.
//!
//! # Invariants
//! - `id` is the only identity; two restaurants with equal fields but
//!   different ids are different restaurants.
//! - `cuisine_types`, `photos` and `reviews` are attached together by
//!   repository assembly, or all left empty by partial-load queries.

use crate::model::cuisine_type::CuisineType;
use crate::model::photo::Photo;
use crate::model::review::Review;
use serde::{Deserialize, Serialize};

/// Integer primary key of `restaurant`.
pub type RestaurantId = i64;

/// Restaurant with its cuisine types, photos and reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub street_number: Option<i64>,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
    /// Decimal degrees.
    pub latitude: Option<f64>,
    /// Decimal degrees.
    pub longitude: Option<f64>,
    pub description: String,
    /// Free-form opening hours text as entered by administrators.
    pub opening_hours: String,
    pub cuisine_types: Vec<CuisineType>,
    pub photos: Vec<Photo>,
    pub reviews: Vec<Review>,
}

/// Column values of one restaurant row, without identity.
///
/// Used by `insert` (id assigned by storage) and `update` (id passed
/// separately).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantFields {
    pub name: String,
    pub street_number: Option<i64>,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    pub opening_hours: String,
}

impl Restaurant {
    /// Creates a restaurant with no associations loaded.
    pub fn new(id: RestaurantId, fields: RestaurantFields) -> Self {
        Self {
            id,
            name: fields.name,
            street_number: fields.street_number,
            street_name: fields.street_name,
            postal_code: fields.postal_code,
            city: fields.city,
            latitude: fields.latitude,
            longitude: fields.longitude,
            description: fields.description,
            opening_hours: fields.opening_hours,
            cuisine_types: Vec::new(),
            photos: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// Returns a copy of the column values, without identity or associations.
    pub fn fields(&self) -> RestaurantFields {
        RestaurantFields {
            name: self.name.clone(),
            street_number: self.street_number,
            street_name: self.street_name.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description.clone(),
            opening_hours: self.opening_hours.clone(),
        }
    }

    /// Mean rating over loaded reviews, or `None` when no review is loaded.
    ///
    /// Partial-load results always return `None` here.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: i64 = self.reviews.iter().map(|review| review.rating).sum();
        Some(total as f64 / self.reviews.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{Restaurant, RestaurantFields};
    use crate::model::review::Review;
    use crate::model::user::UserSummary;

    fn review(id: i64, rating: i64) -> Review {
        Review {
            id,
            rating,
            comment: None,
            restaurant_id: 7,
            author: UserSummary {
                id,
                email: format!("user{id}@example.com"),
                pseudo: format!("user{id}"),
                is_admin: false,
            },
        }
    }

    #[test]
    fn new_restaurant_starts_without_associations() {
        let restaurant = Restaurant::new(
            1,
            RestaurantFields {
                name: "Le Central".to_string(),
                ..RestaurantFields::default()
            },
        );
        assert!(restaurant.cuisine_types.is_empty());
        assert!(restaurant.photos.is_empty());
        assert!(restaurant.reviews.is_empty());
        assert_eq!(restaurant.average_rating(), None);
        assert_eq!(restaurant.fields().name, "Le Central");
    }

    #[test]
    fn average_rating_uses_loaded_reviews() {
        let mut restaurant = Restaurant::new(7, RestaurantFields::default());
        restaurant.reviews = vec![review(1, 4), review(2, 5)];
        assert_eq!(restaurant.average_rating(), Some(4.5));
    }
}
