//! Review model.
//!
//! # Invariants
//! - `author` is a minimal user. This is what keeps the
//!   restaurant -> review -> user -> liked restaurants graph acyclic.
//! - `rating` is within `MIN_RATING..=MAX_RATING`.

use crate::model::restaurant::RestaurantId;
use crate::model::user::UserSummary;
use serde::{Deserialize, Serialize};

/// Integer primary key of `review`.
pub type ReviewId = i64;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// One user's rating and comment about one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: i64,
    pub comment: Option<String>,
    pub restaurant_id: RestaurantId,
    pub author: UserSummary,
}
