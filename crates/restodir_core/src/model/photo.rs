use crate::model::restaurant::RestaurantId;
use serde::{Deserialize, Serialize};

/// Integer primary key of `photo`.
pub type PhotoId = i64;

/// Picture attached to one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    /// Path relative to the photo storage root.
    pub path: String,
    /// Owning restaurant. Not an embedded back-reference.
    pub restaurant_id: RestaurantId,
}
