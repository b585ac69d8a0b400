//! Cuisine type reference data.

use serde::{Deserialize, Serialize};

/// Integer primary key of `cuisine_type`.
pub type CuisineTypeId = i64;

/// Cuisine tag proposed by restaurants and preferred by users.
///
/// Has no back-edges, so it is always safe to load in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuisineType {
    pub id: CuisineTypeId,
    pub label: String,
}
