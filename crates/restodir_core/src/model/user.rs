//! User model and load modes.
//!
//! # Responsibility
//! - Represent a user either in minimal (identity only) or full form.
//! - Make the load depth an explicit caller choice.
//!
//! # Invariants
//! - `UserSummary` never carries associations; it is the only user shape
//!   that may be nested inside other entities.
//! - `UserProfile` is only produced as the root of a direct user lookup.

use crate::model::cuisine_type::CuisineType;
use crate::model::restaurant::RestaurantId;
use serde::{Deserialize, Serialize};

/// Integer primary key of `user`.
pub type UserId = i64;

/// Load depth requested from `UserRepository`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLoad {
    /// Identity fields only. One query.
    Minimal,
    /// Identity fields plus liked restaurant ids and preferred cuisine types.
    Full,
}

/// Identity fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    /// Login e-mail.
    pub email: String,
    /// Display name shown next to reviews.
    pub pseudo: String,
    pub is_admin: bool,
}

/// Fully loaded user.
///
/// Liked restaurants are kept as ids. Rebuilding them as full restaurants
/// would pull their reviews and authors back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub summary: UserSummary,
    pub liked_restaurant_ids: Vec<RestaurantId>,
    pub preferred_cuisine_types: Vec<CuisineType>,
}

/// User returned by a direct lookup, tagged with its load depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "load", rename_all = "snake_case")]
pub enum User {
    Minimal(UserSummary),
    Full(UserProfile),
}

impl User {
    /// Identity fields, whichever the load depth.
    pub fn summary(&self) -> &UserSummary {
        match self {
            Self::Minimal(summary) => summary,
            Self::Full(profile) => &profile.summary,
        }
    }

    pub fn id(&self) -> UserId {
        self.summary().id
    }

    /// Load depth this value was built with.
    pub fn load(&self) -> UserLoad {
        match self {
            Self::Minimal(_) => UserLoad::Minimal,
            Self::Full(_) => UserLoad::Full,
        }
    }

    /// Returns the full profile, or `None` for a minimal user.
    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            Self::Minimal(_) => None,
            Self::Full(profile) => Some(profile),
        }
    }
}
