//! User profile use-case service.
//!
//! # Responsibility
//! - Build the "my profile" read model for one explicitly given user id.
//!
//! # Invariants
//! - The user is loaded in full form as the root object.
//! - Liked restaurants use the partial-load query: no cuisine types,
//!   photos or reviews are fetched for them.

use crate::model::restaurant::Restaurant;
use crate::model::user::{UserId, UserLoad, UserProfile};
use crate::repo::restaurant_repo::RestaurantRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use serde::Serialize;
use thiserror::Error;

/// Service error for profile use-cases.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    /// Repository answered with a different load depth than requested.
    #[error("inconsistent profile state: {0}")]
    InconsistentState(&'static str),
}

/// Profile page read model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub user: UserProfile,
    /// Summaries only; associations are empty.
    pub liked_restaurants: Vec<Restaurant>,
}

/// Profile facade over user and restaurant repositories.
pub struct ProfileService<U: UserRepository, R: RestaurantRepository> {
    users: U,
    restaurants: R,
}

impl<U: UserRepository, R: RestaurantRepository> ProfileService<U, R> {
    pub fn new(users: U, restaurants: R) -> Self {
        Self { users, restaurants }
    }

    /// Loads the profile of `user_id`, or `None` for an unknown user.
    pub fn profile(&self, user_id: UserId) -> Result<Option<ProfileView>, ProfileServiceError> {
        let Some(user) = self.users.get_by_id(user_id, UserLoad::Full)? else {
            return Ok(None);
        };
        let user = user
            .into_profile()
            .ok_or(ProfileServiceError::InconsistentState(
                "full load returned a minimal user",
            ))?;
        let liked_restaurants = self.restaurants.get_liked_by_user(user_id)?;

        Ok(Some(ProfileView {
            user,
            liked_restaurants,
        }))
    }
}
