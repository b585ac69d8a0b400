//! Core data access for the restaurant directory.
//! This crate owns entity assembly, load depth policy and search semantics.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, DirectoryConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::cuisine_type::{CuisineType, CuisineTypeId};
pub use model::photo::{Photo, PhotoId};
pub use model::restaurant::{Restaurant, RestaurantFields, RestaurantId};
pub use model::review::{Review, ReviewId};
pub use model::user::{User, UserId, UserLoad, UserProfile, UserSummary};
pub use repo::cuisine_type_repo::{CuisineTypeRepository, SqliteCuisineTypeRepository};
pub use repo::like_repo::{LikeRepository, SqliteLikeRepository};
pub use repo::photo_repo::{PhotoRepository, SqlitePhotoRepository};
pub use repo::restaurant_repo::{RestaurantRepository, SqliteRestaurantRepository};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use repo::row_mapper::MappingError;
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use search::criteria::{AddressCriteria, MultiCriteria};
pub use search::predicate::Predicate;
pub use service::profile_service::{ProfileService, ProfileServiceError, ProfileView};
pub use service::search_service::{SearchRequest, SearchService, TOP_RATED_DEFAULT_LIMIT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
