//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read reviews of one restaurant with their authors resolved.
//! - Aggregate ratings per restaurant.
//!
//! # Invariants
//! - Authors are resolved through `UserRepository::get_summary_by_id` only,
//!   so a review never nests a fully loaded user.
//! - A review whose author row cannot be found fails the whole call.

use crate::model::restaurant::RestaurantId;
use crate::model::review::Review;
use crate::repo::row_mapper::{map_review_row, review_author_id, MappingError};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{collect_rows, ensure_connection_ready, run_operation, RepoResult, StepResult};
use rusqlite::{Connection, Row};

/// Repository interface for restaurant reviews.
pub trait ReviewRepository {
    /// Lists reviews of one restaurant, oldest first.
    fn get_all_by_restaurant_id(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Review>>;
    /// Mean rating of one restaurant, or `None` without reviews.
    fn average_rating_by_restaurant_id(&self, restaurant_id: RestaurantId)
        -> RepoResult<Option<f64>>;
}

/// SQLite-backed review repository.
#[derive(Clone, Copy)]
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
    users: SqliteUserRepository<'conn>,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["review"])?;
        Ok(Self {
            conn,
            users: SqliteUserRepository::try_new(conn)?,
        })
    }

    fn map_with_author(&self, row: &Row<'_>) -> StepResult<Review> {
        let author_id = review_author_id(row)?;
        let author = self
            .users
            .get_summary_by_id(author_id)?
            .ok_or_else(|| MappingError::InvalidValue {
                table: "review",
                column: "user_id",
                message: format!("author {author_id} does not exist"),
            })?;
        Ok(map_review_row(row, author)?)
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn get_all_by_restaurant_id(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Review>> {
        run_operation(
            "review.get_all_by_restaurant_id",
            format!("restaurant_id={restaurant_id}"),
            || {
                collect_rows(
                    self.conn,
                    "SELECT id, restaurant_id, user_id, rating, comment
                     FROM review
                     WHERE restaurant_id = ?1
                     ORDER BY id ASC;",
                    [restaurant_id],
                    |row| self.map_with_author(row),
                )
            },
        )
    }

    fn average_rating_by_restaurant_id(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Option<f64>> {
        run_operation(
            "review.average_rating_by_restaurant_id",
            format!("restaurant_id={restaurant_id}"),
            || {
                let average = self.conn.query_row(
                    "SELECT AVG(rating) FROM review WHERE restaurant_id = ?1;",
                    [restaurant_id],
                    |row| row.get::<_, Option<f64>>(0),
                )?;
                Ok(average)
            },
        )
    }
}
