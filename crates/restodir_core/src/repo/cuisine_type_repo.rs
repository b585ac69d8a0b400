//! Cuisine type repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read cuisine reference data, alone or through `proposes`/`prefers`.
//!
//! # Invariants
//! - Every listing is ordered by label, then id.

use crate::model::cuisine_type::CuisineType;
use crate::model::restaurant::RestaurantId;
use crate::model::user::UserId;
use crate::repo::row_mapper::map_cuisine_type_row;
use crate::repo::{collect_rows, ensure_connection_ready, run_operation, RepoResult};
use rusqlite::Connection;

/// Repository interface for cuisine type reads.
pub trait CuisineTypeRepository {
    /// Lists the whole cuisine reference table.
    fn get_all(&self) -> RepoResult<Vec<CuisineType>>;
    /// Lists cuisine types proposed by one restaurant.
    fn get_all_by_restaurant_id(&self, restaurant_id: RestaurantId)
        -> RepoResult<Vec<CuisineType>>;
    /// Lists cuisine types preferred by one user.
    fn get_preferred_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<CuisineType>>;
}

/// SQLite-backed cuisine type repository.
#[derive(Clone, Copy)]
pub struct SqliteCuisineTypeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCuisineTypeRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["cuisine_type", "proposes", "prefers"])?;
        Ok(Self { conn })
    }
}

impl CuisineTypeRepository for SqliteCuisineTypeRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<CuisineType>> {
        run_operation("cuisine_type.get_all", String::new(), || {
            collect_rows(
                self.conn,
                "SELECT id, label
                 FROM cuisine_type
                 ORDER BY label ASC, id ASC;",
                [],
                map_cuisine_type_row,
            )
        })
    }

    fn get_all_by_restaurant_id(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Vec<CuisineType>> {
        run_operation(
            "cuisine_type.get_all_by_restaurant_id",
            format!("restaurant_id={restaurant_id}"),
            || {
                collect_rows(
                    self.conn,
                    "SELECT c.id AS id, c.label AS label
                     FROM cuisine_type c
                     INNER JOIN proposes p ON p.cuisine_type_id = c.id
                     WHERE p.restaurant_id = ?1
                     ORDER BY c.label ASC, c.id ASC;",
                    [restaurant_id],
                    map_cuisine_type_row,
                )
            },
        )
    }

    fn get_preferred_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<CuisineType>> {
        run_operation(
            "cuisine_type.get_preferred_by_user_id",
            format!("user_id={user_id}"),
            || {
                collect_rows(
                    self.conn,
                    "SELECT c.id AS id, c.label AS label
                     FROM cuisine_type c
                     INNER JOIN prefers p ON p.cuisine_type_id = c.id
                     WHERE p.user_id = ?1
                     ORDER BY c.label ASC, c.id ASC;",
                    [user_id],
                    map_cuisine_type_row,
                )
            },
        )
    }
}
