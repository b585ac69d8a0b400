//! Photo repository contracts and SQLite implementation.

use crate::model::photo::Photo;
use crate::model::restaurant::RestaurantId;
use crate::repo::row_mapper::map_photo_row;
use crate::repo::{collect_rows, ensure_connection_ready, run_operation, RepoResult};
use rusqlite::Connection;

/// Repository interface for restaurant photos.
pub trait PhotoRepository {
    /// Lists photos of one restaurant in insertion order.
    fn get_all_by_restaurant_id(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Photo>>;
}

/// SQLite-backed photo repository.
#[derive(Clone, Copy)]
pub struct SqlitePhotoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePhotoRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["photo"])?;
        Ok(Self { conn })
    }
}

impl PhotoRepository for SqlitePhotoRepository<'_> {
    fn get_all_by_restaurant_id(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Photo>> {
        run_operation(
            "photo.get_all_by_restaurant_id",
            format!("restaurant_id={restaurant_id}"),
            || {
                collect_rows(
                    self.conn,
                    "SELECT id, path, restaurant_id
                     FROM photo
                     WHERE restaurant_id = ?1
                     ORDER BY id ASC;",
                    [restaurant_id],
                    map_photo_row,
                )
            },
        )
    }
}
