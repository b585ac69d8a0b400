//! Like association repository (restaurant x user).
//!
//! # Invariants
//! - Every write is a single statement.
//! - `like` is idempotent; liking twice keeps one association row.

use crate::model::restaurant::RestaurantId;
use crate::model::user::UserId;
use crate::repo::{ensure_connection_ready, run_operation, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for the like association.
pub trait LikeRepository {
    fn like(&self, restaurant_id: RestaurantId, user_id: UserId) -> RepoResult<()>;
    fn unlike(&self, restaurant_id: RestaurantId, user_id: UserId) -> RepoResult<()>;
    fn is_liked(&self, restaurant_id: RestaurantId, user_id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed like repository.
pub struct SqliteLikeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLikeRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["likes"])?;
        Ok(Self { conn })
    }
}

impl LikeRepository for SqliteLikeRepository<'_> {
    fn like(&self, restaurant_id: RestaurantId, user_id: UserId) -> RepoResult<()> {
        run_operation(
            "likes.like",
            format!("restaurant_id={restaurant_id} user_id={user_id}"),
            || {
                self.conn.execute(
                    "INSERT OR IGNORE INTO likes (restaurant_id, user_id) VALUES (?1, ?2);",
                    params![restaurant_id, user_id],
                )?;
                Ok(())
            },
        )
    }

    fn unlike(&self, restaurant_id: RestaurantId, user_id: UserId) -> RepoResult<()> {
        run_operation(
            "likes.unlike",
            format!("restaurant_id={restaurant_id} user_id={user_id}"),
            || {
                self.conn.execute(
                    "DELETE FROM likes WHERE restaurant_id = ?1 AND user_id = ?2;",
                    params![restaurant_id, user_id],
                )?;
                Ok(())
            },
        )
    }

    fn is_liked(&self, restaurant_id: RestaurantId, user_id: UserId) -> RepoResult<bool> {
        run_operation(
            "likes.is_liked",
            format!("restaurant_id={restaurant_id} user_id={user_id}"),
            || {
                let exists: i64 = self.conn.query_row(
                    "SELECT EXISTS(
                        SELECT 1
                        FROM likes
                        WHERE restaurant_id = ?1 AND user_id = ?2
                    );",
                    params![restaurant_id, user_id],
                    |row| row.get(0),
                )?;
                Ok(exists == 1)
            },
        )
    }
}
