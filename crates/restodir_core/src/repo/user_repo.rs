//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load users at the depth explicitly requested by the caller.
//! - Provide the typed minimal path used to resolve review authors.
//!
//! # Invariants
//! - `UserLoad::Minimal` runs exactly one query against `user`.
//! - `UserLoad::Full` adds liked restaurant ids and preferred cuisine types.
//!   Liked restaurants are never rebuilt as full restaurants here.
//! - Unknown users are `Ok(None)`.

use crate::model::restaurant::RestaurantId;
use crate::model::user::{User, UserId, UserLoad, UserProfile, UserSummary};
use crate::repo::cuisine_type_repo::{CuisineTypeRepository, SqliteCuisineTypeRepository};
use crate::repo::row_mapper::map_user_summary_row;
use crate::repo::{
    collect_rows, ensure_connection_ready, run_operation, RepoResult, StepResult,
};
use rusqlite::{Connection, OptionalExtension};

const USER_SELECT_SQL: &str = "SELECT id, email, pseudo, is_admin FROM user";

/// Repository interface for user lookups.
pub trait UserRepository {
    /// Loads one user by id at the requested depth.
    fn get_by_id(&self, id: UserId, load: UserLoad) -> RepoResult<Option<User>>;
    /// Loads one user by login e-mail at the requested depth.
    fn get_by_email(&self, email: &str, load: UserLoad) -> RepoResult<Option<User>>;
    /// Minimal path, typed: identity fields only.
    fn get_summary_by_id(&self, id: UserId) -> RepoResult<Option<UserSummary>>;
}

/// SQLite-backed user repository.
#[derive(Clone, Copy)]
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
    cuisine_types: SqliteCuisineTypeRepository<'conn>,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["user", "likes"])?;
        Ok(Self {
            conn,
            cuisine_types: SqliteCuisineTypeRepository::try_new(conn)?,
        })
    }

    fn find_summary_by_id(&self, id: UserId) -> StepResult<Option<UserSummary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(map_user_summary_row(row)))
            .optional()?;
        Ok(row.transpose()?)
    }

    fn find_summary_by_email(&self, email: &str) -> StepResult<Option<UserSummary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE email = ?1 COLLATE NOCASE;"))?;
        let row = stmt
            .query_row([email], |row| Ok(map_user_summary_row(row)))
            .optional()?;
        Ok(row.transpose()?)
    }

    fn with_load(&self, summary: UserSummary, load: UserLoad) -> StepResult<User> {
        match load {
            UserLoad::Minimal => Ok(User::Minimal(summary)),
            UserLoad::Full => {
                let liked_restaurant_ids = self.liked_restaurant_ids(summary.id)?;
                let preferred_cuisine_types =
                    self.cuisine_types.get_preferred_by_user_id(summary.id)?;
                Ok(User::Full(UserProfile {
                    summary,
                    liked_restaurant_ids,
                    preferred_cuisine_types,
                }))
            }
        }
    }

    fn liked_restaurant_ids(&self, user_id: UserId) -> StepResult<Vec<RestaurantId>> {
        collect_rows(
            self.conn,
            "SELECT restaurant_id
             FROM likes
             WHERE user_id = ?1
             ORDER BY restaurant_id ASC;",
            [user_id],
            |row| row.get::<_, RestaurantId>("restaurant_id"),
        )
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn get_by_id(&self, id: UserId, load: UserLoad) -> RepoResult<Option<User>> {
        run_operation(
            "user.get_by_id",
            format!("user_id={id} load={load:?}"),
            || {
                let Some(summary) = self.find_summary_by_id(id)? else {
                    return Ok(None);
                };
                Ok(Some(self.with_load(summary, load)?))
            },
        )
    }

    fn get_by_email(&self, email: &str, load: UserLoad) -> RepoResult<Option<User>> {
        run_operation("user.get_by_email", format!("load={load:?}"), || {
            let Some(summary) = self.find_summary_by_email(email)? else {
                return Ok(None);
            };
            Ok(Some(self.with_load(summary, load)?))
        })
    }

    fn get_summary_by_id(&self, id: UserId) -> RepoResult<Option<UserSummary>> {
        run_operation("user.get_summary_by_id", format!("user_id={id}"), || {
            self.find_summary_by_id(id)
        })
    }
}
