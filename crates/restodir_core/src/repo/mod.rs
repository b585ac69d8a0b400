//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from service orchestration.
//! - Tag every failure with the operation that raised it.
//!
//! # Invariants
//! - Point lookups return `Ok(None)` for missing rows; not-found is never
//!   an error.
//! - No repository retries or swallows a failure, and no partially
//!   assembled value is returned alongside an error.
//! - A failure inside a nested repository call keeps both the nested and the
//!   outer operation with their parameters.

use crate::db::migrations::latest_version;
use crate::db::{migrations, DbError};
use log::{debug, error};
use rusqlite::{Connection, Params, Row};
use std::time::Instant;
use thiserror::Error;

pub mod cuisine_type_repo;
pub mod like_repo;
pub mod photo_repo;
pub mod restaurant_repo;
pub mod review_repo;
pub mod row_mapper;
pub mod user_repo;

use row_mapper::MappingError;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure with the failing operation attached.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The store rejected or failed a statement.
    #[error("{operation} failed ({detail}): {source}")]
    DataAccess {
        operation: &'static str,
        detail: String,
        #[source]
        source: DbError,
    },
    /// A returned row could not be converted into an entity.
    #[error("{operation} returned an unmappable row ({detail}): {source}")]
    Mapping {
        operation: &'static str,
        detail: String,
        #[source]
        source: MappingError,
    },
    /// A nested repository call failed while serving `operation`.
    #[error("{operation} failed ({detail}): {source}")]
    Nested {
        operation: &'static str,
        detail: String,
        #[source]
        source: Box<RepoError>,
    },
    /// Connection schema is not at the expected migrated version.
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
}

impl RepoError {
    /// Name of the outermost repository operation that failed, when known.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::DataAccess { operation, .. }
            | Self::Mapping { operation, .. }
            | Self::Nested { operation, .. } => Some(*operation),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }

    /// Parameters of the outermost failing operation (ids, sizes).
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::DataAccess { detail, .. }
            | Self::Mapping { detail, .. }
            | Self::Nested { detail, .. } => Some(detail.as_str()),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }

    /// The failure that started the chain, below every `Nested` layer.
    pub fn root_cause(&self) -> &RepoError {
        let mut current = self;
        while let Self::Nested { source, .. } = current {
            current = source.as_ref();
        }
        current
    }
}

/// Failure raised inside an operation body, before operation tagging.
#[derive(Debug)]
pub(crate) enum StepError {
    Sqlite(rusqlite::Error),
    Mapping(MappingError),
    /// Already tagged by a nested repository call; wrapped with the outer
    /// operation.
    Repo(RepoError),
}

impl From<rusqlite::Error> for StepError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<MappingError> for StepError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

impl From<RepoError> for StepError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub(crate) type StepResult<T> = Result<T, StepError>;

/// Size hint logged for successful operations.
pub(crate) trait RowCount {
    fn row_count(&self) -> usize;
}

impl<T> RowCount for Vec<T> {
    fn row_count(&self) -> usize {
        self.len()
    }
}

impl<T> RowCount for Option<T> {
    fn row_count(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl RowCount for () {
    fn row_count(&self) -> usize {
        0
    }
}

impl RowCount for bool {
    fn row_count(&self) -> usize {
        usize::from(*self)
    }
}

impl RowCount for usize {
    fn row_count(&self) -> usize {
        *self
    }
}

impl RowCount for i64 {
    fn row_count(&self) -> usize {
        1
    }
}

/// Runs one repository operation body with timing, logging and error tagging.
///
/// `detail` carries the operation parameters (ids, sizes) for diagnostics.
/// Free text supplied by end users must not be placed in it.
pub(crate) fn run_operation<T: RowCount>(
    operation: &'static str,
    detail: String,
    body: impl FnOnce() -> StepResult<T>,
) -> RepoResult<T> {
    let started_at = Instant::now();
    match body() {
        Ok(value) => {
            debug!(
                "event=repo_call module=repo status=ok op={} {} rows={} duration_ms={}",
                operation,
                detail,
                value.row_count(),
                started_at.elapsed().as_millis()
            );
            Ok(value)
        }
        Err(step) => {
            let err = match step {
                StepError::Sqlite(source) => RepoError::DataAccess {
                    operation,
                    detail,
                    source: DbError::Sqlite(source),
                },
                StepError::Mapping(source) => RepoError::Mapping {
                    operation,
                    detail,
                    source,
                },
                StepError::Repo(inner) => RepoError::Nested {
                    operation,
                    detail,
                    source: Box::new(inner),
                },
            };
            error!(
                "event=repo_call module=repo status=error op={} duration_ms={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Runs one query and maps every returned row, in storage order.
pub(crate) fn collect_rows<T, E, P>(
    conn: &Connection,
    sql: &str,
    params: P,
    mut map: impl FnMut(&Row<'_>) -> Result<T, E>,
) -> StepResult<Vec<T>>
where
    P: Params,
    StepError: From<E>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(map(row)?);
    }
    Ok(items)
}

/// Verifies a connection was opened through `db::open_db*`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version =
        migrations::current_user_version(conn).map_err(|source| RepoError::DataAccess {
            operation: "repo.ensure_connection_ready",
            detail: String::new(),
            source,
        })?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in tables {
        let exists = table_exists(conn, table).map_err(|source| RepoError::DataAccess {
            operation: "repo.ensure_connection_ready",
            detail: format!("table={table}"),
            source: DbError::Sqlite(source),
        })?;
        if !exists {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
