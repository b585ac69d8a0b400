//! Row-to-entity mapping shared by every repository.
//!
//! # Responsibility
//! - Turn exactly one SQLite row into exactly one entity value.
//! - Report missing or malformed columns as `MappingError`.
//!
//! # Invariants
//! - Mappers never touch the database and never decide load depth; the
//!   caller attaches associations (or supplies the review author).
//! - Columns are read by name, so queries must alias joined columns to the
//!   plain table column names.

use crate::model::cuisine_type::CuisineType;
use crate::model::photo::Photo;
use crate::model::restaurant::{Restaurant, RestaurantFields};
use crate::model::review::{Review, MAX_RATING, MIN_RATING};
use crate::model::user::{UserId, UserSummary};
use rusqlite::types::{FromSql, Type};
use rusqlite::Row;
use thiserror::Error;

pub type MappingResult<T> = Result<T, MappingError>;

/// A row lacks an expected column or holds a value the entity cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("column `{column}` missing from `{table}` row")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("invalid value in `{table}.{column}`: {message}")]
    InvalidValue {
        table: &'static str,
        column: &'static str,
        message: String,
    },
}

/// Maps one `restaurant` row. Associations are left empty.
pub fn map_restaurant_row(row: &Row<'_>) -> MappingResult<Restaurant> {
    const TABLE: &str = "restaurant";
    let id = column(row, TABLE, "id")?;
    let fields = RestaurantFields {
        name: column(row, TABLE, "name")?,
        street_number: column(row, TABLE, "street_number")?,
        street_name: column(row, TABLE, "street_name")?,
        postal_code: column(row, TABLE, "postal_code")?,
        city: column(row, TABLE, "city")?,
        latitude: column(row, TABLE, "latitude")?,
        longitude: column(row, TABLE, "longitude")?,
        description: column(row, TABLE, "description")?,
        opening_hours: column(row, TABLE, "opening_hours")?,
    };
    Ok(Restaurant::new(id, fields))
}

pub fn map_cuisine_type_row(row: &Row<'_>) -> MappingResult<CuisineType> {
    const TABLE: &str = "cuisine_type";
    Ok(CuisineType {
        id: column(row, TABLE, "id")?,
        label: column(row, TABLE, "label")?,
    })
}

pub fn map_photo_row(row: &Row<'_>) -> MappingResult<Photo> {
    const TABLE: &str = "photo";
    Ok(Photo {
        id: column(row, TABLE, "id")?,
        path: column(row, TABLE, "path")?,
        restaurant_id: column(row, TABLE, "restaurant_id")?,
    })
}

/// Maps identity columns of one `user` row.
pub fn map_user_summary_row(row: &Row<'_>) -> MappingResult<UserSummary> {
    const TABLE: &str = "user";
    let is_admin = match column::<i64>(row, TABLE, "is_admin")? {
        0 => false,
        1 => true,
        other => {
            return Err(MappingError::InvalidValue {
                table: TABLE,
                column: "is_admin",
                message: format!("expected 0 or 1, got {other}"),
            });
        }
    };

    Ok(UserSummary {
        id: column(row, TABLE, "id")?,
        email: column(row, TABLE, "email")?,
        pseudo: column(row, TABLE, "pseudo")?,
        is_admin,
    })
}

/// Reads the author id of one `review` row, before the author is resolved.
pub fn review_author_id(row: &Row<'_>) -> MappingResult<UserId> {
    column(row, "review", "user_id")
}

/// Maps one `review` row with its already resolved minimal author.
pub fn map_review_row(row: &Row<'_>, author: UserSummary) -> MappingResult<Review> {
    const TABLE: &str = "review";
    let author_id = review_author_id(row)?;
    if author.id != author_id {
        return Err(MappingError::InvalidValue {
            table: TABLE,
            column: "user_id",
            message: format!("row references user {author_id}, author is {}", author.id),
        });
    }

    let rating: i64 = column(row, TABLE, "rating")?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(MappingError::InvalidValue {
            table: TABLE,
            column: "rating",
            message: format!("expected {MIN_RATING}..={MAX_RATING}, got {rating}"),
        });
    }

    Ok(Review {
        id: column(row, TABLE, "id")?,
        rating,
        comment: column(row, TABLE, "comment")?,
        restaurant_id: column(row, TABLE, "restaurant_id")?,
        author,
    })
}

fn column<T: FromSql>(
    row: &Row<'_>,
    table: &'static str,
    column: &'static str,
) -> MappingResult<T> {
    row.get(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnName(_) => MappingError::MissingColumn { table, column },
        rusqlite::Error::InvalidColumnType(_, _, Type::Null) => MappingError::InvalidValue {
            table,
            column,
            message: "unexpected NULL".to_string(),
        },
        rusqlite::Error::InvalidColumnType(_, _, actual) => MappingError::InvalidValue {
            table,
            column,
            message: format!("unexpected {actual} value"),
        },
        other => MappingError::InvalidValue {
            table,
            column,
            message: other.to_string(),
        },
    })
}
