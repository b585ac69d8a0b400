//! Restaurant repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Assemble restaurant aggregates from a restaurant row plus its cuisine
//!   types, photos and reviews.
//! - Provide lookup, listing, search and single-statement write APIs.
//!
//! # Invariants
//! - Every read except `get_liked_by_user` returns fully assembled
//!   restaurants. `get_liked_by_user` returns all three associations empty.
//! - Assembly attaches associations only after all three loads succeed; a
//!   failure fails the whole call.
//! - Review authors inside assembled restaurants are minimal users.
//! - Search values are bound parameters, never SQL text.
//!
//! # See also
//! - `search::criteria` for the multi-criteria combination policy.

use crate::model::cuisine_type::CuisineTypeId;
use crate::model::restaurant::{Restaurant, RestaurantFields, RestaurantId};
use crate::model::user::UserId;
use crate::repo::cuisine_type_repo::{CuisineTypeRepository, SqliteCuisineTypeRepository};
use crate::repo::photo_repo::{PhotoRepository, SqlitePhotoRepository};
use crate::repo::review_repo::{ReviewRepository, SqliteReviewRepository};
use crate::repo::row_mapper::map_restaurant_row;
use crate::repo::{
    collect_rows, ensure_connection_ready, run_operation, RepoResult, StepResult,
};
use crate::search::criteria::{AddressCriteria, MultiCriteria, PROPOSES_CUISINE_COLUMN};
use crate::search::predicate::Predicate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

const RESTAURANT_COLUMNS: &str = "r.id AS id,
    r.name AS name,
    r.street_number AS street_number,
    r.street_name AS street_name,
    r.postal_code AS postal_code,
    r.city AS city,
    r.latitude AS latitude,
    r.longitude AS longitude,
    r.description AS description,
    r.opening_hours AS opening_hours";

/// Repository interface for restaurant aggregates.
pub trait RestaurantRepository {
    /// Loads one fully assembled restaurant.
    fn get_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;
    /// Lists every restaurant, fully assembled, in storage order.
    fn get_all(&self) -> RepoResult<Vec<Restaurant>>;
    /// Lists at most `limit` reviewed restaurants by descending mean rating.
    fn get_top_rated(&self, limit: u32) -> RepoResult<Vec<Restaurant>>;
    /// Lists restaurants proposing at least one of the cuisine types, by name.
    fn get_by_cuisine_types(&self, ids: &[CuisineTypeId]) -> RepoResult<Vec<Restaurant>>;
    /// Lists restaurants whose name contains `text`.
    fn get_by_name_substring(&self, text: &str) -> RepoResult<Vec<Restaurant>>;
    /// Lists restaurants matching every address substring.
    fn get_by_address(&self, address: &AddressCriteria) -> RepoResult<Vec<Restaurant>>;
    /// Combined search; see `MultiCriteria::to_predicate`.
    fn get_by_multiple_criteria(&self, criteria: &MultiCriteria) -> RepoResult<Vec<Restaurant>>;
    /// Lists restaurants liked by one user, without associations.
    fn get_liked_by_user(&self, user_id: UserId) -> RepoResult<Vec<Restaurant>>;
    /// Inserts one restaurant and returns its storage-assigned id.
    fn insert(&self, fields: &RestaurantFields) -> RepoResult<RestaurantId>;
    /// Overwrites every column of one restaurant. Missing ids are a no-op.
    fn update(&self, id: RestaurantId, fields: &RestaurantFields) -> RepoResult<()>;
    /// Deletes one restaurant and its dependent rows. Missing ids are a no-op.
    fn delete(&self, id: RestaurantId) -> RepoResult<()>;
}

/// SQLite-backed restaurant repository.
pub struct SqliteRestaurantRepository<'conn> {
    conn: &'conn Connection,
    cuisine_types: SqliteCuisineTypeRepository<'conn>,
    photos: SqlitePhotoRepository<'conn>,
    reviews: SqliteReviewRepository<'conn>,
}

impl<'conn> SqliteRestaurantRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["restaurant", "proposes", "likes"])?;
        Ok(Self {
            conn,
            cuisine_types: SqliteCuisineTypeRepository::try_new(conn)?,
            photos: SqlitePhotoRepository::try_new(conn)?,
            reviews: SqliteReviewRepository::try_new(conn)?,
        })
    }

    /// Runs a restaurant query and assembles every returned row.
    fn load_assembled(&self, sql: &str, bind_values: Vec<Value>) -> StepResult<Vec<Restaurant>> {
        let restaurants = self.load_bare(sql, bind_values)?;
        restaurants
            .into_iter()
            .map(|restaurant| self.assemble(restaurant))
            .collect()
    }

    /// Runs a restaurant query and maps rows without associations.
    fn load_bare(&self, sql: &str, bind_values: Vec<Value>) -> StepResult<Vec<Restaurant>> {
        collect_rows(
            self.conn,
            sql,
            params_from_iter(bind_values),
            map_restaurant_row,
        )
    }

    fn assemble(&self, mut restaurant: Restaurant) -> StepResult<Restaurant> {
        let cuisine_types = self.cuisine_types.get_all_by_restaurant_id(restaurant.id)?;
        let photos = self.photos.get_all_by_restaurant_id(restaurant.id)?;
        let reviews = self.reviews.get_all_by_restaurant_id(restaurant.id)?;

        restaurant.cuisine_types = cuisine_types;
        restaurant.photos = photos;
        restaurant.reviews = reviews;
        Ok(restaurant)
    }

    fn search(&self, predicate: Predicate, join_proposes: bool) -> StepResult<Vec<Restaurant>> {
        let (filter, bind_values) = predicate.into_parts();
        let (select, join) = if join_proposes {
            (
                "SELECT DISTINCT",
                " INNER JOIN proposes p ON p.restaurant_id = r.id",
            )
        } else {
            ("SELECT", "")
        };
        let sql = format!(
            "{select} {RESTAURANT_COLUMNS}
             FROM restaurant r{join}
             WHERE {filter}
             ORDER BY r.name ASC, r.id ASC;"
        );
        self.load_assembled(&sql, bind_values)
    }
}

impl RestaurantRepository for SqliteRestaurantRepository<'_> {
    fn get_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        run_operation(
            "restaurant.get_by_id",
            format!("restaurant_id={id}"),
            || {
                let sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurant r WHERE r.id = ?1;");
                let restaurant = self
                    .load_assembled(&sql, vec![Value::Integer(id)])?
                    .into_iter()
                    .next();
                Ok(restaurant)
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<Restaurant>> {
        run_operation("restaurant.get_all", String::new(), || {
            let sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurant r;");
            self.load_assembled(&sql, Vec::new())
        })
    }

    fn get_top_rated(&self, limit: u32) -> RepoResult<Vec<Restaurant>> {
        run_operation("restaurant.get_top_rated", format!("limit={limit}"), || {
            if limit == 0 {
                return Ok(Vec::new());
            }

            // Inner join: restaurants without reviews have no average and
            // never rank. Ties keep id order.
            let sql = format!(
                "SELECT {RESTAURANT_COLUMNS}, AVG(v.rating) AS average_rating
                 FROM restaurant r
                 INNER JOIN review v ON v.restaurant_id = r.id
                 GROUP BY r.id
                 ORDER BY average_rating DESC, r.id ASC
                 LIMIT ?1;"
            );
            self.load_assembled(&sql, vec![Value::Integer(i64::from(limit))])
        })
    }

    fn get_by_cuisine_types(&self, ids: &[CuisineTypeId]) -> RepoResult<Vec<Restaurant>> {
        run_operation(
            "restaurant.get_by_cuisine_types",
            format!("cuisine_type_ids={ids:?}"),
            || {
                let Some(predicate) = Predicate::id_in(PROPOSES_CUISINE_COLUMN, ids) else {
                    return Ok(Vec::new());
                };
                self.search(predicate, true)
            },
        )
    }

    fn get_by_name_substring(&self, text: &str) -> RepoResult<Vec<Restaurant>> {
        run_operation(
            "restaurant.get_by_name_substring",
            format!("text_len={}", text.chars().count()),
            || self.search(Predicate::contains("r.name", text), false),
        )
    }

    fn get_by_address(&self, address: &AddressCriteria) -> RepoResult<Vec<Restaurant>> {
        run_operation("restaurant.get_by_address", address_detail(address), || {
            self.search(address.to_predicate(), false)
        })
    }

    fn get_by_multiple_criteria(&self, criteria: &MultiCriteria) -> RepoResult<Vec<Restaurant>> {
        run_operation(
            "restaurant.get_by_multiple_criteria",
            format!(
                "name_len={} {} cuisine_type_ids={:?}",
                criteria.name.chars().count(),
                address_detail(&criteria.address),
                criteria.cuisine_type_ids
            ),
            || {
                let Some(predicate) = criteria.to_predicate() else {
                    return Ok(Vec::new());
                };
                self.search(predicate, true)
            },
        )
    }

    fn get_liked_by_user(&self, user_id: UserId) -> RepoResult<Vec<Restaurant>> {
        run_operation(
            "restaurant.get_liked_by_user",
            format!("user_id={user_id}"),
            || {
                let sql = format!(
                    "SELECT {RESTAURANT_COLUMNS}
                     FROM restaurant r
                     INNER JOIN likes l ON l.restaurant_id = r.id
                     WHERE l.user_id = ?1
                     ORDER BY r.name ASC, r.id ASC;"
                );
                self.load_bare(&sql, vec![Value::Integer(user_id)])
            },
        )
    }

    fn insert(&self, fields: &RestaurantFields) -> RepoResult<RestaurantId> {
        run_operation("restaurant.insert", String::new(), || {
            self.conn.execute(
                "INSERT INTO restaurant (
                    name,
                    street_number,
                    street_name,
                    postal_code,
                    city,
                    latitude,
                    longitude,
                    description,
                    opening_hours
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    fields.name.as_str(),
                    fields.street_number,
                    fields.street_name.as_str(),
                    fields.postal_code.as_str(),
                    fields.city.as_str(),
                    fields.latitude,
                    fields.longitude,
                    fields.description.as_str(),
                    fields.opening_hours.as_str(),
                ],
            )?;
            Ok(self.conn.last_insert_rowid())
        })
    }

    fn update(&self, id: RestaurantId, fields: &RestaurantFields) -> RepoResult<()> {
        run_operation(
            "restaurant.update",
            format!("restaurant_id={id}"),
            || {
                self.conn.execute(
                    "UPDATE restaurant
                     SET
                        name = ?1,
                        street_number = ?2,
                        street_name = ?3,
                        postal_code = ?4,
                        city = ?5,
                        latitude = ?6,
                        longitude = ?7,
                        description = ?8,
                        opening_hours = ?9
                     WHERE id = ?10;",
                    params![
                        fields.name.as_str(),
                        fields.street_number,
                        fields.street_name.as_str(),
                        fields.postal_code.as_str(),
                        fields.city.as_str(),
                        fields.latitude,
                        fields.longitude,
                        fields.description.as_str(),
                        fields.opening_hours.as_str(),
                        id,
                    ],
                )?;
                Ok(())
            },
        )
    }

    fn delete(&self, id: RestaurantId) -> RepoResult<()> {
        run_operation(
            "restaurant.delete",
            format!("restaurant_id={id}"),
            || {
                self.conn
                    .execute("DELETE FROM restaurant WHERE id = ?1;", [id])?;
                Ok(())
            },
        )
    }
}

/// Sizes of the address fields; the text itself stays out of logs and errors.
fn address_detail(address: &AddressCriteria) -> String {
    format!(
        "street_len={} postal_code_len={} city_len={}",
        address.street.chars().count(),
        address.postal_code.chars().count(),
        address.city.chars().count()
    )
}
