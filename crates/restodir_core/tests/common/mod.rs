#![allow(dead_code)]

use restodir_core::db::open_db_in_memory;
use restodir_core::{CuisineTypeId, PhotoId, RestaurantId, ReviewId, UserId};
use rusqlite::{params, Connection};

pub fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn insert_restaurant(
    conn: &Connection,
    name: &str,
    street_name: &str,
    postal_code: &str,
    city: &str,
) -> RestaurantId {
    conn.execute(
        "INSERT INTO restaurant (name, street_number, street_name, postal_code, city)
         VALUES (?1, 1, ?2, ?3, ?4);",
        params![name, street_name, postal_code, city],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_restaurant_with_id(conn: &Connection, id: RestaurantId, name: &str) {
    conn.execute(
        "INSERT INTO restaurant (id, name, street_name, postal_code, city)
         VALUES (?1, ?2, 'rue Crebillon', '44000', 'Nantes');",
        params![id, name],
    )
    .unwrap();
}

pub fn insert_user(conn: &Connection, email: &str, pseudo: &str, is_admin: bool) -> UserId {
    conn.execute(
        "INSERT INTO user (email, pseudo, is_admin) VALUES (?1, ?2, ?3);",
        params![email, pseudo, i64::from(is_admin)],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_cuisine_type(conn: &Connection, label: &str) -> CuisineTypeId {
    conn.execute("INSERT INTO cuisine_type (label) VALUES (?1);", [label])
        .unwrap();
    conn.last_insert_rowid()
}

pub fn propose(conn: &Connection, restaurant_id: RestaurantId, cuisine_type_id: CuisineTypeId) {
    conn.execute(
        "INSERT INTO proposes (restaurant_id, cuisine_type_id) VALUES (?1, ?2);",
        params![restaurant_id, cuisine_type_id],
    )
    .unwrap();
}

pub fn prefer(conn: &Connection, user_id: UserId, cuisine_type_id: CuisineTypeId) {
    conn.execute(
        "INSERT INTO prefers (user_id, cuisine_type_id) VALUES (?1, ?2);",
        params![user_id, cuisine_type_id],
    )
    .unwrap();
}

pub fn like(conn: &Connection, restaurant_id: RestaurantId, user_id: UserId) {
    conn.execute(
        "INSERT INTO likes (restaurant_id, user_id) VALUES (?1, ?2);",
        params![restaurant_id, user_id],
    )
    .unwrap();
}

pub fn add_review(
    conn: &Connection,
    restaurant_id: RestaurantId,
    user_id: UserId,
    rating: i64,
    comment: Option<&str>,
) -> ReviewId {
    conn.execute(
        "INSERT INTO review (restaurant_id, user_id, rating, comment) VALUES (?1, ?2, ?3, ?4);",
        params![restaurant_id, user_id, rating, comment],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn add_photo(conn: &Connection, restaurant_id: RestaurantId, path: &str) -> PhotoId {
    conn.execute(
        "INSERT INTO photo (path, restaurant_id) VALUES (?1, ?2);",
        params![path, restaurant_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}
