mod common;

use common::*;
use restodir_core::db::migrations::latest_version;
use restodir_core::{
    AddressCriteria, CuisineTypeRepository, PhotoRepository, RepoError, RestaurantRepository,
    ReviewRepository, SqliteCuisineTypeRepository, SqlitePhotoRepository,
    SqliteRestaurantRepository, SqliteReviewRepository,
};
use rusqlite::Connection;
use std::error::Error;

#[test]
fn get_by_id_assembles_every_association() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    let other_id = insert_restaurant(&conn, "Pizzeria Roma", "quai de la Fosse", "44100", "Nantes");
    let french = insert_cuisine_type(&conn, "French");
    let bistro = insert_cuisine_type(&conn, "Bistro");
    let italian = insert_cuisine_type(&conn, "Italian");
    propose(&conn, restaurant_id, french);
    propose(&conn, restaurant_id, bistro);
    propose(&conn, other_id, italian);
    add_photo(&conn, restaurant_id, "photos/central-1.jpg");
    add_photo(&conn, restaurant_id, "photos/central-2.jpg");
    add_photo(&conn, other_id, "photos/roma.jpg");
    let alice = insert_user(&conn, "alice@example.com", "alice", false);
    let bob = insert_user(&conn, "bob@example.com", "bob", true);
    add_review(&conn, restaurant_id, alice, 4, Some("good"));
    add_review(&conn, restaurant_id, bob, 5, None);
    add_review(&conn, other_id, alice, 2, Some("meh"));

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let restaurant = repo.get_by_id(restaurant_id).unwrap().unwrap();

    assert_eq!(restaurant.name, "Le Central");
    assert_eq!(restaurant.city, "Nantes");

    let labels: Vec<_> = restaurant
        .cuisine_types
        .iter()
        .map(|cuisine| cuisine.label.as_str())
        .collect();
    assert_eq!(labels, ["Bistro", "French"]);

    let paths: Vec<_> = restaurant
        .photos
        .iter()
        .map(|photo| photo.path.as_str())
        .collect();
    assert_eq!(paths, ["photos/central-1.jpg", "photos/central-2.jpg"]);
    assert!(restaurant
        .photos
        .iter()
        .all(|photo| photo.restaurant_id == restaurant_id));

    assert_eq!(restaurant.reviews.len(), 2);
    assert_eq!(restaurant.reviews[0].author.pseudo, "alice");
    assert_eq!(restaurant.reviews[0].comment.as_deref(), Some("good"));
    assert_eq!(restaurant.reviews[1].author.pseudo, "bob");
    assert!(restaurant.reviews[1].author.is_admin);
    assert_eq!(restaurant.average_rating(), Some(4.5));
}

#[test]
fn assembled_associations_match_child_repositories() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    let french = insert_cuisine_type(&conn, "French");
    propose(&conn, restaurant_id, french);
    add_photo(&conn, restaurant_id, "photos/central.jpg");
    let alice = insert_user(&conn, "alice@example.com", "alice", false);
    add_review(&conn, restaurant_id, alice, 3, None);

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let restaurant = repo.get_by_id(restaurant_id).unwrap().unwrap();

    let cuisine_types = SqliteCuisineTypeRepository::try_new(&conn)
        .unwrap()
        .get_all_by_restaurant_id(restaurant_id)
        .unwrap();
    let photos = SqlitePhotoRepository::try_new(&conn)
        .unwrap()
        .get_all_by_restaurant_id(restaurant_id)
        .unwrap();
    let reviews = SqliteReviewRepository::try_new(&conn)
        .unwrap()
        .get_all_by_restaurant_id(restaurant_id)
        .unwrap();

    assert_eq!(restaurant.cuisine_types, cuisine_types);
    assert_eq!(restaurant.photos, photos);
    assert_eq!(restaurant.reviews, reviews);
}

#[test]
fn review_authors_never_carry_associations() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    let french = insert_cuisine_type(&conn, "French");
    let alice = insert_user(&conn, "alice@example.com", "alice", false);
    like(&conn, restaurant_id, alice);
    prefer(&conn, alice, french);
    add_review(&conn, restaurant_id, alice, 5, Some("again"));

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    for restaurant in repo.get_all().unwrap() {
        for review in &restaurant.reviews {
            let author = serde_json::to_value(&review.author).unwrap();
            let keys: Vec<_> = author.as_object().unwrap().keys().cloned().collect();
            assert_eq!(keys.len(), 4, "unexpected author fields: {keys:?}");
            assert!(author.get("liked_restaurant_ids").is_none());
            assert!(author.get("preferred_cuisine_types").is_none());
        }
    }
}

#[test]
fn missing_restaurant_is_none() {
    let conn = setup();
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    assert!(repo.get_by_id(404).unwrap().is_none());
}

#[test]
fn restaurant_without_children_has_empty_associations() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Chez Nous", "rue Kervegan", "44000", "Nantes");
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();

    let restaurant = repo.get_by_id(restaurant_id).unwrap().unwrap();
    assert!(restaurant.cuisine_types.is_empty());
    assert!(restaurant.photos.is_empty());
    assert!(restaurant.reviews.is_empty());
}

#[test]
fn get_all_returns_every_restaurant_assembled() {
    let conn = setup();
    let first = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    let second = insert_restaurant(&conn, "Pizzeria Roma", "quai de la Fosse", "44100", "Nantes");
    add_photo(&conn, second, "photos/roma.jpg");

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let all = repo.get_all().unwrap();

    let ids: Vec<_> = all.iter().map(|restaurant| restaurant.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first));
    assert!(ids.contains(&second));
    let roma = all.iter().find(|restaurant| restaurant.id == second).unwrap();
    assert_eq!(roma.photos.len(), 1);
}

#[test]
fn liked_restaurants_are_partial_loads() {
    let conn = setup();
    let liked = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    insert_restaurant(&conn, "Pizzeria Roma", "quai de la Fosse", "44100", "Nantes");
    let french = insert_cuisine_type(&conn, "French");
    propose(&conn, liked, french);
    add_photo(&conn, liked, "photos/central.jpg");
    let alice = insert_user(&conn, "alice@example.com", "alice", false);
    add_review(&conn, liked, alice, 4, None);
    like(&conn, liked, alice);

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let summaries = repo.get_liked_by_user(alice).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, liked);
    assert!(summaries[0].cuisine_types.is_empty());
    assert!(summaries[0].photos.is_empty());
    assert!(summaries[0].reviews.is_empty());

    let full = repo.get_by_id(liked).unwrap().unwrap();
    assert_eq!(full.cuisine_types.len(), 1);
    assert_eq!(full.photos.len(), 1);
    assert_eq!(full.reviews.len(), 1);
}

#[test]
fn dangling_review_author_fails_the_whole_assembly() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
    add_review(&conn, restaurant_id, 999, 4, None);

    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    let err = repo.get_by_id(restaurant_id).unwrap_err();

    assert!(matches!(err, RepoError::Nested { .. }));
    assert_eq!(err.operation(), Some("restaurant.get_by_id"));
    let cause = err.root_cause();
    assert!(matches!(cause, RepoError::Mapping { .. }));
    assert_eq!(cause.operation(), Some("review.get_all_by_restaurant_id"));
}

#[test]
fn storage_failure_is_wrapped_with_operation_and_cause() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE photo;").unwrap();

    let err = repo.get_by_id(restaurant_id).unwrap_err();
    assert_eq!(err.operation(), Some("restaurant.get_by_id"));
    let expected_detail = format!("restaurant_id={restaurant_id}");
    assert_eq!(err.detail(), Some(expected_detail.as_str()));

    match err.root_cause() {
        RepoError::DataAccess {
            operation, detail, ..
        } => {
            assert_eq!(*operation, "photo.get_all_by_restaurant_id");
            assert_eq!(detail, &expected_detail);
        }
        other => panic!("unexpected error: {other}"),
    }
    let nested = err.source().unwrap();
    assert!(nested.source().is_some());
}

#[test]
fn child_failure_keeps_outer_query_parameters() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    let alice = insert_user(&conn, "alice@example.com", "alice", false);
    add_review(&conn, restaurant_id, alice, 4, None);
    let repo = SqliteRestaurantRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE photo;").unwrap();

    let top = repo.get_top_rated(4).unwrap_err();
    assert_eq!(top.operation(), Some("restaurant.get_top_rated"));
    assert_eq!(top.detail(), Some("limit=4"));
    assert_eq!(
        top.root_cause().operation(),
        Some("photo.get_all_by_restaurant_id")
    );

    let address = repo
        .get_by_address(&AddressCriteria::new("crebillon", "", "Nantes"))
        .unwrap_err();
    assert_eq!(address.operation(), Some("restaurant.get_by_address"));
    assert_eq!(
        address.detail(),
        Some("street_len=9 postal_code_len=0 city_len=6")
    );
    assert!(!address.to_string().contains("crebillon"));
}

#[test]
fn average_rating_is_none_without_reviews() {
    let conn = setup();
    insert_restaurant_with_id(&conn, 7, "Le Central");
    insert_restaurant_with_id(&conn, 8, "Chez Nous");
    let alice = insert_user(&conn, "alice@example.com", "alice", false);
    let bob = insert_user(&conn, "bob@example.com", "bob", false);
    add_review(&conn, 7, alice, 4, None);
    add_review(&conn, 7, bob, 5, None);

    let reviews = SqliteReviewRepository::try_new(&conn).unwrap();
    assert_eq!(reviews.average_rating_by_restaurant_id(7).unwrap(), Some(4.5));
    assert_eq!(reviews.average_rating_by_restaurant_id(8).unwrap(), None);
    assert_eq!(reviews.average_rating_by_restaurant_id(404).unwrap(), None);
}

#[test]
fn cuisine_type_reference_list_is_ordered_by_label() {
    let conn = setup();
    let restaurant_id = insert_restaurant(&conn, "Le Central", "rue Crebillon", "44000", "Nantes");
    insert_cuisine_type(&conn, "Italian");
    let french = insert_cuisine_type(&conn, "French");
    insert_cuisine_type(&conn, "American");
    propose(&conn, restaurant_id, french);

    let cuisine_types = SqliteCuisineTypeRepository::try_new(&conn).unwrap();
    let labels: Vec<_> = cuisine_types
        .get_all()
        .unwrap()
        .into_iter()
        .map(|cuisine| cuisine.label)
        .collect();
    assert_eq!(labels, ["American", "French", "Italian"]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRestaurantRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        }) => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("uninitialized connection must be rejected"),
    }
}
