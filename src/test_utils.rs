use std::sync::Arc;

use chrono::Duration;
use diesel::sql_types::Text;
use diesel::{QueryableByName, RunQueryDsl};
use proptest::prelude::*;

use crate::dto::ListingDto;
use crate::models::{ListingChanges, NewListing};
use crate::repo::tests::setup_test_db;
use crate::security::{HashParams, PasswordHasher, TokenIssuer};
use crate::seed;
use crate::state::AppState;

/// Secret used for every token signed in tests
pub const TEST_SECRET: &[u8] = b"test-secret-do-not-use-elsewhere";

/// Argon2 parameters small enough to keep hashing out of test runtimes
pub fn cheap_hash_params() -> HashParams {
    HashParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(cheap_hash_params()).expect("Failed to build test hasher")
}

pub fn test_token_issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, Duration::hours(1))
}

/// Application state over a fresh, empty database
pub fn setup_test_state() -> AppState {
    AppState::new(setup_test_db(), test_hasher(), test_token_issuer())
}

/// Application state over a fresh database holding the fixture
///
/// Users 1..=9 and listings 1..=27, every user with password
/// [`seed::SEED_PASSWORD`].
pub fn setup_seeded_state() -> AppState {
    let state = setup_test_state();
    seed::reseed(&state.pool, &state.hasher).expect("Failed to seed test database");
    state
}

/// Shorthand for handlers that only need the pool
pub fn seeded_pool() -> Arc<crate::db::DbPool> {
    setup_seeded_state().pool
}

#[derive(QueryableByName, Debug)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Migrations create both tables on the unique in-memory database
#[test]
fn test_setup_test_db_has_tables() {
    let pool = setup_test_db();
    let mut conn = pool.get().unwrap();

    let tables: Vec<TableName> = diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
        .load(&mut conn)
        .expect("Failed to load table names");
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();

    assert!(names.contains(&"users"));
    assert!(names.contains(&"listings"));
}

/// Two test databases never see each other's rows
#[test]
fn test_setup_test_db_isolated() {
    let first = setup_test_db();
    let second = setup_test_db();

    crate::repo::create_user(&first, "Only here".to_string(), "hash".to_string()).unwrap();

    assert_eq!(crate::repo::list_users(&first).unwrap().len(), 1);
    assert!(crate::repo::list_users(&second).unwrap().is_empty());
}

// ============================================================================
// Strategies
// ============================================================================

/// Non-blank product text, mixing plain ASCII with arbitrary printable unicode
pub fn arb_product_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9][A-Za-z0-9 ,.'&-]{0,39}",
        "\\PC{1,40}".prop_filter("must contain a non-space character", |s| !s.trim().is_empty()),
    ]
}

/// A product field as a client might send it: valid, blank, or left out
fn arb_dto_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => arb_product_text().prop_map(Some),
        1 => prop_oneof![Just(String::new()), Just("   ".to_string())].prop_map(Some),
        2 => Just(None),
    ]
}

/// Generates listing payloads ranging from empty to complete
pub fn arb_listing_dto() -> impl Strategy<Value = ListingDto> {
    (
        arb_dto_field(),
        arb_dto_field(),
        arb_dto_field(),
        arb_dto_field(),
        arb_dto_field(),
        arb_dto_field(),
        arb_dto_field(),
    )
        .prop_map(
            |(
                product_name,
                product_category,
                product_description,
                product_quantity,
                product_price,
                country,
                market_name,
            )| ListingDto {
                product_name,
                product_category,
                product_description,
                product_quantity,
                product_price,
                country,
                market_name,
            },
        )
}

/// Generates a complete listing; `user_id` is left at 0 for the caller to fill
pub fn arb_new_listing() -> impl Strategy<Value = NewListing> {
    (
        arb_product_text(),
        arb_product_text(),
        arb_product_text(),
        arb_product_text(),
        arb_product_text(),
        arb_product_text(),
        arb_product_text(),
    )
        .prop_map(
            |(
                product_name,
                product_category,
                product_description,
                product_quantity,
                product_price,
                country,
                market_name,
            )| NewListing {
                user_id: 0,
                product_name,
                product_category,
                product_description,
                product_quantity,
                product_price,
                country,
                market_name,
            },
        )
}

/// Generates a set of column replacements, possibly empty
pub fn arb_listing_changes() -> impl Strategy<Value = ListingChanges> {
    let field = || prop::option::of(arb_product_text());
    (field(), field(), field(), field(), field(), field(), field()).prop_map(
        |(
            product_name,
            product_category,
            product_description,
            product_quantity,
            product_price,
            country,
            market_name,
        )| ListingChanges {
            product_name,
            product_category,
            product_description,
            product_quantity,
            product_price,
            country,
            market_name,
        },
    )
}
