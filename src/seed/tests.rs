use super::*;
use crate::repo::{self, tests::setup_test_db};
use crate::test_utils::test_hasher;

#[test]
fn test_seed_fixture_counts() {
    let pool = setup_test_db();
    reseed(&pool, &test_hasher()).unwrap();

    assert_eq!(repo::list_users(&pool).unwrap().len(), 9);
    assert_eq!(repo::list_listings(&pool).unwrap().len(), 27);
}

#[test]
fn test_seed_first_user_is_busia() {
    let pool = setup_test_db();
    let hasher = test_hasher();
    reseed(&pool, &hasher).unwrap();

    let user = repo::get_user(&pool, 1).unwrap().unwrap();
    assert_eq!(user.get_username(), "BusiaMarket");
    assert!(hasher.verify(SEED_PASSWORD, user.get_password_hash()));
    assert!(!hasher.verify("wrong", user.get_password_hash()));
}

#[test]
fn test_seed_listing_ownership() {
    let pool = setup_test_db();
    reseed(&pool, &test_hasher()).unwrap();

    for user in repo::list_users(&pool).unwrap() {
        let n = user.get_id();
        let ids: Vec<i32> = repo::list_listings_for_user(&pool, &user)
            .unwrap()
            .iter()
            .map(|listing| listing.id)
            .collect();
        assert_eq!(ids, vec![3 * n - 2, 3 * n - 1, 3 * n]);
    }
}

#[test]
fn test_seed_prices_carry_currency() {
    let pool = setup_test_db();
    reseed(&pool, &test_hasher()).unwrap();

    let kenyan = repo::get_listing(&pool, 1).unwrap().unwrap();
    assert_eq!(kenyan.country, "Kenya");
    assert!(kenyan.product_price.starts_with("KES "));

    let tanzanian = repo::get_listing(&pool, 27).unwrap().unwrap();
    assert_eq!(tanzanian.market_name, "Dodoma");
    assert!(tanzanian.product_price.starts_with("TZS "));
}

/// Reseeding after writes restores the same ids and counts
#[test]
fn test_reseed_is_repeatable() {
    let pool = setup_test_db();
    let hasher = test_hasher();
    reseed(&pool, &hasher).unwrap();

    repo::create_user(&pool, "Extra".to_string(), "hash".to_string()).unwrap();
    reseed(&pool, &hasher).unwrap();

    let users = repo::list_users(&pool).unwrap();
    assert_eq!(users.len(), 9);
    assert_eq!(users[0].get_id(), 1);
    assert_eq!(users[8].get_id(), 9);
    assert_eq!(repo::list_listings(&pool).unwrap().last().unwrap().id, 27);
}

#[test]
fn test_reset_empties_tables() {
    let pool = setup_test_db();
    reseed(&pool, &test_hasher()).unwrap();

    reset(&pool).unwrap();

    assert!(repo::list_users(&pool).unwrap().is_empty());
    assert!(repo::list_listings(&pool).unwrap().is_empty());
}
