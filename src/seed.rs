//! Fixture data for development servers and tests
//!
//! `reseed` wipes both tables and loads nine market users, each owning three
//! listings, so user IDs run 1..=9 and listing IDs 1..=27 with listings
//! `3n-2..=3n` owned by user `n`.

use anyhow::{Context, Result};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::models::{NewListing, NewUser};
use crate::schema::{listings, users};
use crate::security::PasswordHasher;

#[cfg(test)]
mod tests;

/// Password shared by every fixture user
pub const SEED_PASSWORD: &str = "password";

/// (username, market, country) for each fixture user, in ID order
pub const SEED_MARKETS: [(&str, &str, &str); 9] = [
    ("BusiaMarket", "Busia", "Kenya"),
    ("KisumuMarket", "Kisumu", "Kenya"),
    ("NairobiMarket", "Nairobi", "Kenya"),
    ("KampalaMarket", "Kampala", "Uganda"),
    ("JinjaMarket", "Jinja", "Uganda"),
    ("GuluMarket", "Gulu", "Uganda"),
    ("KigaliMarket", "Kigali", "Rwanda"),
    ("ArushaMarket", "Arusha", "Tanzania"),
    ("DodomaMarket", "Dodoma", "Tanzania"),
];

/// (name, category, description, quantity, unit price) cycled through the markets
const SEED_PRODUCTS: [(&str, &str, &str, &str, &str); 27] = [
    ("Maize", "Cereals", "White maize, sun dried", "90 kg", "3,200"),
    ("Beans", "Legumes", "Red kidney beans", "50 kg", "4,500"),
    ("Tilapia", "Fish", "Fresh lake tilapia", "20 kg", "6,000"),
    ("Sorghum", "Cereals", "Red sorghum grain", "90 kg", "2,900"),
    ("Groundnuts", "Seeds & Nuts", "Shelled groundnuts", "25 kg", "5,100"),
    ("Sukuma Wiki", "Vegetables", "Fresh kale bundles", "40 bundles", "800"),
    ("Tea", "Beverages", "Black CTC tea", "10 kg", "3,800"),
    ("Avocados", "Fruits", "Hass avocados", "100 pieces", "1,500"),
    ("Milk", "Animal Products", "Fresh cow milk", "50 litres", "2,750"),
    ("Matooke", "Fruits", "Green cooking bananas", "1 bunch", "25,000"),
    ("Coffee", "Beverages", "Robusta green beans", "60 kg", "420,000"),
    ("Cassava", "Roots & Tubers", "Fresh cassava roots", "100 kg", "90,000"),
    ("Millet", "Cereals", "Finger millet", "50 kg", "150,000"),
    ("Sugar", "Processed Foods", "Brown cane sugar", "50 kg", "210,000"),
    ("Rice", "Cereals", "Kaiso rice", "25 kg", "95,000"),
    ("Sesame", "Seeds & Nuts", "White sesame seed", "50 kg", "280,000"),
    ("Shea Butter", "Processed Foods", "Unrefined shea butter", "5 kg", "60,000"),
    ("Pumpkins", "Vegetables", "Whole pumpkins", "10 pieces", "30,000"),
    ("Irish Potatoes", "Roots & Tubers", "Kinigi potatoes", "100 kg", "35,000"),
    ("Honey", "Animal Products", "Raw forest honey", "10 litres", "40,000"),
    ("Pineapples", "Fruits", "Sweet pineapples", "30 pieces", "15,000"),
    ("Onions", "Vegetables", "Red bulb onions", "50 kg", "85,000"),
    ("Tomatoes", "Vegetables", "Ripe plum tomatoes", "30 kg", "45,000"),
    ("Cashew Nuts", "Seeds & Nuts", "Raw cashew nuts", "40 kg", "160,000"),
    ("Sunflower Oil", "Processed Foods", "Cold pressed oil", "20 litres", "95,000"),
    ("Mangoes", "Fruits", "Apple mangoes", "80 pieces", "24,000"),
    ("Eggs", "Animal Products", "Tray of farm eggs", "10 trays", "90,000"),
];

/// Number of fixture users
pub const SEED_USER_COUNT: usize = SEED_MARKETS.len();

/// Number of fixture listings
pub const SEED_LISTING_COUNT: usize = SEED_PRODUCTS.len();

fn currency(country: &str) -> &'static str {
    match country {
        "Kenya" => "KES",
        "Uganda" => "UGX",
        "Rwanda" => "RWF",
        "Tanzania" => "TZS",
        _ => "USD",
    }
}

/// Deletes every listing and user and restarts ID assignment at 1
#[instrument(skip(pool))]
pub fn reset(pool: &DbPool) -> Result<()> {
    let conn = &mut pool.get()?;

    conn.batch_execute(
        "DELETE FROM listings;
         DELETE FROM users;
         DELETE FROM sqlite_sequence WHERE name IN ('listings', 'users');",
    )
    .context("Failed to clear fixture tables")?;

    info!("Cleared users and listings");
    Ok(())
}

/// Inserts the fixture users and listings in a single transaction
///
/// Expects empty tables; run [`reset`] first (or use [`reseed`]).
#[instrument(skip(pool, hasher))]
pub fn seed_fixture(pool: &DbPool, hasher: &PasswordHasher) -> Result<()> {
    let mut new_users = Vec::with_capacity(SEED_USER_COUNT);
    for (username, _, _) in SEED_MARKETS {
        let hash = hasher
            .hash(SEED_PASSWORD)
            .map_err(|e| anyhow::anyhow!("Failed to hash fixture password: {}", e))?;
        new_users.push(NewUser::new(username.to_string(), hash));
    }

    let conn = &mut pool.get()?;
    conn.transaction::<_, anyhow::Error, _>(|conn| {
        let mut user_ids = Vec::with_capacity(new_users.len());
        for new_user in &new_users {
            let id: i32 = diesel::insert_into(users::table)
                .values(new_user)
                .returning(users::id)
                .get_result(conn)?;
            user_ids.push(id);
        }

        let per_user = SEED_LISTING_COUNT / SEED_USER_COUNT;
        let new_listings: Vec<NewListing> = SEED_PRODUCTS
            .iter()
            .enumerate()
            .map(|(index, (name, category, description, quantity, price))| {
                let owner = index / per_user;
                let (_, market, country) = SEED_MARKETS[owner];
                NewListing {
                    user_id: user_ids[owner],
                    product_name: name.to_string(),
                    product_category: category.to_string(),
                    product_description: description.to_string(),
                    product_quantity: quantity.to_string(),
                    product_price: format!("{} {}", currency(country), price),
                    country: country.to_string(),
                    market_name: market.to_string(),
                }
            })
            .collect();

        diesel::insert_into(listings::table)
            .values(&new_listings)
            .execute(conn)?;

        Ok(())
    })?;

    info!(users = SEED_USER_COUNT, listings = SEED_LISTING_COUNT, "Seeded fixture");
    Ok(())
}

/// Resets both tables and loads the fixture
pub fn reseed(pool: &DbPool, hasher: &PasswordHasher) -> Result<()> {
    reset(pool)?;
    seed_fixture(pool, hasher)
}
