use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::User;

/// A marketplace product entry owned by a user
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::listings)]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Listing {
    pub id: i32,
    pub user_id: i32,
    pub product_name: String,
    pub product_category: String,
    pub product_description: String,
    pub product_quantity: String,
    pub product_price: String,
    pub country: String,
    pub market_name: String,
}

/// Insert shape for the `listings` table
///
/// Every product field is required; `user_id` must reference an existing user.
#[derive(Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::listings)]
pub struct NewListing {
    pub user_id: i32,
    pub product_name: String,
    pub product_category: String,
    pub product_description: String,
    pub product_quantity: String,
    pub product_price: String,
    pub country: String,
    pub market_name: String,
}

/// Partial update for a listing
///
/// `None` fields are skipped by diesel, so only the named fields are replaced.
/// Ownership and the identifier cannot be changed through it.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::listings)]
pub struct ListingChanges {
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub product_description: Option<String>,
    pub product_quantity: Option<String>,
    pub product_price: Option<String>,
    pub country: Option<String>,
    pub market_name: Option<String>,
}

impl ListingChanges {
    /// Returns true when no field would be written
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.product_category.is_none()
            && self.product_description.is_none()
            && self.product_quantity.is_none()
            && self.product_price.is_none()
            && self.country.is_none()
            && self.market_name.is_none()
    }
}
