/// Data models module
///
/// This module defines the rows stored in the database and the insert/update
/// shapes used by the repository layer.

mod user;
pub use user::{NewUser, User};

mod listing;
pub use listing::{Listing, ListingChanges, NewListing};
