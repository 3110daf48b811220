use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Represents a registered user
///
/// The password column holds an argon2 PHC string and is never serialized,
/// so a `User` can be returned from any endpoint as-is.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Store-assigned identifier
    id: i32,

    /// Unique login name
    username: String,

    /// Hashed credential
    #[serde(skip_serializing, default)]
    password: String,
}

impl User {
    /// Gets the user's ID
    pub fn get_id(&self) -> i32 {
        self.id
    }

    /// Gets the user's username
    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Gets the stored password hash
    pub fn get_password_hash(&self) -> &str {
        &self.password
    }
}

/// Insert shape for the `users` table
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    /// Creates a new user row from a username and an already hashed password
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password: password_hash,
        }
    }
}
