/// Credential handling
///
/// Password hashing for stored users and the signed session tokens handed
/// out at login.

mod password;
pub use password::{HashParams, PasswordHasher};

mod token;
pub use token::{generate_secret, Claims, TokenIssuer};
