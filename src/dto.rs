use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ApiError;
use crate::models::{ListingChanges, NewListing};



/// Message for a register/login request without any user fields
pub const NO_USER_DATA: &str = "No User Data";

/// Message for a register/login request with only one of the two fields
pub const MISSING_CREDENTIALS: &str = "Please provide username and password";

/// Message for a create/update listing request without any product fields
pub const NO_LISTING_DATA: &str = "No Listing Data";

/// The `{ message, data }` wrapper every successful response uses
///
/// Absent parts are omitted from the JSON rather than serialized as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Wraps a payload
    pub fn data(data: T) -> Self {
        Self { message: None, data: Some(data) }
    }
}

impl Envelope<()> {
    /// A message-only envelope
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), data: None }
    }
}

/// Body of a successful login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Validated username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Data transfer object for registering a user
///
/// Both fields are optional at the wire level so that omissions can be
/// reported with the API's own messages instead of a serde error.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct RegisterDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl RegisterDto {
    /// Checks that both credentials are present
    pub fn validate(self) -> Result<Credentials, ApiError> {
        require_credentials(self.username, self.password)
    }
}

/// Data transfer object for logging in
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct LoginDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginDto {
    /// Checks that both credentials are present
    pub fn validate(self) -> Result<Credentials, ApiError> {
        require_credentials(self.username, self.password)
    }
}

fn require_credentials(username: Option<String>, password: Option<String>) -> Result<Credentials, ApiError> {
    if username.is_none() && password.is_none() {
        return Err(ApiError::BadRequest(NO_USER_DATA.to_string()));
    }

    let username = username
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let password = password.filter(|password| !password.is_empty());

    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        _ => Err(ApiError::BadRequest(MISSING_CREDENTIALS.to_string())),
    }
}

/// A text field that clients may also send as a JSON number
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl LooseText {
    fn into_text(self) -> String {
        match self {
            LooseText::Text(text) => text,
            LooseText::Integer(number) => number.to_string(),
            LooseText::Float(number) => number.to_string(),
        }
    }
}

/// Deserializes an optional product field, accepting strings or numbers
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseText>::deserialize(deserializer)?.map(LooseText::into_text))
}

/// Data transfer object for creating or updating a listing
///
/// Creation requires every field; updates replace only the fields present.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingDto {
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,

    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,

    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub product_quantity: Option<String>,

    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub product_price: Option<String>,

    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,
}

impl ListingDto {
    fn fields(&self) -> [(&'static str, &Option<String>); 7] {
        [
            ("product_name", &self.product_name),
            ("product_category", &self.product_category),
            ("product_description", &self.product_description),
            ("product_quantity", &self.product_quantity),
            ("product_price", &self.product_price),
            ("country", &self.country),
            ("market_name", &self.market_name),
        ]
    }

    /// Returns true when the payload names no field at all
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Names of the fields that are absent or blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|text| text.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Names of the fields that are present but blank
    pub fn blank_fields(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|(_, value)| value.as_deref().is_some_and(|text| text.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Validates a creation payload into an insertable listing for `user_id`
    pub fn into_new_listing(self, user_id: i32) -> Result<NewListing, ApiError> {
        if self.is_empty() {
            return Err(ApiError::BadRequest(NO_LISTING_DATA.to_string()));
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(NewListing {
            user_id,
            product_name: self.product_name.unwrap_or_default(),
            product_category: self.product_category.unwrap_or_default(),
            product_description: self.product_description.unwrap_or_default(),
            product_quantity: self.product_quantity.unwrap_or_default(),
            product_price: self.product_price.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            market_name: self.market_name.unwrap_or_default(),
        })
    }

    /// Validates an update payload into the set of columns to replace
    pub fn into_changes(self) -> Result<ListingChanges, ApiError> {
        if self.is_empty() {
            return Err(ApiError::BadRequest(NO_LISTING_DATA.to_string()));
        }

        let blank = self.blank_fields();
        if !blank.is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Fields cannot be blank: {}",
                blank.join(", ")
            )));
        }

        Ok(ListingChanges {
            product_name: self.product_name,
            product_category: self.product_category,
            product_description: self.product_description,
            product_quantity: self.product_quantity,
            product_price: self.product_price,
            country: self.country,
            market_name: self.market_name,
        })
    }
}
