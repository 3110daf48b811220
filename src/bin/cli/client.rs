use marketplace::dto::{Envelope, ListingDto, LoginDto, LoginResponse, RegisterDto};
use marketplace::models::{Listing, User};
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error type for CLI client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server returned an error status with a message body
    #[error("Server error ({}): {message}", status.as_u16())]
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// Server answered with a success status but no `data` field
    #[error("Server response did not contain any data")]
    MissingData,
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's `message` body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client wrapper for communicating with the marketplace server
pub struct MarketplaceClient {
    /// The base URL of the server (e.g. "http://127.0.0.1:5000")
    base_url: String,
    /// Token sent with market requests, if any
    token: Option<String>,
    /// The underlying HTTP client
    client: Client,
}

impl MarketplaceClient {
    /// Creates a new MarketplaceClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the marketplace server
    /// * `token` - A token from `login`, required by the listing commands
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn data<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?.check().await?;
        let envelope: Envelope<T> = response.json().await?;
        envelope.data.ok_or(ClientError::MissingData)
    }

    // ── System ───────────────────────────────────────────────────────

    /// Returns the server's liveness message
    pub async fn status(&self) -> Result<String, ClientError> {
        let response = self.client.get(self.url("/")).send().await?.check().await?;
        let envelope: Envelope<()> = response.json().await?;
        Ok(envelope.message.unwrap_or_default())
    }

    // ── Auth endpoints ───────────────────────────────────────────────

    /// Lists all registered users
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        Self::data(self.client.get(self.url("/api/auth"))).await
    }

    /// Registers a new user
    pub async fn register(&self, username: String, password: String) -> Result<User, ClientError> {
        let dto = RegisterDto {
            username: Some(username),
            password: Some(password),
        };
        Self::data(self.client.post(self.url("/api/auth/register")).json(&dto)).await
    }

    /// Exchanges credentials for a token
    pub async fn login(&self, username: String, password: String) -> Result<LoginResponse, ClientError> {
        let dto = LoginDto {
            username: Some(username),
            password: Some(password),
        };
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&dto)
            .send()
            .await?
            .check()
            .await?;
        Ok(response.json().await?)
    }

    // ── Market endpoints ─────────────────────────────────────────────

    /// Lists every listing
    pub async fn list_listings(&self) -> Result<Vec<Listing>, ClientError> {
        Self::data(self.authorized(self.client.get(self.url("/api/market")))).await
    }

    /// Gets a listing by ID
    pub async fn get_listing(&self, id: i32) -> Result<Listing, ClientError> {
        let url = self.url(&format!("/api/market/{}", id));
        Self::data(self.authorized(self.client.get(url))).await
    }

    /// Gets the first listing owned by a user
    pub async fn get_listing_for_user(&self, user_id: i32) -> Result<Listing, ClientError> {
        let url = self.url(&format!("/api/market/user/{}", user_id));
        Self::data(self.authorized(self.client.get(url))).await
    }

    /// Creates a listing owned by a user
    pub async fn create_listing(&self, user_id: i32, dto: &ListingDto) -> Result<Listing, ClientError> {
        let url = self.url(&format!("/api/market/user/{}", user_id));
        Self::data(self.authorized(self.client.post(url).json(dto))).await
    }

    /// Replaces the given fields of a listing
    pub async fn update_listing(&self, id: i32, dto: &ListingDto) -> Result<Listing, ClientError> {
        let url = self.url(&format!("/api/market/{}", id));
        Self::data(self.authorized(self.client.put(url).json(dto))).await
    }
}
