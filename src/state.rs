use std::sync::Arc;

use axum::extract::FromRef;

use crate::db::DbPool;
use crate::security::{PasswordHasher, TokenIssuer};

/// Shared handles injected into every handler
///
/// Handlers that only touch the store keep extracting `State<Arc<DbPool>>`,
/// which the `FromRef` impl below projects out of the full state.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub hasher: Arc<PasswordHasher>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(pool: Arc<DbPool>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            pool,
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
        }
    }
}

impl FromRef<AppState> for Arc<DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
