use axum::Json;
use tracing::instrument;

use crate::dto::Envelope;

/// Handler for the health check at `/`
#[instrument]
pub async fn root_handler() -> Json<Envelope<()>> {
    Json(Envelope::message("API is running"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_handler() {
        let Json(body) = root_handler().await;
        assert_eq!(body.message.as_deref(), Some("API is running"));
        assert!(body.data.is_none());
    }
}
