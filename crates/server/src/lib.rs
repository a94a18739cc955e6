//! Tourist Webhook Server
//!
//! Serves the Dialogflow fulfilment webhook over HTTP.

pub mod http;
pub mod metrics;
pub mod state;

pub use self::http::{create_router, emit};
pub use self::metrics::{init_metrics, record_request};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use tourist_webhook_config::{StoreBackend, StoreConfig};
use tourist_webhook_persistence::{
    init_firebase, FirebaseConfig, InMemoryRecordStore, PersistenceError, RecordStore,
};

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            ServerError::Store(_) => axum::http::StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Config(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let body = axum::Json(serde_json::json!({ "error": self.to_string() }));
        (axum::http::StatusCode::from(self), body).into_response()
    }
}

/// Build the configured record store backend
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>, ServerError> {
    match config.backend {
        StoreBackend::Firebase => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| ServerError::Config("store.database_url is required".to_string()))?;

            let mut firebase = FirebaseConfig::new(url)
                .with_request_timeout(Duration::from_millis(config.query_timeout_ms));
            if let Some(token) = &config.auth_token {
                firebase = firebase.with_auth_token(token.as_str());
            }

            Ok(Arc::new(init_firebase(firebase)?))
        },
        StoreBackend::Memory => match &config.seed_path {
            Some(path) => Ok(Arc::new(InMemoryRecordStore::load_seed(path)?)),
            None => {
                tracing::warn!("Memory store without seed_path; every query will be empty");
                Ok(Arc::new(InMemoryRecordStore::new()))
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            StatusCode::from(ServerError::InvalidRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StatusCode::from(ServerError::Store(PersistenceError::Http("refused".to_string()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_build_store_backends() {
        let memory = build_store(&StoreConfig::default()).unwrap();
        assert_eq!(memory.backend_name(), "memory");

        let firebase = build_store(&StoreConfig {
            backend: StoreBackend::Firebase,
            database_url: Some("https://latacunga.firebaseio.com".to_string()),
            auth_token: Some("secret".to_string()),
            ..StoreConfig::default()
        })
        .unwrap();
        assert_eq!(firebase.backend_name(), "firebase");

        let missing_url = build_store(&StoreConfig {
            backend: StoreBackend::Firebase,
            ..StoreConfig::default()
        });
        assert!(matches!(missing_url, Err(ServerError::Config(_))));

        let missing_seed = build_store(&StoreConfig {
            seed_path: Some("/nonexistent/seed.json".to_string()),
            ..StoreConfig::default()
        });
        assert!(matches!(missing_seed, Err(ServerError::Store(_))));
    }
}
