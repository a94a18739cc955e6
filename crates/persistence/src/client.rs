//! Firebase Realtime Database REST client

use crate::error::PersistenceError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tourist_webhook_core::QuerySpec;

/// Firebase configuration
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Database root, e.g. `https://my-project.firebaseio.com`
    pub database_url: String,
    /// Database secret or ID token, sent as `auth=`
    pub auth_token: Option<String>,
    /// Per-request timeout of the HTTP client
    pub request_timeout: Duration,
}

impl FirebaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            auth_token: None,
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// HTTP client bound to one database
#[derive(Clone)]
pub struct FirebaseClient {
    http: Client,
    config: FirebaseConfig,
}

impl FirebaseClient {
    /// Build the HTTP client. No request is made until the first query.
    pub fn connect(config: FirebaseConfig) -> Result<Self, PersistenceError> {
        if config.database_url.trim().is_empty() {
            return Err(PersistenceError::Config(
                "database_url must not be empty".to_string(),
            ));
        }

        tracing::info!(database_url = %config.database_url, "Configuring Firebase client");

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn database_url(&self) -> &str {
        self.config.database_url.trim_end_matches('/')
    }

    /// REST endpoint of a collection node
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}.json", self.database_url(), collection)
    }

    /// Query-string parameters for a query.
    ///
    /// `orderBy` and `equalTo` take JSON-encoded values, so strings are quoted.
    pub fn query_params(&self, spec: &QuerySpec) -> Result<Vec<(&'static str, String)>, PersistenceError> {
        let mut params = vec![("orderBy", serde_json::to_string(spec.field)?)];
        if let Some(value) = &spec.value {
            params.push(("equalTo", serde_json::to_string(value)?));
        }
        if let Some(token) = &self.config.auth_token {
            params.push(("auth", token.clone()));
        }
        Ok(params)
    }

    /// Run a query and return the raw snapshot body
    pub async fn fetch(&self, spec: &QuerySpec) -> Result<Value, PersistenceError> {
        let url = self.collection_url(spec.collection.as_str());
        let params = self.query_params(spec)?;

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    /// Shallow read of the database root, used as a connectivity probe
    pub async fn ping(&self) -> Result<(), PersistenceError> {
        let url = format!("{}/.json", self.database_url());
        let mut params = vec![("shallow", "true".to_string())];
        if let Some(token) = &self.config.auth_token {
            params.push(("auth", token.clone()));
        }

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PersistenceError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourist_webhook_core::{fields, Collection};

    #[test]
    fn test_collection_url_trims_trailing_slash() {
        let client =
            FirebaseClient::connect(FirebaseConfig::new("https://latacunga.firebaseio.com/"))
                .unwrap();
        assert_eq!(
            client.collection_url("atractivo"),
            "https://latacunga.firebaseio.com/atractivo.json"
        );
    }

    #[test]
    fn test_query_params_are_json_encoded() {
        let client = FirebaseClient::connect(
            FirebaseConfig::new("https://latacunga.firebaseio.com").with_auth_token("secret"),
        )
        .unwrap();

        let spec = QuerySpec::equal_to(Collection::Attractions, fields::ALIAS, "Iglesia \"La\" Merced");
        let params = client.query_params(&spec).unwrap();
        assert_eq!(
            params,
            vec![
                ("orderBy", "\"alias\"".to_string()),
                ("equalTo", "\"Iglesia \\\"La\\\" Merced\"".to_string()),
                ("auth", "secret".to_string()),
            ]
        );
    }

    #[test]
    fn test_listing_has_no_equal_to() {
        let client =
            FirebaseClient::connect(FirebaseConfig::new("https://latacunga.firebaseio.com"))
                .unwrap();
        let spec = QuerySpec::ordered_by(Collection::Attractions, fields::CATEGORY);
        let params = client.query_params(&spec).unwrap();
        assert_eq!(params, vec![("orderBy", "\"categoria\"".to_string())]);
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            FirebaseClient::connect(FirebaseConfig::new("  ")),
            Err(PersistenceError::Config(_))
        ));
    }
}
