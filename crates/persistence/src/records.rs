//! Record store trait and the Firebase-backed implementation

use crate::{FirebaseClient, PersistenceError};
use async_trait::async_trait;
use serde_json::Value;
use tourist_webhook_core::{QuerySpec, Record, ResultSet};

/// Read-only access to the hierarchical record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Run one point or listing query
    async fn query(&self, spec: &QuerySpec) -> Result<ResultSet, PersistenceError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Convert a collection snapshot into a result set.
///
/// `null` is an empty snapshot. The database returns an array when every
/// child key is a small integer; array indices become keys and holes are
/// skipped. Children that are not objects are not records and are ignored.
pub fn parse_snapshot(snapshot: Value) -> Result<ResultSet, PersistenceError> {
    match snapshot {
        Value::Null => Ok(ResultSet::new()),
        Value::Object(children) => Ok(children
            .into_iter()
            .filter_map(|(key, child)| Record::from_stored(key, child))
            .collect()),
        Value::Array(children) => Ok(children
            .into_iter()
            .enumerate()
            .filter_map(|(index, child)| Record::from_stored(index.to_string(), child))
            .collect()),
        other => Err(PersistenceError::InvalidData(format!(
            "expected a collection snapshot, got {}",
            other
        ))),
    }
}

/// Record store backed by Firebase Realtime Database
#[derive(Clone)]
pub struct FirebaseRecordStore {
    client: FirebaseClient,
}

impl FirebaseRecordStore {
    pub fn new(client: FirebaseClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FirebaseClient {
        &self.client
    }
}

#[async_trait]
impl RecordStore for FirebaseRecordStore {
    async fn query(&self, spec: &QuerySpec) -> Result<ResultSet, PersistenceError> {
        tracing::debug!(query = %spec, "Querying Firebase");

        let snapshot = self.client.fetch(spec).await?;
        let records = parse_snapshot(snapshot)?;

        tracing::debug!(query = %spec, matches = records.len(), "Firebase query complete");
        Ok(records)
    }

    async fn health_check(&self) -> Result<(), PersistenceError> {
        self.client.ping().await
    }

    fn backend_name(&self) -> &'static str {
        "firebase"
    }
}
