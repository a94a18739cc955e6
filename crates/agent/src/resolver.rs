//! Query resolution against the record store

use std::sync::Arc;
use std::time::{Duration, Instant};

use tourist_webhook_core::{QuerySpec, ResultSet};
use tourist_webhook_persistence::RecordStore;

use crate::telemetry;
use crate::AgentError;

/// Runs one store query under a deadline. No retries.
#[derive(Clone)]
pub struct QueryResolver {
    store: Arc<dyn RecordStore>,
    deadline: Duration,
}

impl QueryResolver {
    pub fn new(store: Arc<dyn RecordStore>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub async fn resolve(&self, query: &QuerySpec) -> Result<ResultSet, AgentError> {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.deadline, self.store.query(query)).await;
        let elapsed = started.elapsed();
        telemetry::record_store_latency(elapsed);

        match outcome {
            Ok(Ok(records)) => {
                tracing::debug!(
                    query = %query,
                    backend = self.store.backend_name(),
                    matches = records.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query resolved"
                );
                Ok(records)
            },
            Ok(Err(e)) => Err(AgentError::Store(e)),
            Err(_) => Err(AgentError::Timeout(self.deadline)),
        }
    }
}
