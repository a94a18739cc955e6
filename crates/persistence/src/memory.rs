//! In-memory record store
//!
//! Holds collections in process. Seeded from a Realtime Database JSON export:
//!
//! ```json
//! { "atractivo": { "-Lq01": { "nombre": "...", "alias": "..." } }, "servicio": { } }
//! ```

use crate::{PersistenceError, RecordStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tourist_webhook_core::{Collection, QuerySpec, Record, ResultSet};

#[derive(Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Record>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an export document. Unknown top-level nodes are skipped.
    pub fn from_export(export: Value) -> Result<Self, PersistenceError> {
        let Value::Object(nodes) = export else {
            return Err(PersistenceError::Seed(
                "export root must be an object".to_string(),
            ));
        };

        let store = Self::new();
        for (name, node) in nodes {
            let Some(collection) = Collection::from_name(&name) else {
                tracing::warn!(node = %name, "Skipping unknown collection in seed export");
                continue;
            };
            let records = crate::parse_snapshot(node)
                .map_err(|e| PersistenceError::Seed(format!("collection {}: {}", name, e)))?;
            for record in records {
                store.insert(collection, record);
            }
        }
        Ok(store)
    }

    /// Load an export file
    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let export: Value = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::Seed(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_export(export)?;
        tracing::info!(
            path = %path.display(),
            attractions = store.count(Collection::Attractions),
            services = store.count(Collection::Services),
            "Loaded seed export"
        );
        Ok(store)
    }

    pub fn insert(&self, collection: Collection, record: Record) {
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .insert(record.key.clone(), record);
    }

    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn query(&self, spec: &QuerySpec) -> Result<ResultSet, PersistenceError> {
        let collections = self.collections.read();
        let records = collections
            .get(&spec.collection)
            .map(|records| {
                records
                    .values()
                    .filter(|record| spec.accepts(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
