//! Record store backends for the tourist webhook
//!
//! Provides the [`RecordStore`] collaborator used by the query pipeline:
//! - `FirebaseRecordStore` - Firebase Realtime Database over its REST API
//! - `InMemoryRecordStore` - in-process store, seeded from a database export

pub mod client;
pub mod error;
pub mod memory;
pub mod records;

pub use client::{FirebaseClient, FirebaseConfig};
pub use error::PersistenceError;
pub use memory::InMemoryRecordStore;
pub use records::{parse_snapshot, FirebaseRecordStore, RecordStore};

/// Connect the Firebase backend
pub fn init_firebase(config: FirebaseConfig) -> Result<FirebaseRecordStore, PersistenceError> {
    let client = FirebaseClient::connect(config)?;
    Ok(FirebaseRecordStore::new(client))
}
