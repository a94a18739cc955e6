//! Query descriptions for the record store

use serde::Serialize;
use std::fmt;

use crate::record::{Collection, Record};

/// Attribute names of stored records
pub mod fields {
    /// Attached at read time, never stored
    pub const KEY: &str = "key";
    pub const NAME: &str = "nombre";
    pub const ALIAS: &str = "alias";
    pub const CATEGORY: &str = "categoria";
    pub const SUBTYPE: &str = "subtipo";
    pub const ACTIVITY_TYPE: &str = "tipoDeActividad";
}

/// One store query: a collection, an indexed field and an optional equality value
///
/// Without a value the query lists the whole collection ordered by `field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    pub collection: Collection,
    pub field: &'static str,
    pub value: Option<String>,
}

impl QuerySpec {
    /// Records whose `field` equals `value`
    pub fn equal_to(collection: Collection, field: &'static str, value: impl Into<String>) -> Self {
        Self {
            collection,
            field,
            value: Some(value.into()),
        }
    }

    /// Every record of the collection, ordered by `field`
    pub fn ordered_by(collection: Collection, field: &'static str) -> Self {
        Self {
            collection,
            field,
            value: None,
        }
    }

    pub fn is_listing(&self) -> bool {
        self.value.is_none()
    }

    /// Whether a record satisfies this query
    pub fn accepts(&self, record: &Record) -> bool {
        match &self.value {
            Some(value) => record.matches(self.field, value),
            None => true,
        }
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} where {} = {:?}", self.collection, self.field, value),
            None => write!(f, "{} ordered by {}", self.collection, self.field),
        }
    }
}
