//! Records and result sets
//!
//! A [`Record`] is one child node of a store collection. Its key is assigned
//! by the store and only attached to the attributes at read time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::query::fields;

/// Store collections queried by the webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Tourist attractions
    #[serde(rename = "atractivo")]
    Attractions,
    /// Tourist services (agencies, lodging, food, recreation)
    #[serde(rename = "servicio")]
    Services,
}

impl Collection {
    /// Node name in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attractions => "atractivo",
            Self::Services => "servicio",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "atractivo" => Some(Self::Attractions),
            "servicio" => Some(Self::Services),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted entity with its key attached
///
/// Serializes as the stored attributes plus a `key` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// Build a record from its key and stored attributes.
    ///
    /// A stored `key` attribute is dropped; the store key always wins.
    pub fn new(key: impl Into<String>, mut attributes: Map<String, Value>) -> Self {
        attributes.remove(fields::KEY);
        Self {
            key: key.into(),
            attributes,
        }
    }

    /// Build a record from a stored child node. Non-object nodes are not records.
    pub fn from_stored(key: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(attributes) => Some(Self::new(key, attributes)),
            _ => None,
        }
    }

    /// String value of an attribute
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).and_then(Value::as_str)
    }

    /// Human name (`nombre`)
    pub fn name(&self) -> Option<&str> {
        self.get_str(fields::NAME)
    }

    pub fn subtype(&self) -> Option<&str> {
        self.get_str(fields::SUBTYPE)
    }

    /// Equality match on a string attribute
    pub fn matches(&self, field: &str, value: &str) -> bool {
        self.get_str(field) == Some(value)
    }
}

/// Records matched by one query, keyed by record key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(BTreeMap<String, Record>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own key, replacing any previous entry
    pub fn insert(&mut self, record: Record) {
        self.0.insert(record.key.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.0.values()
    }

    /// First record in key order
    pub fn first(&self) -> Option<&Record> {
        self.0.values().next()
    }
}

impl FromIterator<Record> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::collections::btree_map::IntoValues<String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}
