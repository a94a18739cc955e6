//! Dialogflow fulfilment wire types
//!
//! Inbound:  `{ "result": { "action", "parameters", "contexts": [{ "parameters" }] } }`
//! Outbound: `{ "speech", "displayText", "data" }`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::intent::Intent;
use crate::record::ResultSet;

/// Parameter name to value for one turn
pub type Parameters = BTreeMap<String, String>;

/// Fulfilment request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub result: QueryResult,
}

impl WebhookRequest {
    pub fn intent(&self) -> Intent {
        Intent::from_action(&self.result.action)
    }
}

/// The `result` object of a fulfilment request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub action: String,

    /// Parameters of the current turn
    #[serde(default, deserialize_with = "lenient_parameters")]
    pub parameters: Parameters,

    /// Output contexts of earlier turns, in platform order
    #[serde(default)]
    pub contexts: ConversationContext,
}

/// One prior-turn snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,

    #[serde(default, deserialize_with = "lenient_parameters")]
    pub parameters: Parameters,
}

impl ContextFrame {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.parameters.get(field).map(String::as_str)
    }
}

/// Ordered history of prior-turn snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationContext(pub Vec<ContextFrame>);

impl ConversationContext {
    pub fn new(frames: Vec<ContextFrame>) -> Self {
        Self(frames)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextFrame> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values of `field` from every frame that carries it, in history order
    pub fn values_of<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().filter_map(move |frame| frame.get(field))
    }
}

/// Accept any JSON scalar as a parameter value; `null` and missing maps are dropped.
fn lenient_parameters<'de, D>(deserializer: D) -> Result<Parameters, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name, s)),
            other => Some((name, other.to_string())),
        })
        .collect())
}

/// Message plus structured data produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyPayload {
    pub message: String,
    pub data: Option<ResultSet>,
}

impl ReplyPayload {
    pub fn new(message: impl Into<String>, data: Option<ResultSet>) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    /// Reply carrying records
    pub fn with_records(message: impl Into<String>, records: ResultSet) -> Self {
        Self::new(message, Some(records))
    }

    /// Reply with `data: null`
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }
}

/// Fulfilment response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub speech: String,
    #[serde(rename = "displayText")]
    pub display_text: String,
    pub data: Option<ResultSet>,
}

impl From<ReplyPayload> for WebhookResponse {
    fn from(payload: ReplyPayload) -> Self {
        Self {
            display_text: payload.message.clone(),
            speech: payload.message,
            data: payload.data,
        }
    }
}
