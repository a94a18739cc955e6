//! Core types for the tourist information webhook
//!
//! This crate provides the foundational types shared by every other crate:
//! - Intents recognised by the dialogue platform and their entity kinds
//! - Records, result sets and query descriptions for the record store
//! - Dialogflow fulfilment wire types (request, contexts, reply)
//! - The route-confirmation dialogue state machine

pub mod dialogflow;
pub mod dialogue;
pub mod intent;
pub mod query;
pub mod record;

pub use dialogflow::{
    ContextFrame, ConversationContext, Parameters, QueryResult, ReplyPayload, WebhookRequest,
    WebhookResponse,
};
pub use dialogue::DialogueState;
pub use intent::{EntityKind, Intent};
pub use query::{fields, QuerySpec};
pub use record::{Collection, Record, ResultSet};
