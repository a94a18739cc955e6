//! Intent dispatch and query resolution
//!
//! Pipeline for one webhook call:
//! - [`dispatcher`] picks the query for the intent
//! - [`extractor`] recovers the entity name from the turn or its contexts
//! - [`resolver`] runs the query against the record store under a deadline
//! - [`aggregator`] builds the reply message and structured data

pub mod aggregator;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod resolver;
pub mod telemetry;

pub use aggregator::{aggregate, compose_message, not_found_message};
pub use dispatcher::{fallback_reply, ActionDispatcher};
pub use error::AgentError;
pub use extractor::{extract, first_value};
pub use resolver::QueryResolver;
