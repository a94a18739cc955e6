//! Action dispatch
//!
//! Every intent maps to at most one store query. The query table lives in
//! [`ActionDispatcher::plan`]; the reply is built by the aggregator.

use std::sync::Arc;
use std::time::Duration;

use tourist_webhook_config::constants::replies;
use tourist_webhook_core::intent::{activities, params};
use tourist_webhook_core::{
    fields, Collection, DialogueState, Intent, QuerySpec, ReplyPayload, WebhookRequest,
};
use tourist_webhook_persistence::RecordStore;

use crate::resolver::QueryResolver;
use crate::{aggregator, extractor, telemetry, AgentError};

/// Routes webhook requests to their query and reply rule
#[derive(Clone)]
pub struct ActionDispatcher {
    resolver: QueryResolver,
}

impl ActionDispatcher {
    pub fn new(store: Arc<dyn RecordStore>, query_timeout: Duration) -> Self {
        Self {
            resolver: QueryResolver::new(store, query_timeout),
        }
    }

    pub fn resolver(&self) -> &QueryResolver {
        &self.resolver
    }

    /// The store query an intent runs, or `None` for unrecognized actions
    pub fn plan(intent: &Intent, request: &WebhookRequest) -> Option<QuerySpec> {
        let result = &request.result;
        let named = |collection: Collection| {
            let values = extractor::extract(intent, &result.parameters, &result.contexts);
            QuerySpec::equal_to(collection, fields::ALIAS, extractor::first_value(values))
        };
        let by_activity = |activity: &str| {
            QuerySpec::equal_to(Collection::Services, fields::ACTIVITY_TYPE, activity)
        };

        let query = match intent {
            Intent::AttractionInformation
            | Intent::AttractionRouteConfirmation
            | Intent::ChurchInformation => named(Collection::Attractions),
            Intent::ServiceInformation
            | Intent::ServiceRouteConfirmation
            | Intent::AccommodationInformation => named(Collection::Services),
            Intent::AttractionsInArea => match result.parameters.get(params::ATTRACTION_SUBTYPE) {
                Some(subtype) if !subtype.is_empty() => {
                    QuerySpec::equal_to(Collection::Attractions, fields::SUBTYPE, subtype.as_str())
                },
                _ => QuerySpec::ordered_by(Collection::Attractions, fields::CATEGORY),
            },
            Intent::TravelAgenciesInArea | Intent::AttractionOutsideHistoricCenter => {
                by_activity(activities::TRAVEL_AGENCY)
            },
            Intent::AccommodationInArea => by_activity(activities::ACCOMMODATION),
            Intent::FoodAndDrinkInArea => by_activity(activities::FOOD_AND_DRINK),
            Intent::RecreationInArea => by_activity(activities::RECREATION),
            Intent::Unrecognized(_) => return None,
        };
        Some(query)
    }

    /// Handle one request. Always produces a reply; store errors become a fallback message.
    pub async fn dispatch(&self, request: &WebhookRequest) -> ReplyPayload {
        let intent = request.intent();
        let state = DialogueState::infer(&request.result.contexts);

        if !state.accepts(&intent) {
            tracing::warn!(
                action = %intent,
                state = %state,
                "Follow-up received without a pending route prompt"
            );
        }

        let Some(query) = Self::plan(&intent, request) else {
            tracing::info!(action = %intent, "Action not identified");
            return ReplyPayload::message_only(replies::ACTION_NOT_IDENTIFIED);
        };

        let reply = match self.resolver.resolve(&query).await {
            Ok(records) => {
                if records.is_empty() {
                    telemetry::record_not_found(query.collection);
                }
                tracing::info!(
                    action = %intent,
                    query = %query,
                    matches = records.len(),
                    "Action handled"
                );
                aggregator::aggregate(records, &intent, &query)
            },
            Err(e) => {
                tracing::error!(action = %intent, query = %query, error = %e, "Query failed");
                telemetry::record_error(e.kind());
                fallback_reply(&e)
            },
        };

        let next = state.transition(&intent);
        tracing::debug!(
            action = %intent,
            from = %state,
            to = %next,
            changed = next != state,
            "Dialogue state"
        );

        reply
    }
}

/// Apology sent when the store could not answer
pub fn fallback_reply(error: &AgentError) -> ReplyPayload {
    match error {
        AgentError::Store(_) => ReplyPayload::message_only(replies::STORE_UNAVAILABLE),
        AgentError::Timeout(_) => ReplyPayload::message_only(replies::STORE_TIMEOUT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> WebhookRequest {
        serde_json::from_value(body).unwrap()
    }

    fn plan(body: serde_json::Value) -> Option<QuerySpec> {
        let request = request(body);
        ActionDispatcher::plan(&request.intent(), &request)
    }

    #[test]
    fn test_plan_named_lookups() {
        let query = plan(json!({
            "result": { "action": "churchInformationAction", "parameters": { "name_church": "Catedral" } }
        }));
        assert_eq!(
            query,
            Some(QuerySpec::equal_to(Collection::Attractions, fields::ALIAS, "Catedral"))
        );

        let query = plan(json!({
            "result": {
                "action": "service_information_intent.service_information_intent-yes",
                "parameters": {},
                "contexts": [{ "parameters": { "name_services": "Hostal Tiana" } }]
            }
        }));
        assert_eq!(
            query,
            Some(QuerySpec::equal_to(Collection::Services, fields::ALIAS, "Hostal Tiana"))
        );
    }

    #[test]
    fn test_plan_missing_name_queries_empty_alias() {
        let query = plan(json!({ "result": { "action": "accommodationInformationAction" } }));
        assert_eq!(
            query,
            Some(QuerySpec::equal_to(Collection::Services, fields::ALIAS, ""))
        );
    }

    #[test]
    fn test_plan_attraction_listing() {
        let query = plan(json!({ "result": { "action": "consultarAtractivoEnElArea" } }));
        assert_eq!(
            query,
            Some(QuerySpec::ordered_by(Collection::Attractions, fields::CATEGORY))
        );

        let query = plan(json!({
            "result": { "action": "consultarAtractivoEnElArea", "parameters": { "subtype_attraction": "" } }
        }));
        assert_eq!(
            query,
            Some(QuerySpec::ordered_by(Collection::Attractions, fields::CATEGORY))
        );

        let query = plan(json!({
            "result": { "action": "consultarAtractivoEnElArea", "parameters": { "subtype_attraction": "Parques" } }
        }));
        assert_eq!(
            query,
            Some(QuerySpec::equal_to(Collection::Attractions, fields::SUBTYPE, "Parques"))
        );
    }

    #[test]
    fn test_plan_activity_listings() {
        let cases = [
            ("consultarAgenciasDeViajeEnElArea", activities::TRAVEL_AGENCY),
            ("consultarAlojamientoEnElArea", activities::ACCOMMODATION),
            ("consultarComidaYBebidaEnElArea", activities::FOOD_AND_DRINK),
            ("consultarRecreacionDiversionEsparcimientoEnElArea", activities::RECREATION),
            ("attractionOutsideHistoricCenterAction", activities::TRAVEL_AGENCY),
        ];
        for (action, activity) in cases {
            let query = plan(json!({ "result": { "action": action } }));
            assert_eq!(
                query,
                Some(QuerySpec::equal_to(Collection::Services, fields::ACTIVITY_TYPE, activity)),
                "{}",
                action
            );
        }
    }

    #[test]
    fn test_plan_unrecognized() {
        assert_eq!(plan(json!({ "result": { "action": "input.welcome" } })), None);
        assert_eq!(plan(json!({})), None);
    }

    #[test]
    fn test_every_handled_intent_has_a_query() {
        let request = WebhookRequest::default();
        for intent in Intent::HANDLED.iter() {
            assert!(ActionDispatcher::plan(intent, &request).is_some(), "{}", intent);
        }
    }

    #[test]
    fn test_fallback_reply() {
        let reply = fallback_reply(&AgentError::Timeout(Duration::from_millis(100)));
        assert_eq!(reply.message, replies::STORE_TIMEOUT);
        assert!(reply.data.is_none());

        let reply = fallback_reply(&AgentError::Store(
            tourist_webhook_persistence::PersistenceError::Http("refused".to_string()),
        ));
        assert_eq!(reply.message, replies::STORE_UNAVAILABLE);
        assert!(reply.data.is_none());
    }
}
