//! Parameter extraction
//!
//! Primary intents carry the entity name in the current turn. Follow-up
//! intents ("yes, show me the way") only see it in the contexts of earlier
//! turns, where the platform lists the most relevant frame first.

use tourist_webhook_core::{ConversationContext, Intent, Parameters};

/// Entity values for `intent`, in order.
///
/// - primary intents: one element, `None` when the parameter is absent
/// - follow-up intents: the field from every context frame that carries it
/// - everything else: empty
pub fn extract(
    intent: &Intent,
    parameters: &Parameters,
    contexts: &ConversationContext,
) -> Vec<Option<String>> {
    let Some(field) = intent.parameter_field() else {
        return Vec::new();
    };

    if intent.is_follow_up() {
        return contexts
            .values_of(field)
            .map(|value| Some(value.to_string()))
            .collect();
    }

    vec![parameters.get(field).cloned()]
}

/// The value callers consume: the first element, or `""` when there is none.
///
/// An empty value still runs as an equality query and matches nothing.
pub fn first_value(values: Vec<Option<String>>) -> String {
    values.into_iter().next().flatten().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourist_webhook_core::intent::params;
    use tourist_webhook_core::ContextFrame;

    fn parameters(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn frame(pairs: &[(&str, &str)]) -> ContextFrame {
        ContextFrame {
            parameters: parameters(pairs),
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_reads_current_turn() {
        let params = parameters(&[(params::ATTRACTION_NAME, "Catedral")]);
        let values = extract(
            &Intent::AttractionInformation,
            &params,
            &ConversationContext::default(),
        );
        assert_eq!(values, vec![Some("Catedral".to_string())]);
    }

    #[test]
    fn test_primary_missing_parameter_is_none() {
        let values = extract(
            &Intent::ChurchInformation,
            &Parameters::new(),
            &ConversationContext::default(),
        );
        assert_eq!(values, vec![None]);
        assert_eq!(first_value(values), "");
    }

    #[test]
    fn test_primary_ignores_contexts() {
        let contexts = ConversationContext::new(vec![frame(&[(params::SERVICE_NAME, "Hostal Tiana")])]);
        let values = extract(&Intent::ServiceInformation, &Parameters::new(), &contexts);
        assert_eq!(values, vec![None]);
    }

    #[test]
    fn test_follow_up_scans_contexts_in_order() {
        let contexts = ConversationContext::new(vec![
            frame(&[(params::ATTRACTION_NAME, "Catedral")]),
            frame(&[("other", "x")]),
            frame(&[(params::ATTRACTION_NAME, "Parque Vicente León")]),
        ]);
        let values = extract(
            &Intent::AttractionRouteConfirmation,
            &Parameters::new(),
            &contexts,
        );
        assert_eq!(
            values,
            vec![
                Some("Catedral".to_string()),
                Some("Parque Vicente León".to_string())
            ]
        );
    }

    #[test]
    fn test_follow_up_first_frame_wins_for_any_history_length() {
        for n in 1..=8 {
            let mut frames = vec![frame(&[(params::SERVICE_NAME, "Hostal Tiana")])];
            frames.extend((1..n).map(|i| frame(&[("turn", &i.to_string())])));
            let contexts = ConversationContext::new(frames);

            let values = extract(&Intent::ServiceRouteConfirmation, &Parameters::new(), &contexts);
            assert_eq!(first_value(values), "Hostal Tiana", "history length {}", n);
        }
    }

    #[test]
    fn test_follow_up_ignores_current_turn() {
        let params = parameters(&[(params::ATTRACTION_NAME, "Catedral")]);
        let values = extract(
            &Intent::AttractionRouteConfirmation,
            &params,
            &ConversationContext::default(),
        );
        assert!(values.is_empty());
        assert_eq!(first_value(values), "");
    }

    #[test]
    fn test_listing_intents_have_no_values() {
        let params = parameters(&[(params::ATTRACTION_SUBTYPE, "Parques")]);
        for intent in [
            Intent::AttractionsInArea,
            Intent::TravelAgenciesInArea,
            Intent::AttractionOutsideHistoricCenter,
            Intent::Unrecognized("foo".to_string()),
        ] {
            assert!(extract(&intent, &params, &ConversationContext::default()).is_empty());
        }
    }
}
