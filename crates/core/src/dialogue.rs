//! Route-confirmation dialogue
//!
//! Informational answers end with a "would you like directions?" prompt.
//! The platform answers "yes" with a follow-up intent whose entity name only
//! survives in the contexts. Per entity kind this is a two-state machine:
//!
//! ```text
//! Informing --(X information)--> AwaitingRouteConfirmation(X)
//! AwaitingRouteConfirmation(X) --(X route confirmation)--> Informing
//! any --(other non-follow-up intent)--> Informing
//! ```
//!
//! A follow-up the current state does not accept leaves the state unchanged.
//!
//! The platform owns the conversation, so the state before a turn is
//! inferred from the contexts it sends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dialogflow::ConversationContext;
use crate::intent::{EntityKind, Intent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "entity", rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Informing,
    AwaitingRouteConfirmation(EntityKind),
}

impl DialogueState {
    /// State implied by the contexts of an incoming request.
    ///
    /// The first frame carrying an entity name decides the kind.
    pub fn infer(contexts: &ConversationContext) -> Self {
        for frame in contexts.iter() {
            for kind in [EntityKind::Attraction, EntityKind::Service] {
                if frame.get(kind.context_field()).is_some() {
                    return Self::AwaitingRouteConfirmation(kind);
                }
            }
        }
        Self::Informing
    }

    /// Whether `intent` is a legal move from this state
    pub fn accepts(&self, intent: &Intent) -> bool {
        if !intent.is_follow_up() {
            return true;
        }
        match self {
            Self::AwaitingRouteConfirmation(kind) => intent.entity_kind() == Some(*kind),
            Self::Informing => false,
        }
    }

    /// State after handling `intent`
    pub fn transition(self, intent: &Intent) -> Self {
        if !self.accepts(intent) {
            return self;
        }
        match intent.entity_kind() {
            Some(kind) if intent.is_primary_information() => Self::AwaitingRouteConfirmation(kind),
            _ => Self::Informing,
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Informing => f.write_str("informing"),
            Self::AwaitingRouteConfirmation(kind) => {
                write!(f, "awaiting_route_confirmation({})", kind.as_str())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogflow::ContextFrame;

    fn frame(field: &str, value: &str) -> ContextFrame {
        let mut frame = ContextFrame::default();
        frame.parameters.insert(field.to_string(), value.to_string());
        frame
    }

    #[test]
    fn test_full_cycle() {
        let state = DialogueState::Informing;
        let state = state.transition(&Intent::AttractionInformation);
        assert_eq!(
            state,
            DialogueState::AwaitingRouteConfirmation(EntityKind::Attraction)
        );
        assert!(state.accepts(&Intent::AttractionRouteConfirmation));
        assert!(!state.accepts(&Intent::ServiceRouteConfirmation));

        let state = state.transition(&Intent::AttractionRouteConfirmation);
        assert_eq!(state, DialogueState::Informing);
    }

    #[test]
    fn test_follow_up_rejected_while_informing() {
        assert!(!DialogueState::Informing.accepts(&Intent::ServiceRouteConfirmation));
        assert!(DialogueState::Informing.accepts(&Intent::AttractionsInArea));
        assert_eq!(
            DialogueState::Informing.transition(&Intent::ServiceRouteConfirmation),
            DialogueState::Informing
        );
    }

    #[test]
    fn test_mismatched_follow_up_keeps_pending_prompt() {
        let pending = DialogueState::AwaitingRouteConfirmation(EntityKind::Attraction);
        assert_eq!(pending.transition(&Intent::ServiceRouteConfirmation), pending);
        assert_eq!(
            pending.transition(&Intent::AttractionRouteConfirmation),
            DialogueState::Informing
        );
    }

    #[test]
    fn test_new_information_replaces_pending_prompt() {
        let state = DialogueState::AwaitingRouteConfirmation(EntityKind::Attraction)
            .transition(&Intent::ServiceInformation);
        assert_eq!(
            state,
            DialogueState::AwaitingRouteConfirmation(EntityKind::Service)
        );
    }

    #[test]
    fn test_church_awaits_attraction_confirmation() {
        let state = DialogueState::Informing.transition(&Intent::ChurchInformation);
        assert_eq!(
            state,
            DialogueState::AwaitingRouteConfirmation(EntityKind::Attraction)
        );
    }

    #[test]
    fn test_listing_returns_to_informing() {
        let state = DialogueState::AwaitingRouteConfirmation(EntityKind::Service)
            .transition(&Intent::FoodAndDrinkInArea);
        assert_eq!(state, DialogueState::Informing);
    }

    #[test]
    fn test_infer_from_contexts() {
        assert_eq!(
            DialogueState::infer(&ConversationContext::default()),
            DialogueState::Informing
        );

        let contexts = ConversationContext::new(vec![
            ContextFrame::default(),
            frame("name_services", "Hostal Tiana"),
            frame("name_attraction", "Catedral"),
        ]);
        assert_eq!(
            DialogueState::infer(&contexts),
            DialogueState::AwaitingRouteConfirmation(EntityKind::Service)
        );
    }
}
