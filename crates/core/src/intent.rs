//! Intent identifiers
//!
//! The dialogue platform names the recognised user goal with an action
//! string. Every action the webhook knows is a variant of [`Intent`]; anything
//! else parses into [`Intent::Unrecognized`] so that parsing never fails.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::Collection;

/// Action strings as configured on the dialogue platform.
pub mod actions {
    pub const ATTRACTION_INFORMATION: &str = "attractionInformationAction";
    pub const ATTRACTION_ROUTE_CONFIRMATION: &str =
        "attraction_information_intent.attraction_information_intent-yes";
    pub const CHURCH_INFORMATION: &str = "churchInformationAction";
    pub const SERVICE_INFORMATION: &str = "serviceInformationAction";
    pub const SERVICE_ROUTE_CONFIRMATION: &str =
        "service_information_intent.service_information_intent-yes";
    pub const ACCOMMODATION_INFORMATION: &str = "accommodationInformationAction";
    pub const ATTRACTIONS_IN_AREA: &str = "consultarAtractivoEnElArea";
    pub const TRAVEL_AGENCIES_IN_AREA: &str = "consultarAgenciasDeViajeEnElArea";
    pub const ACCOMMODATION_IN_AREA: &str = "consultarAlojamientoEnElArea";
    pub const FOOD_AND_DRINK_IN_AREA: &str = "consultarComidaYBebidaEnElArea";
    pub const RECREATION_IN_AREA: &str = "consultarRecreacionDiversionEsparcimientoEnElArea";
    pub const ATTRACTION_OUTSIDE_HISTORIC_CENTER: &str = "attractionOutsideHistoricCenterAction";
}

/// Parameter names sent by the dialogue platform.
pub mod params {
    pub const ATTRACTION_NAME: &str = "name_attraction";
    pub const SERVICE_NAME: &str = "name_services";
    pub const CHURCH_NAME: &str = "name_church";
    pub const ACCOMMODATION_NAME: &str = "name_accommodation";
    pub const ATTRACTION_SUBTYPE: &str = "subtype_attraction";
}

/// `tipoDeActividad` values used by the service listings.
pub mod activities {
    pub const TRAVEL_AGENCY: &str = "Agencia de viajes";
    pub const ACCOMMODATION: &str = "Alojamiento";
    pub const FOOD_AND_DRINK: &str = "Comidas y bebidas";
    pub const RECREATION: &str = "Recreación, diversión, esparcimiento";
}

/// Kind of named entity an informational intent asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Attraction,
    Service,
}

impl EntityKind {
    /// Collection holding entities of this kind
    pub fn collection(&self) -> Collection {
        match self {
            Self::Attraction => Collection::Attractions,
            Self::Service => Collection::Services,
        }
    }

    /// Context parameter that carries the entity name across a follow-up turn
    pub fn context_field(&self) -> &'static str {
        match self {
            Self::Attraction => params::ATTRACTION_NAME,
            Self::Service => params::SERVICE_NAME,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attraction => "attraction",
            Self::Service => "service",
        }
    }
}

/// Recognised user goal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intent {
    /// Ask about a named attraction
    AttractionInformation,
    /// "Yes" to the route prompt after an attraction answer
    AttractionRouteConfirmation,
    /// Ask about a named church (stored with the attractions)
    ChurchInformation,
    /// Ask about a named service
    ServiceInformation,
    /// "Yes" to the route prompt after a service answer
    ServiceRouteConfirmation,
    /// Ask about a named accommodation (stored with the services)
    AccommodationInformation,
    /// List attractions, optionally by subtype
    AttractionsInArea,
    TravelAgenciesInArea,
    AccommodationInArea,
    FoodAndDrinkInArea,
    RecreationInArea,
    /// Ask about an attraction outside the covered area
    AttractionOutsideHistoricCenter,
    /// Any action the webhook does not handle
    Unrecognized(String),
}

impl Intent {
    /// Every handled intent, in dispatch-table order
    pub const HANDLED: [Intent; 12] = [
        Intent::AttractionInformation,
        Intent::AttractionRouteConfirmation,
        Intent::ChurchInformation,
        Intent::ServiceInformation,
        Intent::ServiceRouteConfirmation,
        Intent::AccommodationInformation,
        Intent::AttractionsInArea,
        Intent::TravelAgenciesInArea,
        Intent::AccommodationInArea,
        Intent::FoodAndDrinkInArea,
        Intent::RecreationInArea,
        Intent::AttractionOutsideHistoricCenter,
    ];

    /// Parse an action string. Unknown actions are kept verbatim.
    pub fn from_action(action: &str) -> Self {
        match action {
            actions::ATTRACTION_INFORMATION => Self::AttractionInformation,
            actions::ATTRACTION_ROUTE_CONFIRMATION => Self::AttractionRouteConfirmation,
            actions::CHURCH_INFORMATION => Self::ChurchInformation,
            actions::SERVICE_INFORMATION => Self::ServiceInformation,
            actions::SERVICE_ROUTE_CONFIRMATION => Self::ServiceRouteConfirmation,
            actions::ACCOMMODATION_INFORMATION => Self::AccommodationInformation,
            actions::ATTRACTIONS_IN_AREA => Self::AttractionsInArea,
            actions::TRAVEL_AGENCIES_IN_AREA => Self::TravelAgenciesInArea,
            actions::ACCOMMODATION_IN_AREA => Self::AccommodationInArea,
            actions::FOOD_AND_DRINK_IN_AREA => Self::FoodAndDrinkInArea,
            actions::RECREATION_IN_AREA => Self::RecreationInArea,
            actions::ATTRACTION_OUTSIDE_HISTORIC_CENTER => Self::AttractionOutsideHistoricCenter,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The action string this intent was parsed from
    pub fn action(&self) -> &str {
        match self {
            Self::AttractionInformation => actions::ATTRACTION_INFORMATION,
            Self::AttractionRouteConfirmation => actions::ATTRACTION_ROUTE_CONFIRMATION,
            Self::ChurchInformation => actions::CHURCH_INFORMATION,
            Self::ServiceInformation => actions::SERVICE_INFORMATION,
            Self::ServiceRouteConfirmation => actions::SERVICE_ROUTE_CONFIRMATION,
            Self::AccommodationInformation => actions::ACCOMMODATION_INFORMATION,
            Self::AttractionsInArea => actions::ATTRACTIONS_IN_AREA,
            Self::TravelAgenciesInArea => actions::TRAVEL_AGENCIES_IN_AREA,
            Self::AccommodationInArea => actions::ACCOMMODATION_IN_AREA,
            Self::FoodAndDrinkInArea => actions::FOOD_AND_DRINK_IN_AREA,
            Self::RecreationInArea => actions::RECREATION_IN_AREA,
            Self::AttractionOutsideHistoricCenter => actions::ATTRACTION_OUTSIDE_HISTORIC_CENTER,
            Self::Unrecognized(action) => action,
        }
    }

    /// Entity kind for named lookups (informational and follow-up intents)
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Self::AttractionInformation
            | Self::AttractionRouteConfirmation
            | Self::ChurchInformation => Some(EntityKind::Attraction),
            Self::ServiceInformation
            | Self::ServiceRouteConfirmation
            | Self::AccommodationInformation => Some(EntityKind::Service),
            _ => None,
        }
    }

    /// Primary informational intents carry the entity name in the current turn
    pub fn is_primary_information(&self) -> bool {
        matches!(
            self,
            Self::AttractionInformation
                | Self::ChurchInformation
                | Self::ServiceInformation
                | Self::AccommodationInformation
        )
    }

    /// Follow-up intents recover the entity name from earlier contexts
    pub fn is_follow_up(&self) -> bool {
        matches!(
            self,
            Self::AttractionRouteConfirmation | Self::ServiceRouteConfirmation
        )
    }

    /// Name of the parameter holding the entity value, if the intent has one
    pub fn parameter_field(&self) -> Option<&'static str> {
        match self {
            Self::AttractionInformation | Self::AttractionRouteConfirmation => {
                Some(params::ATTRACTION_NAME)
            },
            Self::ServiceInformation | Self::ServiceRouteConfirmation => Some(params::SERVICE_NAME),
            Self::ChurchInformation => Some(params::CHURCH_NAME),
            Self::AccommodationInformation => Some(params::ACCOMMODATION_NAME),
            _ => None,
        }
    }

    /// `tipoDeActividad` filtered by the service listing intents
    pub fn activity_type(&self) -> Option<&'static str> {
        match self {
            Self::TravelAgenciesInArea | Self::AttractionOutsideHistoricCenter => {
                Some(activities::TRAVEL_AGENCY)
            },
            Self::AccommodationInArea => Some(activities::ACCOMMODATION),
            Self::FoodAndDrinkInArea => Some(activities::FOOD_AND_DRINK),
            Self::RecreationInArea => Some(activities::RECREATION),
            _ => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for Intent {
    fn from(action: &str) -> Self {
        Self::from_action(action)
    }
}

impl From<String> for Intent {
    fn from(action: String) -> Self {
        Self::from_action(&action)
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        intent.action().to_string()
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip_for_handled_intents() {
        for intent in Intent::HANDLED.iter() {
            assert_eq!(&Intent::from_action(intent.action()), intent);
            assert!(intent.is_recognized());
        }
    }

    #[test]
    fn test_unknown_action_is_kept() {
        let intent = Intent::from_action("input.welcome");
        assert_eq!(intent, Intent::Unrecognized("input.welcome".to_string()));
        assert_eq!(intent.action(), "input.welcome");
        assert!(!intent.is_recognized());
    }

    #[test]
    fn test_follow_up_intents_share_the_primary_field() {
        assert_eq!(
            Intent::AttractionRouteConfirmation.parameter_field(),
            Intent::AttractionInformation.parameter_field()
        );
        assert_eq!(
            Intent::ServiceRouteConfirmation.parameter_field(),
            Intent::ServiceInformation.parameter_field()
        );
        assert!(Intent::ServiceRouteConfirmation.is_follow_up());
        assert!(!Intent::ServiceInformation.is_follow_up());
    }

    #[test]
    fn test_church_and_accommodation_kinds() {
        assert_eq!(
            Intent::ChurchInformation.entity_kind(),
            Some(EntityKind::Attraction)
        );
        assert_eq!(
            Intent::AccommodationInformation.entity_kind(),
            Some(EntityKind::Service)
        );
        assert_eq!(Intent::AttractionsInArea.entity_kind(), None);
    }

    #[test]
    fn test_outside_area_lists_travel_agencies() {
        assert_eq!(
            Intent::AttractionOutsideHistoricCenter.activity_type(),
            Intent::TravelAgenciesInArea.activity_type()
        );
    }

    #[test]
    fn test_serde_as_action_string() {
        let json = serde_json::to_string(&Intent::FoodAndDrinkInArea).unwrap();
        assert_eq!(json, "\"consultarComidaYBebidaEnElArea\"");
        let parsed: Intent = serde_json::from_str("\"something.else\"").unwrap();
        assert_eq!(parsed, Intent::Unrecognized("something.else".to_string()));
    }
}
