//! Result aggregation
//!
//! Turns a matched record set into the reply message plus structured data.
//! The message and the data are computed independently: the data is always
//! the full match set, even when the message does not describe it.

use tourist_webhook_config::constants::{render, replies};
use tourist_webhook_core::{EntityKind, Intent, QuerySpec, ReplyPayload, ResultSet};

/// Build the reply for a resolved query. Pure.
pub fn aggregate(records: ResultSet, intent: &Intent, query: &QuerySpec) -> ReplyPayload {
    let message = compose_message(&records, intent, query);
    ReplyPayload::with_records(message, records)
}

/// Message rule for a match set
pub fn compose_message(records: &ResultSet, intent: &Intent, query: &QuerySpec) -> String {
    if records.is_empty() {
        return not_found_message(intent).to_string();
    }

    let requested = query.value.as_deref().unwrap_or_default();

    match intent {
        Intent::AttractionInformation | Intent::ChurchInformation => {
            render(replies::ATTRACTION_INFORMATION, &joined_names(records))
        },
        Intent::AttractionRouteConfirmation => {
            render(replies::ATTRACTION_ROUTE, &joined_names(records))
        },
        Intent::ServiceInformation | Intent::AccommodationInformation => {
            render(replies::SERVICE_INFORMATION, requested)
        },
        Intent::ServiceRouteConfirmation => render(replies::SERVICE_ROUTE, requested),
        Intent::AttractionsInArea => {
            if query.is_listing() {
                replies::ATTRACTIONS_IN_AREA.to_string()
            } else {
                let subtype = records.first().and_then(|r| r.subtype()).unwrap_or_default();
                render(replies::ATTRACTIONS_BY_SUBTYPE, subtype)
            }
        },
        Intent::TravelAgenciesInArea
        | Intent::AccommodationInArea
        | Intent::FoodAndDrinkInArea
        | Intent::RecreationInArea => render(replies::SERVICES_BY_ACTIVITY, requested),
        Intent::AttractionOutsideHistoricCenter => replies::OUTSIDE_HISTORIC_CENTER.to_string(),
        Intent::Unrecognized(_) => replies::ACTION_NOT_IDENTIFIED.to_string(),
    }
}

/// Apology for an empty match set
pub fn not_found_message(intent: &Intent) -> &'static str {
    match intent.entity_kind() {
        Some(EntityKind::Attraction) => replies::ATTRACTION_NOT_FOUND,
        Some(EntityKind::Service) => replies::SERVICE_NOT_FOUND,
        None => replies::LISTING_NOT_FOUND,
    }
}

// Records without a name still take a slot in the list.
fn joined_names(records: &ResultSet) -> String {
    records
        .records()
        .map(|record| record.name().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}
