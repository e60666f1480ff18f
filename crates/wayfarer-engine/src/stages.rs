//! Stage executors
//!
//! Each executor receives the plan state for a single invocation, calls at
//! most its own providers, and returns with its field written. Recoverable
//! provider trouble becomes an "attempted, empty" collection; only a
//! broken router/stage contract records a fatal error.

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use wayfarer_core::{
    ActivityCriteria, ActivityOffer, Collection, DestinationInfo, FlightCriteria, FlightOffer,
    HotelCriteria, HotelOffer, PlanState, PlannerConfig, StageId,
};
use wayfarer_providers::{
    ActivitySearch, AmadeusFlights, BookingHotels, DestinationDirectory, DestinationLookup,
    FlightSearch, GuideActivities, HotelSearch, ProviderConfig, ProviderError,
};

use crate::itinerary::build_itinerary;
use crate::optimizer::{optimize, OptimizerInput};
use crate::report::render_report;

// Stage-level defaults applied when extraction left a field absent,
// mirroring what the search criteria need at minimum.
const DEFAULT_ORIGIN: &str = "New York";
const DEFAULT_BUDGET_PER_PERSON: f64 = 1000.0;
const DEFAULT_TRIP_NIGHTS: i64 = 7;
const DEFAULT_LEAD_DAYS: i64 = 30;

const HOTEL_BUDGET_SHARE: f64 = 0.45;
const ACTIVITY_BUDGET_SHARE: f64 = 0.20;

/// The four provider clients a planning session talks to.
#[derive(Clone)]
pub struct ProviderSet {
    pub flights: Arc<dyn FlightSearch>,
    pub hotels: Arc<dyn HotelSearch>,
    pub activities: Arc<dyn ActivitySearch>,
    pub destinations: Arc<dyn DestinationLookup>,
}

impl ProviderSet {
    /// Wire up the live clients from provider configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            flights: Arc::new(AmadeusFlights::new(config)?),
            hotels: Arc::new(BookingHotels::new(config)?),
            activities: Arc::new(GuideActivities::new(config)?),
            destinations: Arc::new(DestinationDirectory::new()),
        })
    }
}

/// Merge the session's extracted requirements into the state.
///
/// Only absent fields are filled, so re-entry never clobbers anything. A
/// request without a destination cannot be planned at all; that is the one
/// fatal outcome here.
pub(crate) fn extract_requirements(state: &mut PlanState) {
    let request = state.request.clone();

    if state.destination.is_none() {
        state.destination = request.destination;
    }
    if state.origin.is_none() {
        state.origin = request.origin;
    }
    if state.departure_date.is_none() {
        state.departure_date = request.departure_date;
    }
    if state.return_date.is_none() {
        state.return_date = request.return_date;
    }
    if state.budget_per_person.is_none() {
        state.budget_per_person = request.budget_per_person;
    }
    if state.traveler_count.is_none() {
        state.traveler_count = request.traveler_count;
    }
    if state.preferences.is_empty() {
        state.preferences = request.preferences;
    }
    if let Some(priority) = request.priority {
        state.priority = priority;
    }

    if state.destination.is_none() {
        state.record_error("trip request contains no destination");
        return;
    }

    tracing::info!(
        destination = state.destination.as_deref().unwrap_or(""),
        travelers = ?state.traveler_count,
        "requirements extracted"
    );
}

pub(crate) async fn get_destination_info(
    state: &mut PlanState,
    providers: &ProviderSet,
    limit: Duration,
) {
    if state.destination_info.is_some() {
        return;
    }
    let Some(destination) = state.destination.clone() else {
        state.record_error("destination lookup reached without a destination");
        return;
    };

    let info = match timeout(limit, providers.destinations.lookup(&destination)).await {
        Ok(Ok(info)) => info,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "destination lookup failed, using generic facts");
            generic_destination()
        }
        Err(_) => {
            tracing::warn!("destination lookup timed out, using generic facts");
            generic_destination()
        }
    };
    state.destination_info = Some(info);
}

/// Run the offer-collection searches.
///
/// With parallel search enabled, every still-missing category is fetched
/// concurrently and the writes land together, preserving the serial
/// illusion for the router. Serially, only the requested stage runs.
pub(crate) async fn collect_offers(
    state: &mut PlanState,
    providers: &ProviderSet,
    config: &PlannerConfig,
    requested: StageId,
) {
    let Some(destination) = state.destination.clone() else {
        state.record_error("offer search reached without a destination");
        return;
    };

    let run_flights =
        state.flights.is_none() && (config.parallel_search || requested == StageId::SearchFlights);
    let run_hotels =
        state.hotels.is_none() && (config.parallel_search || requested == StageId::SearchHotels);
    let run_activities = state.activities.is_none()
        && (config.parallel_search || requested == StageId::SearchActivities);

    let flight_criteria = flight_criteria(state, &destination);
    let hotel_criteria = hotel_criteria(state, &destination);
    let activity_criteria = activity_criteria(state, &destination);
    let limit = config.search_timeout();

    let (flights, hotels, activities) = tokio::join!(
        async {
            if run_flights {
                Some(search_flights(providers, &flight_criteria, limit).await)
            } else {
                None
            }
        },
        async {
            if run_hotels {
                Some(search_hotels(providers, &hotel_criteria, limit).await)
            } else {
                None
            }
        },
        async {
            if run_activities {
                Some(search_activities(providers, &activity_criteria, limit).await)
            } else {
                None
            }
        },
    );

    if let Some(collection) = flights {
        state.flights = Some(collection);
    }
    if let Some(collection) = hotels {
        state.hotels = Some(collection);
    }
    if let Some(collection) = activities {
        state.activities = Some(collection);
    }
}

async fn search_flights(
    providers: &ProviderSet,
    criteria: &FlightCriteria,
    limit: Duration,
) -> Collection<FlightOffer> {
    match timeout(limit, providers.flights.search(criteria)).await {
        Ok(Ok(offers)) => {
            tracing::info!(count = offers.len(), "flight search finished");
            Collection::from_offers(offers, "no flights matched the search")
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "flight search failed");
            Collection::empty(format!("flight search failed: {e}"))
        }
        Err(_) => {
            tracing::warn!("flight search timed out");
            Collection::empty("flight search timed out")
        }
    }
}

async fn search_hotels(
    providers: &ProviderSet,
    criteria: &HotelCriteria,
    limit: Duration,
) -> Collection<HotelOffer> {
    match timeout(limit, providers.hotels.search(criteria)).await {
        Ok(Ok(offers)) => {
            tracing::info!(count = offers.len(), "hotel search finished");
            Collection::from_offers(offers, "no hotels matched the search")
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "hotel search failed");
            Collection::empty(format!("hotel search failed: {e}"))
        }
        Err(_) => {
            tracing::warn!("hotel search timed out");
            Collection::empty("hotel search timed out")
        }
    }
}

async fn search_activities(
    providers: &ProviderSet,
    criteria: &ActivityCriteria,
    limit: Duration,
) -> Collection<ActivityOffer> {
    match timeout(limit, providers.activities.search(criteria)).await {
        Ok(Ok(offers)) => {
            tracing::info!(count = offers.len(), "activity search finished");
            Collection::from_offers(offers, "no activities matched the search")
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "activity search failed");
            Collection::empty(format!("activity search failed: {e}"))
        }
        Err(_) => {
            tracing::warn!("activity search timed out");
            Collection::empty("activity search timed out")
        }
    }
}

pub(crate) fn optimize_budget(state: &mut PlanState, config: &PlannerConfig) {
    if state.optimization_complete {
        return;
    }

    let (Some(flights), Some(hotels), Some(activities)) =
        (&state.flights, &state.hotels, &state.activities)
    else {
        state.record_error("budget optimization reached before all searches were attempted");
        return;
    };

    let max_activities = state
        .trip_nights()
        .map(|n| n.max(1) as usize)
        .unwrap_or(config.max_activities);

    let selection = optimize(OptimizerInput {
        flights: flights.offers(),
        hotels: hotels.offers(),
        activities: activities.offers(),
        budget_per_person: effective_budget(state),
        traveler_count: state.traveler_count.unwrap_or(1),
        max_activities,
        priority: state.priority,
    });

    state.selected_flight = selection.flight;
    state.selected_hotel = selection.hotel;
    state.selected_activities = selection.activities;
    state.budget_report = Some(selection.report);
    // Set unconditionally, feasible or not; the router needs this flag to
    // stop re-invoking the optimizer on a genuinely infeasible budget.
    state.optimization_complete = true;
}

pub(crate) fn generate_itinerary(state: &mut PlanState) {
    if state.itinerary.is_some() {
        return;
    }
    if !state.optimization_complete {
        state.record_error("itinerary generation reached before budget optimization");
        return;
    }

    let checkin = effective_departure(state);
    let nights = effective_nights(state);
    let itinerary = build_itinerary(state, checkin, nights);
    tracing::info!(days = itinerary.days.len(), "itinerary generated");
    state.itinerary = Some(itinerary);
}

pub(crate) fn format_final_response(state: &mut PlanState) {
    if state.final_report.is_some() {
        return;
    }
    state.final_report = Some(render_report(state));
}

fn flight_criteria(state: &PlanState, destination: &str) -> FlightCriteria {
    FlightCriteria {
        origin: state
            .origin
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        destination: destination.to_string(),
        departure_date: effective_departure(state),
        return_date: state.return_date,
        travelers: state.traveler_count.unwrap_or(1),
        max_price: Some(effective_budget(state)),
    }
}

fn hotel_criteria(state: &PlanState, destination: &str) -> HotelCriteria {
    let checkin = effective_departure(state);
    let nights = effective_nights(state);
    HotelCriteria {
        destination: destination.to_string(),
        checkin,
        checkout: checkin + ChronoDuration::days(nights),
        travelers: state.traveler_count.unwrap_or(1),
        budget_per_night: effective_budget(state) * HOTEL_BUDGET_SHARE / nights as f64,
    }
}

fn activity_criteria(state: &PlanState, destination: &str) -> ActivityCriteria {
    let nights = effective_nights(state);
    ActivityCriteria {
        destination: destination.to_string(),
        preferences: state.preferences.clone(),
        daily_budget: effective_budget(state) * ACTIVITY_BUDGET_SHARE / nights as f64,
        max_results: nights.max(1) as usize,
    }
}

fn effective_departure(state: &PlanState) -> NaiveDate {
    state
        .departure_date
        .unwrap_or_else(|| Utc::now().date_naive() + ChronoDuration::days(DEFAULT_LEAD_DAYS))
}

fn effective_nights(state: &PlanState) -> i64 {
    state
        .trip_nights()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_TRIP_NIGHTS)
}

fn effective_budget(state: &PlanState) -> f64 {
    state.budget_per_person.unwrap_or(DEFAULT_BUDGET_PER_PERSON)
}

fn generic_destination() -> DestinationInfo {
    DestinationInfo {
        country: "Unknown".into(),
        currency: "USD".into(),
        timezone: "Local Time".into(),
        language: "Local Language".into(),
        best_season: "Year-round".into(),
        districts: vec!["City Center".into()],
        transit: vec!["Public Transport".into(), "Taxi".into()],
    }
}
