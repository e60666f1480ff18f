//! The state machine's transition function

use wayfarer_core::{PlanState, StageId};

/// Decide which stage runs next, from the plan state alone.
///
/// Pure and total: the first matching rule wins, and every rule tests field
/// *presence*, not correctness. A search that found nothing must have
/// written an explicit empty marker or this function will keep routing back
/// to it; that contract is what guarantees the loop converges.
pub fn route(state: &PlanState) -> StageId {
    // Error paths always short-circuit to the terminal stage so the user
    // still receives a report.
    if state.error_occurred {
        return StageId::FormatFinalResponse;
    }

    if state.destination.is_none() {
        return StageId::ExtractRequirements;
    }

    if state.destination_info.is_none() {
        return StageId::GetDestinationInfo;
    }

    if state.flights.is_none() {
        return StageId::SearchFlights;
    }

    if state.hotels.is_none() {
        return StageId::SearchHotels;
    }

    if state.activities.is_none() {
        return StageId::SearchActivities;
    }

    if !state.optimization_complete {
        return StageId::OptimizeBudget;
    }

    if state.itinerary.is_none() {
        return StageId::GenerateItinerary;
    }

    StageId::FormatFinalResponse
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{
        BookingSummary, Collection, DestinationInfo, FlightOffer, Itinerary, Price, Provenance,
        TripRequest,
    };

    fn destination_info() -> DestinationInfo {
        DestinationInfo {
            country: "France".into(),
            currency: "EUR".into(),
            timezone: "CET".into(),
            language: "French".into(),
            best_season: "Spring".into(),
            districts: vec![],
            transit: vec![],
        }
    }

    fn flight() -> FlightOffer {
        FlightOffer {
            id: "f".into(),
            airline: "Test Air".into(),
            departure_time: String::new(),
            arrival_time: String::new(),
            duration: "PT8H".into(),
            stops: 0,
            price: Price::usd(400.0),
            rating: 4.0,
            booking_token: "t".into(),
            provenance: Provenance::live("test"),
        }
    }

    /// Build a state advanced up to (but excluding) the given rule.
    fn state_through(filled: usize) -> PlanState {
        let mut state = PlanState::new(TripRequest::default());
        if filled >= 1 {
            state.destination = Some("Paris".into());
        }
        if filled >= 2 {
            state.destination_info = Some(destination_info());
        }
        if filled >= 3 {
            state.flights = Some(Collection::from_offers(vec![flight()], ""));
        }
        if filled >= 4 {
            state.hotels = Some(Collection::empty("none found"));
        }
        if filled >= 5 {
            state.activities = Some(Collection::empty("none found"));
        }
        if filled >= 6 {
            state.optimization_complete = true;
        }
        if filled >= 7 {
            state.itinerary = Some(Itinerary {
                days: vec![],
                total_cost: 0.0,
                booking: BookingSummary::default(),
            });
        }
        state
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(route(&state_through(0)), StageId::ExtractRequirements);
        assert_eq!(route(&state_through(1)), StageId::GetDestinationInfo);
        assert_eq!(route(&state_through(2)), StageId::SearchFlights);
        assert_eq!(route(&state_through(3)), StageId::SearchHotels);
        assert_eq!(route(&state_through(4)), StageId::SearchActivities);
        assert_eq!(route(&state_through(5)), StageId::OptimizeBudget);
        assert_eq!(route(&state_through(6)), StageId::GenerateItinerary);
        assert_eq!(route(&state_through(7)), StageId::FormatFinalResponse);
    }

    #[test]
    fn test_error_short_circuits_every_rule() {
        for filled in 0..=7 {
            let mut state = state_through(filled);
            state.record_error("boom");
            assert_eq!(route(&state), StageId::FormatFinalResponse);
        }
    }

    #[test]
    fn test_empty_marker_advances_past_search() {
        // Hotels attempted and empty is presence, not absence: the router
        // must move on to activities instead of re-invoking the search.
        let state = state_through(4);
        assert!(state.hotels.as_ref().unwrap().is_empty());
        assert_eq!(route(&state), StageId::SearchActivities);
    }

    #[test]
    fn test_route_is_deterministic() {
        let state = state_through(3);
        let first = route(&state);
        for _ in 0..10 {
            assert_eq!(route(&state), first);
        }
    }
}
