//! Final report rendering
//!
//! The terminal stage renders whatever the plan state holds, however far
//! the pipeline got. This is the only stage allowed to run with
//! `error_occurred` set, so it must never fail itself.

use std::fmt::Write;
use wayfarer_core::{OptimizationStatus, PlanState};

/// Render the user-facing plain-text report from the full plan state.
pub fn render_report(state: &PlanState) -> String {
    let mut out = String::new();

    let destination = state.destination.as_deref().unwrap_or("UNKNOWN DESTINATION");
    let _ = writeln!(out, "TRAVEL PLAN FOR {}", destination.to_uppercase());

    if state.error_occurred {
        let message = state
            .error_message
            .as_deref()
            .unwrap_or("unspecified internal error");
        let _ = writeln!(out, "\nINTERNAL ERROR - PARTIAL PLAN ONLY");
        let _ = writeln!(out, "{message}");
    } else if state.has_placeholder_data() {
        let _ = writeln!(
            out,
            "\nNote: no live data was available for some searches; placeholder options are shown."
        );
    }

    overview(&mut out, state);
    destination_facts(&mut out, state);
    offers_found(&mut out, state);
    selections(&mut out, state);
    itinerary(&mut out, state);
    booking(&mut out, state);

    out
}

fn overview(out: &mut String, state: &PlanState) {
    let _ = writeln!(out, "\nTRIP OVERVIEW");
    if let Some(destination) = &state.destination {
        let _ = writeln!(out, "Destination: {destination}");
    }
    if let Some(origin) = &state.origin {
        let _ = writeln!(out, "Departing from: {origin}");
    }
    match (state.departure_date, state.return_date) {
        (Some(dep), Some(ret)) => {
            let _ = writeln!(out, "Dates: {dep} to {ret} ({} nights)", (ret - dep).num_days());
        }
        (Some(dep), None) => {
            let _ = writeln!(out, "Departure: {dep} (one-way)");
        }
        _ => {}
    }
    if let Some(travelers) = state.traveler_count {
        let _ = writeln!(out, "Travelers: {travelers}");
    }
    if let Some(budget) = state.budget_per_person {
        let _ = writeln!(out, "Budget per person: ${budget:.2}");
    }
    let _ = writeln!(out, "Priority: {}", state.priority);
}

fn destination_facts(out: &mut String, state: &PlanState) {
    let Some(info) = &state.destination_info else {
        return;
    };
    let _ = writeln!(out, "\nDESTINATION INFORMATION");
    let _ = writeln!(out, "Country: {}", info.country);
    let _ = writeln!(out, "Currency: {}", info.currency);
    let _ = writeln!(out, "Language: {}", info.language);
    let _ = writeln!(out, "Timezone: {}", info.timezone);
    let _ = writeln!(out, "Best time to visit: {}", info.best_season);
    if !info.districts.is_empty() {
        let _ = writeln!(out, "Districts: {}", info.districts.join(", "));
    }
    if !info.transit.is_empty() {
        let _ = writeln!(out, "Transportation: {}", info.transit.join(", "));
    }
}

fn offers_found(out: &mut String, state: &PlanState) {
    if let Some(flights) = &state.flights {
        let _ = writeln!(out, "\nFLIGHT OPTIONS FOUND");
        if flights.is_empty() {
            let _ = writeln!(out, "None found.");
        }
        for (i, flight) in flights.offers().iter().take(3).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - ${:.2}",
                i + 1,
                flight.airline,
                flight.price.amount
            );
            let _ = writeln!(
                out,
                "   Duration: {}, Stops: {}, Rating: {:.1}/5",
                flight.duration, flight.stops, flight.rating
            );
        }
    }

    if let Some(hotels) = &state.hotels {
        let _ = writeln!(out, "\nHOTEL OPTIONS FOUND");
        if hotels.is_empty() {
            let _ = writeln!(out, "None found.");
        }
        for (i, hotel) in hotels.offers().iter().take(3).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - ${:.2}/night",
                i + 1,
                hotel.name,
                hotel.price_per_night.amount
            );
            let _ = writeln!(
                out,
                "   Rating: {:.1}/10, Location: {}",
                hotel.rating, hotel.district
            );
            if !hotel.amenities.is_empty() {
                let shown: Vec<_> = hotel.amenities.iter().take(3).cloned().collect();
                let _ = writeln!(out, "   Amenities: {}", shown.join(", "));
            }
        }
    }

    if let Some(activities) = &state.activities {
        let _ = writeln!(out, "\nACTIVITY OPTIONS FOUND");
        if activities.is_empty() {
            let _ = writeln!(out, "None found.");
        }
        for (i, activity) in activities.offers().iter().take(5).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - ${:.2}",
                i + 1,
                activity.name,
                activity.price.amount
            );
            let _ = writeln!(
                out,
                "   Category: {}, Duration: {}, Rating: {:.1}/5",
                activity.category, activity.duration, activity.rating
            );
        }
    }
}

fn selections(out: &mut String, state: &PlanState) {
    if !state.optimization_complete {
        return;
    }
    let _ = writeln!(out, "\nOPTIMIZED SELECTIONS");
    match &state.selected_flight {
        Some(flight) => {
            let _ = writeln!(out, "Flight: {} - ${:.2}", flight.airline, flight.price.amount);
        }
        None => {
            let _ = writeln!(out, "Flight: no option found within budget");
        }
    }
    match &state.selected_hotel {
        Some(hotel) => {
            let _ = writeln!(
                out,
                "Hotel: {} - ${:.2} for the stay (${:.2}/night)",
                hotel.name, hotel.total.amount, hotel.price_per_night.amount
            );
        }
        None => {
            let _ = writeln!(out, "Hotel: no option found within budget");
        }
    }
    let activity_total: f64 = state.selected_activities.iter().map(|a| a.price.amount).sum();
    let _ = writeln!(
        out,
        "Activities: {} selected, ${activity_total:.2} total",
        state.selected_activities.len()
    );
    for activity in &state.selected_activities {
        let _ = writeln!(out, "  - {} (${:.2})", activity.name, activity.price.amount);
    }

    if let Some(report) = &state.budget_report {
        let _ = writeln!(out, "\nBUDGET SUMMARY (per person)");
        let _ = writeln!(out, "Flight: ${:.2}", report.breakdown.flight);
        let _ = writeln!(out, "Hotel: ${:.2}", report.breakdown.hotel);
        let _ = writeln!(out, "Activities: ${:.2}", report.breakdown.activities);
        let _ = writeln!(out, "Total: ${:.2}", report.total_cost);
        let _ = writeln!(out, "Remaining: ${:.2}", report.remaining);
        if report.status == OptimizationStatus::Partial {
            let _ = writeln!(out, "Some categories had no affordable option.");
        }
        for recommendation in &report.recommendations {
            let _ = writeln!(out, "* {recommendation}");
        }
    }
}

fn itinerary(out: &mut String, state: &PlanState) {
    let Some(itinerary) = &state.itinerary else {
        return;
    };
    let _ = writeln!(out, "\nDETAILED ITINERARY");
    let _ = writeln!(
        out,
        "Estimated trip cost: ${:.2} per person over {} days",
        itinerary.total_cost,
        itinerary.days.len()
    );
    for day in &itinerary.days {
        let _ = writeln!(out, "\nDAY {} - {} ({})", day.day_number, day.title, day.date);
        for item in &day.items {
            let _ = writeln!(out, "  {}: {}", item.time_of_day, item.title);
            let _ = writeln!(out, "    {}", item.detail);
            if item.cost > 0.0 {
                let _ = writeln!(out, "    Cost: ${:.2}", item.cost);
            }
        }
        let _ = writeln!(out, "  Daily total: ${:.2}", day.daily_total);
    }
}

fn booking(out: &mut String, state: &PlanState) {
    let Some(itinerary) = &state.itinerary else {
        return;
    };
    let _ = writeln!(out, "\nBOOKING INFORMATION");
    match &itinerary.booking.flight_token {
        Some(token) => {
            let _ = writeln!(out, "Flight booking token: {token}");
        }
        None => {
            let _ = writeln!(out, "Flight: book separately");
        }
    }
    match &itinerary.booking.hotel_url {
        Some(url) if !url.is_empty() => {
            let _ = writeln!(out, "Hotel booking: {url}");
        }
        _ => {
            let _ = writeln!(out, "Hotel: contact the property directly");
        }
    }
    let _ = writeln!(
        out,
        "Activities: {} bookings, ${:.2} total; book through the listed providers",
        itinerary.booking.activity_count, itinerary.booking.activity_cost
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{Collection, PlanState, TripRequest};

    #[test]
    fn test_error_report_surfaces_message_and_partial_state() {
        let mut state = PlanState::new(TripRequest::default());
        state.destination = Some("Paris".into());
        state.record_error("stage contract violated: missing dates");

        let report = render_report(&state);
        assert!(report.contains("TRAVEL PLAN FOR PARIS"));
        assert!(report.contains("INTERNAL ERROR"));
        assert!(report.contains("missing dates"));
    }

    #[test]
    fn test_report_renders_on_completely_empty_state() {
        let state = PlanState::new(TripRequest::default());
        let report = render_report(&state);
        assert!(report.contains("UNKNOWN DESTINATION"));
    }

    #[test]
    fn test_empty_collections_render_as_none_found() {
        let mut state = PlanState::new(TripRequest::default());
        state.destination = Some("Paris".into());
        state.hotels = Some(Collection::empty("provider down"));

        let report = render_report(&state);
        assert!(report.contains("HOTEL OPTIONS FOUND"));
        assert!(report.contains("None found."));
    }
}
