//! Day-plan assembly from the optimized selections

use chrono::{Duration, NaiveDate};
use wayfarer_core::{BookingSummary, DayPlan, Itinerary, ItineraryItem, PlanState};

// Fixed per-person meal and free-day estimates, matching what the report
// presents as "estimated daily costs".
const WELCOME_DINNER_COST: f64 = 50.0;
const BREAKFAST_COST: f64 = 15.0;
const DINNER_COST: f64 = 60.0;
const FREE_EXPLORATION_COST: f64 = 30.0;

/// Build the ordered day-plans for the trip.
///
/// Absent selections degrade to descriptive entries rather than failing:
/// the itinerary always covers arrival, the days in between, and
/// departure.
pub fn build_itinerary(state: &PlanState, checkin: NaiveDate, nights: i64) -> Itinerary {
    let destination = state.destination.as_deref().unwrap_or("your destination");
    let nights = nights.max(1);
    let mut days = Vec::with_capacity(nights as usize + 1);

    days.push(arrival_day(state, destination, checkin));

    let mut activity_iter = state.selected_activities.iter();
    for day_number in 2..=nights {
        let date = checkin + Duration::days(day_number - 1);
        let mut items = vec![ItineraryItem {
            time_of_day: "Morning".into(),
            title: "Breakfast".into(),
            detail: "Breakfast at the hotel or a local cafe".into(),
            cost: BREAKFAST_COST,
            duration: "1 hour".into(),
        }];

        match activity_iter.next() {
            Some(activity) => items.push(ItineraryItem {
                time_of_day: "Mid-Morning to Afternoon".into(),
                title: activity.name.clone(),
                detail: activity.description.clone(),
                cost: activity.price.amount,
                duration: activity.duration.clone(),
            }),
            None => items.push(ItineraryItem {
                time_of_day: "Morning to Afternoon".into(),
                title: "Free Exploration".into(),
                detail: format!("Explore {destination} at your own pace"),
                cost: FREE_EXPLORATION_COST,
                duration: "4 hours".into(),
            }),
        }

        items.push(ItineraryItem {
            time_of_day: "Evening".into(),
            title: "Dinner & Leisure".into(),
            detail: "Local dining and evening activities".into(),
            cost: DINNER_COST,
            duration: "2-3 hours".into(),
        });

        days.push(day_plan(date, day_number as u32, format!("Day {day_number} - Exploration"), items));
    }

    let departure_date = checkin + Duration::days(nights);
    days.push(day_plan(
        departure_date,
        nights as u32 + 1,
        "Departure Day".into(),
        vec![
            ItineraryItem {
                time_of_day: "Morning".into(),
                title: "Hotel Check-out".into(),
                detail: "Pack and check out of the hotel".into(),
                cost: 0.0,
                duration: "1 hour".into(),
            },
            ItineraryItem {
                time_of_day: "Late Morning/Afternoon".into(),
                title: "Departure".into(),
                detail: "Travel to the airport and depart".into(),
                cost: 0.0,
                duration: "Variable".into(),
            },
        ],
    ));

    let total_cost = days.iter().map(|d| d.daily_total).sum();
    let activity_cost = state.selected_activities.iter().map(|a| a.price.amount).sum();

    Itinerary {
        days,
        total_cost,
        booking: BookingSummary {
            flight_token: state.selected_flight.as_ref().map(|f| f.booking_token.clone()),
            hotel_url: state.selected_hotel.as_ref().map(|h| h.booking_url.clone()),
            activity_count: state.selected_activities.len(),
            activity_cost,
        },
    }
}

fn arrival_day(state: &PlanState, destination: &str, date: NaiveDate) -> DayPlan {
    let mut items = Vec::new();

    match &state.selected_flight {
        Some(flight) => items.push(ItineraryItem {
            time_of_day: "Morning/Afternoon".into(),
            title: format!("Flight Arrival - {}", flight.airline),
            detail: format!("Arrive in {destination}"),
            cost: flight.price.amount,
            duration: flight.duration.clone(),
        }),
        None => items.push(ItineraryItem {
            time_of_day: "Morning/Afternoon".into(),
            title: "Arrival".into(),
            detail: format!(
                "No flight option found within budget; arrange travel to {destination} separately"
            ),
            cost: 0.0,
            duration: "Variable".into(),
        }),
    }

    match &state.selected_hotel {
        Some(hotel) => items.push(ItineraryItem {
            time_of_day: "Late Afternoon".into(),
            title: format!("Hotel Check-in - {}", hotel.name),
            detail: format!("Check into {} in {}", hotel.name, hotel.district),
            cost: 0.0,
            duration: "30 minutes".into(),
        }),
        None => items.push(ItineraryItem {
            time_of_day: "Late Afternoon".into(),
            title: "Accommodation".into(),
            detail: "No hotel option found within budget; book accommodation separately".into(),
            cost: 0.0,
            duration: "Variable".into(),
        }),
    }

    items.push(ItineraryItem {
        time_of_day: "Evening".into(),
        title: "Welcome Dinner".into(),
        detail: "Explore local dining near the hotel".into(),
        cost: WELCOME_DINNER_COST,
        duration: "2 hours".into(),
    });

    day_plan(date, 1, "Arrival Day".into(), items)
}

fn day_plan(date: NaiveDate, day_number: u32, title: String, items: Vec<ItineraryItem>) -> DayPlan {
    let daily_total = items.iter().map(|i| i.cost).sum();
    DayPlan {
        date,
        day_number,
        title,
        items,
        daily_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{
        ActivityOffer, FlightOffer, InterestTag, Price, Provenance, TripRequest,
    };

    fn checkin() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 8).unwrap()
    }

    fn state_with_selection() -> PlanState {
        let mut state = PlanState::new(TripRequest::default());
        state.destination = Some("Paris".into());
        state.selected_flight = Some(FlightOffer {
            id: "f".into(),
            airline: "Delta Airlines".into(),
            departure_time: "2025-10-08T08:00:00".into(),
            arrival_time: "2025-10-08T16:30:00".into(),
            duration: "PT8H30M".into(),
            stops: 1,
            price: Price::usd(450.0),
            rating: 4.2,
            booking_token: "tok_1".into(),
            provenance: Provenance::live("test"),
        });
        state.selected_activities = vec![ActivityOffer {
            id: "a".into(),
            name: "Walking Tour".into(),
            description: "See the city".into(),
            category: InterestTag::Culture,
            duration: "2.5 hours".into(),
            price: Price::usd(25.0),
            rating: 4.4,
            booking_url: "https://tours.example.com/a".into(),
            provenance: Provenance::live("test"),
        }];
        state
    }

    #[test]
    fn test_day_count_covers_arrival_through_departure() {
        let itinerary = build_itinerary(&state_with_selection(), checkin(), 3);
        // Arrival + two middle days + departure.
        assert_eq!(itinerary.days.len(), 4);
        assert_eq!(itinerary.days[0].title, "Arrival Day");
        assert_eq!(itinerary.days.last().unwrap().title, "Departure Day");
        assert_eq!(
            itinerary.days.last().unwrap().date,
            checkin() + Duration::days(3)
        );
    }

    #[test]
    fn test_activities_assigned_then_free_days() {
        let itinerary = build_itinerary(&state_with_selection(), checkin(), 3);
        let day2 = &itinerary.days[1];
        assert!(day2.items.iter().any(|i| i.title == "Walking Tour"));
        let day3 = &itinerary.days[2];
        assert!(day3.items.iter().any(|i| i.title == "Free Exploration"));
    }

    #[test]
    fn test_daily_totals_sum_items() {
        let itinerary = build_itinerary(&state_with_selection(), checkin(), 2);
        let arrival = &itinerary.days[0];
        assert_eq!(arrival.daily_total, 450.0 + WELCOME_DINNER_COST);
        let expected_total: f64 = itinerary.days.iter().map(|d| d.daily_total).sum();
        assert_eq!(itinerary.total_cost, expected_total);
    }

    #[test]
    fn test_missing_selections_degrade_gracefully() {
        let mut state = PlanState::new(TripRequest::default());
        state.destination = Some("Paris".into());
        let itinerary = build_itinerary(&state, checkin(), 2);

        let arrival = &itinerary.days[0];
        assert!(arrival
            .items
            .iter()
            .any(|i| i.detail.contains("No flight option found within budget")));
        assert!(arrival
            .items
            .iter()
            .any(|i| i.detail.contains("No hotel option found within budget")));
        assert!(itinerary.booking.flight_token.is_none());
    }
}
