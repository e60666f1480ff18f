//! Budget optimization engine
//!
//! Picks one flight, one hotel, and a subset of activities that jointly
//! respect the per-person budget and the session's priority. Category
//! shares are soft ceilings: a category with no offer inside its share may
//! borrow from the still-unspent remainder, but the per-person sum never
//! exceeds the budget.

use wayfarer_core::{
    ActivityOffer, BudgetPriority, BudgetReport, CostBreakdown, FlightOffer, HotelOffer, Offer,
    OptimizationStatus,
};

/// Soft budget shares per category.
const FLIGHT_SHARE: f64 = 0.35;
const HOTEL_SHARE: f64 = 0.45;
const ACTIVITY_SHARE: f64 = 0.20;

/// Everything the optimizer reads; prices are per person.
#[derive(Debug)]
pub struct OptimizerInput<'a> {
    pub flights: &'a [FlightOffer],
    pub hotels: &'a [HotelOffer],
    pub activities: &'a [ActivityOffer],
    pub budget_per_person: f64,
    pub traveler_count: u32,
    pub max_activities: usize,
    pub priority: BudgetPriority,
}

/// What the optimizer chose, plus the summary the report renders.
#[derive(Debug)]
pub struct Selection {
    pub flight: Option<FlightOffer>,
    pub hotel: Option<HotelOffer>,
    pub activities: Vec<ActivityOffer>,
    pub report: BudgetReport,
}

/// Solve the constrained selection.
///
/// Borrowing resolves in stage order: flights first, then hotels against
/// what remains, then activities against everything left over. A category
/// with no candidate inside its widened ceiling is skipped rather than
/// breaking the budget; the caller reports it as "no option found".
pub fn optimize(input: OptimizerInput<'_>) -> Selection {
    let budget = input.budget_per_person;
    let mut spent = 0.0;

    let flight = pick_category(
        input.flights,
        input.priority,
        budget * FLIGHT_SHARE,
        budget - spent,
    )
    .cloned();
    if let Some(f) = &flight {
        spent += f.price();
    }

    let hotel = pick_category(
        input.hotels,
        input.priority,
        budget * HOTEL_SHARE,
        budget - spent,
    )
    .cloned();
    if let Some(h) = &hotel {
        spent += h.price();
    }

    // Activities get their share plus whatever the other categories left
    // unspent.
    let activity_budget = (budget - spent).max(0.0);
    let activities = pick_activities(
        input.activities,
        input.priority,
        activity_budget,
        input.max_activities,
    );
    let activity_cost: f64 = activities.iter().map(|a| a.price()).sum();
    spent += activity_cost;

    let breakdown = CostBreakdown {
        flight: flight.as_ref().map(|f| f.price()).unwrap_or(0.0),
        hotel: hotel.as_ref().map(|h| h.price()).unwrap_or(0.0),
        activities: activity_cost,
    };
    let remaining = (budget - spent).max(0.0);

    let flight_missing = flight.is_none() && !input.flights.is_empty();
    let hotel_missing = hotel.is_none() && !input.hotels.is_empty();
    let activities_missing = activities.is_empty() && !input.activities.is_empty();
    let status = if flight_missing || hotel_missing || activities_missing {
        OptimizationStatus::Partial
    } else {
        OptimizationStatus::Complete
    };

    let recommendations = build_recommendations(
        input.flights,
        input.hotels,
        flight_missing,
        hotel_missing,
        activities_missing,
        remaining,
    );

    tracing::info!(
        priority = %input.priority,
        travelers = input.traveler_count,
        total = spent,
        remaining,
        status = ?status,
        "budget optimization finished"
    );

    Selection {
        flight,
        hotel,
        activities,
        report: BudgetReport {
            breakdown,
            total_cost: spent,
            remaining,
            status,
            recommendations,
        },
    }
}

/// Select one offer for a category under a soft ceiling.
///
/// Offers within the share ceiling are preferred; when none fit, the
/// ceiling widens to the whole still-available budget (borrowing). An
/// empty eligible set after widening means the category is skipped.
fn pick_category<T: Offer>(offers: &[T], priority: BudgetPriority, ceiling: f64, available: f64) -> Option<&T> {
    let available = available.max(0.0);
    // An earlier category may already have borrowed into this share, so
    // the effective ceiling is also bounded by what is actually left.
    let ceiling = ceiling.min(available);
    let within_share: Vec<&T> = offers.iter().filter(|o| o.price() <= ceiling).collect();

    let eligible = if within_share.is_empty() {
        offers.iter().filter(|o| o.price() <= available).collect()
    } else {
        within_share
    };

    pick_best(eligible, priority)
}

fn pick_best<'a, T: Offer>(eligible: Vec<&'a T>, priority: BudgetPriority) -> Option<&'a T> {
    eligible.into_iter().max_by(|a, b| {
        score(*a, priority)
            .partial_cmp(&score(*b, priority))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| tie_break(*a, *b, priority))
    })
}

/// Primary ranking per priority; higher is better.
fn score<T: Offer>(offer: &T, priority: BudgetPriority) -> f64 {
    match priority {
        BudgetPriority::Economy => -offer.price(),
        BudgetPriority::Luxury => offer.quality(),
        BudgetPriority::Balanced => {
            if offer.price() > 0.0 {
                offer.quality() / offer.price()
            } else {
                f64::INFINITY
            }
        }
    }
}

/// Secondary ranking for score ties; `Greater` means `a` wins.
fn tie_break<T: Offer>(a: &T, b: &T, priority: BudgetPriority) -> std::cmp::Ordering {
    match priority {
        // Equal price: prefer higher quality.
        BudgetPriority::Economy => a.quality().total_cmp(&b.quality()),
        // Equal quality or ratio: prefer cheaper.
        BudgetPriority::Luxury | BudgetPriority::Balanced => b.price().total_cmp(&a.price()),
    }
}

/// Greedy subset: repeatedly take the best-ranked remaining activity that
/// still fits, up to the configured count.
fn pick_activities(
    offers: &[ActivityOffer],
    priority: BudgetPriority,
    budget: f64,
    max_count: usize,
) -> Vec<ActivityOffer> {
    let mut ranked: Vec<&ActivityOffer> = offers.iter().collect();
    ranked.sort_by(|a, b| {
        score(*b, priority)
            .partial_cmp(&score(*a, priority))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| tie_break(*b, *a, priority))
    });

    let mut selected = Vec::new();
    let mut total = 0.0;
    for activity in ranked {
        if selected.len() >= max_count {
            break;
        }
        if total + activity.price() <= budget {
            total += activity.price();
            selected.push(activity.clone());
        }
    }
    selected
}

fn build_recommendations(
    flights: &[FlightOffer],
    hotels: &[HotelOffer],
    flight_missing: bool,
    hotel_missing: bool,
    activities_missing: bool,
    remaining: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if flight_missing {
        if let Some(cheapest) = flights.iter().map(|f| f.price()).reduce(f64::min) {
            recommendations.push(format!(
                "No flight fits the budget; the cheapest option costs ${cheapest:.2} per person"
            ));
        }
    }
    if hotel_missing {
        if let Some(cheapest) = hotels.iter().map(|h| h.price()).reduce(f64::min) {
            recommendations.push(format!(
                "No hotel fits the budget; the cheapest stay costs ${cheapest:.2} per person"
            ));
        }
    }
    if activities_missing {
        recommendations.push("No activities fit the remaining budget".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(format!("${remaining:.2} per person remains unallocated"));
        if remaining > 100.0 {
            recommendations.push("Consider upgrading accommodation or adding a premium activity".to_string());
        } else {
            recommendations.push("Set the remainder aside for meals and shopping".to_string());
        }
    } else {
        recommendations.push("Increase the budget or adjust dates to widen the options".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{InterestTag, Price, Provenance};

    fn flight(id: &str, price: f64, rating: f64) -> FlightOffer {
        FlightOffer {
            id: id.into(),
            airline: format!("{id} Air"),
            departure_time: String::new(),
            arrival_time: String::new(),
            duration: "PT8H".into(),
            stops: 1,
            price: Price::usd(price),
            rating,
            booking_token: id.into(),
            provenance: Provenance::live("test"),
        }
    }

    fn hotel(id: &str, total: f64, rating: f64) -> HotelOffer {
        HotelOffer {
            id: id.into(),
            name: format!("Hotel {id}"),
            district: "Center".into(),
            amenities: vec![],
            price_per_night: Price::usd(total / 7.0),
            total: Price::usd(total),
            rating,
            booking_url: String::new(),
            provenance: Provenance::live("test"),
        }
    }

    fn activity(id: &str, price: f64, rating: f64) -> ActivityOffer {
        ActivityOffer {
            id: id.into(),
            name: format!("Activity {id}"),
            description: String::new(),
            category: InterestTag::Culture,
            duration: "2 hours".into(),
            price: Price::usd(price),
            rating,
            booking_url: String::new(),
            provenance: Provenance::live("test"),
        }
    }

    fn input<'a>(
        flights: &'a [FlightOffer],
        hotels: &'a [HotelOffer],
        activities: &'a [ActivityOffer],
        budget: f64,
        priority: BudgetPriority,
    ) -> OptimizerInput<'a> {
        OptimizerInput {
            flights,
            hotels,
            activities,
            budget_per_person: budget,
            traveler_count: 2,
            max_activities: 8,
            priority,
        }
    }

    #[test]
    fn test_priority_rules_on_flight_pair() {
        // A: $400 quality 3, B: $600 quality 5, both within budget.
        let flights = [flight("A", 400.0, 3.0), flight("B", 600.0, 5.0)];

        let pick = |priority| {
            let selection = optimize(input(&flights, &[], &[], 2000.0, priority));
            selection.flight.unwrap().id
        };

        assert_eq!(pick(BudgetPriority::Economy), "A");
        assert_eq!(pick(BudgetPriority::Luxury), "B");
        // quality/price: A = 0.0075, B ≈ 0.0083.
        assert_eq!(pick(BudgetPriority::Balanced), "B");
    }

    #[test]
    fn test_economy_tie_breaks_on_quality() {
        let flights = [flight("low", 400.0, 3.0), flight("high", 400.0, 4.5)];
        let selection = optimize(input(&flights, &[], &[], 2000.0, BudgetPriority::Economy));
        assert_eq!(selection.flight.unwrap().id, "high");
    }

    #[test]
    fn test_luxury_respects_category_ceiling() {
        // Budget 1000 => flight ceiling 350. The 5-star flight at 900 is
        // outside the ceiling while a cheaper one fits, so it loses.
        let flights = [flight("fancy", 900.0, 5.0), flight("fits", 300.0, 4.0)];
        let selection = optimize(input(&flights, &[], &[], 1000.0, BudgetPriority::Luxury));
        assert_eq!(selection.flight.unwrap().id, "fits");
    }

    #[test]
    fn test_borrowing_widens_an_empty_share() {
        // Budget 1000 => flight ceiling 350, but every flight costs more.
        // The category borrows from the unspent remainder instead of
        // coming back empty.
        let flights = [flight("only", 500.0, 4.0)];
        let selection = optimize(input(&flights, &[], &[], 1000.0, BudgetPriority::Economy));
        assert_eq!(selection.flight.unwrap().id, "only");
        assert!(selection.report.total_cost <= 1000.0);
    }

    #[test]
    fn test_budget_invariant_holds_across_priorities() {
        let flights = [
            flight("f1", 450.0, 4.2),
            flight("f2", 520.0, 4.5),
            flight("f3", 380.0, 3.9),
        ];
        let hotels = [
            hotel("h1", 840.0, 8.5),
            hotel("h2", 455.0, 7.8),
            hotel("h3", 1960.0, 9.2),
        ];
        let activities = [
            activity("a1", 55.0, 4.8),
            activity("a2", 35.0, 4.6),
            activity("a3", 65.0, 4.4),
            activity("a4", 95.0, 4.9),
        ];

        for priority in [
            BudgetPriority::Economy,
            BudgetPriority::Balanced,
            BudgetPriority::Luxury,
        ] {
            for budget in [900.0, 1500.0, 3000.0] {
                let selection = optimize(input(&flights, &hotels, &activities, budget, priority));
                let total: f64 = selection.flight.as_ref().map(|f| f.price()).unwrap_or(0.0)
                    + selection.hotel.as_ref().map(|h| h.price()).unwrap_or(0.0)
                    + selection.activities.iter().map(|a| a.price()).sum::<f64>();
                assert!(
                    total <= budget + 1e-9,
                    "{priority} at {budget}: spent {total}"
                );
                assert!((selection.report.total_cost - total).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_infeasible_category_is_skipped_not_fatal() {
        // Nothing fits even after borrowing: selection stays empty and the
        // optimizer still produces a report.
        let flights = [flight("huge", 5000.0, 5.0)];
        let selection = optimize(input(&flights, &[], &[], 1000.0, BudgetPriority::Balanced));
        assert!(selection.flight.is_none());
        assert_eq!(selection.report.status, OptimizationStatus::Partial);
        assert!(!selection.report.recommendations.is_empty());
    }

    #[test]
    fn test_activity_subset_respects_budget_and_count() {
        let activities = [
            activity("a1", 90.0, 4.9),
            activity("a2", 80.0, 4.8),
            activity("a3", 70.0, 4.7),
            activity("a4", 10.0, 4.0),
        ];
        // Budget 1000, nothing else selected => activities get the full
        // 1000, but only two picks allowed.
        let mut in_ = input(&[], &[], &activities, 1000.0, BudgetPriority::Luxury);
        in_.max_activities = 2;
        let selection = optimize(in_);
        assert_eq!(selection.activities.len(), 2);
        assert_eq!(selection.activities[0].id, "a1");
        assert_eq!(selection.activities[1].id, "a2");
    }

    #[test]
    fn test_activity_greedy_skips_too_expensive_and_continues() {
        let activities = [
            activity("big", 150.0, 5.0),
            activity("mid", 60.0, 4.5),
            activity("small", 30.0, 4.0),
        ];
        // Only 100 available: the top-ranked pick does not fit, the next
        // two do.
        let mut in_ = input(&[], &[], &activities, 100.0, BudgetPriority::Luxury);
        in_.max_activities = 8;
        let selection = optimize(in_);
        let ids: Vec<_> = selection.activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["mid", "small"]);
    }

    #[test]
    fn test_empty_inputs_complete_without_selection() {
        let selection = optimize(input(&[], &[], &[], 1000.0, BudgetPriority::Balanced));
        assert!(selection.flight.is_none());
        assert!(selection.hotel.is_none());
        assert!(selection.activities.is_empty());
        // No category had candidates, so nothing is "missing within
        // budget"; the run is complete with the budget untouched.
        assert_eq!(selection.report.status, OptimizationStatus::Complete);
        assert_eq!(selection.report.remaining, 1000.0);
    }
}
