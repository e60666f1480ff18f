//! Plan state threaded through the orchestration pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::itinerary::Itinerary;
use crate::offer::{ActivityOffer, FlightOffer, HotelOffer, Offer};
use crate::stage::StageId;
use crate::trip::{BudgetPriority, DestinationInfo, InterestTag, TripRequest};

/// Outcome of one offer-collection search.
///
/// `None` in the surrounding `Option` means the search has not been
/// attempted. `Empty` means it ran and produced nothing usable, which is a
/// normal result, not an error; the router must advance past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Collection<T> {
    Found { offers: Vec<T> },
    Empty { reason: String },
}

impl<T> Collection<T> {
    /// Wrap a search result, downgrading a zero-offer success to `Empty`.
    pub fn from_offers(offers: Vec<T>, empty_reason: impl Into<String>) -> Self {
        if offers.is_empty() {
            Collection::Empty {
                reason: empty_reason.into(),
            }
        } else {
            Collection::Found { offers }
        }
    }

    pub fn empty(reason: impl Into<String>) -> Self {
        Collection::Empty {
            reason: reason.into(),
        }
    }

    pub fn offers(&self) -> &[T] {
        match self {
            Collection::Found { offers } => offers,
            Collection::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Collection::Empty { .. })
    }

    pub fn len(&self) -> usize {
        self.offers().len()
    }
}

impl<T: Offer> Collection<T> {
    /// Whether any offer came from a live provider response.
    pub fn has_live(&self) -> bool {
        self.offers().iter().any(|o| o.provenance().live)
    }
}

/// Per-category spend of the optimized selection, per person.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub flight: f64,
    pub hotel: f64,
    pub activities: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.flight + self.hotel + self.activities
    }
}

/// Whether the optimizer filled every category within budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationStatus {
    /// Flight, hotel, and at least one activity selected.
    Complete,
    /// One or more categories had no affordable candidate.
    Partial,
}

/// Summary the optimizer leaves behind alongside its selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub breakdown: CostBreakdown,
    pub total_cost: f64,
    pub remaining: f64,
    pub status: OptimizationStatus,
    pub recommendations: Vec<String>,
}

/// The single evolving record describing one planning session.
///
/// Fields are monotonically filled: once a stage writes a field, no later
/// stage clears it, so re-running any stage on an already-complete state is
/// a no-op. The controller loop owns the state exclusively and hands it to
/// one stage executor at a time by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanState {
    /// Raw extracted requirements the session was constructed with.
    pub request: TripRequest,

    // Requirements, merged from `request` by the extraction stage.
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub budget_per_person: Option<f64>,
    pub traveler_count: Option<u32>,
    #[serde(default)]
    pub preferences: Vec<InterestTag>,
    #[serde(default)]
    pub priority: BudgetPriority,

    // Derived once per session.
    pub destination_info: Option<DestinationInfo>,

    // Collected offers. `None` means not yet attempted.
    pub flights: Option<Collection<FlightOffer>>,
    pub hotels: Option<Collection<HotelOffer>>,
    pub activities: Option<Collection<ActivityOffer>>,

    // Optimization results.
    pub selected_flight: Option<FlightOffer>,
    pub selected_hotel: Option<HotelOffer>,
    #[serde(default)]
    pub selected_activities: Vec<ActivityOffer>,
    /// Set once the optimizer has run, whether or not it found a feasible
    /// combination. Without this flag an infeasible budget would re-route
    /// to the optimizer forever.
    pub optimization_complete: bool,
    pub budget_report: Option<BudgetReport>,

    pub itinerary: Option<Itinerary>,

    /// Rendered user-facing report, written by the terminal stage.
    pub final_report: Option<String>,

    // Control.
    pub error_occurred: bool,
    pub error_message: Option<String>,
    /// Last stage the controller executed, for observability only.
    pub current_stage: Option<StageId>,
}

impl PlanState {
    /// Start a session from extracted requirements.
    pub fn new(request: TripRequest) -> Self {
        Self {
            request,
            destination: None,
            origin: None,
            departure_date: None,
            return_date: None,
            budget_per_person: None,
            traveler_count: None,
            preferences: Vec::new(),
            priority: BudgetPriority::default(),
            destination_info: None,
            flights: None,
            hotels: None,
            activities: None,
            selected_flight: None,
            selected_hotel: None,
            selected_activities: Vec::new(),
            optimization_complete: false,
            budget_report: None,
            itinerary: None,
            final_report: None,
            error_occurred: false,
            error_message: None,
            current_stage: None,
        }
    }

    /// Record an unrecoverable fault. The router short-circuits to the
    /// terminal stage as soon as this is set.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error_occurred = true;
        // First error wins; later stages must not overwrite it.
        if self.error_message.is_none() {
            self.error_message = Some(message.into());
        }
    }

    /// Trip length in nights, when both dates are known.
    pub fn trip_nights(&self) -> Option<i64> {
        match (self.departure_date, self.return_date) {
            (Some(dep), Some(ret)) => Some((ret - dep).num_days()),
            _ => None,
        }
    }

    /// Whether any collected category is running on placeholder data only.
    pub fn has_placeholder_data(&self) -> bool {
        let flights_placeholder = self
            .flights
            .as_ref()
            .map(|c| !c.is_empty() && !c.has_live())
            .unwrap_or(false);
        let hotels_placeholder = self
            .hotels
            .as_ref()
            .map(|c| !c.is_empty() && !c.has_live())
            .unwrap_or(false);
        let activities_placeholder = self
            .activities
            .as_ref()
            .map(|c| !c.is_empty() && !c.has_live())
            .unwrap_or(false);
        flights_placeholder || hotels_placeholder || activities_placeholder
    }
}
