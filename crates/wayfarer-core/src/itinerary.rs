//! Day-by-day itinerary types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled entry within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryItem {
    /// Coarse slot such as "Morning" or "Evening".
    pub time_of_day: String,
    pub title: String,
    pub detail: String,
    /// Estimated per-person cost of this entry.
    pub cost: f64,
    pub duration: String,
}

/// One day of the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub day_number: u32,
    pub title: String,
    pub items: Vec<ItineraryItem>,
    pub daily_total: f64,
}

/// Booking references for everything the optimizer selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSummary {
    pub flight_token: Option<String>,
    pub hotel_url: Option<String>,
    pub activity_count: usize,
    pub activity_cost: f64,
}

/// The assembled trip plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub days: Vec<DayPlan>,
    /// Estimated per-person cost across all days.
    pub total_cost: f64,
    pub booking: BookingSummary,
}
