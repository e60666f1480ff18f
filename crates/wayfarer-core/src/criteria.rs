//! Search criteria derived from the plan state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::trip::InterestTag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub travelers: u32,
    /// Per-person ceiling; providers may return pricier offers, the
    /// optimizer filters again.
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelCriteria {
    pub destination: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub travelers: u32,
    pub budget_per_night: f64,
}

impl HotelCriteria {
    pub fn nights(&self) -> i64 {
        (self.checkout - self.checkin).num_days()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCriteria {
    pub destination: String,
    pub preferences: Vec<InterestTag>,
    pub daily_budget: f64,
    pub max_results: usize,
}
