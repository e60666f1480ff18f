//! Trip requirements and destination metadata

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interest categories the activity providers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestTag {
    Culture,
    Food,
    Adventure,
    Relaxation,
}

impl InterestTag {
    pub const ALL: [InterestTag; 4] = [
        InterestTag::Culture,
        InterestTag::Food,
        InterestTag::Adventure,
        InterestTag::Relaxation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestTag::Culture => "culture",
            InterestTag::Food => "food",
            InterestTag::Adventure => "adventure",
            InterestTag::Relaxation => "relaxation",
        }
    }
}

impl fmt::Display for InterestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "culture" => Ok(InterestTag::Culture),
            "food" => Ok(InterestTag::Food),
            "adventure" => Ok(InterestTag::Adventure),
            "relaxation" => Ok(InterestTag::Relaxation),
            _ => Err(()),
        }
    }
}

/// How the optimizer should weigh price against quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPriority {
    Economy,
    #[default]
    Balanced,
    Luxury,
}

impl BudgetPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPriority::Economy => "economy",
            BudgetPriority::Balanced => "balanced",
            BudgetPriority::Luxury => "luxury",
        }
    }
}

impl fmt::Display for BudgetPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "economy" | "cheapest" | "budget" => Ok(BudgetPriority::Economy),
            "balanced" => Ok(BudgetPriority::Balanced),
            "luxury" | "quality" => Ok(BudgetPriority::Luxury),
            _ => Err(()),
        }
    }
}

/// Structured trip requirements as supplied by the extraction collaborator.
///
/// Every field is optional: extraction leaves what it could not find absent
/// rather than defaulting, so the pipeline can tell "unknown" from "chosen".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub budget_per_person: Option<f64>,
    pub traveler_count: Option<u32>,
    #[serde(default)]
    pub preferences: Vec<InterestTag>,
    pub priority: Option<BudgetPriority>,
}

impl TripRequest {
    /// Trip length in nights, when both dates are known.
    pub fn trip_nights(&self) -> Option<i64> {
        match (self.departure_date, self.return_date) {
            (Some(dep), Some(ret)) => Some((ret - dep).num_days()),
            _ => None,
        }
    }
}

/// Static facts about a destination, filled once per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationInfo {
    pub country: String,
    pub currency: String,
    pub timezone: String,
    pub language: String,
    pub best_season: String,
    pub districts: Vec<String>,
    pub transit: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_tag_round_trip() {
        for tag in InterestTag::ALL {
            assert_eq!(tag.as_str().parse::<InterestTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_priority_aliases() {
        assert_eq!("cheapest".parse(), Ok(BudgetPriority::Economy));
        assert_eq!("LUXURY".parse(), Ok(BudgetPriority::Luxury));
        assert!("fancy".parse::<BudgetPriority>().is_err());
    }

    #[test]
    fn test_trip_nights() {
        let request = TripRequest {
            departure_date: NaiveDate::from_ymd_opt(2025, 10, 8),
            return_date: NaiveDate::from_ymd_opt(2025, 10, 15),
            ..Default::default()
        };
        assert_eq!(request.trip_nights(), Some(7));
        assert_eq!(TripRequest::default().trip_nights(), None);
    }
}
