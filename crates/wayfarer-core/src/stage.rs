//! Pipeline stage identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of pipeline stages.
///
/// The controller loop matches on this exhaustively, so adding a stage is a
/// compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    ExtractRequirements,
    GetDestinationInfo,
    SearchFlights,
    SearchHotels,
    SearchActivities,
    OptimizeBudget,
    GenerateItinerary,
    FormatFinalResponse,
}

impl StageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::ExtractRequirements => "extract_requirements",
            StageId::GetDestinationInfo => "get_destination_info",
            StageId::SearchFlights => "search_flights",
            StageId::SearchHotels => "search_hotels",
            StageId::SearchActivities => "search_activities",
            StageId::OptimizeBudget => "optimize_budget",
            StageId::GenerateItinerary => "generate_itinerary",
            StageId::FormatFinalResponse => "format_final_response",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
