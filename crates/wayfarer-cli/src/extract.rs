//! Free-text requirement extraction
//!
//! Parses a natural-language trip request into structured requirements.
//! Fields that cannot be found stay absent rather than defaulted; the
//! engine decides what to do about gaps.

use chrono::NaiveDate;
use regex::Regex;
use wayfarer_core::{InterestTag, TripRequest};

pub fn extract(text: &str) -> TripRequest {
    TripRequest {
        destination: extract_destination(text),
        origin: extract_origin(text),
        departure_date: extract_dates(text).first().copied(),
        return_date: extract_dates(text).get(1).copied(),
        budget_per_person: extract_budget(text),
        traveler_count: extract_travelers(text),
        preferences: extract_preferences(text),
        priority: extract_priority(text),
    }
}

fn extract_destination(text: &str) -> Option<String> {
    // The destination ends at punctuation or at a following "from <origin>"
    // clause, so "trip to Paris from New York" yields just "Paris".
    capture_one(
        r"(?i)(?:trip to|travel to|visit) (.+?)(?:\s+from\s|[,.\n]|$)",
        text,
    )
}

fn extract_origin(text: &str) -> Option<String> {
    let patterns = [
        r"(?i)departing from (.+?)(?:[,.\n]|$)",
        r"(?i)from (.+?)(?:[,.\n]|$)",
    ];
    for pattern in patterns {
        if let Some(found) = capture_one(pattern, text) {
            return Some(found);
        }
    }
    None
}

fn capture_one(pattern: &str, text: &str) -> Option<String> {
    let re = Regex::new(pattern).expect("static pattern");
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_dates(text: &str) -> Vec<NaiveDate> {
    let re = Regex::new(r"\d{4}-\d{2}-\d{2}").expect("static pattern");
    re.find_iter(text)
        .filter_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .collect()
}

fn extract_budget(text: &str) -> Option<f64> {
    let re = Regex::new(r"\$(\d+(?:,\d{3})*(?:\.\d{2})?)").expect("static pattern");
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

fn extract_travelers(text: &str) -> Option<u32> {
    let re = Regex::new(r"(?i)travelers?:\s*(\d+)|(\d+)\s+travelers?").expect("static pattern");
    let captures = re.captures(text)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_preferences(text: &str) -> Vec<InterestTag> {
    let keywords: [(InterestTag, &[&str]); 4] = [
        (
            InterestTag::Culture,
            &["culture", "cultural", "museum", "history", "historic", "art"],
        ),
        (
            InterestTag::Food,
            &["food", "cuisine", "restaurant", "dining", "culinary"],
        ),
        (
            InterestTag::Adventure,
            &["adventure", "outdoor", "hiking", "climbing", "sports"],
        ),
        (
            InterestTag::Relaxation,
            &["relaxation", "spa", "beach", "wellness", "peaceful"],
        ),
    ];

    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(tag, _)| *tag)
        .collect()
}

fn extract_priority(text: &str) -> Option<wayfarer_core::BudgetPriority> {
    let lower = text.to_lowercase();
    if lower.contains("luxury") || lower.contains("high quality") {
        Some(wayfarer_core::BudgetPriority::Luxury)
    } else if lower.contains("cheapest") || lower.contains("economy") || lower.contains("low cost")
    {
        Some(wayfarer_core::BudgetPriority::Economy)
    } else if lower.contains("balanced") {
        Some(wayfarer_core::BudgetPriority::Balanced)
    } else {
        None
    }
}
