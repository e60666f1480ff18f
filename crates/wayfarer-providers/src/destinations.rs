//! Embedded destination gazetteer

use wayfarer_core::DestinationInfo;

use crate::{DestinationLookup, ProviderResult};

const PROVIDER: &str = "gazetteer";

/// Destination metadata lookup backed by an embedded directory.
///
/// Unknown destinations get a generic record rather than an error; the
/// pipeline treats destination facts as nice-to-have context.
#[derive(Debug, Default)]
pub struct DestinationDirectory;

impl DestinationDirectory {
    pub fn new() -> Self {
        Self
    }

    fn entry(destination: &str) -> Option<DestinationInfo> {
        let info = match destination.to_lowercase().as_str() {
            "paris" => DestinationInfo {
                country: "France".into(),
                currency: "EUR".into(),
                timezone: "CET".into(),
                language: "French".into(),
                best_season: "April-June, September-October".into(),
                districts: vec![
                    "Marais".into(),
                    "Saint-Germain".into(),
                    "Montmartre".into(),
                    "Champs-Élysées".into(),
                ],
                transit: vec!["Metro".into(), "Bus".into(), "Taxi".into(), "Walking".into()],
            },
            "london" => DestinationInfo {
                country: "United Kingdom".into(),
                currency: "GBP".into(),
                timezone: "GMT".into(),
                language: "English".into(),
                best_season: "May-September".into(),
                districts: vec![
                    "Westminster".into(),
                    "Camden".into(),
                    "Shoreditch".into(),
                    "Covent Garden".into(),
                ],
                transit: vec![
                    "Underground".into(),
                    "Bus".into(),
                    "Taxi".into(),
                    "Walking".into(),
                ],
            },
            "tokyo" => DestinationInfo {
                country: "Japan".into(),
                currency: "JPY".into(),
                timezone: "JST".into(),
                language: "Japanese".into(),
                best_season: "March-May, October-November".into(),
                districts: vec![
                    "Shibuya".into(),
                    "Shinjuku".into(),
                    "Asakusa".into(),
                    "Ginza".into(),
                ],
                transit: vec!["Metro".into(), "JR Rail".into(), "Taxi".into()],
            },
            "rome" => DestinationInfo {
                country: "Italy".into(),
                currency: "EUR".into(),
                timezone: "CET".into(),
                language: "Italian".into(),
                best_season: "April-June, September-October".into(),
                districts: vec![
                    "Centro Storico".into(),
                    "Trastevere".into(),
                    "Monti".into(),
                    "Testaccio".into(),
                ],
                transit: vec!["Metro".into(), "Bus".into(), "Tram".into(), "Walking".into()],
            },
            _ => return None,
        };
        Some(info)
    }

    fn generic() -> DestinationInfo {
        DestinationInfo {
            country: "Unknown".into(),
            currency: "USD".into(),
            timezone: "Local Time".into(),
            language: "Local Language".into(),
            best_season: "Year-round".into(),
            districts: vec!["City Center".into()],
            transit: vec!["Public Transport".into(), "Taxi".into()],
        }
    }
}

#[async_trait::async_trait]
impl DestinationLookup for DestinationDirectory {
    async fn lookup(&self, destination: &str) -> ProviderResult<DestinationInfo> {
        match Self::entry(destination) {
            Some(info) => Ok(info),
            None => {
                tracing::debug!(destination, "destination not in directory, using generic facts");
                Ok(Self::generic())
            }
        }
    }

    fn provider(&self) -> &str {
        PROVIDER
    }
}
