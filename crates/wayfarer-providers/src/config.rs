//! Provider configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Credentials and endpoints for the live provider APIs.
///
/// Every key is optional; a client whose key is missing (or set to the
/// literal "0", matching the partner-API convention) skips the live API
/// entirely and serves its placeholder catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(skip)]
    pub flight_api_key: Option<SecretString>,
    #[serde(skip)]
    pub flight_api_secret: Option<SecretString>,
    #[serde(skip)]
    pub hotel_api_key: Option<SecretString>,
    #[serde(skip)]
    pub activity_api_key: Option<SecretString>,

    /// Override for the flight API base URL (tests point this at a mock).
    pub flight_base_url: Option<String>,
    pub hotel_base_url: Option<String>,
    pub activity_base_url: Option<String>,

    /// Request timeout in seconds for all provider HTTP calls.
    pub timeout_seconds: Option<u64>,
}

impl ProviderConfig {
    /// Read credentials from the conventional environment variables.
    pub fn from_env() -> Self {
        Self {
            flight_api_key: read_key("AMADEUS_API_KEY"),
            flight_api_secret: read_key("AMADEUS_API_SECRET"),
            hotel_api_key: read_key("BOOKING_API_KEY"),
            activity_api_key: read_key("GETYOURGUIDE_API_KEY"),
            flight_base_url: None,
            hotel_base_url: None,
            activity_base_url: None,
            timeout_seconds: None,
        }
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

fn read_key(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() && value != "0" => Some(SecretString::from(value)),
        _ => None,
    }
}
