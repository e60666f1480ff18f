//! Amadeus-style flight offers client

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use wayfarer_core::{FlightCriteria, FlightOffer, Price, Provenance};

use crate::placeholder::flight_placeholders;
use crate::{FlightSearch, ProviderConfig, ProviderError, ProviderResult};

const PROVIDER: &str = "amadeus";
const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com/v1";
const MAX_OFFERS: usize = 5;

/// Flight search over the Amadeus flight-offers API.
///
/// OAuth2 client-credentials tokens are cached until shortly before expiry.
/// Without credentials, or when the live API misbehaves, the client serves
/// placeholder offers instead of failing the session.
pub struct AmadeusFlights {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    api_secret: Option<SecretString>,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AmadeusFlights {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .flight_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: config.flight_api_key.clone(),
            api_secret: config.flight_api_secret.clone(),
            token: Mutex::new(None),
        })
    }

    fn credentials(&self) -> Option<(&SecretString, &SecretString)> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some((key, secret)),
            _ => None,
        }
    }

    async fn access_token(&self) -> ProviderResult<String> {
        let (key, secret) = self
            .credentials()
            .ok_or_else(|| ProviderError::Configuration("flight API credentials not set".into()))?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let url = format!("{}/security/oauth2/token", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", key.expose_secret()),
                ("client_secret", secret.expose_secret()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ProviderError::AuthenticationFailed(format!(
                "token endpoint returned {status}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        // Refresh a minute early so an in-flight search never races expiry.
        let expires_at = Utc::now() + Duration::seconds(token.expires_in.saturating_sub(60) as i64);
        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at,
        });

        Ok(value)
    }

    async fn search_live(&self, criteria: &FlightCriteria) -> ProviderResult<Vec<FlightOffer>> {
        let token = self.access_token().await?;
        let url = format!("{}/shopping/flight-offers", self.base_url);

        let mut params = vec![
            ("originLocationCode", airport_code(&criteria.origin)),
            ("destinationLocationCode", airport_code(&criteria.destination)),
            ("departureDate", criteria.departure_date.to_string()),
            ("adults", criteria.travelers.to_string()),
            ("max", "10".to_string()),
        ];
        if let Some(return_date) = criteria.return_date {
            params.push(("returnDate", return_date.to_string()));
        }
        if let Some(max_price) = criteria.max_price {
            params.push(("maxPrice", (max_price as u64).to_string()));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ProviderError::InvalidResponse(format!(
                "flight-offers returned {status}"
            )));
        }

        let body: OffersResponse = response.json().await?;
        let offers = body
            .data
            .into_iter()
            .filter_map(convert_offer)
            .take(MAX_OFFERS)
            .collect();

        Ok(offers)
    }
}

#[async_trait::async_trait]
impl FlightSearch for AmadeusFlights {
    async fn search(&self, criteria: &FlightCriteria) -> ProviderResult<Vec<FlightOffer>> {
        if self.credentials().is_none() {
            tracing::debug!(provider = PROVIDER, "no credentials, serving placeholder flights");
            return Ok(flight_placeholders(PROVIDER, criteria));
        }

        match self.search_live(criteria).await {
            Ok(offers) if !offers.is_empty() => {
                tracing::info!(provider = PROVIDER, count = offers.len(), "live flight offers");
                Ok(offers)
            }
            Ok(_) => {
                tracing::info!(provider = PROVIDER, "live search returned no offers");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(provider = PROVIDER, error = %e, "falling back to placeholder flights");
                Ok(flight_placeholders(PROVIDER, criteria))
            }
        }
    }

    fn provider(&self) -> &str {
        PROVIDER
    }
}

fn convert_offer(offer: ApiOffer) -> Option<FlightOffer> {
    let price: f64 = offer.price.total.parse().ok()?;
    let itinerary = offer.itineraries.first()?;
    let first_segment = itinerary.segments.first()?;
    let last_segment = itinerary.segments.last()?;
    let stops = itinerary.segments.len().saturating_sub(1) as u32;

    Some(FlightOffer {
        id: offer.id.clone(),
        airline: format!("{} Airlines", first_segment.carrier_code),
        departure_time: first_segment.departure.at.clone(),
        arrival_time: last_segment.arrival.at.clone(),
        duration: itinerary.duration.clone(),
        stops,
        price: Price::usd(price),
        rating: stop_rating(stops),
        booking_token: offer.id,
        provenance: Provenance::live(PROVIDER),
    })
}

/// Nonstop flights rate highest; each stop costs a fifth of a point.
fn stop_rating(stops: u32) -> f64 {
    (5.0 - stops as f64 * 0.2).clamp(1.0, 5.0)
}

fn airport_code(city: &str) -> String {
    let known = [
        ("new york", "NYC"),
        ("paris", "PAR"),
        ("london", "LON"),
        ("tokyo", "TYO"),
        ("los angeles", "LAX"),
        ("rome", "ROM"),
        ("barcelona", "BCN"),
        ("madrid", "MAD"),
        ("amsterdam", "AMS"),
        ("berlin", "BER"),
        ("sydney", "SYD"),
        ("dubai", "DXB"),
    ];

    let lower = city.to_lowercase();
    for (name, code) in known {
        if lower == name {
            return code.to_string();
        }
    }

    // Unknown city: best-effort IATA-shaped code from the name itself.
    city.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

// API request/response types
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct OffersResponse {
    #[serde(default)]
    data: Vec<ApiOffer>,
}

#[derive(Debug, Deserialize)]
struct ApiOffer {
    id: String,
    price: ApiPrice,
    itineraries: Vec<ApiItinerary>,
}

#[derive(Debug, Deserialize)]
struct ApiPrice {
    total: String,
}

#[derive(Debug, Deserialize)]
struct ApiItinerary {
    duration: String,
    segments: Vec<ApiSegment>,
}

#[derive(Debug, Deserialize)]
struct ApiSegment {
    departure: ApiEndpoint,
    arrival: ApiEndpoint,
    #[serde(rename = "carrierCode")]
    carrier_code: String,
}

#[derive(Debug, Deserialize)]
struct ApiEndpoint {
    at: String,
}
