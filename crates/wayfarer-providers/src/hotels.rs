//! Booking.com-style hotel search client

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use wayfarer_core::{HotelCriteria, HotelOffer, Price, Provenance};

use crate::placeholder::hotel_placeholders;
use crate::{HotelSearch, ProviderConfig, ProviderError, ProviderResult};

const PROVIDER: &str = "booking";
const DEFAULT_BASE_URL: &str = "https://booking-com.p.rapidapi.com/v1";
const RAPIDAPI_HOST: &str = "booking-com.p.rapidapi.com";
const MAX_OFFERS: usize = 10;

/// Hotel search over a RapidAPI Booking.com gateway.
///
/// The live path resolves the destination to a location id first, then
/// queries hotel availability for the stay. Placeholder hotels are served
/// when the key is missing or the API fails.
pub struct BookingHotels {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl BookingHotels {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .hotel_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: config.hotel_api_key.clone(),
        })
    }

    async fn resolve_location(&self, key: &SecretString, query: &str) -> ProviderResult<String> {
        let url = format!("{}/hotels/locations", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", key.expose_secret())
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[("name", query), ("locale", "en-gb")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ProviderError::InvalidResponse(format!(
                "location search returned {status}"
            )));
        }

        let locations: Vec<ApiLocation> = response.json().await?;
        locations
            .into_iter()
            .next()
            .map(|l| l.dest_id)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("no location id for {query}")))
    }

    async fn search_live(&self, criteria: &HotelCriteria) -> ProviderResult<Vec<HotelOffer>> {
        let key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::Configuration("hotel API key not set".into()))?;

        let dest_id = self.resolve_location(key, &criteria.destination).await?;
        let url = format!("{}/hotels/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", key.expose_secret())
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[
                ("dest_id", dest_id.as_str()),
                ("order_by", "popularity"),
                ("filter_by_currency", "USD"),
                ("checkin_date", &criteria.checkin.to_string()),
                ("checkout_date", &criteria.checkout.to_string()),
                ("adults_number", &criteria.travelers.to_string()),
                ("room_number", "1"),
                ("page_number", "0"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ProviderError::InvalidResponse(format!(
                "hotel search returned {status}"
            )));
        }

        let body: SearchResponse = response.json().await?;
        let nights = criteria.nights().max(1) as f64;
        let offers = body
            .result
            .into_iter()
            .filter_map(|h| convert_hotel(h, nights))
            .take(MAX_OFFERS)
            .collect();

        Ok(offers)
    }
}

#[async_trait::async_trait]
impl HotelSearch for BookingHotels {
    async fn search(&self, criteria: &HotelCriteria) -> ProviderResult<Vec<HotelOffer>> {
        if self.api_key.is_none() {
            tracing::debug!(provider = PROVIDER, "no credentials, serving placeholder hotels");
            return Ok(hotel_placeholders(PROVIDER, criteria));
        }

        match self.search_live(criteria).await {
            Ok(offers) if !offers.is_empty() => {
                tracing::info!(provider = PROVIDER, count = offers.len(), "live hotel offers");
                Ok(offers)
            }
            Ok(_) => {
                tracing::info!(provider = PROVIDER, "live search returned no hotels");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(provider = PROVIDER, error = %e, "falling back to placeholder hotels");
                Ok(hotel_placeholders(PROVIDER, criteria))
            }
        }
    }

    fn provider(&self) -> &str {
        PROVIDER
    }
}

fn convert_hotel(hotel: ApiHotel, nights: f64) -> Option<HotelOffer> {
    let total = hotel.min_total_price?;
    if total <= 0.0 {
        return None;
    }

    // Upstream sends hotel ids as either numbers or strings.
    let id = match &hotel.hotel_id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Some(HotelOffer {
        id,
        name: hotel.hotel_name,
        district: hotel.district.unwrap_or_else(|| "City Center".to_string()),
        amenities: hotel.hotel_facilities.unwrap_or_default(),
        price_per_night: Price::usd(total / nights),
        total: Price::usd(total),
        rating: hotel.review_score.unwrap_or(3.0),
        booking_url: hotel.url.unwrap_or_default(),
        provenance: Provenance::live(PROVIDER),
    })
}

// API response types
#[derive(Debug, Deserialize)]
struct ApiLocation {
    dest_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ApiHotel>,
}

#[derive(Debug, Deserialize)]
struct ApiHotel {
    hotel_id: serde_json::Value,
    hotel_name: String,
    #[serde(default)]
    review_score: Option<f64>,
    #[serde(default)]
    min_total_price: Option<f64>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    hotel_facilities: Option<Vec<String>>,
    #[serde(default)]
    url: Option<String>,
}
