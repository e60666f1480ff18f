//! Integration tests for the hotel client against a mocked API

use secrecy::SecretString;
use serde_json::json;
use wayfarer_core::HotelCriteria;
use wayfarer_providers::{BookingHotels, HotelSearch, ProviderConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn criteria() -> HotelCriteria {
    HotelCriteria {
        destination: "Paris".into(),
        checkin: chrono::NaiveDate::from_ymd_opt(2025, 10, 8).unwrap(),
        checkout: chrono::NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
        travelers: 2,
        budget_per_night: 150.0,
    }
}

fn config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        hotel_api_key: Some(SecretString::from("test-key".to_string())),
        hotel_base_url: Some(server.uri()),
        ..Default::default()
    }
}

#[tokio::test]
async fn live_hotels_are_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hotels/locations"))
        .and(query_param("name", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "dest_id": "-1456928", "label": "Paris, France" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hotels/search"))
        .and(query_param("dest_id", "-1456928"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {
                    "hotel_id": 112233,
                    "hotel_name": "Hotel Lumière",
                    "review_score": 8.7,
                    "min_total_price": 910.0,
                    "district": "Marais",
                    "hotel_facilities": ["WiFi", "Bar"],
                    "url": "https://booking.example.com/lumiere"
                },
                {
                    "hotel_id": "freebie",
                    "hotel_name": "Zero Price Hostel",
                    "min_total_price": 0.0
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = BookingHotels::new(&config(&server)).unwrap();
    let offers = client.search(&criteria()).await.unwrap();

    // The zero-priced record is dropped.
    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.id, "112233");
    assert_eq!(offer.name, "Hotel Lumière");
    assert_eq!(offer.total.amount, 910.0);
    assert_eq!(offer.price_per_night.amount, 130.0);
    assert_eq!(offer.district, "Marais");
    assert!(offer.provenance.live);
}

#[tokio::test]
async fn location_failure_falls_back_to_placeholders() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hotels/locations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = BookingHotels::new(&config(&server)).unwrap();
    let offers = client.search(&criteria()).await.unwrap();

    assert!(!offers.is_empty());
    assert!(offers.iter().all(|o| !o.provenance.live));
    // Placeholder stay totals reflect the requested nights.
    let budget_inn = offers.iter().find(|h| h.name == "Budget Comfort Inn").unwrap();
    assert_eq!(budget_inn.total.amount, 65.0 * 7.0);
}

#[tokio::test]
async fn missing_credentials_skip_the_network() {
    let config = ProviderConfig::default();
    let client = BookingHotels::new(&config).unwrap();
    let offers = client.search(&criteria()).await.unwrap();

    assert!(!offers.is_empty());
    assert!(offers.iter().all(|o| !o.provenance.live));
}
