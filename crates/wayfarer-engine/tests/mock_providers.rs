//! Mock provider clients for integration testing
//!
//! Each mock serves queued responses and counts calls. Without queued
//! responses a mock serves a small default catalog, so happy-path tests
//! stay short.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use wayfarer_core::{
    ActivityCriteria, ActivityOffer, FlightCriteria, FlightOffer, HotelCriteria, HotelOffer,
    InterestTag, Price, Provenance,
};
use wayfarer_providers::{
    ActivitySearch, FlightSearch, HotelSearch, ProviderError, ProviderResult,
};

/// A queued response
pub enum MockResponse<T> {
    Offers(Vec<T>),
    Error(String),
    /// Never resolves; exercises the stage-level timeout.
    Hang,
}

pub struct MockSearch<T> {
    responses: Mutex<VecDeque<MockResponse<T>>>,
    calls: AtomicUsize,
    default_offers: Vec<T>,
}

impl<T: Clone> MockSearch<T> {
    pub fn new(default_offers: Vec<T>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            default_offers,
        }
    }

    pub fn queue_offers(&self, offers: Vec<T>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Offers(offers));
    }

    pub fn queue_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(message.into()));
    }

    pub fn queue_hang(&self) {
        self.responses.lock().unwrap().push_back(MockResponse::Hang);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> ProviderResult<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Offers(offers)) => Ok(offers),
            Some(MockResponse::Error(message)) => Err(ProviderError::Unavailable {
                provider: message,
            }),
            Some(MockResponse::Hang) => {
                futures::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            None => Ok(self.default_offers.clone()),
        }
    }
}

pub type MockFlights = MockSearch<FlightOffer>;
pub type MockHotels = MockSearch<HotelOffer>;
pub type MockActivities = MockSearch<ActivityOffer>;

#[async_trait]
impl FlightSearch for MockFlights {
    async fn search(&self, _criteria: &FlightCriteria) -> ProviderResult<Vec<FlightOffer>> {
        self.respond().await
    }

    fn provider(&self) -> &str {
        "mock-flights"
    }
}

#[async_trait]
impl HotelSearch for MockHotels {
    async fn search(&self, _criteria: &HotelCriteria) -> ProviderResult<Vec<HotelOffer>> {
        self.respond().await
    }

    fn provider(&self) -> &str {
        "mock-hotels"
    }
}

#[async_trait]
impl ActivitySearch for MockActivities {
    async fn search(&self, _criteria: &ActivityCriteria) -> ProviderResult<Vec<ActivityOffer>> {
        self.respond().await
    }

    fn provider(&self) -> &str {
        "mock-activities"
    }
}

// Offer fixtures

pub fn flight(id: &str, price: f64, rating: f64) -> FlightOffer {
    FlightOffer {
        id: id.into(),
        airline: format!("{id} Airlines"),
        departure_time: "2025-10-08T08:00:00".into(),
        arrival_time: "2025-10-08T16:30:00".into(),
        duration: "PT8H30M".into(),
        stops: 1,
        price: Price::usd(price),
        rating,
        booking_token: format!("token_{id}"),
        provenance: Provenance::live("mock-flights"),
    }
}

pub fn hotel(id: &str, total: f64, rating: f64) -> HotelOffer {
    HotelOffer {
        id: id.into(),
        name: format!("Hotel {id}"),
        district: "City Center".into(),
        amenities: vec!["WiFi".into()],
        price_per_night: Price::usd(total / 7.0),
        total: Price::usd(total),
        rating,
        booking_url: format!("https://hotels.example.com/{id}"),
        provenance: Provenance::live("mock-hotels"),
    }
}

pub fn activity(id: &str, price: f64, rating: f64) -> ActivityOffer {
    ActivityOffer {
        id: id.into(),
        name: format!("Activity {id}"),
        description: "A fine way to spend the day".into(),
        category: InterestTag::Culture,
        duration: "3 hours".into(),
        price: Price::usd(price),
        rating,
        booking_url: format!("https://tours.example.com/{id}"),
        provenance: Provenance::live("mock-activities"),
    }
}

pub fn default_flights() -> Vec<FlightOffer> {
    vec![flight("delta", 450.0, 4.2), flight("american", 520.0, 4.5)]
}

pub fn default_hotels() -> Vec<HotelOffer> {
    vec![
        hotel("central", 840.0, 8.5),
        hotel("comfort", 455.0, 7.8),
        hotel("palace", 1960.0, 9.2),
    ]
}

pub fn default_activities() -> Vec<ActivityOffer> {
    vec![
        activity("tasting", 55.0, 4.8),
        activity("museum", 35.0, 4.6),
        activity("bike", 65.0, 4.4),
        activity("cruise", 95.0, 4.9),
    ]
}
