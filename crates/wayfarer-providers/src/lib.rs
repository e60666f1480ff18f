//! Wayfarer Providers - Travel data clients
//!
//! One client per external data source:
//! - Flights: OAuth2 flight-offers API (Amadeus style)
//! - Hotels: RapidAPI hotel search (Booking.com style)
//! - Activities: bearer-token tours API (GetYourGuide style)
//! - Destinations: embedded gazetteer
//!
//! Every client degrades to a clearly-tagged placeholder catalog when its
//! live API is unconfigured or unreachable; ordinary unavailability never
//! fails a planning session.

mod activities;
mod config;
mod destinations;
mod error;
mod flights;
mod hotels;
mod placeholder;
mod traits;

pub use activities::GuideActivities;
pub use config::ProviderConfig;
pub use destinations::DestinationDirectory;
pub use error::ProviderError;
pub use flights::AmadeusFlights;
pub use hotels::BookingHotels;
pub use placeholder::{
    activity_placeholders, flight_placeholders, hotel_placeholders,
};
pub use traits::{
    ActivitySearch, DestinationLookup, FlightSearch, HotelSearch, ProviderResult,
};
