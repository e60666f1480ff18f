//! Normalized travel offers

use serde::{Deserialize, Serialize};

use crate::trip::InterestTag;

/// A monetary amount in a named currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

impl Price {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    pub fn usd(amount: f64) -> Self {
        Self::new(amount, "USD")
    }
}

/// Which provider produced an offer, and whether it came from a live
/// response or from the provider's placeholder catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub provider: String,
    pub live: bool,
}

impl Provenance {
    pub fn live(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            live: true,
        }
    }

    pub fn placeholder(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            live: false,
        }
    }
}

/// Common surface of the three offer shapes, used by the budget optimizer
/// to select generically within a category.
///
/// `quality` is only comparable within one category: flights and activities
/// carry a 0-5 rating, hotels a 0-10 review score.
pub trait Offer {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
    /// Per-person price in the offer currency.
    fn price(&self) -> f64;
    fn quality(&self) -> f64;
    fn provenance(&self) -> &Provenance;
}

/// One flight option, normalized from a provider response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    pub airline: String,
    /// Provider-formatted ISO-8601 departure timestamp.
    pub departure_time: String,
    pub arrival_time: String,
    /// ISO-8601 duration, e.g. "PT8H30M".
    pub duration: String,
    pub stops: u32,
    pub price: Price,
    pub rating: f64,
    /// Opaque token the booking collaborator understands.
    pub booking_token: String,
    pub provenance: Provenance,
}

impl Offer for FlightOffer {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.airline
    }

    fn price(&self) -> f64 {
        self.price.amount
    }

    fn quality(&self) -> f64 {
        self.rating
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

/// One hotel option for the whole stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub district: String,
    pub amenities: Vec<String>,
    pub price_per_night: Price,
    /// Whole-stay price per person; this is what budget selection compares.
    pub total: Price,
    /// Review score on a 0-10 scale.
    pub rating: f64,
    pub booking_url: String,
    pub provenance: Provenance,
}

impl Offer for HotelOffer {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.total.amount
    }

    fn quality(&self) -> f64 {
        self.rating
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

/// One bookable activity or tour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOffer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: InterestTag,
    /// Free-form duration as the provider reports it, e.g. "2.5 hours".
    pub duration: String,
    pub price: Price,
    pub rating: f64,
    pub booking_url: String,
    pub provenance: Provenance,
}

impl Offer for ActivityOffer {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.price.amount
    }

    fn quality(&self) -> f64 {
        self.rating
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}
