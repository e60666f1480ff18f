//! Provider client traits

use async_trait::async_trait;
use wayfarer_core::{
    ActivityCriteria, ActivityOffer, DestinationInfo, FlightCriteria, FlightOffer, HotelCriteria,
    HotelOffer,
};

use crate::ProviderError;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Flight offer search
#[async_trait]
pub trait FlightSearch: Send + Sync {
    async fn search(&self, criteria: &FlightCriteria) -> ProviderResult<Vec<FlightOffer>>;

    /// Provider name used in provenance tags and logs
    fn provider(&self) -> &str;
}

/// Hotel offer search
#[async_trait]
pub trait HotelSearch: Send + Sync {
    async fn search(&self, criteria: &HotelCriteria) -> ProviderResult<Vec<HotelOffer>>;

    fn provider(&self) -> &str;
}

/// Activity and tour search
#[async_trait]
pub trait ActivitySearch: Send + Sync {
    async fn search(&self, criteria: &ActivityCriteria) -> ProviderResult<Vec<ActivityOffer>>;

    fn provider(&self) -> &str;
}

/// Destination metadata lookup
#[async_trait]
pub trait DestinationLookup: Send + Sync {
    async fn lookup(&self, destination: &str) -> ProviderResult<DestinationInfo>;

    fn provider(&self) -> &str;
}
