//! Placeholder offer catalogs
//!
//! Served when a live API is unconfigured or unreachable. Every record is
//! tagged `Provenance::placeholder` so the final report can tell the user
//! no live data was available.

use wayfarer_core::{
    ActivityCriteria, ActivityOffer, FlightCriteria, FlightOffer, HotelCriteria, HotelOffer,
    InterestTag, Price, Provenance,
};

pub fn flight_placeholders(provider: &str, criteria: &FlightCriteria) -> Vec<FlightOffer> {
    let date = criteria.departure_date;
    vec![
        FlightOffer {
            id: "placeholder_flight_1".into(),
            airline: "Delta Airlines".into(),
            departure_time: format!("{date}T08:00:00"),
            arrival_time: format!("{date}T16:30:00"),
            duration: "PT8H30M".into(),
            stops: 1,
            price: Price::usd(450.0),
            rating: 4.2,
            booking_token: "placeholder_token_1".into(),
            provenance: Provenance::placeholder(provider),
        },
        FlightOffer {
            id: "placeholder_flight_2".into(),
            airline: "American Airlines".into(),
            departure_time: format!("{date}T10:00:00"),
            arrival_time: format!("{date}T17:45:00"),
            duration: "PT7H45M".into(),
            stops: 0,
            price: Price::usd(520.0),
            rating: 4.5,
            booking_token: "placeholder_token_2".into(),
            provenance: Provenance::placeholder(provider),
        },
    ]
}

pub fn hotel_placeholders(provider: &str, criteria: &HotelCriteria) -> Vec<HotelOffer> {
    let nights = criteria.nights().max(1) as f64;
    let hotel = |id: &str, name: &str, district: &str, nightly: f64, rating: f64, amenities: &[&str]| {
        HotelOffer {
            id: id.into(),
            name: name.into(),
            district: district.into(),
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            price_per_night: Price::usd(nightly),
            total: Price::usd(nightly * nights),
            rating,
            booking_url: format!("https://booking.example.com/{id}"),
            provenance: Provenance::placeholder(provider),
        }
    };

    vec![
        hotel(
            "placeholder_hotel_1",
            "Grand Central Hotel",
            "City Center",
            120.0,
            8.5,
            &["WiFi", "Restaurant", "Gym", "Pool"],
        ),
        hotel(
            "placeholder_hotel_2",
            "Luxury Palace Hotel",
            "Downtown",
            280.0,
            9.2,
            &["WiFi", "Spa", "Restaurant", "Gym", "Pool", "Concierge"],
        ),
        hotel(
            "placeholder_hotel_3",
            "Budget Comfort Inn",
            "Suburb",
            65.0,
            7.8,
            &["WiFi", "Parking"],
        ),
        hotel(
            "placeholder_hotel_4",
            "Boutique Design Hotel",
            "Arts District",
            180.0,
            8.9,
            &["WiFi", "Restaurant", "Bar", "Rooftop Terrace"],
        ),
    ]
}

pub fn activity_placeholders(provider: &str, criteria: &ActivityCriteria) -> Vec<ActivityOffer> {
    let activity = |id: &str,
                    name: &str,
                    description: &str,
                    category: InterestTag,
                    duration: &str,
                    price: f64,
                    rating: f64| ActivityOffer {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category,
        duration: duration.into(),
        price: Price::usd(price),
        rating,
        booking_url: format!("https://tours.example.com/{id}"),
        provenance: Provenance::placeholder(provider),
    };

    let catalog = vec![
        activity(
            "placeholder_culture_1",
            "Guided Historical Walking Tour",
            "Discover the city's history with a knowledgeable local guide, visiting iconic landmarks.",
            InterestTag::Culture,
            "2.5 hours",
            25.0,
            4.4,
        ),
        activity(
            "placeholder_culture_2",
            "Art Gallery & Museum Combo Tour",
            "Renowned art collections and cultural exhibits with skip-the-line access.",
            InterestTag::Culture,
            "3 hours",
            35.0,
            4.6,
        ),
        activity(
            "placeholder_food_1",
            "Local Food & Wine Tasting Tour",
            "Authentic local cuisine and regional wines at hidden gems. Includes 5 tastings.",
            InterestTag::Food,
            "3.5 hours",
            55.0,
            4.8,
        ),
        activity(
            "placeholder_food_2",
            "Cooking Class with Local Chef",
            "Prepare traditional dishes with a professional chef and take home the recipes.",
            InterestTag::Food,
            "4 hours",
            75.0,
            4.7,
        ),
        activity(
            "placeholder_adventure_1",
            "City Bike Adventure Tour",
            "The city's best sights on two wheels, with scenic routes and photo stops.",
            InterestTag::Adventure,
            "4 hours",
            45.0,
            4.3,
        ),
        activity(
            "placeholder_adventure_2",
            "Rock Climbing & Rappelling Experience",
            "Guided rock climbing suitable for beginners and experienced climbers alike.",
            InterestTag::Adventure,
            "5 hours",
            85.0,
            4.5,
        ),
        activity(
            "placeholder_relaxation_1",
            "Spa Day with Thermal Baths",
            "Natural thermal waters with saunas, steam rooms, and relaxation areas.",
            InterestTag::Relaxation,
            "6 hours",
            65.0,
            4.6,
        ),
        activity(
            "placeholder_relaxation_2",
            "Sunset Cruise with Dinner",
            "An evening cruise with gourmet dinner as the sun sets over the water.",
            InterestTag::Relaxation,
            "3 hours",
            95.0,
            4.9,
        ),
    ];

    if criteria.preferences.is_empty() {
        catalog
    } else {
        catalog
            .into_iter()
            .filter(|a| criteria.preferences.contains(&a.category))
            .collect()
    }
}
