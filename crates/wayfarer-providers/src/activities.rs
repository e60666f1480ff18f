//! GetYourGuide-style activities client

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashSet;
use wayfarer_core::{ActivityCriteria, ActivityOffer, InterestTag, Price, Provenance};

use crate::placeholder::activity_placeholders;
use crate::{ActivitySearch, ProviderConfig, ProviderError, ProviderResult};

const PROVIDER: &str = "getyourguide";
const DEFAULT_BASE_URL: &str = "https://api.getyourguide.com/v1";
const PAGE_LIMIT: usize = 20;

/// Activity and tour search over a bearer-token API.
///
/// One query runs per requested interest category; results are merged,
/// deduplicated by name, and ranked by rating.
pub struct GuideActivities {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl GuideActivities {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .activity_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: config.activity_api_key.clone(),
        })
    }

    async fn search_category(
        &self,
        key: &SecretString,
        criteria: &ActivityCriteria,
        category: Option<InterestTag>,
    ) -> ProviderResult<Vec<ActivityOffer>> {
        let url = format!("{}/activities", self.base_url);
        let mut params = vec![
            ("q", criteria.destination.clone()),
            ("limit", PAGE_LIMIT.to_string()),
        ];
        if let Some(tag) = category {
            params.push(("category", tag.as_str().to_string()));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(key.expose_secret())
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ProviderError::InvalidResponse(format!(
                "activity search returned {status}"
            )));
        }

        let body: SearchResponse = response.json().await?;
        let fallback_category = category.unwrap_or(InterestTag::Culture);
        Ok(body
            .data
            .into_iter()
            .map(|a| convert_activity(a, fallback_category))
            .collect())
    }
}

#[async_trait::async_trait]
impl ActivitySearch for GuideActivities {
    async fn search(&self, criteria: &ActivityCriteria) -> ProviderResult<Vec<ActivityOffer>> {
        let key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::debug!(
                    provider = PROVIDER,
                    "no credentials, serving placeholder activities"
                );
                return Ok(trim(activity_placeholders(PROVIDER, criteria), criteria));
            }
        };

        let categories: Vec<Option<InterestTag>> = if criteria.preferences.is_empty() {
            vec![None]
        } else {
            criteria.preferences.iter().copied().map(Some).collect()
        };

        let mut collected = Vec::new();
        let mut had_error = false;
        for category in categories {
            match self.search_category(key, criteria, category).await {
                Ok(offers) => collected.extend(offers),
                Err(e) => {
                    had_error = true;
                    tracing::warn!(provider = PROVIDER, error = %e, "activity category search failed");
                }
            }
        }

        if collected.is_empty() && had_error {
            tracing::warn!(provider = PROVIDER, "falling back to placeholder activities");
            return Ok(trim(activity_placeholders(PROVIDER, criteria), criteria));
        }

        tracing::info!(provider = PROVIDER, count = collected.len(), "activity offers");
        Ok(trim(collected, criteria))
    }

    fn provider(&self) -> &str {
        PROVIDER
    }
}

/// Dedupe by name, rank by rating, cap at the requested result count.
fn trim(mut offers: Vec<ActivityOffer>, criteria: &ActivityCriteria) -> Vec<ActivityOffer> {
    offers.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let mut seen = HashSet::new();
    offers.retain(|a| seen.insert(a.name.clone()));
    offers.truncate(criteria.max_results);
    offers
}

fn convert_activity(activity: ApiActivity, fallback_category: InterestTag) -> ActivityOffer {
    let category = activity
        .category
        .as_deref()
        .and_then(|c| c.parse().ok())
        .unwrap_or(fallback_category);

    ActivityOffer {
        id: activity.id,
        name: activity.title,
        description: activity.description.unwrap_or_default(),
        category,
        duration: activity.duration.unwrap_or_else(|| "3 hours".to_string()),
        price: Price::usd(activity.price.map(|p| p.amount).unwrap_or(50.0)),
        rating: activity.rating.unwrap_or(4.0),
        booking_url: activity.booking_url.unwrap_or_default(),
        provenance: Provenance::live(PROVIDER),
    }
}

// API response types
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ApiActivity>,
}

#[derive(Debug, Deserialize)]
struct ApiActivity {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    price: Option<ApiPrice>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    booking_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPrice {
    amount: f64,
}
