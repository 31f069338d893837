use aama_core::{BusinessSummary, ReviewAuthor, ReviewRecord, ReviewsPayload};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, UpstreamResource};

#[derive(Debug, Deserialize)]
struct UpstreamBusiness {
    id: String,
    name: String,
    rating: f64,
    review_count: u32,
    url: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamReviews {
    reviews: Vec<UpstreamReview>,
}

#[derive(Debug, Deserialize)]
struct UpstreamReview {
    id: String,
    url: String,
    text: String,
    rating: u8,
    time_created: String,
    user: UpstreamUser,
}

#[derive(Debug, Deserialize)]
struct UpstreamUser {
    name: String,
    image_url: Option<String>,
}

impl From<UpstreamBusiness> for BusinessSummary {
    fn from(value: UpstreamBusiness) -> Self {
        Self {
            id: value.id,
            name: value.name,
            aggregate_rating: value.rating,
            review_count: value.review_count,
            profile_url: value.url,
        }
    }
}

impl From<UpstreamReview> for ReviewRecord {
    fn from(value: UpstreamReview) -> Self {
        Self {
            id: value.id,
            review_url: value.url,
            text: value.text,
            rating: value.rating,
            created_at: value.time_created,
            author: ReviewAuthor {
                display_name: value.user.name,
                avatar_url: value.user.image_url,
            },
        }
    }
}

/// Server-side holder of the reviews credential. Each snapshot costs two
/// sequential upstream calls: business profile, then its reviews.
#[derive(Debug, Clone)]
pub struct YelpGateway {
    client: Client,
    config: GatewayConfig,
}

impl YelpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn business_id(&self) -> &str {
        &self.config.business_id
    }

    #[instrument(skip(self), fields(business_id = %self.config.business_id))]
    pub async fn fetch_snapshot(&self) -> Result<ReviewsPayload, GatewayError> {
        let business: UpstreamBusiness = self
            .get_json(
                UpstreamResource::Business,
                &format!("businesses/{}", self.config.business_id),
            )
            .await?;
        let reviews: UpstreamReviews = self
            .get_json(
                UpstreamResource::Reviews,
                &format!("businesses/{}/reviews", self.config.business_id),
            )
            .await?;

        let payload = ReviewsPayload {
            business: business.into(),
            reviews: reviews.reviews.into_iter().map(Into::into).collect(),
        };
        info!(reviews = payload.reviews.len(), "reviews snapshot fetched");
        Ok(payload)
    }

    fn endpoint(&self, resource: UpstreamResource, path: &str) -> Result<Url, GatewayError> {
        self.config
            .base_url
            .join(path)
            .map_err(|source| GatewayError::Url { resource, source })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: UpstreamResource,
        path: &str,
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(resource, path)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| GatewayError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%resource, status = status.as_u16(), "upstream returned non-success status");
            return Err(GatewayError::from_status(resource, status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Decode { resource, source })
    }
}
