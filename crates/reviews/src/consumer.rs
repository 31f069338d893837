use aama_core::ReviewsPayload;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::fallback::fallback_snapshot;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("reviews proxy unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("reviews proxy returned status {0}")]
    Status(u16),
    #[error("reviews proxy payload invalid: {0}")]
    Decode(#[source] reqwest::Error),
}

pub trait ReviewsFetcher: Send + Sync {
    async fn fetch(&self) -> Result<ReviewsPayload, FetchError>;
}

/// Reads the reviews proxy endpoint. Holds no credential.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    url: Url,
}

impl ProxyClient {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl ReviewsFetcher for ProxyClient {
    async fn fetch(&self) -> Result<ReviewsPayload, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json().await.map_err(FetchError::Decode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Ok,
    Degraded,
    Refreshing,
}

/// Reviews section of the page. Always has something to render: live data
/// when the last fetch succeeded, otherwise the last live snapshot or the
/// baked-in fallback with the offline flag raised.
#[derive(Debug)]
pub struct ReviewsView<F> {
    fetcher: F,
    state: ViewState,
    settled: ViewState,
    snapshot: ReviewsPayload,
    has_live_snapshot: bool,
    offline: bool,
    last_error: Option<String>,
}

impl<F: ReviewsFetcher> ReviewsView<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            state: ViewState::Loading,
            settled: ViewState::Loading,
            snapshot: fallback_snapshot(),
            has_live_snapshot: false,
            offline: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn snapshot(&self) -> &ReviewsPayload {
        &self.snapshot
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn load(&mut self) -> ViewState {
        if self.state != ViewState::Loading {
            return self.refresh().await;
        }
        let result = self.fetcher.fetch().await;
        self.settle(result)
    }

    /// Manual retry. The only path that re-attempts a failed fetch.
    pub async fn refresh(&mut self) -> ViewState {
        self.begin_refresh();
        let result = self.fetcher.fetch().await;
        self.settle(result)
    }

    pub fn begin_refresh(&mut self) {
        if self.state != ViewState::Loading {
            self.state = ViewState::Refreshing;
        }
    }

    /// Drops an in-flight refresh; the view returns to what it showed before.
    pub fn cancel_refresh(&mut self) {
        if self.state == ViewState::Refreshing {
            self.state = self.settled;
        }
    }

    pub fn settle(&mut self, result: Result<ReviewsPayload, FetchError>) -> ViewState {
        match result {
            Ok(payload) => {
                info!(reviews = payload.reviews.len(), "live reviews loaded");
                self.snapshot = payload;
                self.has_live_snapshot = true;
                self.offline = false;
                self.last_error = None;
                self.state = ViewState::Ok;
            }
            Err(err) => {
                warn!(error = %err, "reviews fetch failed, showing cached reviews");
                if !self.has_live_snapshot {
                    self.snapshot = fallback_snapshot();
                }
                self.offline = true;
                self.last_error = Some(err.to_string());
                self.state = ViewState::Degraded;
            }
        }
        self.settled = self.state;
        self.state
    }
}
