use crate::internal::error::{AppError, AppResult};
use crate::internal::models::Item;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub const HN_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

/// Read-only view of the feed used by the refresh cycle.
pub trait StorySource {
    /// Ranked ids from the top-stories listing.
    fn list_top_ids(&self) -> AppResult<Vec<u32>>;

    /// Detail record for one id, or `None` when it cannot be fetched.
    fn get_item(&self, id: u32) -> Option<Item>;
}

impl<T: StorySource + ?Sized> StorySource for Arc<T> {
    fn list_top_ids(&self) -> AppResult<Vec<u32>> {
        (**self).list_top_ids()
    }

    fn get_item(&self, id: u32) -> Option<Item> {
        (**self).get_item(id)
    }
}

/// Blocking HTTP client for the Hacker News API.
///
/// Every request carries the configured timeout. Build it outside any async
/// runtime; the refresh cycle calls it from a blocking worker.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn top_stories_url(&self) -> String {
        format!("{}topstories.json", self.base_url)
    }

    pub fn item_url(&self, id: u32) -> String {
        format!("{}item/{}.json", self.base_url, id)
    }

    /// GET `url` and deserialize the body, classifying failures.
    ///
    /// Transport errors and non-2xx statuses are `Network`; bodies that don't
    /// decode into `T` are `Api`.
    fn get_json<T>(&self, url: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(AppError::Network)?;

        let bytes = resp.bytes().map_err(AppError::Network)?;
        serde_json::from_slice::<T>(&bytes)
            .map_err(|e| AppError::Api(format!("failed to parse JSON response from {url}: {e}")))
    }
}

impl StorySource for FeedClient {
    fn list_top_ids(&self) -> AppResult<Vec<u32>> {
        let url = self.top_stories_url();
        tracing::info!(%url, "Fetching top story ids");
        let ids: Vec<u32> = self.get_json(&url)?;
        tracing::info!(count = ids.len(), "Fetched top story ids");
        Ok(ids)
    }

    fn get_item(&self, id: u32) -> Option<Item> {
        let url = self.item_url(id);
        // The API answers `null` for ids that don't exist.
        match self.get_json::<Option<Item>>(&url) {
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                tracing::warn!(id, "Item not found");
                None
            }
            Err(e) => {
                tracing::warn!(id, "Error fetching item: {}", e);
                None
            }
        }
    }
}
