use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::HarvestConfig;
use crate::error::Result;
use crate::youtube::models::{SearchPage, VideoDetailItem, VideoListPage};

/// The paged operations the search engines run against. Implemented by
/// [`YouTubeClient`] for the real Data API and by in-memory fakes in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// One page of channel search results for `query`.
    async fn channel_page(
        &self,
        query: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchPage>;

    /// One page of video search results for `channel_id`.
    async fn video_page(
        &self,
        channel_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchPage>;

    /// Extended attributes (snippet, content details, statistics) for one
    /// video. `None` when the detail source has no matching item.
    async fn video_detail(&self, video_id: &str) -> Result<Option<VideoDetailItem>>;
}

/// YouTube Data API v3 client.
#[derive(Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    config: HarvestConfig,
}

impl YouTubeClient {
    pub fn new(config: HarvestConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Submit one paged GET and decode the response. The continuation token,
    /// when present, is appended to the parameter list. Exactly one request,
    /// no retries, no interpretation beyond JSON decoding.
    async fn submit<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        page_token: Option<&str>,
    ) -> Result<T> {
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let url = format!("{}{}", self.config.api.base_url, endpoint);
        let response = self.client.get(&url).query(&params).send().await?;

        debug!(
            "request: {} -> status {}",
            response.url(),
            response.status()
        );

        let page = response.error_for_status()?.json::<T>().await?;
        Ok(page)
    }
}

#[async_trait]
impl SearchBackend for YouTubeClient {
    async fn channel_page(
        &self,
        query: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchPage> {
        let tuning = &self.config.channels;
        let params = vec![
            ("part", "snippet".to_string()),
            ("type", "channel".to_string()),
            ("q", query.to_string()),
            ("relevanceLanguage", tuning.relevance_language.clone()),
            ("regionCode", tuning.region_code.clone()),
            ("order", "relevance".to_string()),
            ("maxResults", page_size.to_string()),
            ("key", self.config.api.key.clone()),
        ];

        self.submit("search", params, page_token).await
    }

    async fn video_page(
        &self,
        channel_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchPage> {
        let tuning = &self.config.videos;
        let params = vec![
            ("part", "snippet".to_string()),
            ("channelId", channel_id.to_string()),
            ("type", "video".to_string()),
            ("videoDuration", tuning.duration_bucket.clone()),
            ("publishedAfter", self.config.published_after_param()),
            ("relevanceLanguage", tuning.relevance_language.clone()),
            ("regionCode", tuning.region_code.clone()),
            ("order", "relevance".to_string()),
            ("maxResults", page_size.to_string()),
            ("key", self.config.api.key.clone()),
        ];

        self.submit("search", params, page_token).await
    }

    async fn video_detail(&self, video_id: &str) -> Result<Option<VideoDetailItem>> {
        let params = vec![
            ("part", "snippet,contentDetails,statistics".to_string()),
            ("id", video_id.to_string()),
            ("key", self.config.api.key.clone()),
        ];

        let page: VideoListPage = self.submit("videos", params, None).await?;
        Ok(page.items.into_iter().next())
    }
}
