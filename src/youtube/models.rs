use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base URL for constructing watch links from video ids.
pub const VIDEO_BASE_URL: &str = "https://www.youtube.com/watch?v=";

/// One page of search results. Transient: consumed by the engines and
/// discarded, never persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchHit>,
    /// Continuation token; absent on the last page.
    pub next_page_token: Option<String>,
}

/// A raw search hit as returned by the `search` endpoint, before enrichment.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: HitId,
    pub snippet: Option<HitSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitId {
    pub channel_id: Option<String>,
    pub video_id: Option<String>,
}

/// Snippet fields the engines project from. Everything is optional here so
/// that a missing field surfaces as a descriptive `MalformedResponse` during
/// projection instead of a decode failure for the whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitSnippet {
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
}

/// A candidate channel, projected from a search hit. Identity is
/// `channel_id`; duplicates across pages are possible and not deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    /// The query that produced this candidate.
    pub query: String,
    pub channel_id: String,
    pub channel_title: String,
    pub description: String,
    pub published_at: String,
}

/// One page of the `videos` detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListPage {
    #[serde(default)]
    pub items: Vec<VideoDetailItem>,
}

/// The facets requested from the detail endpoint. `snippet` and `statistics`
/// are passed through opaquely; only `contentDetails.duration` and the
/// channel fields inside `snippet` are inspected downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetailItem {
    pub snippet: Value,
    pub content_details: VideoContentDetails,
    pub statistics: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    pub duration: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A fully enriched, filter-validated video. Never returned in a partially
/// enriched state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: String,
    pub video_url: String,
    pub snippet: Value,
    pub content_details: VideoContentDetails,
    pub statistics: Value,
}

impl VideoRecord {
    /// Channel title from the snippet payload, for download bookkeeping.
    /// `None` when the detail source omitted the field.
    pub fn channel_title(&self) -> Option<&str> {
        self.snippet["channelTitle"].as_str()
    }

    /// Channel id from the snippet payload, for download bookkeeping.
    /// `None` when the detail source omitted the field.
    pub fn channel_id(&self) -> Option<&str> {
        self.snippet["channelId"].as_str()
    }
}
