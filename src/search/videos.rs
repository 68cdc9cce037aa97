use tracing::{debug, warn};

use crate::config::{HarvestConfig, MAX_PAGE_SIZE};
use crate::duration::parse_duration;
use crate::error::{HarvestError, Result};
use crate::youtube::models::{SearchHit, VideoRecord, VIDEO_BASE_URL};
use crate::youtube::SearchBackend;

/// Paginated per-channel video search with detail enrichment and duration
/// filtering.
pub struct VideoSearchEngine<'a, B> {
    backend: &'a B,
    config: &'a HarvestConfig,
}

impl<'a, B: SearchBackend> VideoSearchEngine<'a, B> {
    pub fn new(backend: &'a B, config: &'a HarvestConfig) -> Self {
        Self { backend, config }
    }

    /// Search videos on `channel_id`, returning at most `limit` accepted
    /// records.
    ///
    /// Staging is gather -> enrich -> filter -> truncate, in that order:
    /// all raw hits are accumulated across pages first, each is enriched
    /// with full detail (hits without detail are dropped), the enriched set
    /// is filtered by duration, and only then is the result cut to `limit`.
    /// The final count can be below `limit` even when more raw hits were
    /// fetched.
    pub async fn search_channel_videos(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<VideoRecord>> {
        let raw = self.gather_pages(channel_id, limit).await?;

        let mut enriched = Vec::with_capacity(raw.len());
        for hit in &raw {
            if let Some(record) = self.enrich(hit).await? {
                enriched.push(record);
            }
        }

        let mut accepted = filter_by_duration(enriched, self.config.videos.max_duration_secs);
        accepted.truncate(limit);

        Ok(accepted)
    }

    async fn gather_pages(&self, channel_id: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let page_size = limit.min(MAX_PAGE_SIZE);
        let mut raw: Vec<SearchHit> = Vec::new();
        let mut token: Option<String> = None;
        let mut fetched = 0usize;
        let mut pages = 0usize;

        loop {
            let page = self
                .backend
                .video_page(channel_id, page_size, token.as_deref())
                .await?;
            pages += 1;

            if page.items.is_empty() {
                break;
            }

            raw.extend(page.items);
            fetched += page_size;
            token = page.next_page_token;

            if token.is_none() || fetched >= limit {
                break;
            }

            if pages >= self.config.api.max_pages {
                warn!(
                    "video search for channel {} hit the page cap ({} pages), stopping",
                    channel_id, pages
                );
                break;
            }
        }

        Ok(raw)
    }

    /// Fetch extended attributes for one raw hit and merge them into a
    /// [`VideoRecord`]. `Ok(None)` means the detail source has no matching
    /// item; the caller drops the hit.
    async fn enrich(&self, hit: &SearchHit) -> Result<Option<VideoRecord>> {
        let video_id = hit.id.video_id.as_ref().ok_or_else(|| {
            HarvestError::MalformedResponse("video hit without id.videoId".into())
        })?;

        let Some(detail) = self.backend.video_detail(video_id).await? else {
            debug!("no detail item for video {}, dropping", video_id);
            return Ok(None);
        };

        Ok(Some(VideoRecord {
            video_id: video_id.clone(),
            video_url: format!("{}{}", VIDEO_BASE_URL, video_id),
            snippet: detail.snippet,
            content_details: detail.content_details,
            statistics: detail.statistics,
        }))
    }
}

/// Retain records whose parsed duration is strictly under `ceiling_secs`,
/// preserving input order. Records with a malformed duration token are
/// dropped with a warning rather than failing the whole harvest.
pub fn filter_by_duration(records: Vec<VideoRecord>, ceiling_secs: u64) -> Vec<VideoRecord> {
    records
        .into_iter()
        .filter(|record| match parse_duration(&record.content_details.duration) {
            Ok(seconds) => seconds < ceiling_secs,
            Err(e) => {
                warn!("dropping video {}: {}", record.video_id, e);
                false
            }
        })
        .collect()
}
