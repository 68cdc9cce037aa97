use tracing::{info, warn};

use crate::config::{HarvestConfig, MAX_PAGE_SIZE};
use crate::error::{HarvestError, Result};
use crate::youtube::models::{ChannelRecord, SearchHit};
use crate::youtube::SearchBackend;

/// Qualifying suffix appended by [`robust_query`].
const OFFICIAL_SUFFIX: &str = " official";

/// Paginated channel search plus the official-channel selection policy.
pub struct ChannelSearchEngine<'a, B> {
    backend: &'a B,
    config: &'a HarvestConfig,
}

impl<'a, B: SearchBackend> ChannelSearchEngine<'a, B> {
    pub fn new(backend: &'a B, config: &'a HarvestConfig) -> Self {
        Self { backend, config }
    }

    /// Search channels matching `query`, returning at most `limit` records.
    ///
    /// Pages are gathered in order until the continuation token runs out,
    /// the accumulated nominal count reaches `limit`, or the configured page
    /// cap is hit. The full raw-hit list is projected to channel records
    /// only after gathering, then truncated to `limit`.
    pub async fn search_channels(&self, query: &str, limit: usize) -> Result<Vec<ChannelRecord>> {
        let raw = self.gather_pages(query, limit).await?;

        let mut records = raw
            .iter()
            .map(|hit| channel_record(query, hit))
            .collect::<Result<Vec<_>>>()?;
        records.truncate(limit);

        Ok(records)
    }

    async fn gather_pages(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
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
                .channel_page(query, page_size, token.as_deref())
                .await?;
            pages += 1;

            // An empty page ends pagination with whatever was accumulated.
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
                    "channel search for {:?} hit the page cap ({} pages), stopping",
                    query, pages
                );
                break;
            }
        }

        Ok(raw)
    }

    /// Fetch a batch of candidates for `query` and pick the best match.
    ///
    /// The query is first made more specific with [`robust_query`]. The
    /// first candidate passing [`is_official_channel`] wins; with no
    /// official candidate the first one is returned unconditionally; an
    /// empty candidate set is a no-match signal, not an error.
    pub async fn channel_batch_pick(
        &self,
        query: &str,
        batch_size: usize,
    ) -> Result<Option<ChannelRecord>> {
        let candidates = self
            .search_channels(&robust_query(query), batch_size)
            .await?;

        if candidates.is_empty() {
            info!("channel_batch_pick: no channel match found -> {}", query);
            return Ok(None);
        }

        if let Some(official) = candidates.iter().find(|c| is_official_channel(c)) {
            return Ok(Some(official.clone()));
        }

        Ok(candidates.into_iter().next())
    }
}

/// Make a query string more specific by appending the qualifying suffix.
pub fn robust_query(query: &str) -> String {
    format!("{}{}", query, OFFICIAL_SUFFIX)
}

/// Heuristic official-channel predicate: the description contains the
/// literal substring "official", case-sensitive. Not a verified trust
/// signal.
pub fn is_official_channel(channel: &ChannelRecord) -> bool {
    channel.description.contains("official")
}

/// Project a raw search hit into a channel record. Pure field projection;
/// a missing snippet field is a malformed response, never defaulted.
fn channel_record(query: &str, hit: &SearchHit) -> Result<ChannelRecord> {
    let snippet = hit
        .snippet
        .as_ref()
        .ok_or_else(|| HarvestError::MalformedResponse("channel hit without snippet".into()))?;

    let field = |value: &Option<String>, name: &str| {
        value
            .clone()
            .ok_or_else(|| HarvestError::MalformedResponse(format!("channel snippet missing {}", name)))
    };

    Ok(ChannelRecord {
        query: query.to_string(),
        channel_id: field(&snippet.channel_id, "channelId")?,
        channel_title: field(&snippet.channel_title, "channelTitle")?,
        description: field(&snippet.description, "description")?,
        published_at: field(&snippet.published_at, "publishedAt")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::models::{HitId, HitSnippet};

    fn channel(description: &str) -> ChannelRecord {
        ChannelRecord {
            query: "acme".to_string(),
            channel_id: "UC123".to_string(),
            channel_title: "Acme".to_string(),
            description: description.to_string(),
            published_at: "2017-03-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_robust_query_appends_suffix() {
        assert_eq!(robust_query("acme inc"), "acme inc official");
    }

    #[test]
    fn test_official_predicate_literal_match() {
        assert!(is_official_channel(&channel("official channel of X")));
        assert!(!is_official_channel(&channel("Channel of X")));
    }

    #[test]
    fn test_official_predicate_is_case_sensitive() {
        assert!(!is_official_channel(&channel("OFFICIAL CHANNEL")));
        assert!(!is_official_channel(&channel("Official channel of X")));
        assert!(is_official_channel(&channel("the official page")));
    }

    #[test]
    fn test_channel_record_projection() {
        let hit = SearchHit {
            id: HitId {
                channel_id: Some("UC9".to_string()),
                video_id: None,
            },
            snippet: Some(HitSnippet {
                channel_id: Some("UC9".to_string()),
                channel_title: Some("Nine".to_string()),
                description: Some("official nine".to_string()),
                published_at: Some("2018-01-01T00:00:00Z".to_string()),
            }),
        };

        let record = channel_record("nine", &hit).unwrap();
        assert_eq!(record.channel_id, "UC9");
        assert_eq!(record.query, "nine");
    }

    #[test]
    fn test_missing_snippet_field_is_malformed() {
        let hit = SearchHit {
            id: HitId::default(),
            snippet: Some(HitSnippet {
                channel_id: Some("UC9".to_string()),
                channel_title: Some("Nine".to_string()),
                description: None,
                published_at: Some("2018-01-01T00:00:00Z".to_string()),
            }),
        };

        assert!(matches!(
            channel_record("nine", &hit),
            Err(HarvestError::MalformedResponse(_))
        ));
    }
}
