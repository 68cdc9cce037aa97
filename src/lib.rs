/// yt-harvester
///
/// Discovers "official" YouTube channels for a set of text queries via the
/// Data API v3, harvests short-form videos from those channels under
/// duration/date/locale filters, and optionally downloads the media.

pub mod config;
pub mod download;
pub mod duration;
pub mod error;
pub mod persist;
pub mod search;
pub mod youtube;

// Re-export main types for easy access
pub use crate::config::{ConfigBuilder, HarvestConfig, MAX_PAGE_SIZE};
pub use crate::download::VideoDownloader;
pub use crate::duration::parse_duration;
pub use crate::error::HarvestError;
pub use crate::persist::ArtifactWriter;
pub use crate::search::{
    filter_by_duration, is_official_channel, robust_query, ChannelSearchEngine, VideoSearchEngine,
};
pub use crate::youtube::{ChannelRecord, SearchBackend, VideoRecord, YouTubeClient};
