use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Transport maximum for `maxResults` on the search endpoint.
pub const MAX_PAGE_SIZE: usize = 50;

/// Configuration for the harvester. Every tuning value lives here and is
/// injected at engine construction, so independent searches with different
/// tuning can coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// API transport settings
    pub api: ApiConfig,

    /// Channel search tuning
    pub channels: ChannelSearchConfig,

    /// Video search and filtering tuning
    pub videos: VideoSearchConfig,

    /// Download settings
    pub download: DownloadConfig,

    /// Output artifact paths
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Google API key for YouTube Data API v3
    pub key: String,

    /// Base URL of the Data API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Hard cap on pages fetched per search invocation
    pub max_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSearchConfig {
    pub relevance_language: String,
    pub region_code: String,

    /// Candidate batch size evaluated by the selection policy
    pub batch_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSearchConfig {
    /// Coarse duration bucket passed to the search endpoint
    pub duration_bucket: String,

    /// Exact ceiling in seconds; videos at or above it are rejected
    pub max_duration_secs: u64,

    /// Only videos published after this instant are searched
    pub published_after: DateTime<Utc>,

    pub relevance_language: String,
    pub region_code: String,

    /// Maximum accepted videos per channel
    pub per_channel_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Download accepted videos after harvesting
    pub enabled: bool,

    /// Extract audio (mp3) instead of keeping the video
    pub audio_only: bool,

    /// Root directory for downloaded media
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub official_channels_file: PathBuf,
    pub unverified_channels_file: PathBuf,
    pub videos_file: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                key: String::new(),
                base_url: "https://www.googleapis.com/youtube/v3/".to_string(),
                timeout_seconds: 30,
                max_pages: 20,
            },
            channels: ChannelSearchConfig {
                relevance_language: "en".to_string(),
                region_code: "US".to_string(),
                batch_size: 3,
            },
            videos: VideoSearchConfig {
                duration_bucket: "short".to_string(),
                max_duration_secs: 120,
                published_after: Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
                relevance_language: "en".to_string(),
                region_code: "US".to_string(),
                per_channel_limit: 10,
            },
            download: DownloadConfig {
                enabled: false,
                audio_only: false,
                directory: PathBuf::from("video_data"),
            },
            output: OutputConfig {
                official_channels_file: PathBuf::from("channel_official.json"),
                unverified_channels_file: PathBuf::from("channel_to_be_verified.json"),
                videos_file: PathBuf::from("ch_video.json"),
            },
        }
    }
}

impl HarvestConfig {
    /// Load configuration from the usual file locations, falling back to
    /// environment variables.
    pub fn load() -> Result<Self> {
        let config_paths = [
            "yt-harvester.toml",
            "config/yt-harvester.toml",
            "~/.config/yt-harvester/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        if let Ok(config) = Self::from_env() {
            return Ok(config);
        }

        Err(anyhow!("No configuration file found"))
    }

    /// Load configuration from environment variables on top of defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("YT_HARVESTER_API_KEY") {
            config.api.key = key;
        }

        if let Ok(base_url) = std::env::var("YT_HARVESTER_API_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(max_duration) = std::env::var("YT_HARVESTER_MAX_DURATION") {
            config.videos.max_duration_secs = max_duration.parse().unwrap_or(120);
        }

        if let Ok(dir) = std::env::var("YT_HARVESTER_DOWNLOAD_DIR") {
            config.download.directory = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Validate configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.api.key.trim().is_empty() {
            return Err(anyhow!("API key is required"));
        }

        if self.api.max_pages == 0 {
            return Err(anyhow!("max_pages must be greater than 0"));
        }

        if self.videos.max_duration_secs == 0 {
            return Err(anyhow!("max_duration_secs must be greater than 0"));
        }

        if self.channels.batch_size == 0 {
            return Err(anyhow!("batch_size must be greater than 0"));
        }

        Ok(())
    }

    /// RFC 3339 form of the publish-after cutoff, as the API expects it.
    pub fn published_after_param(&self) -> String {
        self.videos
            .published_after
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string()
    }
}

/// Configuration builder for programmatic config creation.
pub struct ConfigBuilder {
    config: HarvestConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: HarvestConfig::default(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api.key = key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = base_url.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.channels.batch_size = batch_size;
        self
    }

    pub fn with_max_duration(mut self, seconds: u64) -> Self {
        self.config.videos.max_duration_secs = seconds;
        self
    }

    pub fn with_per_channel_limit(mut self, limit: usize) -> Self {
        self.config.videos.per_channel_limit = limit;
        self
    }

    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.config.download.directory = dir;
        self
    }

    pub fn enable_download(mut self, enable: bool) -> Self {
        self.config.download.enabled = enable;
        self
    }

    pub fn audio_only(mut self, enable: bool) -> Self {
        self.config.download.audio_only = enable;
        self
    }

    pub fn build(self) -> HarvestConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
