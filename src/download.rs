use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::DownloadConfig;
use crate::youtube::models::VideoRecord;

/// Media download collaborator. Delegates the actual fetch to yt-dlp;
/// callers decide what a failure means (the harvest run treats it as
/// non-fatal).
pub struct VideoDownloader {
    config: DownloadConfig,
}

impl VideoDownloader {
    pub fn new(config: DownloadConfig) -> Self {
        Self { config }
    }

    /// Per-channel target directory: `<root>/<channelTitle>-<channelId>`.
    /// Missing snippet fields are warned about and fall back to "unknown".
    pub fn channel_directory(&self, video: &VideoRecord) -> PathBuf {
        let channel_title = video.channel_title().unwrap_or_else(|| {
            warn!("video {} snippet has no channelTitle", video.video_id);
            "unknown"
        });
        let channel_id = video.channel_id().unwrap_or_else(|| {
            warn!("video {} snippet has no channelId", video.video_id);
            "unknown"
        });

        self.config
            .directory
            .join(format!("{}-{}", channel_title, channel_id))
    }

    /// Download one video (or its audio track when `audio_only` is set)
    /// into its channel directory, creating the directory on demand.
    pub async fn download(&self, video: &VideoRecord) -> Result<()> {
        let target = self.channel_directory(video);
        tokio::fs::create_dir_all(&target).await?;

        info!(
            "Downloading video -> {} | into -> {}",
            video.video_id,
            target.display()
        );

        let template = target.join("%(id)s - %(title)s.%(ext)s");

        let mut command = tokio::process::Command::new("yt-dlp");
        command.arg("--quiet").arg("-o").arg(&template);

        if self.config.audio_only {
            command.args(["-x", "--audio-format", "mp3"]);
        }

        let status = command.arg(&video.video_url).status().await?;

        if !status.success() {
            return Err(anyhow!(
                "yt-dlp exited with {} for video {}",
                status,
                video.video_id
            ));
        }

        Ok(())
    }
}
