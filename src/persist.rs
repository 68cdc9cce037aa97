use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::config::OutputConfig;
use crate::youtube::models::{ChannelRecord, VideoRecord};

/// Writes the three JSON artifacts of a run: official channels,
/// to-be-verified channels, and accepted videos. Each is a pretty-printed
/// JSON array with sorted keys.
pub struct ArtifactWriter {
    output: OutputConfig,
}

impl ArtifactWriter {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Truncate all artifacts at run start.
    pub async fn reset(&self) -> Result<()> {
        for path in [
            &self.output.official_channels_file,
            &self.output.unverified_channels_file,
            &self.output.videos_file,
        ] {
            tokio::fs::write(path, b"")
                .await
                .with_context(|| format!("failed to truncate {}", path.display()))?;
        }
        Ok(())
    }

    pub async fn write_official_channels(&self, channels: &[ChannelRecord]) -> Result<()> {
        write_sorted_json(&self.output.official_channels_file, channels).await?;
        info!(
            "Wrote {} official channels to {}",
            channels.len(),
            self.output.official_channels_file.display()
        );
        Ok(())
    }

    pub async fn write_unverified_channels(&self, channels: &[ChannelRecord]) -> Result<()> {
        write_sorted_json(&self.output.unverified_channels_file, channels).await?;
        info!(
            "Wrote {} to-be-verified channels to {}",
            channels.len(),
            self.output.unverified_channels_file.display()
        );
        Ok(())
    }

    pub async fn write_videos(&self, videos: &[VideoRecord]) -> Result<()> {
        write_sorted_json(&self.output.videos_file, videos).await?;
        info!(
            "Wrote {} accepted videos to {}",
            videos.len(),
            self.output.videos_file.display()
        );
        Ok(())
    }
}

/// Serialize through `serde_json::Value` so object keys come out sorted,
/// then pretty-print.
async fn write_sorted_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let value = serde_json::to_value(value)?;
    let pretty = serde_json::to_string_pretty(&value)?;
    tokio::fs::write(path, pretty)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use tempfile::TempDir;

    fn channel(id: &str) -> ChannelRecord {
        ChannelRecord {
            query: "acme".to_string(),
            channel_id: id.to_string(),
            channel_title: "Acme".to_string(),
            description: "official".to_string(),
            published_at: "2017-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reset_truncates_artifacts() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig {
            official_channels_file: dir.path().join("official.json"),
            unverified_channels_file: dir.path().join("unverified.json"),
            videos_file: dir.path().join("videos.json"),
        };
        tokio::fs::write(&output.videos_file, b"stale").await.unwrap();

        let writer = ArtifactWriter::new(output.clone());
        writer.reset().await.unwrap();

        let contents = tokio::fs::read_to_string(&output.videos_file).await.unwrap();
        assert!(contents.is_empty());
        assert!(output.official_channels_file.exists());
    }

    #[tokio::test]
    async fn test_channel_artifact_has_sorted_keys() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig {
            official_channels_file: dir.path().join("official.json"),
            unverified_channels_file: dir.path().join("unverified.json"),
            videos_file: dir.path().join("videos.json"),
        };

        let writer = ArtifactWriter::new(output.clone());
        writer
            .write_official_channels(&[channel("UC1")])
            .await
            .unwrap();

        let contents = tokio::fs::read_to_string(&output.official_channels_file)
            .await
            .unwrap();
        let channel_id_pos = contents.find("channelId").unwrap();
        let query_pos = contents.find("query").unwrap();
        assert!(channel_id_pos < query_pos);

        let parsed: Vec<ChannelRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![channel("UC1")]);
    }
}
