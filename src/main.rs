use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{info, warn};

mod config;
mod download;
mod duration;
mod error;
mod persist;
mod search;
mod youtube;

use crate::config::HarvestConfig;
use crate::download::VideoDownloader;
use crate::persist::ArtifactWriter;
use crate::search::{is_official_channel, ChannelSearchEngine, VideoSearchEngine};
use crate::youtube::YouTubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("yt_harvester=info,warn")
        .init();

    let matches = Command::new("yt-harvester")
        .version("0.1.0")
        .about("Official-channel discovery and short-form video harvesting")
        .arg(
            Arg::new("queries")
                .value_name("QUERY")
                .help("Search queries, one per brand/artist")
                .num_args(0..),
        )
        .arg(
            Arg::new("query-file")
                .short('f')
                .long("query-file")
                .value_name("FILE")
                .help("File with one query per line"),
        )
        .arg(
            Arg::new("batch-limit")
                .short('b')
                .long("batch-limit")
                .value_name("NUM")
                .help("Channel candidates evaluated per query")
                .default_value("3"),
        )
        .arg(
            Arg::new("video-limit")
                .short('n')
                .long("video-limit")
                .value_name("NUM")
                .help("Maximum accepted videos per channel")
                .default_value("10"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("YouTube Data API key (overrides config/env)"),
        )
        .arg(
            Arg::new("download")
                .short('d')
                .long("download")
                .help("Download accepted videos with yt-dlp")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("audio-only")
                .short('a')
                .long("audio-only")
                .help("Extract audio (mp3) instead of keeping the video")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("download-dir")
                .long("download-dir")
                .value_name("DIR")
                .help("Root directory for downloaded media"),
        )
        .get_matches();

    // Load configuration
    let mut config = HarvestConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        HarvestConfig::default()
    });

    // CLI overrides
    if let Some(key) = matches.get_one::<String>("api-key") {
        config.api.key = key.clone();
    }
    config.channels.batch_size = matches.get_one::<String>("batch-limit").unwrap().parse()?;
    config.videos.per_channel_limit = matches.get_one::<String>("video-limit").unwrap().parse()?;
    config.download.enabled = matches.get_flag("download");
    config.download.audio_only = matches.get_flag("audio-only");
    if let Some(dir) = matches.get_one::<String>("download-dir") {
        config.download.directory = PathBuf::from(dir);
    }

    config.validate()?;

    // Collect queries from arguments and/or file
    let mut queries: Vec<String> = matches
        .get_many::<String>("queries")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if let Some(path) = matches.get_one::<String>("query-file") {
        let contents = tokio::fs::read_to_string(path).await?;
        queries.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }

    if queries.is_empty() {
        return Err(anyhow::anyhow!("No queries given"));
    }

    info!("Harvesting {} queries", queries.len());

    let client = YouTubeClient::new(config.clone())?;
    let channel_engine = ChannelSearchEngine::new(&client, &config);
    let video_engine = VideoSearchEngine::new(&client, &config);

    let writer = ArtifactWriter::new(config.output.clone());
    writer.reset().await?;

    if config.download.enabled {
        tokio::fs::create_dir_all(&config.download.directory).await?;
    }

    // Channel searching: pick one candidate per query and classify it
    let mut official_channels = Vec::new();
    let mut unverified_channels = Vec::new();

    for query in &queries {
        let picked = channel_engine
            .channel_batch_pick(query, config.channels.batch_size)
            .await?;

        let Some(channel) = picked else {
            continue;
        };

        if is_official_channel(&channel) {
            official_channels.push(channel);
        } else {
            unverified_channels.push(channel);
        }
    }

    writer.write_official_channels(&official_channels).await?;
    writer.write_unverified_channels(&unverified_channels).await?;

    // Video searching: harvest each official channel by its own id
    let mut accepted_videos = Vec::new();
    for channel in &official_channels {
        let videos = video_engine
            .search_channel_videos(&channel.channel_id, config.videos.per_channel_limit)
            .await?;
        info!(
            "Channel {} ({}) -> {} accepted videos",
            channel.channel_title,
            channel.channel_id,
            videos.len()
        );
        accepted_videos.extend(videos);
    }

    writer.write_videos(&accepted_videos).await?;
    info!("Found {} related resources.", accepted_videos.len());

    // Download loop: one failure never halts the remaining items
    if config.download.enabled {
        let downloader = VideoDownloader::new(config.download.clone());
        for video in &accepted_videos {
            if let Err(e) = downloader.download(video).await {
                warn!("Cannot download video {}: {}", video.video_id, e);
            }
        }
    }

    Ok(())
}
