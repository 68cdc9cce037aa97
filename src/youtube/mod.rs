/// YouTube Data API transport and wire types.
pub mod client;
pub mod models;

pub use client::{SearchBackend, YouTubeClient};
pub use models::{ChannelRecord, SearchHit, SearchPage, VideoDetailItem, VideoRecord};
