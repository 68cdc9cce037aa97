/// Paginated search engines and the channel selection policy.
pub mod channels;
pub mod videos;

pub use channels::{is_official_channel, robust_query, ChannelSearchEngine};
pub use videos::{filter_by_duration, VideoSearchEngine};
