use lantern_catalog::Channel;
use serde::Serialize;
use time::OffsetDateTime;

/// Wire shape of a channel in list and lookup responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
    /// Language code of the channel's root node.
    pub language: Option<String>,
    pub included_languages: Vec<String>,
    pub description: String,
    pub tagline: Option<String>,
    pub author: String,
    pub total_resource_count: u64,
    pub version: u32,
    pub published_size: u64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_published: Option<OffsetDateTime>,
    pub icon_encoding: Option<String>,
    /// Search hit highlighting. Never populated.
    pub matching_tokens: Vec<String>,
    pub public: bool,
}
impl From<Channel> for ChannelSummary {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            name: channel.name,
            language: channel.language,
            included_languages: channel.included_languages,
            description: channel.description,
            tagline: channel.tagline,
            author: channel.author,
            total_resource_count: channel.total_resource_count,
            version: channel.version,
            published_size: channel.published_size,
            last_published: channel.last_updated.map(OffsetDateTime::from),
            icon_encoding: channel.thumbnail,
            matching_tokens: Vec::new(),
            public: channel.public,
        }
    }
}
