//! Channel domain types.

use std::fmt;
use time::UtcDateTime;

/// Normalised channel primary key.
///
/// Channel ids are UUIDs stored as 32 lowercase hex characters. Clients send
/// them in all sorts of shapes (hyphenated, upper-cased, with stray
/// whitespace), so every id is normalised before it touches the database:
/// surrounding whitespace is trimmed, every `-` is removed and the rest is
/// lower-cased.
///
/// There is deliberately no validation. A malformed id is still a valid
/// lookup key, it just never matches a channel.
///
/// ```
/// use lantern_catalog::ChannelId;
/// let a = ChannelId::new(" 6C8F2C4A-1E0B-4D7A-9B8E-0D1C2B3A4F5E ");
/// let b = ChannelId::new("6c8f2c4a1e0b4d7a9b8e0d1c2b3a4f5e");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(String);
impl ChannelId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let id = raw.as_ref().trim().chars().filter(|c| *c != '-').flat_map(char::to_lowercase).collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalisation left nothing to look up.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grouping key shared by every content node descending from one channel root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(pub i64);
impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A content channel, as exposed to discovery clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub description: String,
    pub tagline: Option<String>,
    pub author: String,
    pub version: u32,
    /// Thumbnail image, encoded as a data URI.
    pub thumbnail: Option<String>,
    /// Tree of the channel's root content node.
    pub tree_id: TreeId,
    /// Language code of the channel's root content node.
    pub language: Option<String>,
    /// Distinct language ids of the available content in the channel tree.
    pub included_languages: Vec<String>,
    pub total_resource_count: u64,
    /// Total size in bytes of the published channel content.
    pub published_size: u64,
    pub last_updated: Option<UtcDateTime>,
    pub public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("6c8f2c4a1e0b4d7a9b8e0d1c2b3a4f5e", "6c8f2c4a1e0b4d7a9b8e0d1c2b3a4f5e")]
    #[case("6c8f2c4a-1e0b-4d7a-9b8e-0d1c2b3a4f5e", "6c8f2c4a1e0b4d7a9b8e0d1c2b3a4f5e")]
    #[case("  6c8f2c4a-1e0b-4d7a-9b8e-0d1c2b3a4f5e\n", "6c8f2c4a1e0b4d7a9b8e0d1c2b3a4f5e")]
    #[case("6C8F2C4A1E0B4D7A9B8E0D1C2B3A4F5E", "6c8f2c4a1e0b4d7a9b8e0d1c2b3a4f5e")]
    #[case("6c8f-2c4a-1e0b", "6c8f2c4a1e0b")]
    #[case(" - ", "")]
    #[case("", "")]
    fn test_channel_id_normalisation(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(ChannelId::new(raw).as_str(), expected);
    }

    #[test]
    fn test_channel_id_only_strips_surrounding_whitespace() {
        // Internal whitespace is left alone; it just won't match anything.
        assert_eq!(ChannelId::new(" ab cd ").as_str(), "ab cd");
    }

    #[test]
    fn test_empty_channel_id() {
        assert!(ChannelId::new("---").is_empty());
        assert!(!ChannelId::new("a").is_empty());
    }
}
