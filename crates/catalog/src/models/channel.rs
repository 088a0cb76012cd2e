use crate::error::{Error, ErrorKind};
use crate::{Channel, ChannelId, TreeId};
use exn::ResultExt;
use time::UtcDateTime;

/// A channel joined with its root content node (and that node's language).
#[derive(sqlx::FromRow)]
pub(crate) struct ChannelRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    #[sqlx(default)]
    pub(crate) tagline: Option<String>,
    pub(crate) author: String,
    pub(crate) version: i64,
    pub(crate) thumbnail: String,
    pub(crate) total_resource_count: i64,
    pub(crate) published_size: i64,
    #[sqlx(default)]
    pub(crate) last_updated: Option<i64>,
    pub(crate) public: bool,
    pub(crate) tree_id: i64,
    #[sqlx(default)]
    pub(crate) lang_code: Option<String>,
}
impl TryFrom<ChannelRow> for Channel {
    type Error = Error;
    fn try_from(row: ChannelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ChannelId::new(row.id),
            name: row.name,
            description: row.description,
            tagline: row.tagline,
            author: row.author,
            version: u32::try_from(row.version).or_raise(|| ErrorKind::InvalidData("channel version"))?,
            thumbnail: Some(row.thumbnail).filter(|t| !t.is_empty()),
            tree_id: TreeId(row.tree_id),
            language: row.lang_code,
            // Populated by the repository in a second, batched query.
            included_languages: Vec::new(),
            total_resource_count: u64::try_from(row.total_resource_count)
                .or_raise(|| ErrorKind::InvalidData("total resource count"))?,
            published_size: u64::try_from(row.published_size).or_raise(|| ErrorKind::InvalidData("published size"))?,
            last_updated: row
                .last_updated
                .map(|ts| UtcDateTime::from_unix_timestamp(ts).or_raise(|| ErrorKind::InvalidData("last updated date")))
                .transpose()?,
            public: row.public,
        })
    }
}
