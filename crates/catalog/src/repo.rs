//! Read-only repository over the content catalog.
//!
//! Channels, content nodes, files and local files are populated by the import
//! process; everything here is a pure read. Tree membership (`tree_id`) is
//! used as the scoping key throughout, so no query ever walks parent pointers.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::filter::contains_pattern;
use crate::models::ChannelRow;
use crate::{Channel, ChannelFilter, ChannelId, TreeId};
use exn::ResultExt;
use sqlx::SqlitePool;
use std::collections::{BTreeSet, HashMap};
use tracing::instrument;

/// Serialise a set of trees for binding against `json_each(?)`.
fn tree_ids_json<'a>(trees: impl IntoIterator<Item = &'a TreeId>) -> Result<String> {
    let ids = trees.into_iter().map(|tree| tree.0).collect::<Vec<i64>>();
    serde_json::to_string(&ids).or_raise(|| ErrorKind::InvalidData("tree ids"))
}

/// Repository for the discovery queries over the catalog database.
///
/// # Relationships
///
/// - Every channel has exactly one root content node, and a channel is
///   available iff its root node is.
/// - All nodes descending from a channel root share the root's `tree_id`.
/// - Nodes and files are many-to-many (`content_node_files`).
/// - Many files can reference the same local file, even across channels, so
///   anything enumerating local files must deduplicate.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    // =========================================================================
    // Channels
    // =========================================================================

    /// List the available channels satisfying every criterion in `filter`.
    ///
    /// - **Identifier**: only the channel with that primary key is a candidate.
    /// - **Keyword**: name or description contains it (case-insensitive).
    /// - **Language**: the root node's language id contains it, OR the
    ///   channel's tree is one of [`matching_trees`](Self::matching_trees).
    /// - **Availability**: the root content node must be available. This is
    ///   applied unconditionally.
    ///
    /// Each channel appears at most once, ordered by name then id.
    #[instrument(skip(self), err(Debug))]
    pub async fn filter_channels(&self, filter: &ChannelFilter) -> Result<Vec<Channel>> {
        // The language criterion is an OR across two entities. Resolve the
        // tree side once, up front, and hand it to the channel query as a
        // single IN predicate.
        let trees = match filter.language() {
            Some(language) => self.matching_trees(language).await?,
            None => BTreeSet::new(),
        };
        let rows: Vec<ChannelRow> = sqlx::query_as(include_str!("../queries/filter_channels.sql"))
            .bind(filter.identifier().map(ChannelId::as_str))
            .bind(filter.keyword().map(contains_pattern))
            .bind(filter.language().map(contains_pattern))
            .bind(tree_ids_json(&trees)?)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let mut channels = rows.into_iter().map(Channel::try_from).collect::<Result<Vec<_>>>()?;
        self.attach_included_languages(&mut channels).await?;
        tracing::debug!(matched = channels.len(), language_trees = trees.len(), "Filtered channels");
        Ok(channels)
    }

    /// Resolve the trees containing content in a given language.
    ///
    /// A tree matches when any of its nodes has a language id containing
    /// `language` (case-insensitive), OR any of its nodes owns a file whose
    /// language id does. The two conditions are independent: a node pulls its
    /// whole tree in through a matching file even if its own language differs.
    #[instrument(skip(self), err(Debug))]
    pub async fn matching_trees(&self, language: &str) -> Result<BTreeSet<TreeId>> {
        let ids: Vec<i64> = sqlx::query_scalar(include_str!("../queries/matching_trees.sql"))
            .bind(contains_pattern(language))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(ids.into_iter().map(TreeId).collect())
    }

    /// Get the tree of a channel's root content node.
    ///
    /// Returns `None` if no channel has the given id. Availability is not
    /// considered.
    pub async fn channel_tree(&self, id: &ChannelId) -> Result<Option<TreeId>> {
        let tree: Option<i64> = sqlx::query_scalar(include_str!("../queries/channel_tree.sql"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(tree.map(TreeId))
    }

    /// Fill in `included_languages` for a batch of channels with one query.
    async fn attach_included_languages(&self, channels: &mut [Channel]) -> Result<()> {
        if channels.is_empty() {
            return Ok(());
        }
        let rows: Vec<(i64, String)> = sqlx::query_as(include_str!("../queries/included_languages.sql"))
            .bind(tree_ids_json(channels.iter().map(|c| &c.tree_id))?)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let mut by_tree: HashMap<TreeId, Vec<String>> = HashMap::new();
        for (tree, lang) in rows {
            by_tree.entry(TreeId(tree)).or_default().push(lang);
        }
        for channel in channels.iter_mut() {
            channel.included_languages = by_tree.get(&channel.tree_id).cloned().unwrap_or_default();
        }
        Ok(())
    }

    // =========================================================================
    // Checksums
    // =========================================================================

    /// List the checksums of every available local file in a channel's tree.
    ///
    /// A missing channel is not an error: the result is simply empty. Each
    /// checksum appears once, however many files or nodes reach it.
    #[instrument(skip(self), err(Debug))]
    pub async fn channel_checksums(&self, id: &ChannelId) -> Result<Vec<String>> {
        let Some(tree) = self.channel_tree(id).await? else {
            tracing::debug!(channel = %id, "Channel not in catalog; no checksums");
            return Ok(Vec::new());
        };
        let checksums: Vec<String> = sqlx::query_scalar(include_str!("../queries/channel_checksums.sql"))
            .bind(tree.0)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tracing::debug!(channel = %id, tree = %tree, count = checksums.len(), "Enumerated checksums");
        Ok(checksums)
    }
}
