//! Catalog seeding for tests.
//!
//! The content import process that normally fills the catalog lives outside
//! this crate. The [`Seeder`] stands in for it so that this and other crates
//! can build small catalogs in their tests. Enable the `fixtures` feature in
//! `[dev-dependencies]` only.

use crate::Database;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use sqlx::SqlitePool;

/// A content node to insert.
#[derive(Debug, Clone)]
pub struct NodeSeed {
    id: String,
    tree_id: i64,
    parent_id: Option<String>,
    kind: &'static str,
    lang_id: Option<String>,
    available: bool,
}
impl NodeSeed {
    /// An available topic node at the root of a tree.
    pub fn root(id: impl Into<String>, tree_id: i64) -> Self {
        Self {
            id: id.into(),
            tree_id,
            parent_id: None,
            kind: "topic",
            lang_id: None,
            available: true,
        }
    }

    /// An available resource node below `parent` in the same tree.
    pub fn child(id: impl Into<String>, tree_id: i64, parent: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent.into()),
            kind: "video",
            ..Self::root(id, tree_id)
        }
    }

    pub fn lang(mut self, lang_id: impl Into<String>) -> Self {
        self.lang_id = Some(lang_id.into());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// A file record and the local file it points to.
///
/// The local file is created on first use and shared by every later seed
/// naming the same checksum.
#[derive(Debug, Clone)]
pub struct FileSeed {
    id: String,
    checksum: String,
    lang_id: Option<String>,
    available: bool,
    local_available: bool,
}
impl FileSeed {
    pub fn new(id: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            checksum: checksum.into(),
            lang_id: None,
            available: true,
            local_available: true,
        }
    }

    pub fn lang(mut self, lang_id: impl Into<String>) -> Self {
        self.lang_id = Some(lang_id.into());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Mark the underlying local file as not present on this device.
    pub fn local_unavailable(mut self) -> Self {
        self.local_available = false;
        self
    }
}

/// A channel rooted at an existing content node.
#[derive(Debug, Clone)]
pub struct ChannelSeed {
    id: String,
    name: String,
    description: String,
    root_id: String,
    version: i64,
    thumbnail: String,
    total_resource_count: i64,
    published_size: i64,
    last_updated: Option<i64>,
    public: bool,
}
impl ChannelSeed {
    pub fn new(id: impl Into<String>, name: impl Into<String>, root_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            root_id: root_id.into(),
            version: 1,
            thumbnail: String::new(),
            total_resource_count: 0,
            published_size: 0,
            last_updated: None,
            public: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    pub fn stats(mut self, total_resource_count: i64, published_size: i64) -> Self {
        self.total_resource_count = total_resource_count;
        self.published_size = published_size;
        self
    }

    pub fn last_updated(mut self, unix_timestamp: i64) -> Self {
        self.last_updated = Some(unix_timestamp);
        self
    }
}

/// Inserts catalog rows directly, bypassing the import process.
#[derive(Debug, Clone)]
pub struct Seeder {
    pool: SqlitePool,
}
impl Seeder {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    /// Insert a language; its code is the part of the id before any `-`.
    pub async fn language(&self, id: &str, readable_name: &str) -> Result<()> {
        let (code, subcode) = match id.split_once('-') {
            Some((code, subcode)) => (code, Some(subcode)),
            None => (id, None),
        };
        sqlx::query("INSERT INTO languages (id, lang_code, lang_subcode, readable_name) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(code)
            .bind(subcode)
            .bind(readable_name)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    pub async fn node(&self, node: NodeSeed) -> Result<()> {
        sqlx::query(
            "INSERT INTO content_nodes (id, tree_id, parent_id, title, kind, lang_id, available) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&node.id)
        .bind(node.tree_id)
        .bind(&node.parent_id)
        .bind(&node.id)
        .bind(node.kind)
        .bind(&node.lang_id)
        .bind(node.available)
        .execute(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    /// Insert a file, its local file if new, and link it to `nodes`.
    pub async fn file(&self, file: FileSeed, nodes: &[&str]) -> Result<()> {
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        sqlx::query("INSERT OR IGNORE INTO local_files (id, extension, available) VALUES (?, 'mp4', ?)")
            .bind(&file.checksum)
            .bind(file.local_available)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        sqlx::query("INSERT INTO files (id, local_file_id, lang_id, available) VALUES (?, ?, ?, ?)")
            .bind(&file.id)
            .bind(&file.checksum)
            .bind(&file.lang_id)
            .bind(file.available)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        for node in nodes {
            sqlx::query("INSERT INTO content_node_files (contentnode_id, file_id) VALUES (?, ?)")
                .bind(*node)
                .bind(&file.id)
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    pub async fn channel(&self, channel: ChannelSeed) -> Result<()> {
        sqlx::query(
            r#"
                INSERT INTO channels (
                    id, name, description, author, version, thumbnail, root_id,
                    total_resource_count, published_size, last_updated, public
                ) VALUES (?, ?, ?, '', ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&channel.id)
        .bind(&channel.name)
        .bind(&channel.description)
        .bind(channel.version)
        .bind(&channel.thumbnail)
        .bind(&channel.root_id)
        .bind(channel.total_resource_count)
        .bind(channel.published_size)
        .bind(channel.last_updated)
        .bind(channel.public)
        .execute(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }
}
