//! SQLite content catalog for channel discovery.
//!
//! This crate owns the relational view of the content a node can serve:
//! channels, the content node trees below them, the files attached to those
//! nodes and the deduplicated local files on disk. The catalog is filled by
//! the content import process; lantern only ever reads from it.
//!
//! # Architecture
//! - **Channels** have exactly one root content node. A channel is available
//!   iff its root node is available.
//! - **Content nodes** carry a `tree_id` shared by every node below the same
//!   root, which scopes all tree-wide queries without parent traversal.
//! - **Files** attach to nodes (many-to-many) and point at a **local file**,
//!   whose id is the checksum sync clients compare against.

mod channel;
mod db;
pub mod error;
mod filter;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod models;
mod repo;

pub use crate::channel::{Channel, ChannelId, TreeId};
pub use crate::db::Database;
pub use crate::filter::ChannelFilter;
pub use crate::repo::Repository;
