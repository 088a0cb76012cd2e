use crate::error::{ErrorKind, Result};
use crate::reply::Reply;
use crate::version::ProtocolVersion;
use exn::ResultExt;
use lantern_catalog::{ChannelId, Repository};
use tracing::instrument;

/// `GET /public/{version}/file_checksums/{channel_id}`
///
/// Lists the checksums of every available local file in the channel's tree.
///
/// Two things here differ from the channel endpoints and are relied upon by
/// sync clients:
/// - an unknown channel is an empty list, not a 404;
/// - an unsupported version never surfaces as an error, it goes straight to
///   the not-found reply.
#[instrument(skip(repo))]
pub async fn file_checksums(repo: &Repository, version: &str, channel_id: &str) -> Result<Reply<Vec<String>>> {
    let Ok(ProtocolVersion::V1) = version.parse::<ProtocolVersion>() else {
        return Ok(Reply::NotFound);
    };
    let checksums = repo.channel_checksums(&ChannelId::new(channel_id)).await.or_raise(|| ErrorKind::Catalog)?;
    Ok(Reply::Found(checksums))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_catalog::Database;
    use lantern_catalog::fixtures::{ChannelSeed, FileSeed, NodeSeed, Seeder};

    const MATH: &str = "0a1b2c3d4e5f60718293a4b5c6d7e8f9";

    async fn seeded() -> (Database, Repository) {
        let db = Database::connect_in_memory().await.unwrap();
        let seeder = Seeder::new(&db);
        seeder.node(NodeSeed::root("math-root", 1)).await.unwrap();
        seeder.node(NodeSeed::child("math-video", 1, "math-root")).await.unwrap();
        seeder.file(FileSeed::new("video-high", "aaaa"), &["math-video"]).await.unwrap();
        seeder.file(FileSeed::new("video-low", "aaaa"), &["math-video"]).await.unwrap();
        seeder.channel(ChannelSeed::new(MATH, "Math Basics", "math-root")).await.unwrap();
        let repo = Repository::from(&db);
        (db, repo)
    }

    #[tokio::test]
    async fn test_checksums_for_known_channel() {
        let (_db, repo) = seeded().await;
        let reply = file_checksums(&repo, "v1", MATH).await.unwrap();
        assert_eq!(reply, Reply::Found(vec!["aaaa".to_string()]));
    }

    #[tokio::test]
    async fn test_unknown_channel_is_an_empty_list() {
        let (_db, repo) = seeded().await;
        let reply = file_checksums(&repo, "v1", "ffffffffffffffffffffffffffffffff").await.unwrap();
        assert_eq!(reply, Reply::Found(Vec::new()));
    }

    #[tokio::test]
    async fn test_unknown_version_is_not_found() {
        let (_db, repo) = seeded().await;
        let reply = file_checksums(&repo, "v2", MATH).await.unwrap();
        assert_eq!(reply, Reply::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_version_does_not_touch_the_catalog() {
        let (db, repo) = seeded().await;
        db.close().await;
        assert_eq!(file_checksums(&repo, "v0", MATH).await.unwrap(), Reply::NotFound);
        let err = file_checksums(&repo, "v1", MATH).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Catalog));
    }
}
