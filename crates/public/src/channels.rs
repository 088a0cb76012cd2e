//! Channel listing and lookup.
//!
//! Both endpoints run the same filter. They differ in what an empty result
//! means: an empty listing is a perfectly good answer, while a lookup that
//! matches nothing (including a channel that exists but is unavailable) is
//! reported as not found.

use crate::error::{ErrorKind, Result};
use crate::params::ChannelParams;
use crate::reply::Reply;
use crate::summary::ChannelSummary;
use crate::version::ProtocolVersion;
use exn::ResultExt;
use lantern_catalog::{Channel, ChannelId, Repository};
use tracing::instrument;

/// Run the channel filter for the requested protocol version.
///
/// Fails with [`ErrorKind::UnsupportedVersion`] for anything but `v1`.
#[instrument(skip(repo, params), fields(keyword = ?params.keyword, language = ?params.language))]
pub async fn filter_channels(
    repo: &Repository,
    version: &str,
    params: &ChannelParams,
    identifier: Option<ChannelId>,
) -> Result<Vec<Channel>> {
    match version.parse::<ProtocolVersion>()? {
        ProtocolVersion::V1 => filter_channels_v1(repo, params, identifier).await,
    }
}

async fn filter_channels_v1(
    repo: &Repository,
    params: &ChannelParams,
    identifier: Option<ChannelId>,
) -> Result<Vec<Channel>> {
    let mut filter = params.to_filter();
    if let Some(identifier) = identifier {
        filter = filter.with_identifier(identifier);
    }
    repo.filter_channels(&filter).await.or_raise(|| ErrorKind::Catalog)
}

/// Fold an unsupported version into a not-found reply; anything else is a
/// real failure.
fn unsupported_as_not_found<T>(result: Result<T>) -> Result<Reply<T>> {
    match result {
        Ok(value) => Ok(Reply::Found(value)),
        Err(err) if matches!(&*err, ErrorKind::UnsupportedVersion(_)) => {
            let kind: &ErrorKind = &err;
            tracing::debug!(error = %kind, "Rejecting request");
            Ok(Reply::NotFound)
        },
        Err(err) => Err(err),
    }
}

fn summaries(channels: Vec<Channel>) -> Vec<ChannelSummary> {
    channels.into_iter().map(ChannelSummary::from).collect()
}

/// `GET /public/{version}/channels`
pub async fn list_channels(repo: &Repository, version: &str, params: &ChannelParams) -> Result<Reply<Vec<ChannelSummary>>> {
    let channels = unsupported_as_not_found(filter_channels(repo, version, params, None).await)?;
    Ok(match channels {
        Reply::Found(channels) => Reply::Found(summaries(channels)),
        Reply::NotFound => Reply::NotFound,
    })
}

/// `GET /public/{version}/channels/lookup/{identifier}`
///
/// The identifier is trimmed and stripped of hyphens before use, so a
/// canonical 32-character id and its hyphenated UUID form are equivalent.
pub async fn lookup_channel(
    repo: &Repository,
    version: &str,
    identifier: &str,
    params: &ChannelParams,
) -> Result<Reply<Vec<ChannelSummary>>> {
    let identifier = ChannelId::new(identifier);
    let channels = unsupported_as_not_found(filter_channels(repo, version, params, Some(identifier)).await)?;
    Ok(match channels {
        Reply::Found(channels) if !channels.is_empty() => Reply::Found(summaries(channels)),
        _ => Reply::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_catalog::Database;
    use lantern_catalog::fixtures::{ChannelSeed, NodeSeed, Seeder};

    const MATH: &str = "0a1b2c3d4e5f60718293a4b5c6d7e8f9";
    const HIDDEN: &str = "99990000aaaabbbbccccddddeeeeffff";

    async fn seeded() -> (Database, Repository) {
        let db = Database::connect_in_memory().await.unwrap();
        let seeder = Seeder::new(&db);
        seeder.language("en", "English").await.unwrap();
        seeder.node(NodeSeed::root("math-root", 1).lang("en")).await.unwrap();
        seeder.channel(ChannelSeed::new(MATH, "Math Basics", "math-root")).await.unwrap();
        seeder.node(NodeSeed::root("hidden-root", 2).unavailable()).await.unwrap();
        seeder.channel(ChannelSeed::new(HIDDEN, "Hidden Gems", "hidden-root")).await.unwrap();
        let repo = Repository::from(&db);
        (db, repo)
    }

    fn keyword(keyword: &str) -> ChannelParams {
        ChannelParams {
            keyword: Some(keyword.to_string()),
            language: None,
        }
    }

    #[tokio::test]
    async fn test_filter_rejects_unknown_versions() {
        let (_db, repo) = seeded().await;
        let err = filter_channels(&repo, "v2", &ChannelParams::default(), None).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedVersion(v) if v == "v2"));
    }

    #[tokio::test]
    async fn test_empty_listing_is_found() {
        let (_db, repo) = seeded().await;
        let reply = list_channels(&repo, "v1", &keyword("science")).await.unwrap();
        assert_eq!(reply, Reply::Found(Vec::new()));
    }

    #[tokio::test]
    async fn test_listing_with_unknown_version_is_not_found() {
        let (_db, repo) = seeded().await;
        let reply = list_channels(&repo, "v2", &ChannelParams::default()).await.unwrap();
        assert_eq!(reply, Reply::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_accepts_hyphenated_ids() {
        let (_db, repo) = seeded().await;
        let params = ChannelParams::default();
        let plain = lookup_channel(&repo, "v1", MATH, &params).await.unwrap();
        let hyphenated = lookup_channel(&repo, "v1", " 0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9 ", &params).await.unwrap();
        assert_eq!(plain, hyphenated);
        let found = plain.into_found().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Math Basics");
    }

    #[tokio::test]
    async fn test_lookup_of_unavailable_channel_is_not_found() {
        let (_db, repo) = seeded().await;
        let reply = lookup_channel(&repo, "v1", HIDDEN, &ChannelParams::default()).await.unwrap();
        assert_eq!(reply, Reply::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_filtered_to_nothing_is_not_found() {
        let (_db, repo) = seeded().await;
        let reply = lookup_channel(&repo, "v1", MATH, &keyword("science")).await.unwrap();
        assert_eq!(reply, Reply::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_with_blank_identifier_is_not_found() {
        let (_db, repo) = seeded().await;
        let reply = lookup_channel(&repo, "v1", " -- ", &ChannelParams::default()).await.unwrap();
        assert_eq!(reply, Reply::NotFound);
    }

    #[tokio::test]
    async fn test_catalog_failures_propagate() {
        let (db, repo) = seeded().await;
        db.close().await;
        let err = list_channels(&repo, "v1", &ChannelParams::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Catalog));
        let err = lookup_channel(&repo, "v1", MATH, &ChannelParams::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Catalog));
    }
}
