//! HTTP routing for the public discovery API.

use crate::channels::{list_channels, lookup_channel};
use crate::checksums::file_checksums;
use crate::info::{DeviceInfo, InstanceIdentity};
use crate::params::ChannelParams;
use crate::reply::{ApiError, Reply};
use crate::summary::ChannelSummary;
use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use lantern_catalog::Repository;
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// Cloning is cheap (a pool handle and an `Arc`), and nothing in here is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    repo: Repository,
    identity: Arc<dyn InstanceIdentity>,
}
impl AppState {
    pub fn new(repo: Repository, identity: impl InstanceIdentity + 'static) -> Self {
        Self { repo, identity: Arc::new(identity) }
    }
}

/// Build the router for every public endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/public/info/", get(info))
        .route("/public/{version}/channels", get(channel_list))
        .route("/public/{version}/channels/lookup/{identifier}", get(channel_lookup))
        .route("/public/{version}/file_checksums/{channel_id}", get(channel_file_checksums))
        .with_state(state)
}

async fn info(State(state): State<AppState>) -> Json<DeviceInfo> {
    Json(DeviceInfo::new(state.identity.as_ref()))
}

async fn channel_list(
    State(state): State<AppState>,
    Path(version): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Reply<Vec<ChannelSummary>>, ApiError> {
    let params: ChannelParams = pairs.into_iter().collect();
    Ok(list_channels(&state.repo, &version, &params).await?)
}

async fn channel_lookup(
    State(state): State<AppState>,
    Path((version, identifier)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Reply<Vec<ChannelSummary>>, ApiError> {
    let params: ChannelParams = pairs.into_iter().collect();
    Ok(lookup_channel(&state.repo, &version, &identifier, &params).await?)
}

async fn channel_file_checksums(
    State(state): State<AppState>,
    Path((version, channel_id)): Path<(String, String)>,
) -> Result<Reply<Vec<String>>, ApiError> {
    Ok(file_checksums(&state.repo, &version, &channel_id).await?)
}
