//! Public, read-only discovery API.
//!
//! Lets remote devices ask a node which channels it can serve, look one up
//! by id, and enumerate the file checksums behind a channel so they can work
//! out what they are missing. Every endpoint is keyed by a protocol version
//! path segment; only `v1` exists.
//!
//! | Endpoint                                           | Unknown version | Nothing matched |
//! |----------------------------------------------------|-----------------|-----------------|
//! | `GET /public/{version}/channels`                   | 404             | 200 `[]`        |
//! | `GET /public/{version}/channels/lookup/{id}`       | 404             | 404             |
//! | `GET /public/{version}/file_checksums/{channel_id}`| 404             | 200 `[]`        |
//! | `GET /public/info/`                                | n/a             | n/a             |
//!
//! Every 404 carries `{"id": "NOT_FOUND", "metadata": {"view": ""}}`.

mod channels;
mod checksums;
pub mod error;
mod info;
mod params;
mod reply;
mod router;
mod summary;
mod version;

pub use crate::channels::{filter_channels, list_channels, lookup_channel};
pub use crate::checksums::file_checksums;
pub use crate::info::{APPLICATION, DeviceInfo, InstanceIdentity, StaticIdentity, operating_system};
pub use crate::params::ChannelParams;
pub use crate::reply::{INTERNAL_ERROR, NOT_FOUND, Reply};
pub use crate::router::{AppState, router};
pub use crate::summary::ChannelSummary;
pub use crate::version::ProtocolVersion;
