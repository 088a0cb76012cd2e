//! Capability probe: who is this node and what is it running?

use serde::Serialize;

/// Name reported as the installed application.
pub const APPLICATION: &str = "lantern";

/// Source of the identity facts reported by `GET /public/info/`.
///
/// Installation identity is owned by whoever provisions the node; the API
/// only reads it.
pub trait InstanceIdentity: Send + Sync {
    fn instance_id(&self) -> &str;
    fn device_name(&self) -> &str;
}

/// Identity fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    instance_id: String,
    device_name: String,
}
impl StaticIdentity {
    pub fn new(instance_id: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            device_name: device_name.into(),
        }
    }

    /// Fill in whatever was not configured: a random instance id, and the
    /// OS hostname as the device name.
    pub fn resolve(instance_id: Option<String>, device_name: Option<String>) -> Self {
        let instance_id = instance_id.unwrap_or_else(|| {
            let generated = uuid::Uuid::new_v4().simple().to_string();
            tracing::warn!(instance_id = %generated, "No instance id configured; generated one for this run");
            generated
        });
        let device_name = device_name.unwrap_or_else(|| {
            whoami::fallible::hostname().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Could not determine hostname");
                "localhost".to_string()
            })
        });
        Self { instance_id, device_name }
    }
}
impl InstanceIdentity for StaticIdentity {
    fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn device_name(&self) -> &str {
        &self.device_name
    }
}

/// Name of the host operating system, spelled the way clients expect it
/// (`Linux`, `Darwin`, `Windows`, ...).
pub fn operating_system() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "android" => "Android",
        "ios" => "iOS",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub application: &'static str,
    pub version: &'static str,
    pub instance_id: String,
    pub device_name: String,
    pub operating_system: &'static str,
}
impl DeviceInfo {
    pub fn new(identity: &dyn InstanceIdentity) -> Self {
        Self {
            application: APPLICATION,
            version: env!("CARGO_PKG_VERSION"),
            instance_id: identity.instance_id().to_string(),
            device_name: identity.device_name().to_string(),
            operating_system: operating_system(),
        }
    }
}
