use serde::{Deserialize, Serialize};

/// An application as returned by the platform: a named group of devices
/// sharing one codebase and device type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Application {
    pub id: u64,
    pub app_name: String,
    pub device_type: String,
    #[serde(default)]
    pub git_repository: Option<String>,
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub online_devices: u32,
    /// Total number of devices registered under the application
    #[serde(default)]
    pub devices_length: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreateApplicationBody {
    pub app_name: String,
    pub device_type: String,
}
