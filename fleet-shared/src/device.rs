use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeviceType {
    /// Identifier passed to the platform, e.g. `raspberry-pi`
    pub slug: String,
    /// Human readable name, e.g. `Raspberry Pi`
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceNoteBody {
    pub note: String,
}
