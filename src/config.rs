use crate::util::byte_size::ByteUnit;
use serde::{Deserialize, Serialize};

/// How a report is read: which units its numbers are in, which unit to
/// emit, and which rows to keep.
///
/// Fixed once the inspector is built. Example as TOML:
/// ```toml
/// raw_unit           = "KB"
/// display_unit       = "GB"
/// device_starts_with = "/dev/sd"
/// mount_point        = ""       # empty = select by device prefix
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Unit of the size/used/available columns in the input (df -k prints KB)
    pub raw_unit: ByteUnit,
    /// Unit the metrics are converted to
    pub display_unit: ByteUnit,
    /// Device prefix filter, e.g. "/dev/sd". Only used when `mount_point` is empty.
    pub device_starts_with: String,
    /// Exact mount point to report. Empty = fall back to the device prefix.
    pub mount_point: String,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            raw_unit:           ByteUnit::KB,
            display_unit:       ByteUnit::GB,
            device_starts_with: String::new(),
            mount_point:        "/".to_string(),
        }
    }
}

// ── Row selection ────────────────────────────────────────────────────

impl InspectorConfig {
    /// Whether a row with this filesystem and mount column becomes a metric.
    ///
    /// A configured mount point is the only rule in force; the device prefix
    /// is consulted only when no mount point is set.
    pub fn selects(&self, filesystem: &str, mount: &str) -> bool {
        if self.mount_point.is_empty() {
            filesystem.starts_with(&self.device_starts_with)
        } else {
            mount == self.mount_point
        }
    }
}
