use serde::{Deserialize, Serialize};

/// Capacity of one filesystem row, converted to the display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DfMetric {
    pub filesystem:   String,
    pub mount_point:  String,
    pub size:         f64,
    pub used:         f64,
    pub available:    f64,
    /// 0..=100; 0 when the report printed "-"
    pub percent_full: u8,
}

impl DfMetric {
    /// Fraction of `size` that is used, 0.0 for zero-sized filesystems.
    pub fn used_ratio(&self) -> f64 {
        if self.size <= 0.0 { return 0.0; }
        self.used / self.size
    }

    /// Device column for the report table: "sda1" from "/dev/sda1",
    /// "vg-root" from "/dev/mapper/vg-root". Pseudo filesystems pass through.
    pub fn short_device(&self) -> &str {
        self.filesystem.trim_start_matches("/dev/").trim_start_matches("mapper/")
    }
}
