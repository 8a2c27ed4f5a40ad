use crate::models::metric::DfMetric;
use crate::util::byte_size::ByteUnit;
use crate::util::human::{fmt_bar, fmt_pct, fmt_size};

const BAR_WIDTH: usize = 10;

/// Render parsed metrics as a human-readable table.
pub fn generate(metrics: &[DfMetric], unit: ByteUnit) -> String {
    let mut out = String::new();

    out.push_str(&format!("── Filesystems ({}) ───────────────────────────\n", metrics.len()));
    if metrics.is_empty() {
        out.push_str("  (no matching rows)\n");
        return out;
    }
    out.push_str(&format!(
        "  {:<20} {:<16} {:>12} {:>12} {:>12} {:>5}  {}\n",
        "Device", "Mount", "Size", "Used", "Avail", "Use%", "Usage"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(84 + BAR_WIDTH)));
    for m in metrics {
        out.push_str(&format!(
            "  {:<20} {:<16} {:>12} {:>12} {:>12} {:>5}  {}\n",
            m.short_device(), m.mount_point,
            fmt_size(m.size, unit), fmt_size(m.used, unit),
            fmt_size(m.available, unit), fmt_pct(m.percent_full),
            fmt_bar(m.used_ratio(), BAR_WIDTH),
        ));
    }
    out
}
