use crate::util::byte_size::ByteUnit;

/// Format a value already expressed in `unit`: "12.50 GB"
pub fn fmt_size(value: f64, unit: ByteUnit) -> String {
    match unit {
        ByteUnit::B => format!("{:.0} B", value),
        _           => format!("{:.2} {}", value, unit),
    }
}

/// Format a whole percentage: "84%"
pub fn fmt_pct(pct: u8) -> String {
    format!("{}%", pct)
}

/// Text gauge for a used fraction: "████░░░░░░"
pub fn fmt_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
