//! Parser for captured `df` output.
//!
//! Expected layout, one header line followed by data rows:
//!
//! ```text
//! Filesystem     1K-blocks    Used Available Use% Mounted on
//! /dev/sda1        1048576  524288    524288  50% /
//! proc                   0       0         0    - /proc
//! ```
//!
//! Rows that do not split into exactly six columns (blank lines, device
//! names long enough to wrap) are dropped without complaint. A corrupt
//! percent or byte column aborts the whole parse.

use crate::config::InspectorConfig;
use crate::error::{ParseError, Result};
use crate::models::metric::DfMetric;
use crate::util::byte_size::ByteSize;
use tracing::{debug, trace, warn};

const COLUMNS: usize = 6;

// Column positions (0-based)
const COL_FILESYSTEM: usize = 0;
const COL_SIZE:       usize = 1;
const COL_USED:       usize = 2;
const COL_AVAIL:      usize = 3;
const COL_PERCENT:    usize = 4;
const COL_MOUNT:      usize = 5;

/// Turns `df` report text into metrics according to an [`InspectorConfig`].
#[derive(Debug, Clone, Default)]
pub struct DfInspector {
    config: InspectorConfig,
}

impl DfInspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Parse a full report. The first line is always treated as the header.
    ///
    /// Returns the selected rows in source order, or the first fatal
    /// [`ParseError`] encountered.
    pub fn parse(&self, output: &str) -> Result<Vec<DfMetric>> {
        debug!(bytes = output.len(), "parsing df output");
        let mut values = Vec::new();

        for (index, line) in output.split('\n').enumerate().skip(1) {
            let line_no = index + 1;
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() != COLUMNS {
                if !columns.is_empty() {
                    trace!(line = line_no, columns = columns.len(), "skipping malformed row");
                }
                continue;
            }

            // Checked before selection: a bad percent means the layout is off
            // for every row, not just this one.
            let percent = normalize_percent(columns[COL_PERCENT]).ok_or_else(|| {
                let err = ParseError::InvalidPercent {
                    line:  line_no,
                    field: columns[COL_PERCENT].to_string(),
                };
                warn!(%err, "aborting df parse");
                err
            })?;

            if !self.config.selects(columns[COL_FILESYSTEM], columns[COL_MOUNT]) {
                trace!(line = line_no, mount = columns[COL_MOUNT], "row not selected");
                continue;
            }

            values.push(self.create_metric(&columns, percent, line_no)?);
        }

        debug!(metrics = values.len(), "df output parsed");
        Ok(values)
    }

    fn create_metric(&self, columns: &[&str], percent: u8, line_no: usize) -> Result<DfMetric> {
        Ok(DfMetric {
            filesystem:   columns[COL_FILESYSTEM].to_string(),
            mount_point:  columns[COL_MOUNT].to_string(),
            size:         self.convert(columns, COL_SIZE, line_no)?,
            used:         self.convert(columns, COL_USED, line_no)?,
            available:    self.convert(columns, COL_AVAIL, line_no)?,
            percent_full: percent,
        })
    }

    fn convert(&self, columns: &[&str], col: usize, line_no: usize) -> Result<f64> {
        let size = ByteSize::new(columns[col], self.config.raw_unit).map_err(|source| {
            let err = ParseError::InvalidNumber {
                line:   line_no,
                column: col + 1,
                source,
            };
            warn!(%err, value = columns[col], "aborting df parse");
            err
        })?;
        Ok(size.to_unit(self.config.display_unit))
    }
}

/// "-" → 0, "87%" → 87. Anything longer than one character loses exactly
/// its last character before being read as an integer. Overfull values
/// (BSD df reports "104%" when reserved blocks are in use) clamp to 100.
fn normalize_percent(field: &str) -> Option<u8> {
    if field == "-" {
        return Some(0);
    }
    let digits = if field.chars().count() > 1 {
        let mut chars = field.chars();
        chars.next_back();
        chars.as_str()
    } else {
        field
    };
    let pct: u64 = digits.parse().ok()?;
    Some(pct.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::byte_size::{ByteUnit, InvalidByteSize};

    const HEADER: &str = "Filesystem     1K-blocks    Used Available Use% Mounted on";

    fn inspector(mount_point: &str, device_starts_with: &str) -> DfInspector {
        DfInspector::new(InspectorConfig {
            raw_unit:           ByteUnit::KB,
            display_unit:       ByteUnit::GB,
            device_starts_with: device_starts_with.to_string(),
            mount_point:        mount_point.to_string(),
        })
    }

    #[test]
    fn test_normalize_percent() {
        assert_eq!(normalize_percent("-"), Some(0));
        assert_eq!(normalize_percent("87%"), Some(87));
        assert_eq!(normalize_percent("100%"), Some(100));
        assert_eq!(normalize_percent("0%"), Some(0));
        assert_eq!(normalize_percent("7"), Some(7));
        assert_eq!(normalize_percent("abc%"), None);
        assert_eq!(normalize_percent("101%"), Some(100));
        assert_eq!(normalize_percent("1040%"), Some(100));
        assert_eq!(normalize_percent("-5%"), None);
        assert_eq!(normalize_percent("%"), None);
        assert_eq!(normalize_percent(""), None);
    }

    #[test]
    fn test_percent_strips_any_trailing_char() {
        // only the length matters, not what the last char is
        assert_eq!(normalize_percent("42x"), Some(42));
        assert_eq!(normalize_percent("42"), Some(4));
    }

    #[test]
    fn test_select_by_mount_point() {
        let input = "Header\n/dev/sda1 1048576 524288 524288 50% /\n";
        let metrics = inspector("/", "").parse(input).unwrap();
        assert_eq!(metrics.len(), 1);
        let m = &metrics[0];
        assert_eq!(m.filesystem, "/dev/sda1");
        assert_eq!(m.mount_point, "/");
        assert_eq!(m.size, 1.0);
        assert_eq!(m.used, 0.5);
        assert_eq!(m.available, 0.5);
        assert_eq!(m.percent_full, 50);
    }

    #[test]
    fn test_select_by_device_prefix() {
        let input = "Header\n/dev/sda1 1048576 524288 524288 50% /\n";
        let metrics = inspector("", "/dev/sd").parse(input).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].size, 1.0);
        assert_eq!(metrics[0].percent_full, 50);
    }

    #[test]
    fn test_placeholder_percent() {
        let input = format!("{}\n/dev/sda1 1024 512 512 - /mnt\n", HEADER);
        let metrics = inspector("/mnt", "").parse(&input).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].percent_full, 0);
    }

    #[test]
    fn test_bad_percent_is_fatal() {
        let input = format!("{}\n/dev/sda1 1024 512 512 abc% /\n/dev/sdb1 1024 512 512 10% /\n", HEADER);
        let err = inspector("/", "").parse(&input).unwrap_err();
        assert_eq!(err, ParseError::InvalidPercent { line: 2, field: "abc%".to_string() });
    }

    #[test]
    fn test_bad_percent_on_unselected_row_is_fatal() {
        let input = format!("{}\n/dev/sda1 1024 512 512 abc% /boot\n", HEADER);
        assert!(matches!(
            inspector("/", "").parse(&input),
            Err(ParseError::InvalidPercent { line: 2, .. })
        ));
    }

    #[test]
    fn test_overfull_row_does_not_abort_parse() {
        let input = format!(
            "{}\n/dev/ada0p2 1048576 524288 524288 50% /\n/dev/ada1p1 1000 1040 0 104% /data\n",
            HEADER
        );
        let metrics = inspector("/", "").parse(&input).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].filesystem, "/dev/ada0p2");
        assert_eq!(metrics[0].percent_full, 50);

        let overfull = inspector("/data", "").parse(&input).unwrap();
        assert_eq!(overfull[0].percent_full, 100);
    }

    #[test]
    fn test_negative_zero_size_is_stored_as_zero() {
        let input = format!("{}\n/dev/sda1 -0 0 0 0% /\n", HEADER);
        let metrics = inspector("/", "").parse(&input).unwrap();
        assert_eq!(metrics[0].size, 0.0);
        assert!(metrics[0].size.is_sign_positive());
    }

    #[test]
    fn test_bad_size_is_fatal() {
        let input = format!("{}\n/dev/sda1 1024 lots 512 50% /\n", HEADER);
        let err = inspector("/", "").parse(&input).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                line:   2,
                column: 3,
                source: InvalidByteSize("lots".to_string()),
            }
        );
    }

    #[test]
    fn test_bad_size_on_unselected_row_is_ignored() {
        let input = format!("{}\n/dev/sda1 1024 lots 512 50% /boot\n", HEADER);
        assert!(inspector("/", "").parse(&input).unwrap().is_empty());
    }

    #[test]
    fn test_header_is_never_a_metric() {
        // header has the right shape and would otherwise match
        let input = "/dev/sda1 1024 512 512 50% /\n/dev/sda1 2048 1024 1024 50% /\n";
        let metrics = inspector("/", "").parse(input).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].size, 2048.0 / 1_048_576.0);
    }

    #[test]
    fn test_wrong_column_count_is_skipped() {
        let input = format!(
            "{}\n\n/dev/mapper/very-long-volume-name\n 1024 512 512 50% /\n/dev/sda1 1024 512 512 50% / extra\n",
            HEADER
        );
        assert!(inspector("/", "").parse(&input).unwrap().is_empty());
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(inspector("/", "").parse("").unwrap().is_empty());
        assert!(inspector("/", "").parse(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = format!("{}\r\n/dev/sda1 1048576 0 1048576 0% /\r\n", HEADER);
        let metrics = inspector("/", "").parse(&input).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].mount_point, "/");
    }

    #[test]
    fn test_default_inspector() {
        let d = DfInspector::default();
        assert_eq!(d.config(), &InspectorConfig::default());
    }
}
