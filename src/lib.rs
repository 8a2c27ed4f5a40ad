//! Turns captured `df` output into per-filesystem capacity metrics.
//!
//! ```
//! use dfstat::{DfInspector, InspectorConfig};
//!
//! let report = "Filesystem 1K-blocks Used Available Use% Mounted on\n\
//!               /dev/sda1 1048576 524288 524288 50% /\n";
//! let metrics = DfInspector::new(InspectorConfig::default()).parse(report).unwrap();
//! assert_eq!(metrics[0].size, 1.0);
//! assert_eq!(metrics[0].percent_full, 50);
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod util;

pub use collectors::df::DfInspector;
pub use config::InspectorConfig;
pub use error::ParseError;
pub use models::metric::DfMetric;
pub use util::byte_size::{ByteSize, ByteUnit, InvalidByteSize};
