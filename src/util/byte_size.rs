use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Multiplier between adjacent units. Pinned to binary so that `df -k`
/// ("1K-blocks") input converts the same way for every unit pair.
pub const UNIT_BASE: f64 = 1024.0;

/// Byte-size units accepted for raw input and display output.
///
/// Each unit is `UNIT_BASE` to the power of its exponent, so adding a larger
/// unit only needs a new variant and exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ByteUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

impl ByteUnit {
    pub const ALL: [ByteUnit; 6] = [
        ByteUnit::B, ByteUnit::KB, ByteUnit::MB,
        ByteUnit::GB, ByteUnit::TB, ByteUnit::PB,
    ];

    fn exponent(self) -> i32 {
        match self {
            ByteUnit::B  => 0,
            ByteUnit::KB => 1,
            ByteUnit::MB => 2,
            ByteUnit::GB => 3,
            ByteUnit::TB => 4,
            ByteUnit::PB => 5,
        }
    }

    /// Number of bytes in one of this unit.
    pub fn bytes(self) -> f64 {
        UNIT_BASE.powi(self.exponent())
    }

    pub fn label(self) -> &'static str {
        match self {
            ByteUnit::B  => "B",
            ByteUnit::KB => "KB",
            ByteUnit::MB => "MB",
            ByteUnit::GB => "GB",
            ByteUnit::TB => "TB",
            ByteUnit::PB => "PB",
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ByteUnit {
    type Err = ParseError;

    /// Accepts "KB", "K" and "KiB" style spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let stem = upper
            .strip_suffix("IB")
            .or_else(|| upper.strip_suffix('B'))
            .unwrap_or(&upper);
        match stem {
            ""  if upper == "B" => Ok(ByteUnit::B),
            "K" => Ok(ByteUnit::KB),
            "M" => Ok(ByteUnit::MB),
            "G" => Ok(ByteUnit::GB),
            "T" => Ok(ByteUnit::TB),
            "P" => Ok(ByteUnit::PB),
            _   => Err(ParseError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for ByteUnit {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ByteUnit> for String {
    fn from(u: ByteUnit) -> Self {
        u.label().to_string()
    }
}

/// A numeric field that could not be read as a byte count.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("not a non-negative byte count: {0:?}")]
pub struct InvalidByteSize(pub String);

/// A byte quantity read from report text, tagged with the unit it was
/// expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ByteSize {
    value: f64,
    unit:  ByteUnit,
}

impl ByteSize {
    /// Parse `raw` as a magnitude in `unit`. Negative, NaN and infinite
    /// values are rejected instead of being coerced to zero.
    pub fn new(raw: &str, unit: ByteUnit) -> Result<Self, InvalidByteSize> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| InvalidByteSize(raw.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidByteSize(raw.to_string()));
        }
        // "-0" parses to negative zero
        Ok(Self { value: value + 0.0, unit })
    }

    pub fn unit(&self) -> ByteUnit {
        self.unit
    }

    /// Canonical byte count.
    pub fn bytes(&self) -> f64 {
        self.value * self.unit.bytes()
    }

    /// Magnitude expressed in `target`.
    pub fn to_unit(&self, target: ByteUnit) -> f64 {
        if target == self.unit {
            return self.value;
        }
        self.value * (self.unit.bytes() / target.bytes())
    }
}
