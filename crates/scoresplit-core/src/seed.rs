//! Per-student seed selection
//!
//! The allocator only sees `Option<u64>`. Which seed a student gets is a
//! caller policy:
//! - `random`: no seed, every run differs
//! - `row`: the 1-based row number, so re-running a roster reproduces it
//! - `row-total`: a hash of the row and the student's total
//! - `<u64>`: a hash of that base value, the row and the total

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::ScoreSplitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    #[default]
    Random,
    RowIndex,
    RowAndTotal,
    Fixed(u64),
}

impl SeedPolicy {
    /// Seed for the student at 0-based `row` with the given total
    pub fn seed_for(&self, row: usize, total: i64) -> Option<u64> {
        match self {
            SeedPolicy::Random => None,
            SeedPolicy::RowIndex => Some(row as u64 + 1),
            SeedPolicy::RowAndTotal => Some(hash_seed(&format!("{}:{}", row, total))),
            SeedPolicy::Fixed(base) => Some(hash_seed(&format!("{}:{}:{}", base, row, total))),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        !matches!(self, SeedPolicy::Random)
    }
}

/// First eight bytes of the SHA-256 digest, big-endian
fn hash_seed(input: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

impl FromStr for SeedPolicy {
    type Err = ScoreSplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" | "none" => Ok(SeedPolicy::Random),
            "row" => Ok(SeedPolicy::RowIndex),
            "row-total" => Ok(SeedPolicy::RowAndTotal),
            other => other.parse::<u64>().map(SeedPolicy::Fixed).map_err(|_| {
                ScoreSplitError::invalid_argument(format!(
                    "unknown seed policy {:?} (expected: random, row, row-total, or an integer)",
                    other
                ))
            }),
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::Random => write!(f, "random"),
            SeedPolicy::RowIndex => write!(f, "row"),
            SeedPolicy::RowAndTotal => write!(f, "row-total"),
            SeedPolicy::Fixed(base) => write!(f, "{}", base),
        }
    }
}

impl Serialize for SeedPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SeedPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
