//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Land-use hint supplied by the caller alongside field imagery
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Cropland,
    Orchard,
    Vineyard,
    Pasture,
    Greenhouse,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Cropland => write!(f, "Cropland"),
            FieldType::Orchard => write!(f, "Orchard"),
            FieldType::Vineyard => write!(f, "Vineyard"),
            FieldType::Pasture => write!(f, "Pasture"),
            FieldType::Greenhouse => write!(f, "Greenhouse"),
        }
    }
}

/// Date range covered by a series of observations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days between start and end, inclusive
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
