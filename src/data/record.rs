//! Power plant record.

use super::cantons::canton_name;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// One row of the renewable power plants CSV.
///
/// Empty cells stay `None`; each aggregation leaves out the rows missing the
/// field it groups on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantRecord {
    pub company: String,
    pub canton: Option<String>,
    pub energy_source_level_2: Option<String>,
    pub electrical_capacity: Option<f64>,
    pub commissioning_date: Option<NaiveDate>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl PlantRecord {
    /// Commissioning year.
    pub fn year(&self) -> Option<i32> {
        self.commissioning_date.map(|d| d.year())
    }

    /// Full canton name, `None` if the code is missing or not a known canton.
    pub fn canton_name(&self) -> Option<&'static str> {
        self.canton.as_deref().and_then(canton_name)
    }

    /// (lon, lat) when both coordinates are present.
    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.lon?, self.lat?))
    }

    /// Parse a commissioning date cell.
    ///
    /// Accepts a plain date or a timestamp (space or `T` separated); the time
    /// part is dropped.
    pub fn parse_commissioning_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(date);
        }
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|dt| dt.date())
    }
}
