//! Farm models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::FarmId;

/// A physical farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub id: FarmId,
    pub name: String,
    pub size: Decimal,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[serde(default)]
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Farm {
    /// Farm size expressed in another unit, or `None` if it overflows
    pub fn size_in(&self, unit: SizeUnit) -> Option<Decimal> {
        convert_size(self.size, self.size_unit, unit)
    }
}

/// Attributes for creating or updating a farm
///
/// The record store assigns `id` and `created_at`; an update replaces every
/// attribute listed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmInput {
    pub name: String,
    pub size: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_unit: Option<SizeUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl FarmInput {
    pub fn new(name: impl Into<String>, size: Decimal) -> Self {
        Self {
            name: name.into(),
            size,
            size_unit: None,
            location: None,
        }
    }

    pub fn with_unit(mut self, unit: SizeUnit) -> Self {
        self.size_unit = Some(unit);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Unit to store, falling back to acres
    pub fn unit_or_default(&self) -> SizeUnit {
        self.size_unit.unwrap_or_default()
    }

    /// Location to store, falling back to an empty string
    pub fn location_or_default(&self) -> String {
        self.location.clone().unwrap_or_default()
    }
}

/// Units a farm size can be recorded in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    #[default]
    Acres,
    Hectares,
    #[serde(alias = "square feet")]
    SquareFeet,
    #[serde(alias = "square meters")]
    SquareMeters,
}

impl SizeUnit {
    pub const ALL: [SizeUnit; 4] = [
        SizeUnit::Acres,
        SizeUnit::Hectares,
        SizeUnit::SquareFeet,
        SizeUnit::SquareMeters,
    ];

    /// Stable storage code, matching the serialized form
    pub fn code(&self) -> &'static str {
        match self {
            SizeUnit::Acres => "acres",
            SizeUnit::Hectares => "hectares",
            SizeUnit::SquareFeet => "square_feet",
            SizeUnit::SquareMeters => "square_meters",
        }
    }

    /// Parse a storage code or a display name
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace(' ', "_").as_str() {
            "acres" => Some(SizeUnit::Acres),
            "hectares" => Some(SizeUnit::Hectares),
            "square_feet" => Some(SizeUnit::SquareFeet),
            "square_meters" => Some(SizeUnit::SquareMeters),
            _ => None,
        }
    }

    /// Square meters in one unit
    pub fn square_meters(&self) -> Decimal {
        match self {
            SizeUnit::Acres => Decimal::new(40_468_564_224, 7),
            SizeUnit::Hectares => Decimal::from(10_000),
            SizeUnit::SquareFeet => Decimal::new(9_290_304, 8),
            SizeUnit::SquareMeters => Decimal::ONE,
        }
    }
}

impl std::fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeUnit::Acres => write!(f, "acres"),
            SizeUnit::Hectares => write!(f, "hectares"),
            SizeUnit::SquareFeet => write!(f, "square feet"),
            SizeUnit::SquareMeters => write!(f, "square meters"),
        }
    }
}

impl std::str::FromStr for SizeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeUnit::from_code(s).ok_or_else(|| format!("unknown size unit: {}", s))
    }
}

/// Convert a size between units through square meters.
///
/// Returns `None` when the intermediate area overflows `Decimal`.
pub fn convert_size(size: Decimal, from: SizeUnit, to: SizeUnit) -> Option<Decimal> {
    if from == to {
        return Some(size);
    }
    size.checked_mul(from.square_meters())?
        .checked_div(to.square_meters())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_size_unit_accepts_spaced_names() {
        let unit: SizeUnit = serde_json::from_str("\"square feet\"").unwrap();
        assert_eq!(unit, SizeUnit::SquareFeet);
        let unit: SizeUnit = serde_json::from_str("\"square_meters\"").unwrap();
        assert_eq!(unit, SizeUnit::SquareMeters);
        assert_eq!(SizeUnit::from_code("Hectares"), Some(SizeUnit::Hectares));
        assert_eq!(SizeUnit::from_code("furlongs"), None);
    }

    #[test]
    fn test_farm_defaults_missing_unit_and_location() {
        let farm: Farm = serde_json::from_str(
            r#"{"id": 1, "name": "North", "size": 12.5, "created_at": "2024-03-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(farm.id.as_str(), "1");
        assert_eq!(farm.size_unit, SizeUnit::Acres);
        assert_eq!(farm.location, "");
        assert_eq!(farm.size, dec("12.5"));
    }

    #[test]
    fn test_convert_hectares_to_square_meters() {
        assert_eq!(
            convert_size(dec("2.5"), SizeUnit::Hectares, SizeUnit::SquareMeters),
            Some(dec("25000"))
        );
    }

    #[test]
    fn test_convert_overflow_is_none() {
        assert_eq!(
            convert_size(Decimal::MAX, SizeUnit::Acres, SizeUnit::SquareMeters),
            None
        );
        assert_eq!(
            convert_size(Decimal::MAX, SizeUnit::Acres, SizeUnit::Acres),
            Some(Decimal::MAX)
        );
        assert!(convert_size(Decimal::MAX, SizeUnit::SquareMeters, SizeUnit::Acres).is_some());
    }

    #[test]
    fn test_convert_acres_round_trip() {
        let hectares = convert_size(dec("40"), SizeUnit::Acres, SizeUnit::Hectares).unwrap();
        assert_eq!(hectares.round_dp(4), dec("16.1874"));
        let acres = convert_size(hectares, SizeUnit::Hectares, SizeUnit::Acres).unwrap();
        assert_eq!(acres.round_dp(6), dec("40"));
    }

    #[test]
    fn test_input_defaults() {
        let input = FarmInput::new("South", dec("3"));
        assert_eq!(input.unit_or_default(), SizeUnit::Acres);
        assert_eq!(input.location_or_default(), "");
    }
}
