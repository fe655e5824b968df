//! Validation utilities for CropKeeper

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::FarmInput;

/// A rejected input field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

// ============================================================================
// Farm Validations
// ============================================================================

/// Validate a farm name (required, not just whitespace)
pub fn validate_farm_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new("name", "Farm name is required"));
    }
    Ok(())
}

/// Decimal places a stored farm size keeps
pub const FARM_SIZE_SCALE: u32 = 4;

/// Largest storable farm size (`NUMERIC(14, 4)`)
pub const MAX_FARM_SIZE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 4);

/// Validate a farm size (never negative, fits the record column)
pub fn validate_farm_size(size: Decimal) -> Result<(), FieldError> {
    if size < Decimal::ZERO {
        return Err(FieldError::new("size", "Farm size cannot be negative"));
    }
    if size > MAX_FARM_SIZE {
        return Err(FieldError::new("size", "Farm size is too large"));
    }
    if size.normalize().scale() > FARM_SIZE_SCALE {
        return Err(FieldError::new(
            "size",
            "Farm size allows at most 4 decimal places",
        ));
    }
    Ok(())
}

/// Validate a farm location when one is given
pub fn validate_farm_location(location: Option<&str>) -> Result<(), FieldError> {
    match location {
        Some(location) if location.trim().is_empty() => {
            Err(FieldError::new("location", "Location cannot be blank"))
        }
        _ => Ok(()),
    }
}

/// Validate create/update attributes, reporting the first bad field
pub fn validate_farm_input(input: &FarmInput) -> Result<(), FieldError> {
    validate_farm_name(&input.name)?;
    validate_farm_size(input.size)?;
    validate_farm_location(input.location.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeUnit;
    use proptest::prelude::*;

    #[test]
    fn test_valid_input() {
        let input = FarmInput::new("North Field", Decimal::new(125, 1))
            .with_unit(SizeUnit::Hectares)
            .with_location("Valley Road");
        assert!(validate_farm_input(&input).is_ok());
    }

    #[test]
    fn test_zero_size_allowed() {
        assert!(validate_farm_size(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = validate_farm_input(&FarmInput::new("   ", Decimal::ONE)).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = validate_farm_input(&FarmInput::new("North", Decimal::new(-1, 0))).unwrap_err();
        assert_eq!(err.field, "size");
    }

    #[test]
    fn test_blank_location_rejected() {
        let input = FarmInput::new("North", Decimal::ONE).with_location(" ");
        let err = validate_farm_input(&input).unwrap_err();
        assert_eq!(err.field, "location");
        assert_eq!(err.to_string(), "location: Location cannot be blank");
    }

    #[test]
    fn test_max_farm_size_constant() {
        assert_eq!(MAX_FARM_SIZE.to_string(), "9999999999.9999");
    }

    #[test]
    fn test_size_must_fit_column() {
        assert!(validate_farm_size(MAX_FARM_SIZE).is_ok());

        let err = validate_farm_size(Decimal::new(10_000_000_000, 0)).unwrap_err();
        assert_eq!(err.field, "size");
        assert_eq!(err.message, "Farm size is too large");
        assert!(validate_farm_size(Decimal::MAX).is_err());
    }

    #[test]
    fn test_size_scale_limited() {
        let err = validate_farm_size(Decimal::new(123_456, 5)).unwrap_err();
        assert_eq!(err.message, "Farm size allows at most 4 decimal places");
        // trailing zeros do not count
        assert!(validate_farm_size(Decimal::new(12_500_000, 6)).is_ok());
    }

    #[test]
    fn test_missing_location_allowed() {
        assert!(validate_farm_location(None).is_ok());
    }

    proptest! {
        #[test]
        fn prop_non_negative_sizes_accepted(units in 0i64..10_000_000, scale in 0u32..4) {
            prop_assert!(validate_farm_size(Decimal::new(units, scale)).is_ok());
        }

        #[test]
        fn prop_negative_sizes_rejected(units in 1i64..10_000_000, scale in 0u32..4) {
            prop_assert!(validate_farm_size(Decimal::new(-units, scale)).is_err());
        }

        #[test]
        fn prop_names_with_letters_accepted(name in "[ ]{0,3}[A-Za-z][A-Za-z ]{0,20}") {
            prop_assert!(validate_farm_name(&name).is_ok());
        }
    }
}
