//! Validation and normalization helpers for the Crop Advisor service

use crate::types::GpsCoordinates;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate that coordinates lie on the globe
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), &'static str> {
    if !coordinates.latitude.is_finite() || !coordinates.longitude.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&coordinates.latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&coordinates.longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Normalize a state or district name the way the price registry stores them.
///
/// The first letter of every alphabetic run is upper-cased and the rest
/// lower-cased, so `"uttar pradesh"` and `"UTTAR PRADESH"` both become
/// `"Uttar Pradesh"`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(ch);
            previous_is_letter = false;
        }
    }
    result
}

// ============================================================================
// Numeric Helpers
// ============================================================================

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(&GpsCoordinates::new(30.9, 75.85)).is_ok());
        assert!(validate_coordinates(&GpsCoordinates::new(-90.0, 180.0)).is_ok());
        assert!(validate_coordinates(&GpsCoordinates::new(0.0, 0.0)).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(validate_coordinates(&GpsCoordinates::new(90.1, 0.0)).is_err());
        assert!(validate_coordinates(&GpsCoordinates::new(0.0, -180.5)).is_err());
        assert!(validate_coordinates(&GpsCoordinates::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("punjab"), "Punjab");
        assert_eq!(title_case("UTTAR PRADESH"), "Uttar Pradesh");
        assert_eq!(title_case("tamil nadu"), "Tamil Nadu");
        assert_eq!(title_case("jammu and kashmir"), "Jammu And Kashmir");
        assert_eq!(title_case("north-east delhi"), "North-East Delhi");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(27.456, 2), 27.46);
        assert_eq!(round_to(27.454, 2), 27.45);
        assert_eq!(round_to(50.0, 2), 50.0);
        assert_eq!(round_to(-3.333, 1), -3.3);
    }

    proptest! {
        #[test]
        fn prop_title_case_is_idempotent(name in "[a-zA-Z -]{0,40}") {
            let once = title_case(&name);
            prop_assert_eq!(title_case(&once), once.clone());
            prop_assert_eq!(once.len(), name.len());
        }
    }
}
