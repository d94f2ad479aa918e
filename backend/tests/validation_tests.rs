//! Farm profile validation tests
//!
//! Property-style coverage for the field rules shared between the backend
//! and the browser validation bundle.

use proptest::prelude::*;
use serde_json::{json, Value};

use shared::{
    parse_recommendation_request, validate_object, CropType, ValidationRejection,
    RECOMMENDATION_FIELDS,
};

#[allow(clippy::too_many_arguments)]
fn profile(
    location: &str,
    crop: &str,
    soil_ph: f64,
    nitrogen: f64,
    rainfall: f64,
    temperature: f64,
    humidity: f64,
    trends: &str,
) -> Value {
    json!({
        "location": location,
        "cropType": crop,
        "soilPh": soil_ph,
        "nitrogenLevels": nitrogen,
        "rainfall": rainfall,
        "temperature": temperature,
        "humidity": humidity,
        "historicalYieldTrends": trends,
    })
}

fn violated_fields(rejection: &ValidationRejection) -> Vec<String> {
    rejection
        .violations
        .iter()
        .map(|v| v.field.clone())
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every in-range profile is accepted and parses with its values intact.
    #[test]
    fn property_valid_profiles_are_accepted(
        location in "[A-Za-z][A-Za-z ]{0,30}",
        crop in prop::sample::select(CropType::NAMES.to_vec()),
        soil_ph in 0.0f64..=14.0,
        nitrogen in 0.0f64..500.0,
        rainfall in 0.0f64..1000.0,
        temperature in -40.0f64..55.0,
        humidity in 0.0f64..=100.0,
        trends in "[A-Za-z][A-Za-z ]{0,30}",
    ) {
        let payload = profile(
            &location, crop, soil_ph, nitrogen, rainfall, temperature, humidity, &trends,
        );

        prop_assert!(validate_object(&payload, RECOMMENDATION_FIELDS).is_ok());

        let request = parse_recommendation_request(&payload).unwrap();
        prop_assert_eq!(request.location, location);
        prop_assert_eq!(request.crop_type.as_str(), crop);
        prop_assert!((request.soil_ph - soil_ph).abs() < f64::EPSILON);
        prop_assert!((request.humidity - humidity).abs() < f64::EPSILON);
    }

    /// Soil pH outside the 0-14 scale is rejected, and nothing else is blamed.
    #[test]
    fn property_out_of_scale_soil_ph_is_rejected(
        excess in 0.001f64..100.0,
        above in proptest::bool::ANY,
    ) {
        let soil_ph = if above { 14.0 + excess } else { -excess };
        let payload = profile(
            "Punjab", "Wheat", soil_ph, 40.0, 300.0, 25.0, 60.0, "increasing",
        );

        let rejection = validate_object(&payload, RECOMMENDATION_FIELDS).unwrap_err();
        prop_assert_eq!(violated_fields(&rejection), vec!["soilPh".to_string()]);
    }

    /// Negative nitrogen readings are rejected.
    #[test]
    fn property_negative_nitrogen_is_rejected(excess in 0.001f64..1000.0) {
        let payload = profile(
            "Punjab", "Rice", 6.5, -excess, 300.0, 25.0, 60.0, "stable",
        );

        let rejection = validate_object(&payload, RECOMMENDATION_FIELDS).unwrap_err();
        prop_assert_eq!(violated_fields(&rejection), vec!["nitrogenLevels".to_string()]);
    }

    /// Humidity is a percentage and cannot exceed 100.
    #[test]
    fn property_humidity_above_hundred_is_rejected(excess in 0.001f64..1000.0) {
        let payload = profile(
            "Punjab", "Corn", 6.5, 40.0, 300.0, 25.0, 100.0 + excess, "stable",
        );

        let rejection = validate_object(&payload, RECOMMENDATION_FIELDS).unwrap_err();
        prop_assert_eq!(violated_fields(&rejection), vec!["humidity".to_string()]);
    }

    /// Temperature has no bounds; frost and heat-wave readings both pass.
    #[test]
    fn property_any_temperature_is_accepted(temperature in -100.0f64..100.0) {
        let payload = profile(
            "Punjab", "Cotton", 6.5, 40.0, 300.0, temperature, 60.0, "stable",
        );

        prop_assert!(validate_object(&payload, RECOMMENDATION_FIELDS).is_ok());
    }

    /// Dropping any one required field yields exactly one violation naming it.
    #[test]
    fn property_each_missing_field_is_named(index in 0usize..RECOMMENDATION_FIELDS.len()) {
        let mut payload = profile(
            "Punjab", "Soybean", 6.5, 40.0, 300.0, 25.0, 60.0, "stable",
        );
        let removed = RECOMMENDATION_FIELDS[index].name;
        payload.as_object_mut().unwrap().remove(removed);

        let rejection = validate_object(&payload, RECOMMENDATION_FIELDS).unwrap_err();
        prop_assert_eq!(violated_fields(&rejection), vec![removed.to_string()]);
        prop_assert_eq!(rejection.violations[0].message.as_str(), "This field is required");
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_boundary_values_are_inside_the_ranges() {
    for (ph, humidity) in [(0.0, 0.0), (14.0, 100.0)] {
        let payload = profile("Punjab", "Wheat", ph, 0.0, 0.0, 25.0, humidity, "flat");
        assert!(validate_object(&payload, RECOMMENDATION_FIELDS).is_ok());
    }
}

#[test]
fn test_crop_type_listing_matches_the_enum() {
    assert_eq!(CropType::NAMES.len(), CropType::ALL.len());
    for crop in CropType::ALL {
        assert!(CropType::NAMES.contains(&crop.as_str()));
    }
}

#[test]
fn test_unknown_crop_is_rejected_with_the_allowed_list() {
    let payload = profile("Punjab", "Barley", 6.5, 40.0, 300.0, 25.0, 60.0, "stable");

    let rejection = validate_object(&payload, RECOMMENDATION_FIELDS).unwrap_err();
    assert_eq!(rejection.violations.len(), 1);
    assert_eq!(rejection.violations[0].field, "cropType");
    assert!(rejection.violations[0].message.contains("Wheat"));
    assert!(rejection.violations[0].message.contains("Cotton"));
}
