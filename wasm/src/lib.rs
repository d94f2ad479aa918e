//! WebAssembly module for CropCast
//!
//! Runs the same field validation the server applies so the browser forms
//! can annotate every offending input before submitting, even offline.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&JsValue::from_str("cropcast validation module ready"));
}

/// Validate a recommendation form submission.
///
/// Returns a JSON array of `{field, message}` violations; empty when the
/// submission is valid.
#[wasm_bindgen]
pub fn validate_recommendation_form(payload_json: &str) -> Result<String, JsValue> {
    let value = parse_payload(payload_json)?;
    Ok(violations_payload(&value, RECOMMENDATION_FIELDS))
}

/// Validate a yield-prediction upload before it is sent to the server.
#[wasm_bindgen]
pub fn validate_yield_data(payload_json: &str) -> Result<String, JsValue> {
    let value = parse_payload(payload_json)?;
    Ok(violations_payload(&value, YIELD_PREDICTION_FIELDS))
}

/// Validate a report submission before it is sent to the server.
#[wasm_bindgen]
pub fn validate_report_text(payload_json: &str) -> Result<String, JsValue> {
    let value = parse_payload(payload_json)?;
    Ok(violations_payload(&value, REPORT_SUMMARY_FIELDS))
}

/// Crop names for the form dropdown, in display order.
#[wasm_bindgen]
pub fn crop_types() -> js_sys::Array {
    CropType::NAMES
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
}

fn parse_payload(payload_json: &str) -> Result<serde_json::Value, JsValue> {
    serde_json::from_str(payload_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid payload JSON: {}", e)))
}

fn violations_payload(value: &serde_json::Value, fields: &[FieldSpec]) -> String {
    let violations = match validate_object(value, fields) {
        Ok(()) => Vec::new(),
        Err(rejection) => rejection.violations,
    };
    serde_json::to_string(&violations).unwrap_or_else(|_| "[]".to_string())
}
