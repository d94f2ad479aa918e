//! Farm profile and recommendation models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Crops the recommendation form lets a farmer pick from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CropType {
    Wheat,
    Rice,
    Corn,
    Soybean,
    Cotton,
}

impl CropType {
    pub const ALL: [CropType; 5] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Corn,
        CropType::Soybean,
        CropType::Cotton,
    ];

    /// Wire names, in form-dropdown order.
    pub const NAMES: &'static [&'static str] = &["Wheat", "Rice", "Corn", "Soybean", "Cotton"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Corn => "Corn",
            CropType::Soybean => "Soybean",
            CropType::Cotton => "Cotton",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated farm profile submitted from the recommendation form.
///
/// Numeric bounds are enforced by the validation layer before this type is
/// constructed: soil pH within [0, 14], humidity within [0, 100], nitrogen
/// and rainfall non-negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub location: String,
    pub crop_type: CropType,
    pub soil_ph: f64,
    /// Nitrogen content in ppm.
    pub nitrogen_levels: f64,
    /// Average monthly rainfall in mm.
    pub rainfall: f64,
    /// Average temperature in °C.
    pub temperature: f64,
    /// Average humidity in %.
    pub humidity: f64,
    pub historical_yield_trends: String,
}

/// Structured advice produced by the model for a farm profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub irrigation_recommendation: String,
    pub fertilization_recommendation: String,
    pub planting_time_recommendation: String,
}
