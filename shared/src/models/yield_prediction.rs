//! Yield prediction models

use serde::{Deserialize, Serialize};

/// Raw agricultural data uploaded for yield prediction.
///
/// The CSV structure is opaque to the platform. Only the remote model
/// interprets columns and rows; the platform never parses the data itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YieldPredictionRequest {
    pub agricultural_data: String,
}

/// Prediction produced by the model from uploaded data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YieldPredictionResponse {
    /// Predicted crop yield in tons.
    pub predicted_yield: f64,
    pub recommendations: String,
}

/// Intermediate summary produced by the data-summarization tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSummary {
    pub summary: String,
}
