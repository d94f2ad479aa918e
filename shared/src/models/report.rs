//! Agricultural report summarization models

use serde::{Deserialize, Serialize};

/// A report pasted or uploaded for summarization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryRequest {
    pub report_text: String,
}

/// Key findings and conclusions extracted from a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummaryResponse {
    pub summary: String,
}
