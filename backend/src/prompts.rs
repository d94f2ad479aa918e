//! Prompt templates for the CropCast flows
//!
//! Templates carry `{{{name}}}` placeholders that are filled verbatim from
//! validated field maps. The remote model is the trust boundary for anything
//! a user types into a form, so values are not escaped.

use std::collections::BTreeMap;

use thiserror::Error;

use shared::{RecommendationRequest, ReportSummaryRequest, YieldPredictionRequest};

/// Word budget the data-summarization tool must stay under.
pub const SUMMARY_WORD_BUDGET: usize = 500;

/// Prompt for the personalized recommendations flow.
pub const RECOMMENDATIONS_PROMPT: &str = "\
You are an expert agricultural advisor.

Based on the following farm profile, provide specific and actionable recommendations for irrigation, fertilization, and planting times.
Return only the JSON output.

Location: {{{location}}}
Crop Type: {{{cropType}}}
Soil pH: {{{soilPh}}}
Nitrogen Levels: {{{nitrogenLevels}}} ppm
Monthly Rainfall: {{{rainfall}}} mm
Avg Temperature: {{{temperature}}} °C
Avg Humidity: {{{humidity}}} %
Historical Yield Trends: {{{historicalYieldTrends}}}";

/// Prompt for the yield-prediction flow. Instructs the model to route the
/// raw data through the summarization tool before committing to a number.
pub const YIELD_PREDICTION_PROMPT: &str = "\
You are an expert agriculture advisor and data analyst.

Your task is to predict crop yield based on the provided agricultural data in CSV format.

1. First, call the summarizeAgriculturalData tool to understand the key statistical properties and trends of the data.
2. Based on the summary, predict the crop yield in tons.
3. Provide a set of actionable recommendations for the farmer based on your prediction and the data you analyzed.

Data:
{{{agriculturalData}}}";

/// Prompt the summarization tool sends on its nested model call.
pub const SUMMARIZE_DATA_PROMPT: &str = "\
You are an expert data analyst. You will be given a large dataset of agricultural data in CSV format.
Your task is to provide a very concise summary of the key statistical properties of this data. Do not output the raw data.
Focus on:
1. Overall dataset size (rows, columns).
2. For each numerical column (like temperature, rainfall, yield, soil metrics): calculate the mean, median, standard deviation, min, and max.
3. Identify the time period covered by the data if available.
4. Briefly mention any obvious strong positive or negative correlations between columns (e.g., \"rainfall is positively correlated with yield\").
Keep the entire summary under 500 words. This summary will be used by another AI to predict future yield, so only include the most critical information for that task.

Data:
{{{agriculturalData}}}";

/// Prompt for the report summarization flow.
pub const SUMMARIZE_REPORT_PROMPT: &str = "\
You are an expert agricultural researcher. Please summarize the following report, highlighting the key findings and conclusions.

Report:
{{{reportText}}}";

/// Errors raised while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The template names a placeholder the field map does not provide.
    /// A programming error in the caller, never a user-facing failure.
    #[error("Prompt template references unknown placeholder '{0}'")]
    UnknownPlaceholder(String),

    /// A `{{{` is opened but never closed.
    #[error("Unterminated placeholder in prompt template")]
    Unterminated,
}

/// Substitute `{{{name}}}` placeholders with values from the field map.
pub fn render(template: &str, fields: &BTreeMap<&str, String>) -> Result<String, PromptError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let Some(end) = after.find("}}}") else {
            return Err(PromptError::Unterminated);
        };
        let name = after[..end].trim();
        match fields.get(name) {
            Some(value) => output.push_str(value),
            None => return Err(PromptError::UnknownPlaceholder(name.to_string())),
        }
        rest = &after[end + 3..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Field map for the recommendations template.
pub fn recommendation_fields(request: &RecommendationRequest) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("location", request.location.clone()),
        ("cropType", request.crop_type.to_string()),
        ("soilPh", request.soil_ph.to_string()),
        ("nitrogenLevels", request.nitrogen_levels.to_string()),
        ("rainfall", request.rainfall.to_string()),
        ("temperature", request.temperature.to_string()),
        ("humidity", request.humidity.to_string()),
        (
            "historicalYieldTrends",
            request.historical_yield_trends.clone(),
        ),
    ])
}

/// Field map for the yield-prediction template.
pub fn yield_prediction_fields(request: &YieldPredictionRequest) -> BTreeMap<&'static str, String> {
    BTreeMap::from([("agriculturalData", request.agricultural_data.clone())])
}

/// Field map for the summarization tool template.
pub fn summarize_data_fields(data: &str) -> BTreeMap<&'static str, String> {
    BTreeMap::from([("agriculturalData", data.to_string())])
}

/// Field map for the report template.
pub fn report_fields(request: &ReportSummaryRequest) -> BTreeMap<&'static str, String> {
    BTreeMap::from([("reportText", request.report_text.clone())])
}
