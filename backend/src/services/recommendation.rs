//! Personalized recommendation flow
//!
//! Validates a farm profile, renders it into the advisor prompt, and makes
//! a single model call with a strict response schema.

use std::sync::Arc;

use serde_json::{json, Value};

use shared::{parse_recommendation_request, RecommendationRequest, RecommendationResponse};

use crate::error::{AppError, AppResult};
use crate::external::gemini::{GenerateRequest, ModelClient, ModelReply, SafetySetting};
use crate::prompts::{self, RECOMMENDATIONS_PROMPT};

/// Drives the recommendation flow.
#[derive(Clone)]
pub struct RecommendationService {
    client: Arc<dyn ModelClient>,
}

/// Farm-advice answers routinely mention pesticides and chemical
/// fertilizers, which the blanket harm filters are prone to dropping.
fn safety_settings() -> Vec<SafetySetting> {
    [
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_CIVIC_INTEGRITY",
    ]
    .iter()
    .map(|category| SafetySetting::block_none(*category))
    .collect()
}

/// Response schema required from the model.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "irrigationRecommendation": {
                "type": "STRING",
                "description": "Personalized irrigation recommendations."
            },
            "fertilizationRecommendation": {
                "type": "STRING",
                "description": "Personalized fertilization recommendations."
            },
            "plantingTimeRecommendation": {
                "type": "STRING",
                "description": "Personalized planting time recommendations."
            }
        },
        "required": [
            "irrigationRecommendation",
            "fertilizationRecommendation",
            "plantingTimeRecommendation"
        ]
    })
}

impl RecommendationService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Validate a raw form submission and produce recommendations for it.
    pub async fn personalized_recommendations(
        &self,
        payload: &Value,
    ) -> AppResult<RecommendationResponse> {
        let request = parse_recommendation_request(payload)?;
        self.recommendations_for(&request).await
    }

    /// Produce recommendations for an already-validated farm profile.
    pub async fn recommendations_for(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        let prompt = prompts::render(
            RECOMMENDATIONS_PROMPT,
            &prompts::recommendation_fields(request),
        )?;

        let generate = GenerateRequest::from_prompt(prompt, response_schema())
            .with_safety_settings(safety_settings());

        let answer = match self.client.generate(generate).await? {
            ModelReply::Final(value) => value,
            ModelReply::ToolCall(call) => {
                return Err(AppError::ModelOutput(format!(
                    "Unexpected tool request '{}'",
                    call.name
                )))
            }
        };

        serde_json::from_value(answer).map_err(|e| {
            AppError::ModelOutput(format!(
                "Recommendations did not match the expected shape: {}",
                e
            ))
        })
    }
}
