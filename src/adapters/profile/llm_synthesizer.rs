//! AI-powered ProfileSynthesizer implementation

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::adapters::oracle::strip_code_fence;
use crate::domain::profile::{
    ClimateZone, Diet, EnergySource, HousingType, IncomeLevel, TransportMode, UserProfile,
};
use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, ProfileSynthesizer, SynthesisError,
};

/// Generates globally diverse personas with a language model.
pub struct LlmProfileSynthesizer {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmProfileSynthesizer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Field list with every allowed value, shared by both prompts.
    fn field_description() -> String {
        format!(
            "city, climate_zone ({}), primary_transport ({}), diet ({}), housing_type ({}), \
             energy_source ({}), income_level ({})",
            ClimateZone::VALUES.join("/"),
            TransportMode::VALUES.join("/"),
            Diet::VALUES.join("/"),
            HousingType::VALUES.join("/"),
            EnergySource::VALUES.join("/"),
            IncomeLevel::VALUES.join("/"),
        )
    }

    fn system_prompt() -> String {
        format!(
            "You generate synthetic user profiles for a carbon footprint action prioritizer. \
             Each profile includes: {}. The profiles should be globally diverse, including cities \
             from Africa, Asia, Europe, South America, and North America. \
             Respond with a JSON object of the form {{\"profiles\": [...]}}.",
            Self::field_description()
        )
    }

    fn user_prompt(count: usize) -> String {
        format!(
            "Generate {} diverse user profiles. Each profile should include: {}. \
             Make them globally diverse and use only the listed values.",
            count,
            Self::field_description()
        )
    }

    /// Validates every returned entry, dropping the ones that fail.
    fn parse_profiles(content: &str, count: usize) -> Result<Vec<UserProfile>, SynthesisError> {
        let body = strip_code_fence(content);
        let parsed: Value = serde_json::from_str(body)
            .map_err(|e| SynthesisError::MalformedResponse(format!("not JSON: {}", e)))?;

        let entries = match &parsed {
            Value::Array(entries) => entries,
            Value::Object(object) => object
                .get("profiles")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    SynthesisError::MalformedResponse("missing \"profiles\" array".to_string())
                })?,
            _ => {
                return Err(SynthesisError::MalformedResponse(
                    "expected an object or array".to_string(),
                ))
            }
        };

        let mut profiles = Vec::with_capacity(entries.len().min(count));
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            match UserProfile::from_value(entry) {
                Ok(profile) if !seen.insert(profile.clone()) => {
                    tracing::warn!(index, profile = %profile.summary(), "Dropping duplicate synthesized profile");
                }
                Ok(profile) => profiles.push(profile),
                Err(error) => {
                    tracing::warn!(index, %error, "Dropping invalid synthesized profile");
                }
            }
        }

        if profiles.len() > count {
            tracing::debug!(
                returned = profiles.len(),
                requested = count,
                "Truncating surplus profiles"
            );
            profiles.truncate(count);
        }

        if profiles.is_empty() {
            return Err(SynthesisError::Empty);
        }
        Ok(profiles)
    }
}

#[async_trait]
impl ProfileSynthesizer for LlmProfileSynthesizer {
    async fn synthesize(&self, count: usize) -> Result<Vec<UserProfile>, SynthesisError> {
        let request = CompletionRequest::new(format!("profile-synthesis-{}", uuid::Uuid::new_v4()))
            .with_system_prompt(Self::system_prompt())
            .with_message(MessageRole::User, Self::user_prompt(count))
            .with_json_response();

        let response = self.ai_provider.complete(request).await?;
        let profiles = Self::parse_profiles(&response.content, count)?;

        if profiles.len() < count {
            tracing::warn!(
                requested = count,
                valid = profiles.len(),
                "Fewer valid profiles than requested"
            );
        }
        tracing::info!(count = profiles.len(), model = %response.model, "Profiles synthesized");
        Ok(profiles)
    }
}
