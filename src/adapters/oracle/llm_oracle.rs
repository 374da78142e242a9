//! LLM-backed scoring oracle.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::combination::PreferenceLabel;
use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, OracleError, ScoringOracle, ScoringRequest,
};

use super::prompt::{parse_score, render_user_prompt, SYSTEM_PROMPT};

/// Judges action pairs by asking a language model for `{"score": 0|1}`.
pub struct LlmScoringOracle {
    ai_provider: Arc<dyn AIProvider>,
    max_tokens: Option<u32>,
}

impl LlmScoringOracle {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            max_tokens: None,
        }
    }

    /// Caps the completion length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn build_request(&self, request: &ScoringRequest<'_>) -> CompletionRequest {
        let completion = CompletionRequest::new(request.trace_id)
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(
                MessageRole::User,
                render_user_prompt(request.action_a, request.action_b, request.user_profile),
            )
            .with_json_response();

        match self.max_tokens {
            Some(max) => completion.with_max_tokens(max),
            None => completion,
        }
    }
}

#[async_trait]
impl ScoringOracle for LlmScoringOracle {
    async fn score(&self, request: ScoringRequest<'_>) -> Result<PreferenceLabel, OracleError> {
        let response = self.ai_provider.complete(self.build_request(&request)).await?;
        let label = parse_score(&response.content)?;

        tracing::trace!(
            trace_id = request.trace_id,
            model = %response.model,
            score = label.as_u8(),
            "Oracle judgment parsed"
        );
        Ok(label)
    }
}
