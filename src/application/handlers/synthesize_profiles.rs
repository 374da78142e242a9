//! SynthesizeProfilesHandler - Generates personas and writes the profiles document.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::PipelineError;
use crate::domain::profile::UserProfile;
use crate::ports::{DatasetStore, ProfileSynthesizer};

#[derive(Debug, Clone)]
pub struct SynthesizeProfilesCommand {
    pub count: usize,
    pub output_path: PathBuf,
}

pub struct SynthesizeProfilesHandler {
    store: Arc<dyn DatasetStore>,
    synthesizer: Arc<dyn ProfileSynthesizer>,
}

impl SynthesizeProfilesHandler {
    pub fn new(store: Arc<dyn DatasetStore>, synthesizer: Arc<dyn ProfileSynthesizer>) -> Self {
        Self { store, synthesizer }
    }

    pub async fn handle(&self, cmd: SynthesizeProfilesCommand) -> Result<Vec<UserProfile>, PipelineError> {
        if cmd.count == 0 {
            return Err(PipelineError::InvalidArgument(
                "profile count must be at least 1".to_string(),
            ));
        }

        let profiles = self.synthesizer.synthesize(cmd.count).await?;
        self.store.save_profiles(&cmd.output_path, &profiles).await?;

        tracing::info!(
            count = profiles.len(),
            output = %cmd.output_path.display(),
            "Profiles written"
        );
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::profile::LlmProfileSynthesizer;
    use crate::adapters::storage::InMemoryDatasetStore;
    use std::path::Path;

    #[tokio::test]
    async fn writes_synthesized_profiles() {
        let provider = Arc::new(MockAIProvider::new().with_response(
            r#"{"profiles": [{"city": "Cairo", "climate_zone": "arid", "primary_transport": "car",
                "diet": "moderate_meat", "housing_type": "apartment", "energy_source": "grid",
                "income_level": "medium"}]}"#,
        ));
        let store = Arc::new(InMemoryDatasetStore::new());
        let handler = SynthesizeProfilesHandler::new(
            store.clone(),
            Arc::new(LlmProfileSynthesizer::new(provider)),
        );

        let profiles = handler
            .handle(SynthesizeProfilesCommand {
                count: 1,
                output_path: "profiles.json".into(),
            })
            .await
            .unwrap();

        assert_eq!(profiles[0].city, "Cairo");
        assert_eq!(store.load_profiles(Path::new("profiles.json")).await.unwrap(), profiles);
    }

    #[tokio::test]
    async fn zero_count_is_rejected_before_calling_the_model() {
        let provider = Arc::new(MockAIProvider::new());
        let store = Arc::new(InMemoryDatasetStore::new());
        let handler = SynthesizeProfilesHandler::new(
            store,
            Arc::new(LlmProfileSynthesizer::new(provider.clone())),
        );

        let result = handler
            .handle(SynthesizeProfilesCommand {
                count: 0,
                output_path: "profiles.json".into(),
            })
            .await;

        assert!(matches!(result, Err(PipelineError::InvalidArgument(_))));
        assert_eq!(provider.call_count(), 0);
    }
}
