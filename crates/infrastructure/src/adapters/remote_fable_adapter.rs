//! Remote fable adapter - Implements RemoteGeneratorPort using ai_core

use std::{sync::Arc, time::Instant};

use ai_core::{FablePrompt, GenerationConfig, GenerationError, OpenAiFableClient, TextGenerator};
use application::{error::ApplicationError, ports::RemoteGeneratorPort};
use async_trait::async_trait;
use domain::FableRequest;
use tracing::{debug, instrument, warn};

/// Adapter exposing a [`TextGenerator`] to the application layer
#[derive(Clone)]
pub struct RemoteFableAdapter {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for RemoteFableAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFableAdapter")
            .field("model", &self.generator.model())
            .field("has_credentials", &self.generator.has_credentials())
            .finish()
    }
}

impl RemoteFableAdapter {
    /// Create an adapter backed by the chat-completion client
    pub fn new(config: GenerationConfig) -> Result<Self, ApplicationError> {
        let client = OpenAiFableClient::new(config).map_err(Self::map_error)?;
        Ok(Self::from_generator(Arc::new(client)))
    }

    /// Create an adapter over any generator
    pub fn from_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Convert ai_core error to application error
    fn map_error(e: GenerationError) -> ApplicationError {
        match e {
            GenerationError::MissingCredentials => {
                ApplicationError::Configuration("remote generator has no API key".to_string())
            },
            other => ApplicationError::Generation(other.to_string()),
        }
    }
}

#[async_trait]
impl RemoteGeneratorPort for RemoteFableAdapter {
    fn has_credentials(&self) -> bool {
        self.generator.has_credentials()
    }

    #[instrument(skip(self, request), fields(model = %self.generator.model()))]
    async fn generate(&self, request: &FableRequest) -> Result<String, ApplicationError> {
        let start = Instant::now();
        let prompt = FablePrompt::from_request(request);

        match self.generator.generate(&prompt).await {
            Ok(fable) => {
                debug!(
                    latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Remote fable generated"
                );
                Ok(fable)
            },
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Remote generation failed");
                Err(Self::map_error(e))
            },
        }
    }

    fn model(&self) -> String {
        self.generator.model().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct StubGenerator {
        result: Mutex<Option<Result<String, GenerationError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn returning(result: Result<String, GenerationError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &FablePrompt) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.user_message());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(GenerationError::Timeout))
        }

        fn has_credentials(&self) -> bool {
            true
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn request() -> FableRequest {
        FableRequest::new("Lion", "Mouse", "Jungle", "Be kind", "misspell").unwrap()
    }

    #[tokio::test]
    async fn passes_prompt_and_returns_text() {
        let stub = Arc::new(StubGenerator::returning(Ok("A fable".to_string())));
        let adapter = RemoteFableAdapter::from_generator(Arc::<StubGenerator>::clone(&stub));

        assert_eq!(adapter.generate(&request()).await.unwrap(), "A fable");
        assert_eq!(adapter.model(), "stub-model");

        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Characters: Lion and Mouse"));
        assert!(prompts[0].contains("grammatical errors per paragraph"));
    }

    #[tokio::test]
    async fn maps_generation_errors() {
        let stub = Arc::new(StubGenerator::returning(Err(GenerationError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })));
        let adapter = RemoteFableAdapter::from_generator(stub);

        let err = adapter.generate(&request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Generation(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn maps_missing_credentials_to_configuration() {
        let stub = Arc::new(StubGenerator::returning(Err(GenerationError::MissingCredentials)));
        let adapter = RemoteFableAdapter::from_generator(stub);

        assert!(matches!(
            adapter.generate(&request()).await,
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn new_reports_credentials_from_config() {
        let adapter = RemoteFableAdapter::new(GenerationConfig::default()).unwrap();
        assert!(!adapter.has_credentials());

        let adapter =
            RemoteFableAdapter::new(GenerationConfig::default().with_api_key("sk-test")).unwrap();
        assert!(adapter.has_credentials());
        assert_eq!(adapter.model(), "gpt-4o-mini");
    }
}
