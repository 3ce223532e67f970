//! Remote generator port - Interface for hosted text generation

use async_trait::async_trait;
use domain::FableRequest;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the remote fable generator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteGeneratorPort: Send + Sync {
    /// Whether a credential is configured
    ///
    /// Without one the pipeline never attempts a remote call.
    fn has_credentials(&self) -> bool;

    /// Generate a fable for the request
    async fn generate(&self, request: &FableRequest) -> Result<String, ApplicationError>;

    /// Identifier of the model used for generation
    fn model(&self) -> String;
}
