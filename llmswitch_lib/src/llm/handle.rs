use crate::config::MappedParams;
use crate::error::Error;
use crate::provider::ProviderIdentity;

/// Configured connector to one provider.
pub trait ClientHandle {

    /// Provider this handle talks to.
    fn provider(&self) -> ProviderIdentity;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Generation parameters as forwarded to the provider.
    fn params(&self) -> &MappedParams;

    /// Submit a rendered prompt and return the answer text.
    fn complete(&self, prompt: &str) -> Result<String, Error>;
}
