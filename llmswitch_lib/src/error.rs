use thiserror::Error as ThisError;
use crate::provider::ProviderIdentity;

/// Library errors.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Credential for the selected provider is absent or empty.
    #[error("Missing credential for {provider}: {key} is not set or empty")]
    MissingCredential {
        /// Provider that requires the credential.
        provider: ProviderIdentity,
        /// Name of the credential (environment variable).
        key: &'static str,
    },

    /// Provider name outside of the supported set.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Generation parameter out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Question is empty.
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// Failure reported while calling a provider.
    #[error("{provider} invocation failed: {message}")]
    Invocation {
        /// Provider that failed.
        provider: ProviderIdentity,
        /// Provider-specific diagnostic.
        message: String,
    },

    /// HTTP transport error.
    #[error("Failed to call LLM: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload or response body is not valid JSON.
    #[error("Failed to process LLM call: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider responded with a non-success HTTP status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Provider responded with an error envelope.
    #[error("LLM provider responded with error: {0}")]
    ProviderMessage(String),

    /// Response envelope does not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(&'static str),

    /// Error for tests.
    #[cfg(test)]
    #[error("Test error: {0}")]
    ForTests(&'static str),
}

impl Error {

    /// Attach provider identity to a failure that happened during invocation.
    /// Errors that are already attributed pass through unchanged.
    pub fn into_invocation(self, provider: ProviderIdentity) -> Self {
        match self {
            err @ (Error::Invocation { .. }
                | Error::EmptyQuestion
                | Error::MissingCredential { .. }
                | Error::InvalidParameter(_)
                | Error::UnsupportedProvider(_)) => err,
            other => Error::Invocation { provider, message: other.to_string() },
        }
    }
}
