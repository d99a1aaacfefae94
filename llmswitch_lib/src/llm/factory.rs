use tracing::debug;
use crate::config::{GenerationParameters, MappedParams};
use crate::credentials::CredentialSet;
use crate::error::Error;
use crate::provider::ProviderIdentity;
use crate::request::Client;
use super::anthropic::AnthropicChat;
use super::handle::ClientHandle;
use super::huggingface::{ChatAdapter, RawEndpointConfig};
use super::openai::OpenAIChat;

/// Create a client handle for the provider.
///
/// Parameters are validated and the credential is looked up before the handle
/// is built; knobs the provider does not support are dropped. No request is
/// made until the handle is used.
pub fn create_client(
    provider: ProviderIdentity,
    params: &GenerationParameters,
    credentials: &CredentialSet,
    client: Box<dyn Client>,
) -> Result<Box<dyn ClientHandle>, Error> {
    params.validate()?;
    let api_key = credentials.get(provider)?.to_owned();
    let mapped = params.for_provider(provider);

    debug!(%provider, model = provider.model(), ?mapped, "creating client");

    Ok(match provider {
        ProviderIdentity::OpenAI | ProviderIdentity::Fireworks => Box::new(OpenAIChat::new(provider, api_key, mapped, client)),
        ProviderIdentity::Anthropic => Box::new(AnthropicChat::new(api_key, mapped, client)),
        ProviderIdentity::HuggingFace => Box::new(huggingface_client(mapped, api_key, client)),
    })
}

fn huggingface_client(params: MappedParams, token: String, client: Box<dyn Client>) -> ChatAdapter {
    let endpoint = RawEndpointConfig::new(ProviderIdentity::HuggingFace.model(), params).build(token, client);
    ChatAdapter::new(endpoint)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use super::*;
    use crate::request::stub::StubClient;

    fn credentials() -> CredentialSet {
        ProviderIdentity::ALL.iter().map(|p| (*p, "secret")).collect()
    }

    #[test]
    fn test_model_per_provider() {
        for provider in ProviderIdentity::ALL {
            let handle = create_client(provider, &GenerationParameters::default(), &credentials(), Box::new(StubClient::respond(Value::Null)))
                .expect("create client");
            assert_eq!(handle.provider(), provider);
            assert_eq!(handle.model(), provider.profile().model);
        }
    }

    #[test]
    fn test_unsupported_params_dropped() {
        let params = GenerationParameters::new(0.2, 100, 40, 0.5).unwrap();
        for provider in ProviderIdentity::ALL {
            let handle = create_client(provider, &params, &credentials(), Box::new(StubClient::respond(Value::Null))).unwrap();
            let mapped = handle.params();
            assert_eq!(mapped.temperature, 0.2);
            assert_eq!(mapped.max_tokens, 100);
            let supported = provider.profile().supported;
            assert_eq!(mapped.top_k.is_some(), supported.top_k);
            assert_eq!(mapped.top_p.is_some(), supported.top_p);
        }
    }

    #[test]
    fn test_temperature_out_of_range() {
        for temperature in [-0.1, 1.1] {
            let params = GenerationParameters { temperature, ..Default::default() };

            for provider in ProviderIdentity::ALL {
                let stub = StubClient::respond(Value::Null);
                let calls = stub.calls();
                let result = create_client(provider, &params, &credentials(), Box::new(stub));
                assert!(matches!(result, Err(Error::InvalidParameter(_))), "{provider} accepted {temperature}");
                assert_eq!(calls.get(), 0);
            }
        }
    }

    #[test]
    fn test_other_params_out_of_range() {
        for params in [
            GenerationParameters { top_p: 1.1, ..Default::default() },
            GenerationParameters { top_p: -0.5, ..Default::default() },
            GenerationParameters { max_tokens: 0, ..Default::default() },
            GenerationParameters { top_k: -1, ..Default::default() },
        ] {
            // Dropped knobs are still validated.
            for provider in ProviderIdentity::ALL {
                let result = create_client(provider, &params, &credentials(), Box::new(StubClient::respond(Value::Null)));
                assert!(matches!(result, Err(Error::InvalidParameter(_))));
            }
        }
    }

    #[test]
    fn test_missing_credential() {
        let credentials = CredentialSet::new().with(ProviderIdentity::OpenAI, "sk");
        for provider in [ProviderIdentity::Anthropic, ProviderIdentity::HuggingFace, ProviderIdentity::Fireworks] {
            let result = create_client(provider, &GenerationParameters::default(), &credentials, Box::new(StubClient::respond(Value::Null)));
            match result {
                Err(Error::MissingCredential { provider: p, key }) => {
                    assert_eq!(p, provider);
                    assert_eq!(key, provider.credential_key());
                },
                _ => panic!("{provider} must require a credential"),
            }
        }
        assert!(create_client(ProviderIdentity::OpenAI, &GenerationParameters::default(), &credentials, Box::new(StubClient::respond(Value::Null))).is_ok());
    }

    #[test]
    fn test_huggingface_stages_share_params() {
        let params = GenerationParameters::new(0.4, 250, 42, 0.8).unwrap();
        let mapped = params.for_provider(ProviderIdentity::HuggingFace);

        let adapter = huggingface_client(mapped, "secret".into(), Box::new(StubClient::respond(Value::Null)));
        let config = adapter.endpoint().config();

        assert_eq!(config.repo_id, ProviderIdentity::HuggingFace.model());
        assert_eq!(config.params, mapped);
        assert_eq!(config.params.top_k, Some(42));
        assert_eq!(config.params.top_p, Some(0.8));
        assert!(std::ptr::eq(adapter.params(), &config.params));

        let handle = create_client(ProviderIdentity::HuggingFace, &params, &credentials(), Box::new(StubClient::respond(Value::Null))).unwrap();
        assert_eq!(handle.params(), adapter.params());
        assert_eq!(handle.model(), adapter.model());
    }
}
