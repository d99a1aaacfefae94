use serde_json::{json, Value};
use crate::config::MappedParams;
use crate::error::Error;
use crate::provider::ProviderIdentity;
use crate::request::Client;
use super::handle::ClientHandle;
use super::util::{self, check_for_error, val_as_str};

/// Chat completions client for OpenAI and OpenAI-compatible APIs (Fireworks).
pub struct OpenAIChat {
    provider: ProviderIdentity,
    api_key: String,
    api_url: String,
    params: MappedParams,
    client: Box<dyn Client>,
}

impl OpenAIChat {
    pub(super) fn new(provider: ProviderIdentity, api_key: String, params: MappedParams, client: Box<dyn Client>) -> Self {
        OpenAIChat {
            provider,
            api_key,
            api_url: provider.profile().api_url.to_owned(),
            params,
            client,
        }
    }

    fn prep_payload(&self, prompt: &str) -> Value {
        let mut payload = json!({
            "model": self.model(),
            "messages": [
                {"role": "user", "content": prompt}
            ],
        });

        util::set_f64_param(&mut payload, "temperature", Some(self.params.temperature));
        util::set_i64_param(&mut payload, "max_tokens", Some(self.params.max_tokens));
        util::set_f64_param(&mut payload, "top_p", self.params.top_p);

        payload
    }

    fn process_response(&self, response: Value) -> Result<String, Error> {

        check_for_error(&response)?;

        let choice = response["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or(Error::MalformedResponse("unexpected answer format, response has no choices."))?;

        let msg = &choice["message"];

        if msg["content"].is_null() && !msg["refusal"].is_null() {
            return Ok(val_as_str!(msg["refusal"], "refusal content").to_owned());
        }

        Ok(val_as_str!(msg["content"], "message content").to_owned())
    }
}

impl ClientHandle for OpenAIChat {

    fn provider(&self) -> ProviderIdentity {
        self.provider
    }

    fn model(&self) -> &str {
        self.provider.model()
    }

    fn params(&self) -> &MappedParams {
        &self.params
    }

    fn complete(&self, prompt: &str) -> Result<String, Error> {
        let payload = self.prep_payload(prompt);

        let token = format!("Bearer {}", self.api_key);
        let headers = &[("Authorization", token.as_ref())];

        let response = self.client.make_json_request(&self.api_url, payload, headers)?;

        self.process_response(response)
    }
}
