//! Hugging Face inference API.
//!
//! The client is built in two stages: a raw text-generation endpoint
//! ([`RawEndpointConfig`] -> [`RawEndpoint`]) and a chat adapter
//! ([`ChatAdapter`]) which renders a user turn through the model's chat
//! template before calling the endpoint.

use std::fmt::Display;
use serde_json::{json, Value};
use crate::config::MappedParams;
use crate::error::Error;
use crate::provider::ProviderIdentity;
use crate::request::Client;
use super::handle::ClientHandle;
use super::util::{self, check_for_error, val_as_str};

/// Inference task of the raw endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Plain text completion.
    TextGeneration,
}

impl Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::TextGeneration => f.write_str("text-generation"),
        }
    }
}

/// First stage: raw endpoint configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEndpointConfig {
    /// Model repository id.
    pub repo_id: String,
    /// Inference task.
    pub task: Task,
    /// Sampling parameters.
    pub params: MappedParams,
}

impl RawEndpointConfig {

    /// Text-generation endpoint for the repository.
    pub fn new(repo_id: &str, params: MappedParams) -> Self {
        RawEndpointConfig {
            repo_id: repo_id.to_owned(),
            task: Task::TextGeneration,
            params,
        }
    }

    /// Attach credentials and transport.
    pub fn build(self, token: String, client: Box<dyn Client>) -> RawEndpoint {
        let api_url = format!("{}/{}", ProviderIdentity::HuggingFace.profile().api_url, self.repo_id);
        RawEndpoint {
            config: self,
            token,
            api_url,
            client,
        }
    }
}

/// Raw text-generation endpoint.
pub struct RawEndpoint {
    config: RawEndpointConfig,
    token: String,
    api_url: String,
    client: Box<dyn Client>,
}

impl RawEndpoint {

    /// Endpoint configuration.
    pub fn config(&self) -> &RawEndpointConfig {
        &self.config
    }

    fn prep_payload(&self, inputs: &str) -> Value {
        let mut parameters = json!({
            "return_full_text": false,
        });

        util::set_f64_param(&mut parameters, "temperature", Some(self.config.params.temperature));
        util::set_i64_param(&mut parameters, "max_new_tokens", Some(self.config.params.max_tokens));
        util::set_i64_param(&mut parameters, "top_k", self.config.params.top_k);
        util::set_f64_param(&mut parameters, "top_p", self.config.params.top_p);

        json!({
            "inputs": inputs,
            "parameters": parameters,
        })
    }

    fn process_response(&self, response: Value) -> Result<String, Error> {

        check_for_error(&response)?;

        // The API answers with a list of generations; some deployments return a single object.
        let generation = match &response {
            Value::Array(items) => items.first()
                .ok_or(Error::MalformedResponse("response has no generations."))?,
            other => other,
        };

        Ok(val_as_str!(generation["generated_text"], "generated text").to_owned())
    }

    /// Generate continuation of `inputs`.
    pub fn generate(&self, inputs: &str) -> Result<String, Error> {
        let payload = self.prep_payload(inputs);

        let token = format!("Bearer {}", self.token);
        let headers = &[("Authorization", token.as_ref())];

        let response = self.client.make_json_request(&self.api_url, payload, headers)?;

        self.process_response(response)
    }
}

/// Second stage: chat interface over the raw endpoint.
pub struct ChatAdapter {
    endpoint: RawEndpoint,
}

impl ChatAdapter {

    /// Wrap the endpoint. Parameters are taken from the endpoint as is.
    pub fn new(endpoint: RawEndpoint) -> Self {
        ChatAdapter { endpoint }
    }

    /// Underlying endpoint.
    pub fn endpoint(&self) -> &RawEndpoint {
        &self.endpoint
    }

    /// Single user turn in the zephyr chat format.
    pub fn apply_chat_template(prompt: &str) -> String {
        format!("<|user|>\n{prompt}</s>\n<|assistant|>\n")
    }
}

impl ClientHandle for ChatAdapter {

    fn provider(&self) -> ProviderIdentity {
        ProviderIdentity::HuggingFace
    }

    fn model(&self) -> &str {
        &self.endpoint.config.repo_id
    }

    fn params(&self) -> &MappedParams {
        &self.endpoint.config.params
    }

    fn complete(&self, prompt: &str) -> Result<String, Error> {
        self.endpoint.generate(&Self::apply_chat_template(prompt))
    }
}
