use serde_json::{json, Value};
use crate::config::MappedParams;
use crate::error::Error;
use crate::provider::ProviderIdentity;
use crate::request::Client;
use super::handle::ClientHandle;
use super::util::{self, check_for_error, val_as_str};

/// Messages API version sent with every request.
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub struct AnthropicChat {
    api_key: String,
    api_url: String,
    params: MappedParams,
    client: Box<dyn Client>,
}

impl AnthropicChat {
    pub(super) fn new(api_key: String, params: MappedParams, client: Box<dyn Client>) -> Self {
        AnthropicChat {
            api_key,
            api_url: ProviderIdentity::Anthropic.profile().api_url.to_owned(),
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

        util::set_i64_param(&mut payload, "max_tokens", Some(self.params.max_tokens));
        util::set_f64_param(&mut payload, "top_p", self.params.top_p);
        util::set_i64_param(&mut payload, "top_k", self.params.top_k);
        util::set_f64_param(&mut payload, "temperature", Some(self.params.temperature));

        payload
    }

    fn process_response(&self, response: Value) -> Result<String, Error> {

        check_for_error(&response)?;

        let mut text = None::<String>;

        for msg in response["content"]
            .as_array()
            .ok_or(Error::MalformedResponse("can't enumerate messages in the response."))?
        {
            if "text" == val_as_str!(msg["type"], "message type") {
                let part = val_as_str!(msg["text"], "text");
                text.get_or_insert_with(String::new).push_str(part);
            }
        }

        text.ok_or(Error::MalformedResponse("response has no text content."))
    }
}

impl ClientHandle for AnthropicChat {

    fn provider(&self) -> ProviderIdentity {
        ProviderIdentity::Anthropic
    }

    fn model(&self) -> &str {
        ProviderIdentity::Anthropic.model()
    }

    fn params(&self) -> &MappedParams {
        &self.params
    }

    fn complete(&self, prompt: &str) -> Result<String, Error> {
        let payload = self.prep_payload(prompt);

        let headers = &[
            ("x-api-key", self.api_key.as_ref()),
            ("anthropic-version", ANTHROPIC_API_VERSION),
        ];

        let response = self.client.make_json_request(&self.api_url, payload, headers)?;

        self.process_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParameters;
    use crate::request::stub::StubClient;

    fn params() -> MappedParams {
        GenerationParameters::new(0.123, 4096, 5, 0.345).unwrap().for_provider(ProviderIdentity::Anthropic)
    }

    #[test]
    fn test_request_response_ok() {
        let prompt = "test user message";
        let model_msg = "test resp message";

        let expected_headers = vec![
            ("x-api-key".to_owned(), "<api-key>".to_owned()),
            ("anthropic-version".to_owned(), ANTHROPIC_API_VERSION.to_owned()),
        ];
        let expected_payload = json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 4096,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.123,
            "top_k": 5,
            "top_p": 0.345,
        });
        let response_body = json!({
            "content": [
              {
                "text": model_msg,
                "type": "text"
              }
            ],
            "id": "msg_013Zva2CMHLNnXjNJJKqJ2EF",
            "model": "claude-3-haiku-20240307",
            "role": "assistant",
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "type": "message",
            "usage": {
              "input_tokens": 123,
              "output_tokens": 123
            }
        });

        let client = Box::new(StubClient::new(expected_headers, expected_payload, response_body)
            .with_url("https://api.anthropic.com/v1/messages"));

        let chat = AnthropicChat::new("<api-key>".into(), params(), client);

        assert_eq!(chat.complete(prompt).expect("receive response"), model_msg);
    }

    #[test]
    fn test_multiple_text_blocks() {
        let response_body = json!({
            "content": [
              {"type": "text", "text": "An LLM is "},
              {"type": "tool_use", "id": "toolu_01", "name": "t", "input": {}},
              {"type": "text", "text": "a large language model."}
            ],
            "role": "assistant",
            "type": "message"
        });

        let chat = AnthropicChat::new("k".into(), params(), Box::new(StubClient::respond(response_body)));

        assert_eq!(chat.complete("q").unwrap(), "An LLM is a large language model.");
    }

    #[test]
    fn test_request_response_err() {
        let model_msg = "test resp message";
        let response_body = json!({
            "type": "error",
            "error": {
              "type": "invalid_request_error",
              "message": model_msg
            }
        });

        let chat = AnthropicChat::new("k".into(), params(), Box::new(StubClient::respond(response_body)));

        if let Err(Error::ProviderMessage(msg)) = chat.complete("q") {
            assert_eq!(msg, model_msg);
        } else {
            panic!("type mismatch");
        }
    }

    #[test]
    fn test_no_text_content() {
        let response_body = json!({"content": [], "role": "assistant", "type": "message"});
        let chat = AnthropicChat::new("k".into(), params(), Box::new(StubClient::respond(response_body)));
        assert!(matches!(chat.complete("q"), Err(Error::MalformedResponse(_))));

        let chat = AnthropicChat::new("k".into(), params(), Box::new(StubClient::respond(json!({"id": "x"}))));
        assert!(matches!(chat.complete("q"), Err(Error::MalformedResponse(_))));
    }
}
