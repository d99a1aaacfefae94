use std::time::Duration;
use reqwest::blocking::Client as BlockingClient;
use serde_json::Value;
use tracing::debug;
use crate::error::Error;
use crate::llm::util::error_message;
use crate::request::client::Client;

pub struct ReqwestClient {
    client: BlockingClient,
}

impl ReqwestClient {

    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = BlockingClient::builder()
            .timeout(timeout)
            .build()?;

        Ok(ReqwestClient { client })
    }
}

// Provider message of an error response, or the raw body.
fn status_diagnostic(body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|val| val.get("error").and_then(error_message))
        .unwrap_or(body)
}

impl Client for ReqwestClient {

    fn make_json_request(&self, url: &str, payload: Value, headers: &[(&str, &str)]) -> Result<Value, Error> {

        let mut request = self.client
            .post(url)
            .json(&payload);

        for (k, v) in headers {
            request = request.header(*k, *v);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "provider responded");

        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), body: status_diagnostic(body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
