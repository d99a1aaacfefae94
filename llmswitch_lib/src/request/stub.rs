//! Only for tests.

use std::cell::Cell;
use std::rc::Rc;
use serde_json::Value;
use crate::error::Error;
use crate::request::client::Client;

/// Client for tests.
pub struct StubClient {
    expected_url: Option<String>,
    expected_headers: Vec<(String, String)>,
    expected_payload: Option<Value>,
    response: Result<Value, fn() -> Error>,
    calls: Rc<Cell<usize>>,
}

impl StubClient {

    /// Create client which checks the request and returns `response_body`.
    pub fn new(expected_headers: Vec<(String, String)>,
        expected_payload: Value,
        response_body: Value) -> Self
    {
        StubClient {
            expected_url: None,
            expected_headers,
            expected_payload: Some(expected_payload),
            response: Ok(response_body),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Create client which accepts any request and returns `response_body`.
    pub fn respond(response_body: Value) -> Self {
        StubClient {
            expected_url: None,
            expected_headers: vec![],
            expected_payload: None,
            response: Ok(response_body),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Create client which fails every request.
    pub fn failing(err: fn() -> Error) -> Self {
        StubClient {
            response: Err(err),
            ..StubClient::respond(Value::Null)
        }
    }

    /// Also check the request URL.
    pub fn with_url(mut self, url: &str) -> Self {
        self.expected_url = Some(url.to_owned());
        self
    }

    /// Shared counter of requests made through this client.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        self.calls.clone()
    }
}

impl Client for StubClient {

    fn make_json_request(&self, url: &str, payload: Value, headers: &[(&str, &str)]) -> Result<Value, Error> {
        self.calls.set(self.calls.get() + 1);

        if let Some(expected) = &self.expected_url {
            assert_eq!(url, expected, "url");
        }

        assert!(headers.len() >= self.expected_headers.len(), "headers count");
        for (actual, expected) in headers.iter().zip(self.expected_headers.iter()) {
            assert_eq!(actual.0, expected.0, "headers keys");
            assert_eq!(actual.1, expected.1, "headers values");
        }

        if let Some(expected) = &self.expected_payload {
            assert_eq!(&payload, expected);
        }

        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(err) => Err(err()),
        }
    }
}
