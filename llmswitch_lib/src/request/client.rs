use std::time::Duration;
use serde_json::Value;
use crate::error::Error;
use super::reqwest::ReqwestClient;

/// Default timeout of a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Request client.
pub trait Client {
    /// Send request and receive response.
    fn make_json_request(&self, url: &str, payload: Value, headers: &[(&str, &str)]) -> Result<Value, Error>;
}

/// Create reqwest client with the default timeout.
pub fn get_reqwest_client() -> Result<Box<dyn Client>, Error> {
    get_reqwest_client_with_timeout(DEFAULT_TIMEOUT)
}

/// Create reqwest client which gives up after `timeout`.
pub fn get_reqwest_client_with_timeout(timeout: Duration) -> Result<Box<dyn Client>, Error> {
    Ok(Box::new(ReqwestClient::new(timeout)?))
}
