use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT: u64 = 15;

/// Failure while retrieving remote subscription content.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to send request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    Status(StatusCode),
}

/// Makes a blocking HTTP GET request to the specified URL
///
/// # Arguments
/// * `url` - The URL to request
/// * `proxy_str` - Optional proxy string (e.g., "http://127.0.0.1:8080")
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(FetchError)` - Error if the request failed
pub fn web_get(url: &str, proxy_str: Option<&str>) -> Result<String, FetchError> {
    let mut client_builder = Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
        .user_agent(concat!("subsync/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = proxy_str {
        if !proxy.is_empty() {
            let proxy = reqwest::Proxy::all(proxy).map_err(FetchError::Client)?;
            client_builder = client_builder.proxy(proxy);
        }
    }

    let client = client_builder.build().map_err(FetchError::Client)?;

    let response = client.get(url).send().map_err(FetchError::Request)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    response.text().map_err(FetchError::Request)
}
