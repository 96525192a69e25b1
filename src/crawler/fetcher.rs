//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the browser-like header set the site
//!   expects on feed requests
//! - GET requests with optional query parameters
//! - Error classification
//!
//! Nothing here retries. Callers decide what a failure means for their
//! unit of work.

use crate::config::HttpConfig;
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT};
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: Vec<u8>,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short description of the result for log messages
    pub fn describe(&self) -> String {
        match self {
            Self::Success { status_code, .. } => status_code.to_string(),
            Self::HttpError { status_code } => status_code.to_string(),
            Self::NetworkError { error } => error.clone(),
        }
    }

    /// Consumes the result, returning the body decoded as UTF-8
    ///
    /// Invalid sequences are replaced rather than rejected.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(String::from_utf8_lossy(&body).into_owned()),
            _ => None,
        }
    }
}

/// Builds the default header set sent with every request
pub fn default_headers(config: &HttpConfig) -> Result<HeaderMap, ConfigError> {
    let value = |v: &str| {
        HeaderValue::from_str(v)
            .map_err(|e| ConfigError::Validation(format!("Invalid header value '{}': {}", v, e)))
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, value(&config.accept_language)?);
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    Ok(headers)
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The request identity configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ConfigError)` - A header value was invalid or the client failed to build
///
/// # Example
///
/// ```no_run
/// use photo_ripple::config::HttpConfig;
/// use photo_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, ConfigError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(default_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(|e| ConfigError::Validation(format!("Failed to build HTTP client: {}", e)))
}

/// Fetches a URL
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    fetch_url_with_query(client, url, &[]).await
}

/// Fetches a URL with query parameters appended
pub async fn fetch_url_with_query(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> FetchResult {
    tracing::trace!("GET {} {:?}", url, query);

    let response = match client.get(url).query(query).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
