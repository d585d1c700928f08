//! HTTP client setup and middleware configuration.
//!
//! The same client serves listing page loads and file transfers. Requests are
//! traced through `reqwest-tracing`; transient failures can optionally be
//! retried with exponential backoff, but the default is to fail fast and let
//! the next crawl run pick up whatever did not complete.
//!
//! ```rust
//! use harvester::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "listing-harvester/0.1".parse()?);
//!
//! let config = HttpClientConfig {
//!     retries: 2,
//!     proxy: None,
//!     headers: Some(headers),
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Settings shared by every request of a crawl.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Retries for transient failures. Zero disables the retry middleware.
    pub retries: u32,
    pub proxy: Option<Proxy>,
    /// Sent with every request, e.g. `User-Agent`.
    pub headers: Option<HeaderMap>,
}

/// Builds the middleware client used for listing pages and transfers.
///
/// Every request is traced; transient failures are retried with
/// exponential backoff only when `config.retries > 0`.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner = reqwest::Client::builder();
    if let Some(proxy) = config.proxy {
        inner = inner.proxy(proxy);
    }
    if let Some(headers) = config.headers {
        inner = inner.default_headers(headers);
    }

    let mut builder = ClientBuilder::new(inner.build()?).with(TracingMiddleware::default());
    if config.retries > 0 {
        let policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(policy));
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, USER_AGENT};

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.retries, 0);
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_client_without_retries() {
        assert!(create_http_client(HttpClientConfig::default()).is_ok());
    }

    #[test]
    fn test_client_with_retries_and_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("test-agent"));

        let config = HttpClientConfig {
            retries: 5,
            proxy: None,
            headers: Some(headers),
        };

        assert!(create_http_client(config).is_ok());
    }
}
