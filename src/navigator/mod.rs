//! The page navigator capability.
//!
//! The crawler only needs a way to turn a listing URL into rendered HTML and
//! to release whatever resources the navigator holds once the crawl ends.
//! [`HttpNavigator`] does this with a plain GET; a browser-backed navigator
//! can be plugged in through the [`PageNavigator`] trait.

use crate::error::{Error, Result};

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// A loaded listing page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Final URL of the page, after redirects.
    pub url: Url,
    /// Page markup.
    pub html: String,
}

/// Loads listing pages for the crawler.
#[async_trait]
pub trait PageNavigator: Send + Sync {
    /// Loads `url`. Any failure is a [`Error::Navigation`].
    async fn load(&self, url: &Url) -> Result<RenderedPage>;

    /// Tears the navigator down. Called once when the crawl ends.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Navigator fetching pages over HTTP without rendering scripts.
#[derive(Debug, Clone)]
pub struct HttpNavigator {
    client: ClientWithMiddleware,
}

impl HttpNavigator {
    /// Creates a navigator on top of `client`.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageNavigator for HttpNavigator {
    async fn load(&self, url: &Url) -> Result<RenderedPage> {
        debug!("Loading {}", url);
        let navigation_error = |message: String| Error::Navigation {
            url: url.to_string(),
            message,
        };

        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;
        let res = res
            .error_for_status()
            .map_err(|e| navigation_error(e.to_string()))?;

        let final_url = res.url().clone();
        let html = res
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        Ok(RenderedPage {
            url: final_url,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{create_http_client, HttpClientConfig};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn navigator() -> HttpNavigator {
        HttpNavigator::new(create_http_client(HttpClientConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_load_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<ul></ul>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/list?page=2", server.uri())).unwrap();
        let page = navigator().load(&url).await.unwrap();
        assert_eq!(page.html, "<ul></ul>");
        assert_eq!(page.url, url);
    }

    #[tokio::test]
    async fn test_error_status_is_navigation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/list", server.uri())).unwrap();
        let err = navigator().load(&url).await.unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
        assert!(err.is_fatal());
    }
}
