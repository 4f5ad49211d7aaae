//! HTTP retrieval of search result pages.
//!
//! A [`Fetcher`] issues exactly one GET per call and reads the whole body.
//! Every request is bounded by the configured timeout; a response with a
//! non-2xx status counts as a failure. Nothing is retried.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, error, trace};
use url::Url;

use super::*;

/// Issues GET requests against the search endpoint.
#[derive(Debug, Clone)]
pub struct Fetcher {
  /// Underlying HTTP client, carrying the timeout and user agent.
  client: reqwest::Client,
}

impl Fetcher {
  /// Creates a fetcher whose requests give up after `timeout`.
  pub fn new(timeout: Duration) -> Result<Self> { Self::with_user_agent(timeout, None) }

  /// Creates a fetcher that also sends the given `User-Agent` header.
  pub fn with_user_agent(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    builder = match user_agent {
      Some(agent) => builder.user_agent(agent.to_string()),
      None => builder.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))),
    };
    Ok(Self { client: builder.build()? })
  }

  /// Creates a fetcher from the timeout and user agent in `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    Self::with_user_agent(config.timeout(), config.user_agent.as_deref())
  }

  /// Retrieves the full body at `url`.
  ///
  /// # Errors
  ///
  /// Returns [`InspireError::Fetch`] if the request cannot be sent, times out,
  /// the status is not a success, or reading the body fails.
  pub async fn fetch(&self, url: &Url) -> Result<Bytes> {
    debug!("Query URL is {}", url);

    let data = match self.send(url).await {
      Ok(data) => data,
      Err(e) => {
        error!("Error retrieving results: {}", e);
        return Err(e.into());
      },
    };

    debug!("Read {} bytes from {}", data.len(), url);
    trace!("Response body: {}", String::from_utf8_lossy(&data));
    Ok(data)
  }

  /// Sends the request and reads the body.
  async fn send(&self, url: &Url) -> core::result::Result<Bytes, reqwest::Error> {
    let response = self.client.get(url.clone()).send().await?.error_for_status()?;
    response.bytes().await
  }
}

#[cfg(test)]
mod tests {
  use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
  };

  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_fetch_reads_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/search"))
      .and(query_param("of", "hx"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<pre>@article{x}</pre>"))
      .expect(1)
      .mount(&server)
      .await;

    let query = SearchQuery::new("a x").with_format(ResultFormat::Bibtex);
    let url = query.url(&format!("{}/search", server.uri())).unwrap();
    let body = Fetcher::new(Duration::from_secs(5)).unwrap().fetch(&url).await.unwrap();
    assert_eq!(&body[..], b"<pre>@article{x}</pre>");
  }

  #[traced_test]
  #[tokio::test]
  async fn test_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(503))
      .expect(1)
      .mount(&server)
      .await;

    let url = SearchQuery::new("a x").url(&format!("{}/search", server.uri())).unwrap();
    let result = Fetcher::new(Duration::from_secs(5)).unwrap().fetch(&url).await;
    assert!(matches!(result, Err(InspireError::Fetch(_))));
    assert!(logs_contain("Error retrieving results"));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_timeout_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
      .mount(&server)
      .await;

    let url = SearchQuery::new("a x").url(&format!("{}/search", server.uri())).unwrap();
    let result = Fetcher::new(Duration::from_millis(100)).unwrap().fetch(&url).await;
    match result {
      Err(InspireError::Fetch(e)) => assert!(e.is_timeout()),
      other => panic!("expected a timeout, got {other:?}"),
    }
  }
}
