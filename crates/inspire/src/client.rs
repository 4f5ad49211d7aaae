//! The query pipeline: build URL, fetch, extract.

use tracing::{debug, info};

use super::*;

/// Runs searches against the configured INSPIRE endpoint.
///
/// # Examples
///
/// ```no_run
/// use inspire::{query::ResultFormat, Config, Inspire, SearchQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let inspire = Inspire::new(Config::default())?;
/// let query = SearchQuery::new("find a Feynman, Richard").with_format(ResultFormat::Bibtex);
/// println!("{}", inspire.search_text(&query).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Inspire {
  /// Endpoint and client settings
  config:  Config,
  /// HTTP client bound to the configured timeout
  fetcher: Fetcher,
}

impl Inspire {
  /// Creates a client for the endpoint in `config`.
  pub fn new(config: Config) -> Result<Self> {
    let fetcher = Fetcher::from_config(&config)?;
    Ok(Self { config, fetcher })
  }

  /// The configuration this client was created with.
  pub fn config(&self) -> &Config { &self.config }

  /// Fetches the raw result page for `query`.
  pub async fn search_raw(&self, query: &SearchQuery) -> Result<bytes::Bytes> {
    info!("Search of INSPIRE started...");
    debug!("Query: {:?}", query);
    let url = query.url(&self.config.endpoint)?;
    self.fetcher.fetch(&url).await
  }

  /// Runs `query` and returns the extracted text of the result page.
  pub async fn search_text(&self, query: &SearchQuery) -> Result<String> {
    let data = self.search_raw(query).await?;
    extract::extract_text(&data)
  }

  /// Runs `query` and returns the title, authors and citation count of every record.
  ///
  /// Only brief-format pages carry this information; other formats yield no records.
  pub async fn search_details(&self, query: &SearchQuery) -> Result<Vec<RecordDetail>> {
    let data = self.search_raw(query).await?;
    extract::extract_details(&data)
  }
}
