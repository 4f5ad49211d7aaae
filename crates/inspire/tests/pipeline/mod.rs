use wiremock::{
  matchers::{method, path, query_param},
  Mock, MockServer, ResponseTemplate,
};

use super::*;

async fn serve(format: ResultFormat, page: &str) -> MockServer {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/search"))
    .and(query_param("action_search", "Search"))
    .and(query_param("rg", "100"))
    .and(query_param("ln", "en"))
    .and(query_param("of", format.code()))
    .respond_with(ResponseTemplate::new(200).set_body_string(page))
    .expect(1)
    .mount(&server)
    .await;
  server
}

fn client(server: &MockServer) -> Inspire {
  let config =
    Config::default().with_endpoint(format!("{}/search", server.uri())).with_timeout_secs(5);
  Inspire::new(config).unwrap()
}

#[traced_test]
#[tokio::test]
async fn test_brief_pipeline() -> TestResult<()> {
  let server = serve(ResultFormat::Brief, BRIEF_PAGE).await;
  let text = client(&server).search_text(&SearchQuery::new("find a Feynman")).await?;
  assert_eq!(text, BRIEF_TEXT);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_bibtex_pipeline() -> TestResult<()> {
  let server = serve(ResultFormat::Bibtex, BIBTEX_PAGE).await;
  let query = SearchQuery::new("find a Feynman").with_format(ResultFormat::Bibtex);
  assert_eq!(client(&server).search_text(&query).await?, BIBTEX_TEXT);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_latex_eu_pipeline() -> TestResult<()> {
  let server = serve(ResultFormat::LatexEu, LATEX_EU_PAGE).await;
  let query = SearchQuery::new("find a Feynman").with_format(ResultFormat::LatexEu);
  assert_eq!(client(&server).search_text(&query).await?, LATEX_EU_TEXT);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_details_pipeline() -> TestResult<()> {
  let server = serve(ResultFormat::Brief, BRIEF_PAGE).await;
  let details = client(&server).search_details(&SearchQuery::new("find t higgs")).await?;
  assert_eq!(details.len(), 3);
  assert_eq!(details[1].citations, 7562);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_search_string_and_offset_are_sent() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(query_param("p", "find a Feynman, Richard"))
    .and(query_param("jrec", "100"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
    .expect(1)
    .mount(&server)
    .await;

  let query = SearchQuery::new("find a Feynman, Richard").with_start_record(100);
  assert_eq!(client(&server).search_text(&query).await?, "");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_server_error_is_fetch_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

  let result = client(&server).search_text(&SearchQuery::new("x")).await;
  assert!(matches!(result, Err(InspireError::Fetch(_))));
}

#[traced_test]
#[tokio::test]
async fn test_unreachable_endpoint() {
  // Nothing listens on the discard port.
  let config = Config::default().with_endpoint("http://127.0.0.1:9/search").with_timeout_secs(2);
  let result = Inspire::new(config).unwrap().search_text(&SearchQuery::new("x")).await;
  assert!(matches!(result, Err(InspireError::Fetch(_))));
}
