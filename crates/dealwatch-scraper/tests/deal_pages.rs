//! Integration tests for `PageFetcher` and `DealAggregator`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealwatch_scraper::{DealAggregator, DealExtractor, DealSource, FetchError, PageFetcher};

const TEST_UA: &str = "dealwatch-test/0.1";

fn test_fetcher() -> PageFetcher {
    PageFetcher::new(5, TEST_UA).expect("failed to build test PageFetcher")
}

fn test_aggregator(server: &MockServer, pages: Vec<String>) -> DealAggregator {
    DealAggregator::new(test_fetcher(), DealExtractor::new(&server.uri()), pages)
}

fn card(name: &str, href: &str) -> String {
    format!(
        r#"<div class="DealGridItem-module__dealItem">
             <a class="a-link-normal" href="{href}">
               <span class="DealContent-module__truncate">{name}</span>
             </a>
             <span class="a-price-whole">10,</span>
           </div>"#
    )
}

fn deals_page(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.concat())
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_body_and_sends_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gp/goldbox"))
        .and(header("user-agent", TEST_UA))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/gp/goldbox", server.uri());
    let result = test_fetcher().fetch(&url).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap(), "<html>ok</html>");
}

#[tokio::test]
async fn fetch_maps_non_success_status_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gp/bestsellers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = format!("{}/gp/bestsellers", server.uri());
    let result = test_fetcher().fetch(&url).await;

    match result {
        Err(FetchError::UnexpectedStatus { status, url: err_url }) => {
            assert_eq!(status, 503);
            assert_eq!(err_url, url);
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_does_not_retry_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/deals", server.uri());
    let result = test_fetcher().fetch(&url).await;
    assert!(matches!(result, Err(FetchError::UnexpectedStatus { status: 500, .. })));
}

#[tokio::test]
async fn fetch_times_out_on_slow_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(1, TEST_UA).unwrap();
    let result = fetcher.fetch(&format!("{}/slow", server.uri())).await;
    assert!(
        matches!(result, Err(FetchError::Http { .. })),
        "expected Http timeout error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// DealAggregator
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collect_concatenates_in_page_then_card_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(deals_page(&[
            card("A1", "/deal/a1"),
            card("A2", "/deal/a2"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(deals_page(&[card("B1", "/deal/b1")])),
        )
        .mount(&server)
        .await;

    let pages = vec![format!("{}/a", server.uri()), format!("{}/b", server.uri())];
    let aggregator = test_aggregator(&server, pages.clone());
    let deals = aggregator.collect(&pages).await;

    let names: Vec<&str> = deals.iter().map(|d| d.product_name.as_str()).collect();
    assert_eq!(names, vec!["A1", "A2", "B1"]);
    assert_eq!(deals[2].link, format!("{}/deal/b1", server.uri()));
}

#[tokio::test]
async fn collect_skips_failing_page_and_keeps_healthy_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(deals_page(&[
            card("B1", "/deal/b1"),
            card("B2", "/deal/b2"),
        ])))
        .mount(&server)
        .await;

    let pages = vec![format!("{}/a", server.uri()), format!("{}/b", server.uri())];
    let aggregator = test_aggregator(&server, pages.clone());
    let deals = aggregator.collect(&pages).await;

    let names: Vec<&str> = deals.iter().map(|d| d.product_name.as_str()).collect();
    assert_eq!(names, vec!["B1", "B2"]);
}

#[tokio::test]
async fn collect_returns_empty_when_every_page_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let pages = vec![format!("{}/a", server.uri()), format!("{}/b", server.uri())];
    let aggregator = test_aggregator(&server, pages.clone());
    assert!(aggregator.collect(&pages).await.is_empty());
}

#[tokio::test]
async fn fetch_deals_uses_configured_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/only"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(deals_page(&[card("X", "/deal/x")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let aggregator = test_aggregator(&server, vec![format!("{}/only", server.uri())]);
    assert_eq!(aggregator.pages().len(), 1);

    let result = aggregator.fetch_deals().await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let deals = result.unwrap();
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].product_name, "X");
    assert_eq!(deals[0].price, "10,");
}
