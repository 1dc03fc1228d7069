//! Directory tool tests against a mock About-page scrape.
//!
//! The About page comes back through the Firecrawl scrape endpoint, so the
//! mock matches the exact scrape payload for the public About URL. Snippet
//! extraction is pinned by giving each founder a paragraph long enough to
//! be used verbatim.

mod common;

use common::{expect_data, expect_error, offline_registry, registry_for};
use satchel::envelope::ErrorCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ABOUT_URL: &str = "https://ferrouslabs.dev/about";

const CEO_PARAGRAPH: &str = "Iris Navarro co-founded Ferrous Labs in 2019 and serves as its \
     chief executive. Before that she led infrastructure teams at two storage startups, and \
     she still reviews the occasional pull request when a release week is quiet.";

const CTO_PARAGRAPH: &str = "Elif Demir is the company's chief technology officer. She keeps \
     ownership of the expression evaluator and the gateway clients, and she pairs with every \
     new engineer on their first change to the tool server during their onboarding month.";

fn about_markdown() -> String {
    format!(
        "# About Ferrous Labs\n\nFerrous Labs builds developer tooling.\n\n{}\n\n{}\n\nContact us at hello@ferrouslabs.dev.",
        CEO_PARAGRAPH, CTO_PARAGRAPH
    )
}

async fn mount_about_page(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(body_json(json!({
            "url": ABOUT_URL,
            "formats": ["markdown"],
            "onlyMainContent": true
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "markdown": about_markdown() })),
        )
        .mount(server)
        .await;
}

async fn mount_about_failure(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(500).set_body_string("scrape failed"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_about_page_returns_url_and_markdown() {
    let server = MockServer::start().await;
    mount_about_page(&server).await;

    let registry = registry_for(&server.uri(), Some("test-key"));
    let envelope = registry.dispatch("about_page", json!({})).await;
    let data = expect_data(envelope);
    assert_eq!(data["url"], json!(ABOUT_URL));
    assert_eq!(data["markdown"], json!(about_markdown()));
}

#[tokio::test]
async fn test_ceo_info_enriches_with_about_snippet() {
    let server = MockServer::start().await;
    mount_about_page(&server).await;

    let registry = registry_for(&server.uri(), Some("test-key"));
    let envelope = registry.dispatch("ceo_info", json!({})).await;
    let data = expect_data(envelope);
    assert_eq!(data["name"], json!("Iris Navarro"));
    assert_eq!(data["role"], json!("Co-founder, CEO"));
    assert_eq!(data["links"][0]["url"], json!(ABOUT_URL));
    assert_eq!(data["about_markdown_snippet"], json!(CEO_PARAGRAPH));
}

#[tokio::test]
async fn test_cto_info_enriches_with_about_snippet() {
    let server = MockServer::start().await;
    mount_about_page(&server).await;

    let registry = registry_for(&server.uri(), Some("test-key"));
    let envelope = registry.dispatch("cto_info", json!({})).await;
    let data = expect_data(envelope);
    assert_eq!(data["name"], json!("Elif Demir"));
    assert_eq!(data["role"], json!("Co-founder, CTO"));
    assert_eq!(data["about_markdown_snippet"], json!(CTO_PARAGRAPH));
}

#[tokio::test]
async fn test_person_info_degrades_when_about_page_is_down() {
    let server = MockServer::start().await;
    mount_about_failure(&server).await;

    let registry = registry_for(&server.uri(), Some("test-key"));
    let envelope = registry.dispatch("ceo_info", json!({})).await;
    let data = expect_data(envelope);
    assert_eq!(data["name"], json!("Iris Navarro"));
    assert!(data.get("about_markdown_snippet").is_none());
}

#[tokio::test]
async fn test_team_info_combines_both_profiles() {
    let server = MockServer::start().await;
    mount_about_page(&server).await;

    let registry = registry_for(&server.uri(), Some("test-key"));
    let envelope = registry.dispatch("team_info", json!({})).await;
    let data = expect_data(envelope);
    assert_eq!(data["source_url"], json!(ABOUT_URL));
    assert_eq!(data["ceo"]["name"], json!("Iris Navarro"));
    assert_eq!(data["cto"]["name"], json!("Elif Demir"));
    assert_eq!(data["ceo"]["about_markdown_snippet"], json!(CEO_PARAGRAPH));
    assert_eq!(data["cto"]["about_markdown_snippet"], json!(CTO_PARAGRAPH));
}

#[tokio::test]
async fn test_team_info_propagates_gateway_failure() {
    let server = MockServer::start().await;
    mount_about_failure(&server).await;

    let registry = registry_for(&server.uri(), Some("test-key"));
    let envelope = registry.dispatch("team_info", json!({})).await;
    let (msg, code) = expect_error(envelope);
    assert_eq!(code, ErrorCode::HttpError);
    assert!(msg.contains("500"), "message should carry the status: {}", msg);
}

#[tokio::test]
async fn test_team_info_requires_a_configured_key() {
    let registry = offline_registry(None);
    let envelope = registry.dispatch("team_info", json!({})).await;
    let (msg, code) = expect_error(envelope);
    assert_eq!(code, ErrorCode::ConfigError);
    assert_eq!(msg, "FIRECRAWL_API_KEY env not set");
}

#[tokio::test]
async fn test_greet_formats_the_hello_message() {
    let registry = offline_registry(None);
    let envelope = registry.dispatch("greet", json!({ "name": "Ada" })).await;
    assert_eq!(expect_data(envelope), json!({ "result": "Hello, Ada!" }));

    let envelope = registry.dispatch("greet", json!({})).await;
    let (msg, code) = expect_error(envelope);
    assert_eq!(code, ErrorCode::ValidationError);
    assert_eq!(msg, "name is required");
}
