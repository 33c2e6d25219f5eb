use aj_core::{HeadlineProvider, ImageProvider, MessagingApi};
use aj_services::{NewsApiClient, TelegramClient, UnsplashClient};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn unsplash_search_maps_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("orientation", "landscape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"urls": {"regular": "https://images.example/a.jpg"}, "alt_description": "robot arm"},
                {"urls": {"regular": "https://images.example/b.jpg"}, "alt_description": null}
            ]
        })))
        .mount(&server)
        .await;

    let client = UnsplashClient::new(Some("key".to_string()), Some(server.uri()));
    let results = client.search("artificial intelligence").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "https://images.example/a.jpg");
    assert_eq!(results[0].alt_text.as_deref(), Some("robot arm"));
    assert!(results[1].alt_text.is_none());
}

#[tokio::test]
async fn unsplash_without_credentials_errors() {
    let client = UnsplashClient::new(None, None);
    assert!(client.search("anything").await.is_err());
}

#[tokio::test]
async fn newsapi_absorbs_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = NewsApiClient::new(Some("key".to_string()), Some(server.uri()));
    let headlines = client.fetch_trending(Some("technology"), "us").await.unwrap();
    assert!(headlines.is_empty());
}

#[tokio::test]
async fn newsapi_skips_headlines_without_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("category", "technology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [
                {"title": "Quantum chip breakthrough", "source": {"name": "Reuters"}},
                {"title": null, "description": "dropped"},
                {"title": "", "description": "dropped too"}
            ]
        })))
        .mount(&server)
        .await;

    let client = NewsApiClient::new(Some("key".to_string()), Some(server.uri()));
    let headlines = client.fetch_trending(Some("technology"), "us").await.unwrap();

    assert_eq!(headlines.len(), 1);
    assert_eq!(headlines[0].title, "Quantum chip breakthrough");
    assert_eq!(headlines[0].source.as_deref(), Some("Reuters"));
}

#[tokio::test]
async fn telegram_posts_photo_with_markdown_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottoken123/sendPhoto"))
        .and(body_partial_json(serde_json::json!({
            "chat_id": "@kanal",
            "photo": "https://images.example/a.jpg",
            "parse_mode": "Markdown"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let client = TelegramClient::new(Some("token123".to_string()), Some(server.uri()));
    client
        .send_photo("@kanal", "https://images.example/a.jpg", "*Sarlavha*")
        .await
        .unwrap();
}

#[tokio::test]
async fn telegram_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request: chat not found"))
        .mount(&server)
        .await;

    let client = TelegramClient::new(Some("token123".to_string()), Some(server.uri()));
    assert!(client.send_message("@kanal", "salom").await.is_err());

    let unconfigured = TelegramClient::new(None, None);
    assert!(unconfigured.send_message("@kanal", "salom").await.is_err());
}
