use autobnb::config::ClientConfig;
use autobnb::models::SearchPreferences;
use autobnb::search::{HttpSearchClient, SearchSession, SearchState};
use autobnb::SearchError;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve the echo router on an ephemeral port and return its base URL
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, autobnb::server::router())
            .await
            .expect("server");
    });

    format!("http://{address}")
}

#[tokio::test]
async fn test_endpoint_responds() {
    let base = spawn_server().await;

    let body: Value = reqwest::get(format!("{base}/api/test"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({ "message": "Server is working!" }));
}

#[tokio::test]
async fn search_echoes_query() {
    let base = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/search"))
        .json(&json!({ "query": "https://www.airbnb.com/s/Paris/homes" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Search request received");
    assert_eq!(body["query"], "https://www.airbnb.com/s/Paris/homes");
}

#[tokio::test]
async fn search_without_query_is_rejected() {
    let base = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/search"))
        .json(&json!({ "location": "Paris" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn acknowledgement_is_not_a_listing_collection() {
    let base = spawn_server().await;
    let client = HttpSearchClient::with_config(ClientConfig::for_base_url(&base)).unwrap();
    let mut session = SearchSession::new(client);

    let state = session.search(&SearchPreferences::new("Paris")).await;
    assert_eq!(state, &SearchState::Failed(SearchError::Format));
}
