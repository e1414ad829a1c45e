use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use chirp_rest::api::routes::create_router;
use chirp_rest::seed;
use chirp_rest::store::MemoryStore;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
    }
}

/// Boots the full router on an ephemeral port with a freshly seeded
/// in-memory store and returns a client pointed at it.
async fn spawn_server() -> TestClient {
    let store = Arc::new(MemoryStore::new());
    seed::load_seed_data(&*store).await.expect("seed data");

    let app = create_router().with_state(store);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestClient::new(format!("http://{}", addr))
}

#[tokio::test]
async fn test_list_tweets_wraps_items_in_an_envelope() {
    let client = spawn_server().await;

    let response = client.get("/tweets").await.expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    let href = body.get("href").and_then(Value::as_str).expect("envelope href");
    assert!(href.ends_with("/tweets/"));

    let items = body.get("items").and_then(Value::as_array).expect("items");
    assert_eq!(items.len(), 2);
    let first = &items[0];
    assert_eq!(first.get("id"), Some(&json!(101)));
    assert!(first
        .get("href")
        .and_then(Value::as_str)
        .expect("item href")
        .ends_with("/tweets/101"));

    // the relation placeholder is present but not expanded
    let likes = first.get("likes").expect("likes placeholder");
    assert!(likes.get("href").is_some());
    assert!(likes.get("items").is_none());
}

#[tokio::test]
async fn test_expand_nests_the_matching_likes() {
    let client = spawn_server().await;

    let response = client.get("/tweets/101?expand=likes").await.expect("request");
    assert_eq!(response.status(), 200);

    let tweet: Value = response.json().await.expect("json body");
    let likes = tweet.get("likes").expect("likes");
    assert!(likes
        .get("href")
        .and_then(Value::as_str)
        .expect("relation href")
        .ends_with("/tweets/101/likes/"));

    let items = likes.get("items").and_then(Value::as_array).expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("tweet_id"), Some(&json!(101)));
    assert!(items[0].get("href").is_some());
}

#[tokio::test]
async fn test_filter_projects_fields_and_rejects_unknown_ones() {
    let client = spawn_server().await;

    let response = client
        .get("/users/103?filter=firstname,href")
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let user: Value = response.json().await.expect("json body");
    let fields: Vec<_> = user.as_object().expect("object").keys().cloned().collect();
    assert_eq!(fields, vec!["firstname", "href"]);

    let response = client.get("/users/103?filter=shoesize").await.expect("request");
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await.expect("json body");
    assert!(error
        .get("error")
        .and_then(Value::as_str)
        .expect("message")
        .contains("shoesize"));
}

#[tokio::test]
async fn test_offset_and_limit_window_the_list() {
    let client = spawn_server().await;

    let response = client
        .get("/tweets?offset=1&limit=1")
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json body");
    let items = body.get("items").and_then(Value::as_array).expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("id"), Some(&json!(102)));

    // offset past the end and zero limit are both 400s
    let response = client.get("/tweets?offset=2").await.expect("request");
    assert_eq!(response.status(), 400);
    let response = client.get("/tweets?limit=0").await.expect("request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_search_terms_narrow_the_list() {
    let client = spawn_server().await;

    let response = client.get("/videos?title=Superman").await.expect("request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json body");
    let items = body.get("items").and_then(Value::as_array).expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("title"), Some(&json!("Superman returns")));

    let response = client.get("/videos?director=Singer").await.expect("request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_post_validates_cleans_and_assigns_id() {
    let client = spawn_server().await;

    // a valid video gets defaults filled and a server-assigned id
    let response = client
        .post("/videos", json!({"title": "Clerks", "src": "clerks.mp4", "length": 5520}))
        .await
        .expect("request");
    assert_eq!(response.status(), 201);
    let video: Value = response.json().await.expect("json body");
    assert_eq!(video.get("description"), Some(&json!("")));
    assert_eq!(video.get("playcount"), Some(&json!(0)));
    assert!(video.get("id").is_some());
    assert!(video.get("timestamp").is_some());
    assert!(video.get("href").is_some());

    // missing required field
    let response = client
        .post("/videos", json!({"src": "x.mp4", "length": 10}))
        .await
        .expect("request");
    assert_eq!(response.status(), 400);

    // constraint violation
    let response = client
        .post("/videos", json!({"title": "x", "src": "x.mp4", "length": -1}))
        .await
        .expect("request");
    assert_eq!(response.status(), 400);

    // the server owns id and timestamp
    let response = client
        .post("/videos", json!({"id": 7, "title": "x", "src": "x.mp4", "length": 1}))
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_post_drops_extraneous_fields() {
    let client = spawn_server().await;

    let response = client
        .post(
            "/users",
            json!({"firstname": "Tina", "lastname": "Tester", "admin": true}),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), 201);
    let user: Value = response.json().await.expect("json body");
    assert!(user.get("admin").is_none());
    assert_eq!(user.get("firstname"), Some(&json!("Tina")));
}

#[tokio::test]
async fn test_put_replaces_and_keeps_the_path_id() {
    let client = spawn_server().await;

    let response = client
        .put("/users/103", json!({"firstname": "Tabea", "lastname": "Getestet"}))
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let user: Value = response.json().await.expect("json body");
    assert_eq!(user.get("id"), Some(&json!(103)));
    assert_eq!(user.get("lastname"), Some(&json!("Getestet")));

    let response = client
        .put("/users/999", json!({"firstname": "No", "lastname": "Body"}))
        .await
        .expect("request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_removes_the_record() {
    let client = spawn_server().await;

    let response = client.delete("/likes/105").await.expect("request");
    assert_eq!(response.status(), 204);

    let response = client.get("/likes/105").await.expect("request");
    assert_eq!(response.status(), 404);

    let response = client.delete("/likes/105").await.expect("request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_unknown_resource_and_method_handling() {
    let client = spawn_server().await;

    let response = client.get("/bikes").await.expect("request");
    assert_eq!(response.status(), 404);

    // collections refuse PUT, items refuse POST
    let response = client.put("/tweets", json!({})).await.expect("request");
    assert_eq!(response.status(), 405);
    let response = client.post("/tweets/101", json!({})).await.expect("request");
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn test_content_negotiation() {
    let client = spawn_server().await;

    let response = client
        .client
        .get(format!("{}/tweets", client.base_url))
        .header("Accept-Version", "2.0")
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 406);

    let response = client
        .client
        .post(format!("{}/tweets", client.base_url))
        .header("Content-Type", "text/plain")
        .body("message=hi")
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 415);
}
