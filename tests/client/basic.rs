use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

use fetchax::{FxClient, RequestConfig};

#[tokio::test]
async fn get_resolves_base_url_path_and_params() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users")
            .query_param("page", "1")
            .query_param("limit", "10");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"users":[]}"#);
    });

    // Trailing slash on the base and a leading slash on the path must not
    // produce a double slash.
    let client = FxClient::builder()
        .base_url(format!("{}/", server.base_url()))
        .build()
        .unwrap();

    let config = RequestConfig::new().param("page", 1).param("limit", 10);
    let data = client.get("/users", Some(config)).await.unwrap();

    mock.assert();
    assert_eq!(data, json!({"users": []}));
}

#[tokio::test]
async fn post_sends_serialized_body_with_default_content_type() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/users")
            .header("content-type", "application/json")
            .body(r#"{"name":"A"}"#);
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":1,"name":"A"}"#);
    });

    let client = crate::common::client(&server);
    let created = client
        .post("/users", Some(json!({"name": "A"})), None)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(created, json!({"id": 1, "name": "A"}));
}

#[tokio::test]
async fn explicit_content_type_overrides_the_json_default() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ingest")
            .header("content-type", "application/vnd.custom+json");
        then.status(200).body("{}");
    });

    let client = crate::common::client(&server);
    let config = RequestConfig::new().header("Content-Type", "application/vnd.custom+json");
    client
        .post("/ingest", Some(json!({"k": 1})), Some(config))
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn per_call_headers_override_base_headers() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/me")
            .header("x-api-key", "per-call")
            .header("x-client", "fetchax");
        then.status(200).body("{}");
    });

    let client = FxClient::builder()
        .base_url(server.base_url())
        .header("X-Api-Key", "base")
        .header("X-Client", "fetchax")
        .build()
        .unwrap();

    let config = RequestConfig::new().header("X-Api-Key", "per-call");
    client.get("/me", Some(config)).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn get_and_delete_send_no_body_or_content_type() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/things");
        then.status(200).body("[]");
    });

    let client = crate::common::client(&server);
    let data = client.get("/things", None).await.unwrap();

    mock.assert();
    assert_eq!(data, json!([]));

    let requests = server.mock(|when, then| {
        when.method(httpmock::Method::DELETE).path("/things/1");
        then.status(200).body(r#"{"deleted":true}"#);
    });
    let data = client.delete("/things/1", None).await.unwrap();
    requests.assert();
    assert_eq!(data, json!({"deleted": true}));
}
