use centrifugo_client::{Client, Config, Error, Reply};
use httpmock::prelude::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client_for(base_url: &str) -> Result<Client, Error> {
    let config = Config::new(base_url, "K", "S").token_issuer("app").token_ttl(60);
    Client::new(config)
}

// ---------------------------------------------------------------------------
// Command wire format
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api")
            .header("authorization", "apikey K")
            .header("content-type", "application/json")
            .json_body(json!({
                "method": "publish",
                "params": {"channel": "news", "data": {"text": "hi"}}
            }));
        then.status(200).json_body(json!({}));
    });

    let client = client_for(&server.base_url()).unwrap();
    let reply = client
        .publish("news", json!({"text": "hi"}), None)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(reply, Reply::Success(json!({})));
}

#[tokio::test]
async fn base_url_trailing_slash_hits_same_endpoint() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(200).json_body(json!({}));
    });

    let client = client_for(&format!("{}/", server.base_url())).unwrap();
    client.channels().await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn base_url_already_suffixed_gets_no_double_suffix() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(200).json_body(json!({}));
    });

    let client = client_for(&format!("{}/api", server.base_url())).unwrap();
    client.channels().await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn broadcast_includes_optional_client() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api").json_body(json!({
            "method": "broadcast",
            "params": {
                "channels": ["a", "b"],
                "data": {"n": 1},
                "client": "client-7"
            }
        }));
        then.status(200).json_body(json!({}));
    });

    let client = client_for(&server.base_url()).unwrap();
    client
        .broadcast(&["a", "b"], json!({"n": 1}), Some("client-7"))
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn unsubscribe_sends_stringified_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api").json_body(json!({
            "method": "unsubscribe",
            "params": {"user": "42"}
        }));
        then.status(200).json_body(json!({}));
    });

    let client = client_for(&server.base_url()).unwrap();
    client.unsubscribe(42, None).await.unwrap();

    mock.assert();
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_body_returned_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(404).json_body(json!({"error": "unknown method"}));
    });

    let client = client_for(&server.base_url()).unwrap();
    let reply = client.stats().await.unwrap();

    // http errors are disabled at the transport level; 4xx bodies are
    // decoded like any other response.
    assert_eq!(reply, Reply::Success(json!({"error": "unknown method"})));
}

#[tokio::test]
async fn empty_body_decodes_to_null() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(200);
    });

    let client = client_for(&server.base_url()).unwrap();
    let reply = client.presence("news").await.unwrap();

    assert_eq!(reply, Reply::Success(serde_json::Value::Null));
}

#[tokio::test]
async fn unparseable_body_normalized_into_failure_reply() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(200).body("definitely not json");
    });

    let client = client_for(&server.base_url()).unwrap();
    let reply = client.stats().await.unwrap();

    let failure = reply.failure().expect("expected failure reply");
    assert_eq!(failure.method, "stats");
    assert!(failure.body.is_empty());
    assert!(failure.error.contains("invalid JSON body"));
}

#[tokio::test]
async fn failure_reply_carries_original_params() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api");
        then.status(200).body("<html>");
    });

    let client = client_for(&server.base_url()).unwrap();
    let reply = client.publish("news", json!({"text": "hi"}), None).await.unwrap();

    let failure = reply.failure().expect("expected failure reply");
    assert_eq!(failure.method, "publish");
    assert_eq!(failure.body.get("channel"), Some(&json!("news")));
    assert_eq!(failure.body.get("data"), Some(&json!({"text": "hi"})));
}

#[tokio::test]
async fn connection_refused_propagates_as_http_error() {
    // Nothing listens on this port; the send itself must fail.
    let client = client_for("http://127.0.0.1:9").unwrap();

    let result = client.stats().await;
    assert!(matches!(result, Err(Error::Http(_))));
}

// ---------------------------------------------------------------------------
// Tokens and signatures through the client
// ---------------------------------------------------------------------------

#[test]
fn client_issues_decodable_tokens() {
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    let client = client_for("https://rt.example.com").unwrap();
    let token = client.connection_token("user-1").unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&["app"]);
    let data =
        decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b"S"), &validation).unwrap();
    assert_eq!(data.claims["sub"], "user-1");
}

#[test]
fn client_api_sign_matches_free_function() {
    let client = client_for("https://rt.example.com").unwrap();
    assert_eq!(
        client.api_sign("payload").unwrap(),
        centrifugo_client::generate_api_sign("S", "payload").unwrap()
    );
}
