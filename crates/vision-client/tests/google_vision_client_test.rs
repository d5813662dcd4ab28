//! Integration tests for [`vision_client::GoogleVisionClient`] against a local mockito server.
//!
//! Covers: request shape (feature type, base64 content, API key / bearer auth), response parsing in
//! backend order, empty results, HTTP error status, per-image API errors and undecodable bodies.

use mockito::Matcher;
use serde_json::json;
use vision_client::{GoogleVisionClient, ObjectLocalizer, VisionAuth, VisionError};

const ANNOTATE_PATH: &str = "/v1/images:annotate";

/// "hello" in base64.
const IMAGE_BYTES: &[u8] = b"hello";
const IMAGE_BASE64: &str = "aGVsbG8=";

fn api_key_client(server: &mockito::ServerGuard) -> GoogleVisionClient {
    GoogleVisionClient::with_endpoint(VisionAuth::ApiKey("test-key".to_string()), &server.url())
        .unwrap()
        .with_max_results(5)
}

/// **Test: objects are parsed in backend order and the request carries base64 content + key.**
#[tokio::test]
async fn test_localize_objects_parses_annotations() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ANNOTATE_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "requests": [{
                "image": {"content": IMAGE_BASE64},
                "features": [{"type": "OBJECT_LOCALIZATION", "maxResults": 5}]
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "responses": [{
                    "localizedObjectAnnotations": [
                        {
                            "mid": "/m/0bt9lr",
                            "name": "Dog",
                            "score": 0.91,
                            "boundingPoly": {"normalizedVertices": [
                                {"x": 0.1, "y": 0.2}, {"x": 0.6, "y": 0.2},
                                {"x": 0.6, "y": 0.9}, {"x": 0.1, "y": 0.9}
                            ]}
                        },
                        {
                            "mid": "/m/01yrx",
                            "name": "Cat",
                            "score": 0.75,
                            "boundingPoly": {"normalizedVertices": [
                                {}, {"x": 0.4}, {"x": 0.4, "y": 0.5}, {"y": 0.5}
                            ]}
                        }
                    ]
                }]
            }"#,
        )
        .create_async()
        .await;

    let objects = api_key_client(&server)
        .localize_objects(IMAGE_BYTES)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].name, "Dog");
    assert!((objects[0].score - 0.91).abs() < 1e-6);
    assert_eq!(objects[1].name, "Cat");
    assert_eq!(objects[1].bounding_poly.normalized_vertices.len(), 4);
    assert_eq!(objects[1].bounding_poly.normalized_vertices[0].x, 0.0);
    assert_eq!(objects[1].bounding_poly.normalized_vertices[2].y, 0.5);
}

/// **Test: bearer auth sends the Authorization header instead of the key parameter.**
#[tokio::test]
async fn test_bearer_token_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ANNOTATE_PATH)
        .match_header("authorization", "Bearer ya29.token")
        .with_status(200)
        .with_body(r#"{"responses": [{}]}"#)
        .create_async()
        .await;

    let client = GoogleVisionClient::with_endpoint(
        VisionAuth::BearerToken("ya29.token".to_string()),
        &server.url(),
    )
    .unwrap();
    let objects = client.localize_objects(IMAGE_BYTES).await.unwrap();

    mock.assert_async().await;
    assert!(objects.is_empty());
}

/// **Test: a response with no annotations yields an empty list.**
#[tokio::test]
async fn test_empty_responses_yield_no_objects() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ANNOTATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"responses": []}"#)
        .create_async()
        .await;

    let objects = api_key_client(&server)
        .localize_objects(IMAGE_BYTES)
        .await
        .unwrap();
    assert!(objects.is_empty());
}

/// **Test: non-2xx status maps to VisionError::Status with the body preserved.**
#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ANNOTATE_PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid"}}"#)
        .create_async()
        .await;

    let err = api_key_client(&server)
        .localize_objects(IMAGE_BYTES)
        .await
        .unwrap_err();

    match err {
        VisionError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

/// **Test: a per-image error object maps to VisionError::Api.**
#[tokio::test]
async fn test_per_image_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ANNOTATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"responses": [{"error": {"code": 3, "message": "Bad image data."}}]}"#)
        .create_async()
        .await;

    let err = api_key_client(&server)
        .localize_objects(IMAGE_BYTES)
        .await
        .unwrap_err();

    assert!(matches!(err, VisionError::Api { code: 3, .. }));
    assert!(err.to_string().contains("Bad image data."));
}

/// **Test: a body that is not JSON maps to VisionError::Decode.**
#[tokio::test]
async fn test_undecodable_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ANNOTATE_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = api_key_client(&server)
        .localize_objects(IMAGE_BYTES)
        .await
        .unwrap_err();

    assert!(matches!(err, VisionError::Decode(_)));
}
