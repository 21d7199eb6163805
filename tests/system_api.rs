//! Health, ping, uploads and CORS.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{FakeMediaHost, TestApp};
use tower::ServiceExt;

const BOUNDARY: &str = "----marketplace-test-boundary";

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_process_and_store() {
    let app = TestApp::new();

    let (status, body) = app.json("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["env"], "development");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn ping_answers() {
    let app = TestApp::new();

    let (status, body) = app.json("GET", "/api/test", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Backend running");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.json("GET", "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_sends_image_to_media_host() {
    let app = TestApp::new();

    let body = multipart_body("image", "phone.png", "image/png", b"\x89PNG fake");
    let (status, res) = app.send(upload_request(body)).await;
    assert_eq!(status, StatusCode::OK, "{res}");
    assert_eq!(res["success"], true);
    assert_eq!(res["filename"], "phone.png");
    assert_eq!(res["url"], "https://media.test/e-cycle-uploads/phone.png");
    assert_eq!(res["public_id"], "e-cycle-uploads/phone.png");

    let uploads = app.media.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].bytes, b"\x89PNG fake");
}

#[tokio::test]
async fn upload_without_file_is_bad_request() {
    let app = TestApp::new();

    let body = multipart_body("document", "notes.png", "image/png", b"data");
    let (status, res) = app.send(upload_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "No file uploaded");

    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .body(Body::empty())
        .unwrap();
    let (status, res) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "No file uploaded");
}

#[tokio::test]
async fn upload_rejects_non_images() {
    let app = TestApp::new();

    let body = multipart_body("image", "notes.txt", "text/plain", b"hello");
    let (status, res) = app.send(upload_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "Only images allowed");
    assert!(app.media.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upload_rejects_oversized_files() {
    let app = TestApp::new();

    let data = vec![0u8; marketplace_api::api::handlers::upload::MAX_UPLOAD_BYTES + 1];
    let body = multipart_body("image", "huge.jpg", "image/jpeg", &data);
    let (status, res) = app.send(upload_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "File too large");
}

#[tokio::test]
async fn upload_over_transport_limit_is_file_too_large() {
    let app = TestApp::new();

    let data = vec![0u8; 6 * 1024 * 1024];
    let body = multipart_body("image", "huge.jpg", "image/jpeg", &data);
    let mut request = upload_request(body.clone());
    request
        .headers_mut()
        .insert(header::CONTENT_LENGTH, body.len().into());

    let (status, res) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "File too large");
    assert!(app.media.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_json_body_gets_json_error() {
    let app = TestApp::new();

    let body = vec![b' '; 6 * 1024 * 1024];
    let request = Request::builder()
        .method("POST")
        .uri("/api/listings")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let (status, res) = app.send(request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res["message"], "Request body too large");
}

#[tokio::test]
async fn upload_failure_reports_error_detail() {
    let app = TestApp::with_media(FakeMediaHost {
        fail: true,
        ..Default::default()
    });

    let body = multipart_body("image", "phone.png", "image/png", b"png");
    let (status, res) = app.send(upload_request(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res["message"], "Upload failed");
    assert!(res["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn list_uploads_passes_query_through() {
    let app = TestApp::new();

    let (status, res) = app
        .json(
            "GET",
            "/api/upload/list?folder=phones&max_results=5&next_cursor=abc",
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["success"], true);
    assert_eq!(res["resources"][0]["public_id"], "phones/a");
    assert_eq!(res["resources"][0]["max_results"], 5);
    assert_eq!(res["next_cursor"], "abc-next");
}

#[tokio::test]
async fn list_uploads_uses_defaults() {
    let app = TestApp::new();

    let (status, res) = app.json("GET", "/api/upload/list", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["resources"][0]["public_id"], "e-cycle-uploads/a");
    assert_eq!(res["resources"][0]["max_results"], 50);
    assert!(res["next_cursor"].is_null());
}

#[tokio::test]
async fn list_uploads_failure_is_reported() {
    let app = TestApp::with_media(FakeMediaHost {
        fail: true,
        ..Default::default()
    });

    let (status, res) = app.json("GET", "/api/upload/list", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res["success"], false);
    assert!(res["error"].is_string());
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let app = TestApp::new();

    let preflight = |origin: &'static str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/listings")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .router
        .clone()
        .oneshot(preflight("http://shop.test"))
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://shop.test"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    let response = app
        .router
        .clone()
        .oneshot(preflight("http://evil.test"))
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
