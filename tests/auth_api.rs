//! Access middleware: which requests reach protected handlers.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{TestApp, laptop};
use marketplace_api::services::auth::{AccessTokenClaims, AuthService};
use serde_json::json;
use uuid::Uuid;

fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

#[tokio::test]
async fn missing_header_is_unauthenticated() {
    let app = TestApp::new();

    let (status, body) = app
        .json("POST", "/api/listings", Some(laptop()), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");

    let (status, _) = app.json("GET", "/api/listings/user/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(app.repo.is_empty().unwrap());
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthenticated() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("GET")
        .uri("/api/dashboard/stats")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .json("GET", "/api/listings/user/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn token_from_another_secret_is_rejected() {
    let app = TestApp::new();
    let foreign = AuthService::new(b"some-other-secret", 0)
        .issue(Uuid::new_v4(), 600)
        .unwrap();

    let (status, body) = app
        .json("POST", "/api/listings", Some(laptop()), Some(&foreign))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid token");
    assert!(app.repo.is_empty().unwrap());
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::new();
    let expired = app
        .auth
        .sign(&AccessTokenClaims {
            id: Uuid::new_v4().to_string(),
            exp: now() - 120,
            iat: Some(now() - 3600),
        })
        .unwrap();

    let (status, _) = app
        .json("GET", "/api/dashboard/stats", None, Some(&expired))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_with_non_uuid_id_is_rejected() {
    let app = TestApp::new();
    let token = app
        .auth
        .sign(&AccessTokenClaims {
            id: "user-42".to_string(),
            exp: now() + 600,
            iat: None,
        })
        .unwrap();

    let (status, _) = app
        .json("GET", "/api/listings/user/me", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_carrying_sub_identifies_the_seller() {
    #[derive(serde::Serialize)]
    struct SubClaims {
        sub: String,
        exp: u64,
    }

    let app = TestApp::new();
    let me = Uuid::new_v4();
    app.create_listing(me, laptop()).await;

    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &SubClaims {
            sub: me.to_string(),
            exp: now() + 600,
        },
        &jsonwebtoken::EncodingKey::from_secret(common::SECRET.as_bytes()),
    )
    .unwrap();

    let (status, mine) = app
        .json("GET", "/api/listings/user/me", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["seller"]["id"], me.to_string());
}

#[tokio::test]
async fn public_routes_ignore_missing_token() {
    let app = TestApp::new();

    for uri in ["/api/listings", "/api/health", "/api/test"] {
        let (status, _) = app.json("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn dashboard_stats_cover_only_callers_listings() {
    let app = TestApp::new();
    let me = Uuid::new_v4();
    let token = app.token_for(me);

    let mut cheap = laptop();
    cheap["price"] = json!(50.25);
    app.create_listing(me, cheap).await;

    let sold = app.create_listing(me, laptop()).await;
    let (status, _) = app
        .json(
            "PUT",
            &format!("/api/listings/{sold}"),
            Some(json!({ "status": "sold" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.create_listing(Uuid::new_v4(), laptop()).await;

    let (status, stats) = app
        .json("GET", "/api/dashboard/stats", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "totalListings": 2,
            "activeListings": 1,
            "soldListings": 1,
            "totalValue": "350.25"
        })
    );
}

#[tokio::test]
async fn dashboard_stats_for_new_seller_are_zero() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    let (status, stats) = app
        .json("GET", "/api/dashboard/stats", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalListings"], 0);
    assert_eq!(stats["totalValue"], "0.00");
}
