use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, AUTHORIZATION,
            CONTENT_TYPE,
        },
        Method, Request, StatusCode,
    },
    response::Response,
    Router,
};
use feedback_core::{config::FeedbackConfig, FeedbackCore};
use feedback_providers::{
    common_models::session::SessionToken,
    feedback_storage::{
        error::FeedbackStorageError, imp::in_memory::InMemoryFeedbackStorage, FeedbackStorage,
        MockFeedbackStorage,
    },
    identity_verifier::{
        error::IdentityVerifierError, IdentityVerdict, MockIdentityVerifier,
    },
};
use serde_json::json;
use tower::ServiceExt;

use super::{router, FEEDBACK_PATH, TOKEN_PATH};

fn config() -> FeedbackConfig {
    let env = HashMap::from([
        ("OIDC_VALIDATION_URL", "http://uvs.local/verify/user"),
        ("MATRIX_SERVER_NAME", "domain.tld"),
        ("JWT_SIGNATURE", "secret"),
    ]);

    FeedbackConfig::from_lookup(|name| env.get(name).map(|value| value.to_string())).unwrap()
}

fn verifier_accepting() -> MockIdentityVerifier {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify().returning(|_| {
        Ok(IdentityVerdict {
            is_user: true,
            user_id: Some("@alice:domain.tld".to_owned()),
        })
    });

    verifier
}

fn create_app(verifier: MockIdentityVerifier, storage: Arc<dyn FeedbackStorage>) -> Router {
    router(Arc::new(FeedbackCore::with_providers(
        &config(),
        Arc::new(verifier),
        storage,
    )))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}

fn token_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(TOKEN_PATH);
    if let Some(authorization) = authorization {
        builder = builder.header(AUTHORIZATION, authorization);
    }

    builder.body(Body::empty()).unwrap()
}

fn feedback_request(authorization: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(FEEDBACK_PATH)
        .header(AUTHORIZATION, authorization)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn session_token(app: &Router) -> String {
    let response = send(app, token_request(Some("Bearer openid-token"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    body_string(response).await
}

#[tokio::test]
async fn test_get_token() {
    let app = create_app(
        verifier_accepting(),
        Arc::new(InMemoryFeedbackStorage::default()),
    );

    let response = send(&app, token_request(Some("Bearer openid-token"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body_string(response).await.split('.').count(), 3);
}

#[tokio::test]
async fn test_get_token_malformed_header() {
    let app = create_app(
        MockIdentityVerifier::new(),
        Arc::new(InMemoryFeedbackStorage::default()),
    );

    for authorization in [None, Some("Bearer"), Some("Bearer a b"), Some("bearer x")] {
        let response = send(&app, token_request(authorization)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

#[tokio::test]
async fn test_get_token_user_not_valid() {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify().once().returning(|_| {
        Ok(IdentityVerdict {
            is_user: false,
            user_id: None,
        })
    });
    let app = create_app(verifier, Arc::new(InMemoryFeedbackStorage::default()));

    let response = send(&app, token_request(Some("Bearer openid-token"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_token_verifier_unreachable() {
    let mut verifier = MockIdentityVerifier::new();
    verifier
        .expect_verify()
        .once()
        .returning(|_| Err(IdentityVerifierError::Unreachable("refused".to_owned())));
    let app = create_app(verifier, Arc::new(InMemoryFeedbackStorage::default()));

    let response = send(&app, token_request(Some("Bearer openid-token"))).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_preflight() {
    let app = create_app(
        MockIdentityVerifier::new(),
        Arc::new(InMemoryFeedbackStorage::default()),
    );

    for path in [TOKEN_PATH, FEEDBACK_PATH] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(path)
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
            .body(Body::empty())
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization,content-type"
        );
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_METHODS],
            "GET,HEAD,PUT,PATCH,POST,DELETE"
        );
    }
}

#[tokio::test]
async fn test_post_feedback_upserts() {
    let storage = Arc::new(InMemoryFeedbackStorage::default());
    let app = create_app(verifier_accepting(), storage.clone());
    let token = session_token(&app).await;
    let authorization = format!("Bearer {token}");

    for (rating, comment) in [(3, "ok"), (5, "better")] {
        let body = json!({ "rating": rating, "ratingComment": comment, "metadata": {} });
        let response = send(&app, feedback_request(&authorization, body.to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    assert_eq!(storage.count().await.unwrap(), 1);
    let stored = storage
        .get_by_token(&SessionToken::from(token))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content.rating, 5);
    assert_eq!(stored.content.rating_comment, "better");
}

#[tokio::test]
async fn test_post_feedback_invalid_body() {
    let app = create_app(
        verifier_accepting(),
        Arc::new(InMemoryFeedbackStorage::default()),
    );
    let authorization = format!("Bearer {}", session_token(&app).await);

    let response = send(&app, feedback_request(&authorization, "{\"rating\":")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_feedback_invalid_token() {
    let mut storage = MockFeedbackStorage::new();
    storage.expect_upsert().never();
    let app = create_app(MockIdentityVerifier::new(), Arc::new(storage));
    let body = json!({ "rating": 3, "ratingComment": "ok", "metadata": {} }).to_string();

    let response = send(&app, feedback_request("Bearer a.b.c", body)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_post_feedback_storage_failure() {
    let mut storage = MockFeedbackStorage::new();
    storage
        .expect_upsert()
        .once()
        .returning(|_, _| Err(FeedbackStorageError::Upsert("locked".to_owned())));
    let app = create_app(verifier_accepting(), Arc::new(storage));
    let authorization = format!("Bearer {}", session_token(&app).await);
    let body = json!({ "rating": 3, "ratingComment": "ok", "metadata": {} }).to_string();

    let response = send(&app, feedback_request(&authorization, body)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unsupported_method() {
    let app = create_app(
        MockIdentityVerifier::new(),
        Arc::new(InMemoryFeedbackStorage::default()),
    );

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(FEEDBACK_PATH)
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
