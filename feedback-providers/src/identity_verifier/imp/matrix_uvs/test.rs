use std::sync::Arc;

use serde_json::json;
use wiremock::{
    http::Method,
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use zeroize::Zeroizing;

use super::{MatrixUserVerificationService, Params};
use crate::{
    common_models::session::BearerCredential,
    http_client::imp::reqwest_client::ReqwestClient,
    identity_verifier::{error::IdentityVerifierError, IdentityVerdict, IdentityVerifier},
};

fn create_verifier(mock_server: &MockServer, auth_token: Option<&str>) -> MatrixUserVerificationService {
    MatrixUserVerificationService::new(
        Arc::new(ReqwestClient::default()),
        Params {
            url: format!("{}/verify/user", mock_server.uri()).parse().unwrap(),
            server_name: "domain.tld".to_string(),
            auth_token: auth_token.map(|token| Zeroizing::new(token.to_string())),
        },
    )
}

fn credential() -> BearerCredential {
    BearerCredential::from("openid-token".to_string())
}

#[tokio::test]
async fn test_verify_known_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/verify/user"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "matrix_server_name": "domain.tld",
            "token": "openid-token",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": { "user": true },
            "user_id": "@alice:domain.tld",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let verdict = create_verifier(&mock_server, None)
        .verify(&credential())
        .await
        .unwrap();

    assert_eq!(
        verdict,
        IdentityVerdict {
            is_user: true,
            user_id: Some("@alice:domain.tld".to_string()),
        }
    );
    assert_eq!(verdict.verified_user_id(), Some("@alice:domain.tld"));
}

#[tokio::test]
async fn test_verify_unknown_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/verify/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": { "user": false },
            "user_id": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let verdict = create_verifier(&mock_server, None)
        .verify(&credential())
        .await
        .unwrap();

    assert!(!verdict.is_user);
    assert_eq!(verdict.verified_user_id(), None);
}

#[tokio::test]
async fn test_verify_sends_service_auth_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/verify/user"))
        .and(header("authorization", "Bearer uvs-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": { "user": true },
            "user_id": "@bob:domain.tld",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let verdict = create_verifier(&mock_server, Some("uvs-secret"))
        .verify(&credential())
        .await
        .unwrap();

    assert_eq!(verdict.verified_user_id(), Some("@bob:domain.tld"));
}

#[tokio::test]
async fn test_verify_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/verify/user"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = create_verifier(&mock_server, None)
        .verify(&credential())
        .await;

    assert!(matches!(result, Err(IdentityVerifierError::Unreachable(_))));
}

#[tokio::test]
async fn test_verify_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/verify/user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = create_verifier(&mock_server, None)
        .verify(&credential())
        .await;

    assert!(matches!(
        result,
        Err(IdentityVerifierError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_verify_missing_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/verify/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "@alice:domain.tld",
        })))
        .mount(&mock_server)
        .await;

    let result = create_verifier(&mock_server, None)
        .verify(&credential())
        .await;

    assert!(matches!(
        result,
        Err(IdentityVerifierError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_verify_unreachable() {
    let mock_server = MockServer::start().await;
    let verifier = create_verifier(&mock_server, None);
    drop(mock_server);

    let result = verifier.verify(&credential()).await;

    assert!(matches!(result, Err(IdentityVerifierError::Unreachable(_))));
}

#[test]
fn test_verdict_without_user_id_is_not_a_user() {
    let verdict = IdentityVerdict {
        is_user: true,
        user_id: Some(String::new()),
    };
    assert_eq!(verdict.verified_user_id(), None);

    let verdict = IdentityVerdict {
        is_user: true,
        user_id: None,
    };
    assert_eq!(verdict.verified_user_id(), None);
}
