use crate::fake_smtp::AuthBehaviour;
use crate::helpers::{spawn_app, spawn_app_with, valid_submission};

#[tokio::test]
async fn preflight_returns_204_with_cors_headers() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.contact_request(reqwest::Method::OPTIONS).await;

    // Assert
    assert_eq!(204, response.status().as_u16());
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert!(headers.get("access-control-allow-credentials").is_none());
    assert!(response.bytes().await.unwrap().is_empty());
    assert_eq!(app.smtp_server.log().connections, 0);
}

#[tokio::test]
async fn other_methods_return_405_with_an_allow_header() {
    // Arrange
    let app = spawn_app().await;

    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        // Act
        let response = app.contact_request(method.clone()).await;

        // Assert
        assert_eq!(
            405,
            response.status().as_u16(),
            "{} was not rejected",
            method
        );
        assert_eq!(response.headers()["allow"], "POST, OPTIONS");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Method Not Allowed");
    }
    assert_eq!(app.smtp_server.log().connections, 0);
}

#[tokio::test]
async fn every_contact_response_carries_cors_headers() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let accepted = app.post_contact(&valid_submission()).await;
    let rejected = app.post_contact(&serde_json::json!({})).await;

    // Assert
    assert_eq!(accepted.headers()["access-control-allow-origin"], "*");
    assert_eq!(rejected.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn configured_origin_and_credentials_are_advertised() {
    // Arrange
    let app = spawn_app_with(AuthBehaviour::Accept, |c| {
        c.application.cors.allow_origin = "https://felder-itsolutions.at".into();
        c.application.cors.allow_credentials = true;
    })
    .await;

    // Act
    let response = app.contact_request(reqwest::Method::OPTIONS).await;

    // Assert
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "https://felder-itsolutions.at"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn oversized_bodies_get_a_json_413() {
    // Arrange
    let app = spawn_app_with(AuthBehaviour::Accept, |c| c.application.max_body_bytes = 1024).await;
    let mut body = valid_submission();
    body["message"] = "a".repeat(4096).into();

    // Act
    let response = app.post_contact(&body).await;

    // Assert
    assert_eq!(413, response.status().as_u16());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Payload Too Large");
    assert_eq!(app.smtp_server.log().connections, 0);
}
