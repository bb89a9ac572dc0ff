//! Integration tests for the reqwest transport against a local stub backend.
//!
//! Run with: cargo test --package landwatch-client --test reqwest_transport

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use landwatch_client::{ApiClient, ClientError, ReqwestTransport, ResponseBody, endpoints};
use landwatch_core::model::ReportFilter;
use landwatch_core::{Role, SessionContext, SessionCredentials};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/json", get(|| async { Json(json!({"a": 1})) }))
        .route(
            "/api/text",
            get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "ok") }),
        )
        .route(
            "/api/reports",
            get(|uri: axum::http::Uri| async move {
                Json(json!([{
                    "id": "r1",
                    "type": "pdf",
                    "ward": null,
                    "details": [uri.query().unwrap_or_default()]
                }]))
            }),
        )
        .route(
            "/api/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({"success": true, "role": "admin", "token": "t-1"})))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"success": false, "message": "Invalid credentials"})),
                    )
                }
            }),
        )
        .route(
            "/api/echo-headers",
            get(|headers: HeaderMap| async move {
                let header_value = |name: header::HeaderName| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                };
                Json(json!({
                    "content_type": header_value(header::CONTENT_TYPE),
                    "authorization": header_value(header::AUTHORIZATION),
                }))
            }),
        )
        .route(
            "/api/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, session: SessionContext) -> ApiClient {
    let transport = ReqwestTransport::new(base_url, Duration::from_secs(5)).unwrap();
    ApiClient::new(Arc::new(transport), session)
}

#[tokio::test]
async fn test_json_and_text_classification() {
    let base = spawn_backend().await;
    let client = client(&base, SessionContext::new());

    let json_body = client
        .fetch(landwatch_client::Endpoint::get("/api/json"), &[], None)
        .await
        .unwrap();
    assert_eq!(json_body, ResponseBody::Json(json!({"a": 1})));

    let text_body = client
        .fetch(landwatch_client::Endpoint::get("/api/text"), &[], None)
        .await
        .unwrap();
    assert_eq!(text_body, ResponseBody::Text("ok".to_string()));
}

#[tokio::test]
async fn test_http_failure_carries_status_and_body() {
    let base = spawn_backend().await;
    let client = client(&base, SessionContext::new());

    let err = client
        .fetch(landwatch_client::Endpoint::get("/api/broken"), &[], None)
        .await
        .unwrap_err();
    match err {
        ClientError::Http {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_failure_message_from_body() {
    let base = spawn_backend().await;
    let client = client(&base, SessionContext::new());

    let err = client
        .login(&landwatch_core::model::LoginRequest {
            email: "a@b.c".to_string(),
            password: "wrong".to_string(),
            role: "admin".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message(), "Invalid credentials");

    let ok = client
        .login(&landwatch_core::model::LoginRequest {
            email: "a@b.c".to_string(),
            password: "secret".to_string(),
            role: "admin".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ok.token.as_deref(), Some("t-1"));
    assert_eq!(ok.role, Some(Role::Admin));
}

#[tokio::test]
async fn test_headers_sent() {
    let base = spawn_backend().await;
    let session = SessionContext::new();
    session.set(SessionCredentials::new("t-9", Role::Officer));
    let client = client(&base, session);

    let body = client
        .fetch(landwatch_client::Endpoint::get("/api/echo-headers"), &[], None)
        .await
        .unwrap()
        .into_json()
        .unwrap();
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["authorization"], "Bearer t-9");
}

#[tokio::test]
async fn test_query_string_reaches_backend() {
    let base = spawn_backend().await;
    let client = client(&base, SessionContext::new());

    let rows = client
        .reports(&ReportFilter::from_fields(Some("North 12"), None))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].details_label(), "ward=North%2012");
    assert_eq!(rows[0].ward_label(), "All");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}"), SessionContext::new());
    let err = client.fetch(endpoints::HEALTH, &[], None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
