//! HTTP-level tests for the auth router
//! Drives the real router over the in-memory store; no database needed.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::infra::memory::MemoryPrincipalRepository;
use crate::presentation::middleware::AUTH_TOKEN_HEADER;
use crate::presentation::router::auth_router;

struct TestApp {
    router: Router,
    repo: MemoryPrincipalRepository,
}

fn app_with(config: AuthConfig) -> TestApp {
    let repo = MemoryPrincipalRepository::default();
    let tokens = Arc::new(TokenService::new(&config).unwrap());
    TestApp {
        router: auth_router(repo.clone(), Arc::new(config), tokens),
        repo,
    }
}

fn app() -> TestApp {
    app_with(AuthConfig::development())
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTH_TOKEN_HEADER, token);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn jane() -> Value {
    json!({
        "email": "Jane@X.com",
        "password": "secret1",
        "fullName": "Jane Doe",
        "enrollmentNumber": "E100"
    })
}

async fn login_jane(app: &TestApp) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/student/login",
        None,
        Some(json!({"enrollmentNumber": "E100", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

mod flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_jane_doe_end_to_end() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/student/register", None, Some(jane())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Student registered successfully");
        assert_eq!(body["data"]["email"], "jane@x.com");
        assert_eq!(body["data"]["role"], "student");
        assert_eq!(body["data"]["enrollmentNumber"], "E100");
        assert!(body["data"].get("passwordHash").is_none());
        assert!(body["data"].get("token").is_none());

        let (status, body) = send(
            &app,
            Method::POST,
            "/student/login",
            None,
            Some(json!({"enrollmentNumber": "E100", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        assert!(body["data"]["expiresAt"].is_string());
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, "/student/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["fullName"], "Jane Doe");

        // A student token does not open the faculty area
        let (status, body) = send(&app, Method::GET, "/faculty/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/faculty/register",
            None,
            Some(json!({"email": "ada@x.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing required fields: password, fullName");
        assert_eq!(body["errors"], json!(["password", "fullName"]));
        assert_eq!(app.repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_enveloped() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/student/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_admin_register_and_login() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/admin/register",
            None,
            Some(json!({"email": "head@x.com", "password": "secret1", "designation": "Director"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Admin registered successfully");
        assert_eq!(body["data"]["designation"], "Director");

        let (status, _) = send(
            &app,
            Method::POST,
            "/admin/login",
            None,
            Some(json!({"email": "head@x.com", "password": "secret1", "role": "HOD"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/admin/login",
            None,
            Some(json!({"email": "head@x.com", "password": "secret1", "role": "Director"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["principal"]["role"], "admin");
    }
}

mod uniqueness_tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_email_conflicts_once() {
        let app = app();
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;

        let mut again = jane();
        again["enrollmentNumber"] = json!("E101");
        again["email"] = json!(" JANE@x.com ");
        let (status, body) = send(&app, Method::POST, "/student/register", None, Some(again)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"], json!(["email"]));
        assert_eq!(app.repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_store_one_record() {
        let app = Arc::new(app());

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let app = app.clone();
                tokio::spawn(async move {
                    send(&app, Method::POST, "/student/register", None, Some(jane()))
                        .await
                        .0
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                StatusCode::CREATED => created += 1,
                StatusCode::CONFLICT => {}
                other => panic!("unexpected status {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(app.repo.count().await, 1);
    }
}

mod credential_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_identifier_and_wrong_password_look_the_same() {
        let app = app();
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;

        let unknown = send(
            &app,
            Method::POST,
            "/student/login",
            None,
            Some(json!({"enrollmentNumber": "E999", "password": "secret1"})),
        )
        .await;
        let wrong = send(
            &app,
            Method::POST,
            "/student/login",
            None,
            Some(json!({"enrollmentNumber": "E100", "password": "secret9"})),
        )
        .await;

        assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown, wrong);
        assert_eq!(unknown.1["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_reset_password() {
        let app = app();
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/student/reset-password",
            None,
            Some(json!({"email": "jane@x.com", "oldPassword": "wrong!!", "newPassword": "secret2"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
        // Old password still works
        login_jane(&app).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/student/reset-password",
            None,
            Some(json!({"email": "jane@x.com", "oldPassword": "secret1", "newPassword": "123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"], json!(["newPassword"]));

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/student/reset-password",
            None,
            Some(json!({"email": "jane@x.com", "oldPassword": "secret1", "newPassword": "secret2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Password reset successful");

        let (status, _) = send(
            &app,
            Method::POST,
            "/student/login",
            None,
            Some(json!({"enrollmentNumber": "E100", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            Method::POST,
            "/student/login",
            None,
            Some(json!({"enrollmentNumber": "E100", "password": "secret2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

mod gate_tests {
    use super::*;

    #[tokio::test]
    async fn test_gate_statuses() {
        let app = app();
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;
        let token = login_jane(&app).await;

        let (status, body) = send(&app, Method::GET, "/student/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication required");

        let (status, body) = send(&app, Method::GET, "/student/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or expired token");

        let (status, _) = send(&app, Method::GET, "/admin/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_bearer_header_accepted() {
        let app = app();
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;
        let token = login_jane(&app).await;

        let request = Request::builder()
            .uri("/student/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_for_deleted_principal_is_not_found() {
        let app = app();
        let (_, body) = send(&app, Method::POST, "/student/register", None, Some(jane())).await;
        let token = login_jane(&app).await;

        let id = crate::domain::value_object::principal_id::PrincipalId::parse_str(
            body["data"]["principalId"].as_str().unwrap(),
        )
        .unwrap();
        app.repo.remove(&id).await.unwrap();

        let (status, _) = send(&app, Method::GET, "/student/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod logout_tests {
    use super::*;

    #[tokio::test]
    async fn test_logout_is_advisory_by_default() {
        let app = app();
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;
        let token = login_jane(&app).await;

        let (status, body) = send(&app, Method::POST, "/student/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logged out successfully");

        let (status, _) = send(&app, Method::GET, "/student/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logout_revokes_when_enabled() {
        let app = app_with(AuthConfig {
            revoke_on_logout: true,
            ..AuthConfig::development()
        });
        send(&app, Method::POST, "/student/register", None, Some(jane())).await;
        let token = login_jane(&app).await;

        let (status, _) = send(&app, Method::POST, "/student/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/student/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // No token at all is still fine
        let (status, _) = send(&app, Method::POST, "/student/logout", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
