//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`, except the unauthenticated `/health`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Accounts
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        // Sessions
        .route(
            "/chat/sessions",
            post(handlers::session::create_session).get(handlers::session::list_sessions),
        )
        .route("/chat/sessions/{id}", get(handlers::session::get_history))
        // Real-time chat channel
        .route("/chat/ws/{session_id}", get(handlers::ws::chat_ws));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use chatdesk_core::chat::service::ChatService;
    use chatdesk_core::service::account::AccountService;
    use chatdesk_core::service::credentials::CredentialService;
    use chatdesk_infra::crypto::password::Argon2PasswordHasher;
    use chatdesk_infra::crypto::token::JwtTokenSigner;
    use chatdesk_infra::sqlite::chat::SqliteChatRepository;
    use chatdesk_infra::sqlite::pool::DatabasePool;
    use chatdesk_infra::sqlite::user::SqliteUserRepository;
    use chatdesk_types::config::AppConfig;

    /// Fresh state on a tempdir-backed SQLite database.
    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("chatdesk.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await.unwrap();
        let config = AppConfig::default();

        let account = AccountService::new(
            SqliteUserRepository::new(db_pool.clone()),
            CredentialService::new(
                Argon2PasswordHasher::new(),
                JwtTokenSigner::from_config(&config.auth),
            ),
        );
        let chat = ChatService::new(SqliteChatRepository::new(db_pool.clone()));

        let state = AppState {
            account: Arc::new(account),
            chat: Arc::new(chat),
            config,
            data_dir: dir.path().to_path_buf(),
            db_pool,
        };
        // Keep the tempdir alive for the rest of the test process.
        std::mem::forget(dir);
        state
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn post_form(uri: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    fn get_authed(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    fn post_authed(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn register_and_login(app: &Router, username: &str) -> String {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": username, "password": "s3cret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_form(
                "/api/v1/auth/login",
                &format!("username={username}&password=s3cret"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_register_returns_profile_without_password() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": "alice", "email": "alice@example.com", "password": "s3cret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let raw = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!raw.contains("password"));

        let body: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], "alice@example.com");
        assert!(body["id"].as_str().unwrap().parse::<Uuid>().is_ok());
    }

    #[tokio::test]
    async fn test_register_without_email() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": "alice", "password": "s3cret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["username"], "alice");
        assert!(body["email"].is_null());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let app = build_router(test_state().await);

        let payload = json!({"username": "alice", "password": "one"});
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/auth/register", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": "alice", "password": "two"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn test_register_blank_username_rejected() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": "   ", "password": "s3cret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_issues_bearer_token() {
        let app = build_router(test_state().await);

        app.clone()
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": "alice", "password": "s3cret"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(post_form("/api/v1/auth/login", "username=alice&password=s3cret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["token_type"], "bearer");
        assert!(!body["access_token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_unauthorized() {
        let app = build_router(test_state().await);

        app.clone()
            .oneshot(post_json(
                "/api/v1/auth/register",
                &json!({"username": "alice", "password": "s3cret"}),
            ))
            .await
            .unwrap();

        // Wrong password and unknown username look identical.
        for form in ["username=alice&password=wrong", "username=nobody&password=s3cret"] {
            let response = app
                .clone()
                .oneshot(post_form("/api/v1/auth/login", form))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );

            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
        }
    }

    #[tokio::test]
    async fn test_sessions_require_auth() {
        let app = build_router(test_state().await);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let response = app
            .oneshot(get_authed("/api/v1/chat/sessions", "not-a-real-token"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_create_and_list_sessions() {
        let app = build_router(test_state().await);
        let token = register_and_login(&app, "alice").await;

        let response = app
            .clone()
            .oneshot(post_authed("/api/v1/chat/sessions", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let first = body_json(response).await;
        assert_eq!(first["is_active"], true);
        let first_id = first["id"].as_str().unwrap().to_string();

        app.clone()
            .oneshot(post_authed("/api/v1/chat/sessions", &token))
            .await
            .unwrap();

        let response = app
            .oneshot(get_authed("/api/v1/chat/sessions", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sessions = body_json(response).await;
        let sessions = sessions.as_array().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0]["id"], first_id.as_str());
    }

    #[tokio::test]
    async fn test_sessions_are_scoped_to_the_caller() {
        let app = build_router(test_state().await);
        let alice = register_and_login(&app, "alice").await;
        let bob = register_and_login(&app, "bob").await;

        app.clone()
            .oneshot(post_authed("/api/v1/chat/sessions", &alice))
            .await
            .unwrap();

        let response = app
            .oneshot(get_authed("/api/v1/chat/sessions", &bob))
            .await
            .unwrap();
        let sessions = body_json(response).await;
        assert_eq!(sessions.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_history_missing_session() {
        let app = build_router(test_state().await);
        let token = register_and_login(&app, "alice").await;

        let response = app
            .oneshot(get_authed(
                &format!("/api/v1/chat/sessions/{}", Uuid::now_v7()),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");
        assert_eq!(body["error"]["message"], "Session not found");
    }

    #[tokio::test]
    async fn test_history_foreign_session_forbidden() {
        let app = build_router(test_state().await);
        let alice = register_and_login(&app, "alice").await;
        let bob = register_and_login(&app, "bob").await;

        let response = app
            .clone()
            .oneshot(post_authed("/api/v1/chat/sessions", &alice))
            .await
            .unwrap();
        let session = body_json(response).await;
        let session_id = session["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(get_authed(&format!("/api/v1/chat/sessions/{session_id}"), &bob))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_SESSION_OWNER");
    }

    #[tokio::test]
    async fn test_history_invalid_session_id() {
        let app = build_router(test_state().await);
        let token = register_and_login(&app, "alice").await;

        let response = app
            .oneshot(get_authed("/api/v1/chat/sessions/not-a-uuid", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_history_returns_ordered_transcript() {
        let state = test_state().await;
        let app = build_router(state.clone());
        let token = register_and_login(&app, "alice").await;

        let response = app
            .clone()
            .oneshot(post_authed("/api/v1/chat/sessions", &token))
            .await
            .unwrap();
        let session = body_json(response).await;
        let session_id: Uuid = session["id"].as_str().unwrap().parse().unwrap();

        // Exchanges are normally recorded over the WebSocket channel; drive
        // the service directly to seed the transcript.
        state.chat.record_exchange(session_id, "hello").await.unwrap();
        state
            .chat
            .record_exchange(session_id, "what is the price?")
            .await
            .unwrap();

        let response = app
            .oneshot(get_authed(&format!("/api/v1/chat/sessions/{session_id}"), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        // Session fields are flattened alongside the transcript.
        assert_eq!(body["id"].as_str().unwrap(), session_id.to_string());
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["origin"], "user");
        assert_eq!(messages[0]["content"], "hello");
        assert_eq!(messages[1]["origin"], "bot");
        assert_eq!(messages[2]["content"], "what is the price?");
        assert_eq!(messages[3]["origin"], "bot");
    }

    #[tokio::test]
    async fn test_expired_token_reports_expiry() {
        use chatdesk_core::service::token::TokenSigner;

        let state = test_state().await;
        // Sign a token that expired five minutes ago with the same dev key.
        let mut auth = chatdesk_types::config::AuthConfig::default();
        auth.access_token_ttl_minutes = -5;
        let expired_signer = JwtTokenSigner::from_config(&auth);
        state
            .account
            .register(chatdesk_types::user::RegisterRequest {
                username: "alice".to_string(),
                email: None,
                password: "s3cret".to_string(),
            })
            .await
            .unwrap();
        let token = expired_signer.issue("alice").unwrap();

        let app = build_router(state);
        let response = app
            .oneshot(get_authed("/api/v1/chat/sessions", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
    }
}
