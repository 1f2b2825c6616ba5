//! Session guard integration tests
//!
//! Drive the guard through a `ServiceContext` wired with a scripted
//! transport and an on-disk session store in a temporary directory.

use serde_json::json;
use shorty::api::{ApiResponse, ScriptedTransport};
use shorty::client::ServiceContext;
use shorty::config::StaticConfig;
use shorty::errors::ShortyError;
use shorty::flows::MemoryClipboard;
use shorty::session::{GuardDecision, IdentityEvent, OAuthProvider, Route, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

fn context_with(transport: Arc<ScriptedTransport>, dir: &TempDir) -> (ServiceContext, SessionStore) {
    let store = SessionStore::new(dir.path().join("session.json"));
    let ctx = ServiceContext::with_parts(
        Arc::new(StaticConfig::default()),
        transport,
        Some(store.clone()),
        Arc::new(MemoryClipboard::new()),
    )
    .unwrap();
    (ctx, store)
}

fn me_ok(username: &str) -> ApiResponse {
    ApiResponse::json(200, json!({"username": username, "email": format!("{}@example.com", username)}))
}

#[tokio::test]
async fn test_protected_route_allowed_with_valid_identity() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(me_ok("ada"));
    let (ctx, _) = context_with(transport.clone(), &dir);

    let decision = ctx.guard().activate(Route::Analytics).await;
    match decision {
        GuardDecision::Allow { route, session } => {
            assert_eq!(route, Route::Analytics);
            assert_eq!(session.unwrap().username, "ada");
        }
        other => panic!("expected Allow, got {:?}", other),
    }
    assert_eq!(transport.requests()[0].path(), "/api/me/");
    assert!(ctx.session().is_signed_in());
}

#[tokio::test]
async fn test_redirects_on_non_success_status() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(ApiResponse::json(401, json!({"detail": "Not authenticated"})));
    let (ctx, _) = context_with(transport, &dir);

    let decision = ctx.guard().activate(Route::CreateUrl).await;
    assert_eq!(decision, GuardDecision::RedirectToLogin);
    assert_eq!(decision.route(), Route::Login);
    assert!(ctx.current_session().is_none());
}

#[tokio::test]
async fn test_redirects_on_missing_username() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(ApiResponse::json(200, json!({"email": "ada@example.com"})));
    let (ctx, _) = context_with(transport, &dir);

    assert_eq!(
        ctx.guard().activate(Route::Settings).await,
        GuardDecision::RedirectToLogin
    );
}

#[tokio::test]
async fn test_redirects_on_transport_failure_without_retry() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_error(ShortyError::transport("connection refused"));
    let (ctx, _) = context_with(transport.clone(), &dir);

    assert_eq!(
        ctx.guard().activate(Route::Home).await,
        GuardDecision::RedirectToLogin
    );
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_login_route_never_checks_identity() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    let (ctx, _) = context_with(transport.clone(), &dir);

    let decision = ctx.guard().activate(Route::Login).await;
    assert_eq!(decision.route(), Route::Login);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_last_identity_event_wins_over_slow_check() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(me_ok("stale"));
    transport.set_delay(Some(Duration::from_millis(100)));
    let (ctx, _) = context_with(transport, &dir);

    let guard = ctx.guard().clone();
    let check = tokio::spawn(async move { guard.check().await });

    // 检查仍在进行中时收到登出事件
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctx.guard().handle_event(IdentityEvent::SignedOut);

    let outcome = check.await.unwrap();
    assert!(outcome.is_none());
    assert!(ctx.current_session().is_none());
}

#[tokio::test]
async fn test_login_with_token_persists_and_restores() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(me_ok("ada"));
    let (ctx, store) = context_with(transport.clone(), &dir);

    let session = assert_ok!(ctx.guard().login_with_token("  s3cr3t  ").await);
    assert_eq!(session.token, "s3cr3t");
    assert_eq!(session.display_name(), "ada@example.com");
    assert_eq!(
        transport.requests()[0].header("Cookie"),
        Some("sessionid=s3cr3t")
    );

    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.username, "ada");

    // 新进程：从存储恢复 token，但在守卫确认前不视为已登录
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(me_ok("ada"));
    let (fresh, _) = context_with(transport.clone(), &dir);
    let restored = fresh.guard().restore().unwrap();
    assert!(restored.is_some());
    assert!(fresh.current_session().is_none());

    assert!(fresh.guard().check().await.is_some());
    assert_eq!(
        transport.requests()[0].header("Cookie"),
        Some("sessionid=s3cr3t")
    );
}

#[tokio::test]
async fn test_login_with_rejected_token() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(ApiResponse::json(403, json!({"detail": "Invalid session"})));
    let (ctx, store) = context_with(transport, &dir);

    let err = assert_err!(ctx.guard().login_with_token("bogus").await);
    assert!(matches!(err, ShortyError::Unauthenticated(_)));
    assert!(err.message().contains("Invalid session"));
    assert!(ctx.guard().client().session_token().is_none());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_login_with_empty_token_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    let (ctx, _) = context_with(transport.clone(), &dir);

    let err = assert_err!(ctx.guard().login_with_token("   ").await);
    assert!(matches!(err, ShortyError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_logout_clears_store_and_redirects() {
    let dir = TempDir::new().unwrap();
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(me_ok("ada"));
    let (ctx, store) = context_with(transport.clone(), &dir);
    assert_ok!(ctx.guard().login_with_token("s3cr3t").await);

    let mut rx = ctx.session().subscribe();
    assert_ok!(ctx.guard().logout());
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().session.is_none());
    assert!(store.load().unwrap().is_none());

    transport.push_response(ApiResponse::json(403, json!({})));
    assert_eq!(
        ctx.guard().activate(Route::Analytics).await,
        GuardDecision::RedirectToLogin
    );
    assert_eq!(transport.requests()[1].header("Cookie"), None);
}

#[test]
fn test_oauth_login_urls() {
    let dir = TempDir::new().unwrap();
    let (ctx, _) = context_with(Arc::new(ScriptedTransport::new()), &dir);

    assert_eq!(
        ctx.guard().login_url(OAuthProvider::Github),
        "http://localhost:8000/accounts/github/login/"
    );
    assert_eq!(
        ctx.guard().login_url("google".parse().unwrap()),
        "http://localhost:8000/accounts/google/login/"
    );
    assert!("gitlab".parse::<OAuthProvider>().is_err());
}
