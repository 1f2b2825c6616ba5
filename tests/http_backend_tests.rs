//! End-to-end tests against a real HTTP fake backend
//!
//! An actix-web server on an ephemeral port plays the shortener backend;
//! the client talks to it through the ureq transport, so cookies, the CSRF
//! header and JSON bodies cross a real socket.

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use parking_lot::Mutex;
use serde_json::{Value, json};
use shorty::api::{ShortLink, UreqTransport};
use shorty::client::ServiceContext;
use shorty::config::StaticConfig;
use shorty::flows::{AliasMode, AnalyticsView, CreateForm, MemoryClipboard};
use shorty::session::{GuardDecision, Route, SessionStore};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const VALID_SESSION: &str = "valid-session";
const CSRF_TOKEN: &str = "csrf-abc";

struct Backend {
    links: Mutex<Vec<ShortLink>>,
    base: Mutex<String>,
    profile_emails: Mutex<Vec<String>>,
}

fn authenticated(req: &HttpRequest) -> bool {
    req.cookie("sessionid")
        .is_some_and(|c| c.value() == VALID_SESSION)
}

fn not_logged_in() -> HttpResponse {
    HttpResponse::Forbidden()
        .json(json!({"detail": "Authentication credentials were not provided."}))
}

async fn me(req: HttpRequest) -> HttpResponse {
    if !authenticated(&req) {
        return not_logged_in();
    }
    HttpResponse::Ok().json(json!({"username": "ada", "email": "ada@example.com"}))
}

async fn shorten(
    req: HttpRequest,
    state: web::Data<Backend>,
    body: web::Json<Value>,
) -> HttpResponse {
    if !authenticated(&req) {
        return not_logged_in();
    }
    let Some(original_url) = body.get("original_url").and_then(Value::as_str) else {
        return HttpResponse::BadRequest().json(json!({"error": "original_url is required"}));
    };
    let code = match body.get("custom_code").and_then(Value::as_str) {
        Some("taken") => return HttpResponse::BadRequest().json(json!({"error": "bad code"})),
        Some(code) => code.to_string(),
        None => format!("gen{:03}", state.links.lock().len() + 1),
    };
    state.links.lock().push(ShortLink {
        original_url: original_url.to_string(),
        short_code: code.clone(),
        clicks: 0,
    });
    let short_url = format!("{}/s/{}", state.base.lock(), code);
    HttpResponse::Created().json(json!({"short_url": short_url}))
}

async fn analytics(
    req: HttpRequest,
    state: web::Data<Backend>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if !authenticated(&req) {
        return not_logged_in();
    }
    if query.get("username").map(String::as_str) != Some("ada") {
        return HttpResponse::BadRequest().json(json!({"error": "unknown user"}));
    }
    HttpResponse::Ok().json(&*state.links.lock())
}

async fn csrf() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Set-Cookie", format!("csrftoken={}; Path=/", CSRF_TOKEN)))
        .json(json!({}))
}

async fn delete_link(
    req: HttpRequest,
    state: web::Data<Backend>,
    path: web::Path<String>,
) -> HttpResponse {
    if !authenticated(&req) {
        return not_logged_in();
    }
    let header = req
        .headers()
        .get("X-CSRFToken")
        .and_then(|v| v.to_str().ok());
    let cookie = req.cookie("csrftoken");
    if header != Some(CSRF_TOKEN) || cookie.as_ref().map(|c| c.value()) != Some(CSRF_TOKEN) {
        return HttpResponse::Forbidden().json(json!({"detail": "CSRF Failed"}));
    }
    let code = path.into_inner();
    let mut links = state.links.lock();
    let before = links.len();
    links.retain(|l| l.short_code != code);
    if links.len() == before {
        return HttpResponse::NotFound().json(json!({"error": "not found"}));
    }
    HttpResponse::NoContent().finish()
}

async fn update_profile(
    req: HttpRequest,
    state: web::Data<Backend>,
    body: web::Json<Value>,
) -> HttpResponse {
    if !authenticated(&req) {
        return HttpResponse::Unauthorized().json(json!({"error": "Login required"}));
    }
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    state.profile_emails.lock().push(email.to_string());
    HttpResponse::Ok().json(json!({"message": "ok"}))
}

struct TestServer {
    addr: SocketAddr,
    state: web::Data<Backend>,
    handle: actix_web::dev::ServerHandle,
}

fn start_backend(links: Vec<ShortLink>) -> TestServer {
    let state = web::Data::new(Backend {
        links: Mutex::new(links),
        base: Mutex::new(String::new()),
        profile_emails: Mutex::new(Vec::new()),
    });
    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/api/me/", web::get().to(me))
            .route("/api/shorten/", web::post().to(shorten))
            .route("/api/analytics/", web::get().to(analytics))
            .route("/api/analytics/{code}/", web::delete().to(delete_link))
            .route("/api/csrf/", web::get().to(csrf))
            .route("/api/update-profile/", web::post().to(update_profile))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    *state.base.lock() = format!("http://{}", addr);

    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);
    TestServer {
        addr,
        state,
        handle,
    }
}

fn client_for(server: &TestServer, dir: &TempDir) -> ServiceContext {
    let mut config = StaticConfig::default();
    config.api.base_url = format!("http://{}", server.addr);
    ServiceContext::with_parts(
        Arc::new(config),
        Arc::new(UreqTransport::new(Duration::from_secs(5))),
        Some(SessionStore::new(dir.path().join("session.json"))),
        Arc::new(MemoryClipboard::new()),
    )
    .unwrap()
}

#[actix_rt::test]
async fn test_guard_redirects_without_cookie() {
    let server = start_backend(vec![]);
    let dir = TempDir::new().unwrap();
    let ctx = client_for(&server, &dir);

    assert_eq!(
        ctx.guard().activate(Route::Analytics).await,
        GuardDecision::RedirectToLogin
    );

    server.handle.stop(true).await;
}

#[actix_rt::test]
async fn test_full_session_round() {
    let server = start_backend(vec![ShortLink {
        original_url: "https://example.com/old".into(),
        short_code: "abc123".into(),
        clicks: 7,
    }]);
    let dir = TempDir::new().unwrap();
    let ctx = client_for(&server, &dir);

    // 登录
    let session = ctx.guard().login_with_token(VALID_SESSION).await.unwrap();
    assert_eq!(session.username, "ada");
    assert!(matches!(
        ctx.guard().activate(Route::CreateUrl).await,
        GuardDecision::Allow { .. }
    ));

    // 创建
    let mut form = CreateForm::new();
    form.destination_url = "https://example.com/very/long/url".into();
    let created = ctx
        .creation()
        .submit(&mut form, Some(&session))
        .await
        .unwrap();
    let expected = format!("http://{}/s/gen002", server.addr);
    assert_eq!(created.short_url.as_deref(), Some(expected.as_str()));

    // 列表
    let view = ctx.analytics().load().await;
    let codes: Vec<&str> = view.links().iter().map(|l| l.short_code.as_str()).collect();
    assert_eq!(codes, vec!["abc123", "gen002"]);

    // 删除后重新拉取
    let outcome = ctx.analytics().delete("abc123").await;
    assert!(outcome.deleted, "delete failed: {:?}", outcome.message);
    assert!(outcome.view.links().iter().all(|l| l.short_code != "abc123"));
    assert_eq!(ctx.guard().client().cookies().get("csrftoken").as_deref(), Some(CSRF_TOKEN));

    // 资料
    let profile = ctx.profile().update(Some(&session)).await;
    assert!(profile.success);
    assert_eq!(
        *server.state.profile_emails.lock(),
        vec!["ada@example.com".to_string()]
    );

    server.handle.stop(true).await;
}

#[actix_rt::test]
async fn test_backend_error_message_reaches_form() {
    let server = start_backend(vec![]);
    let dir = TempDir::new().unwrap();
    let ctx = client_for(&server, &dir);
    let session = ctx.guard().login_with_token(VALID_SESSION).await.unwrap();

    let mut form = CreateForm::new();
    form.destination_url = "https://example.com".into();
    form.alias_mode = AliasMode::Custom;
    form.custom_alias = "taken".into();

    let err = ctx
        .creation()
        .submit(&mut form, Some(&session))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(form.feedback().message, "bad code");
    assert!(server.state.links.lock().is_empty());

    server.handle.stop(true).await;
}

#[actix_rt::test]
async fn test_delete_of_unknown_code_reports_failure() {
    let server = start_backend(vec![]);
    let dir = TempDir::new().unwrap();
    let ctx = client_for(&server, &dir);
    ctx.guard().login_with_token(VALID_SESSION).await.unwrap();

    let outcome = ctx.analytics().delete("missing").await;
    assert!(!outcome.deleted);
    assert_eq!(outcome.view, AnalyticsView::Empty);
    assert_eq!(outcome.message.as_deref(), Some("Failed to delete URL."));

    server.handle.stop(true).await;
}

#[actix_rt::test]
async fn test_unreachable_backend_is_treated_as_no_session() {
    let dir = TempDir::new().unwrap();
    let mut config = StaticConfig::default();
    // 端口 9 (discard) 通常没有监听
    config.api.base_url = "http://127.0.0.1:9".into();
    let ctx = ServiceContext::with_parts(
        Arc::new(config),
        Arc::new(UreqTransport::new(Duration::from_secs(2))),
        Some(SessionStore::new(dir.path().join("session.json"))),
        Arc::new(MemoryClipboard::new()),
    )
    .unwrap();

    assert_eq!(
        ctx.guard().activate(Route::Home).await,
        GuardDecision::RedirectToLogin
    );
}
