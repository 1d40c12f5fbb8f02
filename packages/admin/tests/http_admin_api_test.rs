//! Integration tests for the admin console over HTTP.
//!
//! An in-process axum server stands in for the chat server's admin
//! endpoints, backed by an in-memory store and guarded by a session cookie.
//! A second stub answers every admin route with a redirect to an HTML login
//! page, the way the server treats a missing or expired session.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{any, delete, get},
};
use serde_json::{Value, json};

use chatroom_admin::{
    AdminConsole, AdminError, SAVED_TEXT,
    domain::{AdminMessage, BlacklistEntry, ChatConfig, ChatStatus, ChatUserRecord, SensitiveWord},
    infrastructure::{HttpAdminApi, LOGIN_REQUIRED_TEXT},
};

const SESSION_COOKIE: &str = "session=admin-session";

#[derive(Default)]
struct Store {
    config: Option<ChatConfig>,
    words: Vec<SensitiveWord>,
    blacklist: Vec<BlacklistEntry>,
    messages: Vec<AdminMessage>,
    users: Vec<ChatUserRecord>,
    next_id: u64,
}

impl Store {
    fn seeded() -> Self {
        Self {
            messages: vec![
                AdminMessage {
                    id: "m1".to_string(),
                    nickname: "bob".to_string(),
                    avatar: "2.png".to_string(),
                    content: "hello".to_string(),
                    timestamp: "2024-01-01 10:01:00".to_string(),
                    ip: "10.0.0.2".to_string(),
                    device: "Desktop".to_string(),
                },
                AdminMessage {
                    id: "m2".to_string(),
                    nickname: "bob".to_string(),
                    avatar: "2.png".to_string(),
                    content: "buy now".to_string(),
                    timestamp: "2024-01-01 10:00:00".to_string(),
                    ip: "10.0.0.2".to_string(),
                    device: "Desktop".to_string(),
                },
            ],
            users: vec![ChatUserRecord {
                id: "u1".to_string(),
                nickname: "bob".to_string(),
                ip: "10.0.0.2".to_string(),
                device: "Desktop".to_string(),
                avatar: "2.png".to_string(),
                gender: "male".to_string(),
                is_online: true,
                is_blacklisted: false,
                last_active_time: "2024-01-01 10:01:00".to_string(),
                last_msg: "hello".to_string(),
            }],
            ..Self::default()
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }
}

type Shared = Arc<Mutex<Store>>;

fn ack() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn reject(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

async fn require_session(request: Request, next: Next) -> Response {
    let cookie = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    if cookie != Some(SESSION_COOKIE) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Login required" })),
        )
            .into_response();
    }
    next.run(request).await
}

async fn get_config(State(store): State<Shared>) -> Json<Value> {
    match &store.lock().unwrap().config {
        Some(config) => Json(serde_json::to_value(config).unwrap()),
        None => Json(json!({})),
    }
}

async fn set_config(State(store): State<Shared>, Json(config): Json<ChatConfig>) -> Json<Value> {
    store.lock().unwrap().config = Some(config);
    ack()
}

async fn list_words(State(store): State<Shared>) -> Json<Vec<SensitiveWord>> {
    Json(store.lock().unwrap().words.clone())
}

async fn add_word(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let word = body["word"].as_str().unwrap_or_default().trim().to_string();
    let mut store = store.lock().unwrap();
    if word.is_empty() {
        return reject("Sensitive word cannot be empty");
    }
    if store.words.iter().any(|w| w.word == word) {
        return reject("Sensitive word already exists");
    }
    let id = store.next_id("w");
    store.words.push(SensitiveWord { id, word });
    ack().into_response()
}

async fn delete_word(State(store): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    store.lock().unwrap().words.retain(|w| w.id != id);
    ack()
}

async fn list_blacklist(State(store): State<Shared>) -> Json<Vec<BlacklistEntry>> {
    Json(store.lock().unwrap().blacklist.clone())
}

async fn add_blacklist(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let user_id = body["user_id"].as_str().unwrap_or_default().to_string();
    let reason = body["reason"].as_str().unwrap_or_default().to_string();
    let mut store = store.lock().unwrap();
    let Some(user) = store.users.iter_mut().find(|u| u.id == user_id) else {
        return reject("User not found");
    };
    user.is_blacklisted = true;
    let (nickname, ip) = (user.nickname.clone(), user.ip.clone());
    let id = store.next_id("b");
    store.blacklist.push(BlacklistEntry {
        id,
        user_id,
        nickname,
        ip,
        reason,
        created_at: "2024-01-01 11:00:00".to_string(),
    });
    ack().into_response()
}

async fn delete_blacklist(State(store): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    let mut store = store.lock().unwrap();
    if let Some(entry) = store.blacklist.iter().find(|e| e.id == id).cloned() {
        for user in store.users.iter_mut().filter(|u| u.id == entry.user_id) {
            user.is_blacklisted = false;
        }
    }
    store.blacklist.retain(|e| e.id != id);
    ack()
}

async fn list_messages(State(store): State<Shared>) -> Json<Vec<AdminMessage>> {
    Json(store.lock().unwrap().messages.clone())
}

async fn delete_message(State(store): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    store.lock().unwrap().messages.retain(|m| m.id != id);
    ack()
}

async fn list_users(State(store): State<Shared>) -> Json<Vec<ChatUserRecord>> {
    Json(store.lock().unwrap().users.clone())
}

async fn start_stub() -> String {
    let store: Shared = Arc::new(Mutex::new(Store::seeded()));
    let api = Router::new()
        .route("/chat/config", get(get_config).post(set_config))
        .route("/chat/sensitive", get(list_words).post(add_word))
        .route("/chat/sensitive/{id}", delete(delete_word))
        .route("/chat/blacklist", get(list_blacklist).post(add_blacklist))
        .route("/chat/blacklist/{id}", delete(delete_blacklist))
        .route("/chat/messages", get(list_messages))
        .route("/chat/messages/{id}", delete(delete_message))
        .route("/chat/users", get(list_users))
        .layer(middleware::from_fn(require_session))
        .with_state(store);
    let app = Router::new().nest("/admin/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Admin routes redirect to the login page; returns the base URL and a
/// counter of login page hits.
async fn start_login_redirect_stub() -> (String, Arc<AtomicUsize>) {
    let login_hits = Arc::new(AtomicUsize::new(0));
    let hits = login_hits.clone();
    let app = Router::new()
        .route(
            "/admin/api/{*rest}",
            any(|| async { Redirect::to("/admin/login") }),
        )
        .route(
            "/admin/login",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Html("<html><body><form>Admin login</form></body></html>")
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), login_hits)
}

fn console(base: &str) -> AdminConsole<HttpAdminApi> {
    let api = HttpAdminApi::new(base, Some(SESSION_COOKIE.to_string())).unwrap();
    AdminConsole::new(api)
}

#[tokio::test]
async fn test_load_all_with_session_cookie() {
    // テスト項目: セッション Cookie 付きで全リソースが読み込まれ、未保存の設定は既定値になる
    // given (前提条件):
    let base = start_stub().await;
    let mut console = console(&base);

    // when (操作):
    console.load_all().await.unwrap();

    // then (期待する結果):
    let screen = console.screen();
    assert_eq!(screen.config, Some(ChatConfig::default()));
    assert!(screen.sensitive_words.is_empty());
    assert!(screen.blacklist.is_empty());
    assert_eq!(screen.messages.len(), 2);
    assert_eq!(screen.users.len(), 1);
}

#[tokio::test]
async fn test_missing_cookie_is_rejected_with_server_text() {
    // テスト項目: Cookie が無い場合はサーバーのエラーテキスト付きで拒否される
    // given (前提条件):
    let base = start_stub().await;
    let mut console = AdminConsole::new(HttpAdminApi::new(&base, None).unwrap());

    // when (操作):
    let result = console.load_users().await;

    // then (期待する結果):
    match result {
        Err(AdminError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Login required");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_login_redirect_is_rejected_for_writes_and_reads() {
    // テスト項目: セッション切れでログインページへリダイレクトされた書き込みと読み込みは失敗として報告される
    // given (前提条件):
    let (base, login_hits) = start_login_redirect_stub().await;
    let mut console = console(&base);

    // when (操作):
    let promote = console.promote_user("u1", "spam").await;
    let delete = console.delete_message("m1").await;
    let save = console.save_config(ChatConfig::default()).await;
    let load = console.load_users().await;

    // then (期待する結果):
    for result in [promote, delete, load] {
        match result {
            Err(AdminError::Rejected { status, message }) => {
                assert!((300..400).contains(&status));
                assert_eq!(message, LOGIN_REQUIRED_TEXT);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
    assert!(matches!(save, Err(AdminError::Rejected { .. })));
    assert_eq!(login_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sensitive_word_add_duplicate_and_delete() {
    // テスト項目: 敏感語の追加・重複拒否・削除が一覧に反映される
    // given (前提条件):
    let base = start_stub().await;
    let mut console = console(&base);

    // when (操作): add
    console.add_sensitive_word(" spam ").await.unwrap();

    // then (期待する結果):
    let words = console.screen().sensitive_words.clone();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "spam");

    // when (操作): duplicate
    let duplicate = console.add_sensitive_word("spam").await;
    assert!(matches!(
        duplicate,
        Err(AdminError::Rejected { status: 400, ref message }) if message == "Sensitive word already exists"
    ));

    // when (操作): delete
    console.delete_sensitive_word(&words[0].id).await.unwrap();

    // then (期待する結果):
    assert!(
        console
            .screen()
            .sensitive_words
            .iter()
            .all(|w| w.id != words[0].id)
    );
}

#[tokio::test]
async fn test_save_config_round_trip() {
    // テスト項目: 設定の保存後に再読み込みされた内容が反映され「Saved」が返る
    // given (前提条件):
    let base = start_stub().await;
    let mut console = console(&base);
    let config = ChatConfig {
        status: ChatStatus::Closed,
        custom_text: "Back at 8pm".to_string(),
        expected_open_time: "20:00".to_string(),
        ..ChatConfig::default()
    };

    // when (操作):
    let confirmation = console.save_config(config.clone()).await.unwrap();

    // then (期待する結果):
    assert_eq!(confirmation, SAVED_TEXT);
    assert_eq!(console.screen().config, Some(config));
}

#[tokio::test]
async fn test_promote_and_remove_blacklist_entry() {
    // テスト項目: ユーザーのブラックリスト追加でユーザー一覧とブラックリストが更新され、削除で消える
    // given (前提条件):
    let base = start_stub().await;
    let mut console = console(&base);

    // when (操作): promote
    console.promote_user("u1", "spam links").await.unwrap();

    // then (期待する結果):
    assert!(console.screen().users[0].is_blacklisted);
    let blacklist = console.screen().blacklist.clone();
    assert_eq!(blacklist.len(), 1);
    assert_eq!(blacklist[0].user_id, "u1");
    assert_eq!(blacklist[0].reason, "spam links");

    // when (操作): unknown user
    let unknown = console.promote_user("nobody", "spam").await;
    assert!(matches!(
        unknown,
        Err(AdminError::Rejected { status: 400, ref message }) if message == "User not found"
    ));

    // when (操作): remove
    console.delete_blacklist_entry(&blacklist[0].id).await.unwrap();

    // then (期待する結果):
    assert!(console.screen().blacklist.is_empty());
}

#[tokio::test]
async fn test_delete_message_then_reload() {
    // テスト項目: メッセージ削除後の一覧に該当 ID が含まれない
    // given (前提条件):
    let base = start_stub().await;
    let mut console = console(&base);

    // when (操作):
    console.delete_message("m2").await.unwrap();

    // then (期待する結果):
    let messages = &console.screen().messages;
    assert_eq!(messages.len(), 1);
    assert!(messages.iter().all(|m| m.id != "m2"));
}
