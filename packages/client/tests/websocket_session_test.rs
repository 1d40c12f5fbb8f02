//! Integration tests for the chat controller over a real WebSocket.
//!
//! An in-process axum server plays a minimal Socket.IO chat server: it
//! completes the Engine.IO/Socket.IO handshake, pings once, and answers the
//! chat events the client emits.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use tokio::sync::mpsc;

use chatroom_client::{
    ChatController,
    domain::{Inbound, SessionConfig, SessionState},
    infrastructure::transport::{WebSocketTransport, socket_url},
};
use chatroom_shared::time::SystemClock;

const OPEN_PACKET: &str =
    r#"0{"sid":"engine-sid","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;
const ALICE_ID: &str = "65a0c0ffee0000000000a11c";

type Controller = ChatController<WebSocketTransport, SystemClock>;

/// What the stub server does right after a successful login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterLogin {
    Stay,
    /// Namespace disconnect, as the server does on kick
    Disconnect,
    /// Drop the socket without any goodbye
    Vanish,
}

#[derive(Clone)]
struct StubServer {
    received: Arc<Mutex<Vec<String>>>,
    after_login: AfterLogin,
}

impl StubServer {
    fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    /// Wait until a frame matching `predicate` has been received
    async fn wait_for_frame(&self, predicate: impl Fn(&str) -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if self.received().iter().any(|frame| predicate(frame)) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("timed out waiting for a frame from the client");
    }
}

async fn socket_io(ws: WebSocketUpgrade, State(stub): State<StubServer>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve(socket, stub))
}

async fn serve(mut socket: WebSocket, stub: StubServer) {
    if socket.send(Message::Text(OPEN_PACKET.into())).await.is_err() {
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        let Message::Text(frame) = message else {
            continue;
        };
        let frame = frame.as_str().to_string();
        stub.received.lock().unwrap().push(frame.clone());

        let mut replies: Vec<String> = Vec::new();
        if frame == "40" {
            replies.push(r#"40{"sid":"socket-sid"}"#.to_string());
            replies.push("2".to_string());
        } else if frame.starts_with(r#"42["login""#) {
            replies.push(login_success());
            replies.push(r#"42["online_count",{"count":2}]"#.to_string());
            match stub.after_login {
                AfterLogin::Stay => {}
                AfterLogin::Disconnect => replies.push("41".to_string()),
                AfterLogin::Vanish => {
                    for reply in replies {
                        let _ = socket.send(Message::Text(reply.into())).await;
                    }
                    return;
                }
            }
        } else if frame.starts_with(r#"42["get_status""#) {
            replies.push(r#"42["chat_status",{"status":1,"custom_text":""}]"#.to_string());
        } else if frame.starts_with(r#"42["send_message""#) {
            replies.push(echo_message(&frame));
        } else if frame.starts_with(r#"42["logout""#) {
            replies.push(r#"42["logout_success"]"#.to_string());
        }

        for reply in replies {
            if socket.send(Message::Text(reply.into())).await.is_err() {
                return;
            }
        }
    }
}

fn login_success() -> String {
    let payload = json!({
        "user": {
            "id": ALICE_ID,
            "nickname": "Alice",
            "avatar": "4.png",
            "gender": "unknown",
            "is_online": true
        },
        "messages": [
            {
                "id": "m1",
                "user_id": "65a0c0ffee0000000000b0b0",
                "nickname": "Bob",
                "avatar": "2.png",
                "gender": "male",
                "content": "hello <a href=\"https://example.com\" target=\"_blank\">https://example.com</a>",
                "timestamp": "2024-01-01 09:59:00",
                "is_self": null
            }
        ]
    });
    format!("42{}", json!(["login_success", payload]))
}

/// Broadcast the sent content back as Alice's message, flagged relative to the sender
fn echo_message(frame: &str) -> String {
    let content = serde_json::from_str::<Value>(&frame[2..])
        .ok()
        .and_then(|value| value[1]["content"].as_str().map(str::to_string))
        .unwrap_or_default();
    let payload = json!({
        "id": "m2",
        "user_id": ALICE_ID,
        "nickname": "Alice",
        "avatar": "4.png",
        "gender": "unknown",
        "content": content,
        "timestamp": "2024-01-01 10:00:00",
        "is_self": false
    });
    format!("42{}", json!(["new_message", payload]))
}

async fn start_stub(after_login: AfterLogin) -> (String, StubServer) {
    let stub = StubServer {
        received: Arc::new(Mutex::new(Vec::new())),
        after_login,
    };
    let app = Router::new()
        .route("/socket.io/", get(socket_io))
        .with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), stub)
}

fn new_controller(base: &str) -> (Controller, mpsc::UnboundedReceiver<Inbound>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let transport = WebSocketTransport::new(socket_url(base), tx);
    let controller = ChatController::new(transport, SystemClock::new(), SessionConfig::default());
    (controller, rx)
}

/// Feed inbound signals to the controller until `done` holds
async fn pump_until(
    controller: &mut Controller,
    rx: &mut mpsc::UnboundedReceiver<Inbound>,
    done: impl Fn(&Controller) -> bool,
) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !done(controller) {
            let inbound = rx.recv().await.expect("inbound channel closed");
            controller.handle(inbound);
        }
    })
    .await
    .expect("timed out waiting for the controller");
}

#[tokio::test]
async fn test_join_send_and_logout_over_socket_io() {
    // テスト項目: Socket.IO サーバーとの間で参加・送信・ハートビート・退出が一通り動作する
    // given (前提条件):
    let (base, stub) = start_stub(AfterLogin::Stay).await;
    let (mut controller, mut rx) = new_controller(&base);

    // when (操作): join
    controller.join("  Alice ").unwrap();
    pump_until(&mut controller, &mut rx, |c| {
        c.state().is_joined() && c.screen().composer_visible && c.screen().online_count.is_some()
    })
    .await;

    // then (期待する結果):
    let screen = controller.screen();
    assert!(!screen.nickname_form_visible);
    assert_eq!(screen.online_count, Some(2));
    assert_eq!(screen.messages.len(), 1);
    assert!(!screen.messages[0].is_self);
    assert_eq!(screen.scrolled_to, Some(0));
    assert_eq!(
        screen.user.as_ref().map(|user| user.nickname.as_str()),
        Some("Alice")
    );
    stub.wait_for_frame(|frame| frame == r#"42["login",{"nickname":"Alice"}]"#)
        .await;
    // the stub's ping is answered
    stub.wait_for_frame(|frame| frame == "3").await;

    // when (操作): send
    controller.send("hi there").unwrap();
    pump_until(&mut controller, &mut rx, |c| c.screen().messages.len() == 2).await;

    // then (期待する結果):
    let echoed = &controller.screen().messages[1];
    assert_eq!(echoed.content, "hi there");
    assert!(echoed.is_self);

    // when (操作): heartbeat, then logout
    assert!(controller.heartbeat());
    stub.wait_for_frame(|frame| frame == r#"42["heartbeat"]"#).await;
    controller.logout();

    // then (期待する結果):
    stub.wait_for_frame(|frame| frame == r#"42["logout"]"#).await;
    assert_eq!(controller.state(), &SessionState::Anonymous);
    assert!(controller.screen().nickname_form_visible);
    assert!(!controller.heartbeat());
}

#[tokio::test]
async fn test_namespace_disconnect_is_a_kick() {
    // テスト項目: サーバー側の名前空間切断はキックとして扱われ、ハートビートが止まる
    // given (前提条件):
    let (base, _stub) = start_stub(AfterLogin::Disconnect).await;
    let (mut controller, mut rx) = new_controller(&base);

    // when (操作):
    controller.join("Alice").unwrap();
    pump_until(&mut controller, &mut rx, |c| c.is_kicked()).await;

    // then (期待する結果):
    assert!(!controller.heartbeat());
    assert!(!controller.screen().composer_visible);
    assert!(controller.screen().nickname_form_visible);
}

#[tokio::test]
async fn test_server_going_away_is_disconnected_state() {
    // テスト項目: サーバーが接続を切った場合は Disconnected 状態になる
    // given (前提条件):
    let (base, _stub) = start_stub(AfterLogin::Vanish).await;
    let (mut controller, mut rx) = new_controller(&base);

    // when (操作):
    controller.join("Alice").unwrap();
    pump_until(&mut controller, &mut rx, |c| {
        matches!(c.state(), SessionState::Disconnected { .. })
    })
    .await;

    // then (期待する結果):
    assert_eq!(controller.connection(), None);
    assert!(!controller.screen().composer_visible);
    assert!(controller.screen().nickname_form_visible);
    assert!(!controller.heartbeat());
}

#[tokio::test]
async fn test_unreachable_server_while_joining_is_disconnected_state() {
    // テスト項目: 接続できないサーバーへの参加は Disconnected 状態として通知される
    // given (前提条件):
    let (mut controller, mut rx) = new_controller("http://127.0.0.1:9");

    // when (操作):
    controller.join("Alice").unwrap();
    pump_until(&mut controller, &mut rx, |c| {
        !matches!(c.state(), SessionState::Joining { .. })
    })
    .await;

    // then (期待する結果):
    assert!(matches!(
        controller.state(),
        SessionState::Disconnected { .. }
    ));
}
