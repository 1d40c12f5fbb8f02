//! Socket.IO over WebSocket を使った Transport 実装
//!
//! Each `open` spawns one connection task. The task owns the WebSocket,
//! drains the outbound queue, answers Engine.IO pings, and forwards decoded
//! server events to the inbound channel tagged with its [`ConnectionId`].
//! When the task ends for any reason it sends one `Signal::Closed`.

use std::fmt::Display;

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{ClientEvent, ConnectionId, Inbound, ServerEvent, Transport},
    error::TransportError,
    infrastructure::{
        dto::conversion::{decode_server_event, encode_client_event},
        socketio::{
            EnginePacket, SocketPacket, SocketPacketKind,
            codec::{encode_connect, encode_disconnect, encode_event, encode_pong},
        },
    },
};

/// Path and query the Socket.IO server listens on for WebSocket clients.
const SOCKET_IO_PATH: &str = "socket.io/?EIO=4&transport=websocket";

/// Build the WebSocket endpoint from a server base URL.
///
/// `http(s)://` is mapped to `ws(s)://`; a URL that already names the
/// Socket.IO endpoint is returned unchanged.
pub fn socket_url(base: &str) -> String {
    if base.contains("/socket.io/") {
        return base.to_string();
    }
    let base = if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}/{}", base.trim_end_matches('/'), SOCKET_IO_PATH)
}

/// WebSocket を使った Transport 実装
pub struct WebSocketTransport {
    url: String,
    inbound: mpsc::UnboundedSender<Inbound>,
    outbound: Option<mpsc::UnboundedSender<ClientEvent>>,
    next_id: u64,
}

impl WebSocketTransport {
    /// # Arguments
    ///
    /// * `url` - Socket.IO WebSocket endpoint (see [`socket_url`])
    /// * `inbound` - Channel receiving server signals for the controller
    pub fn new(url: impl Into<String>, inbound: mpsc::UnboundedSender<Inbound>) -> Self {
        Self {
            url: url.into(),
            inbound,
            outbound: None,
            next_id: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for WebSocketTransport {
    fn open(&mut self) -> Result<ConnectionId, TransportError> {
        self.close();

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TransportError::ConnectionError(e.to_string()))?;

        self.next_id += 1;
        let connection = ConnectionId::new(self.next_id);
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run_connection(
            self.url.clone(),
            connection,
            rx,
            self.inbound.clone(),
        ));
        self.outbound = Some(tx);

        tracing::debug!("Opening connection #{} to {}", connection.value(), self.url);
        Ok(connection)
    }

    fn emit(&mut self, event: ClientEvent) -> Result<(), TransportError> {
        let outbound = self.outbound.as_ref().ok_or(TransportError::NotConnected)?;
        outbound.send(event).map_err(|_| TransportError::Closed)
    }

    fn close(&mut self) {
        // dropping the sender ends the connection task after it drains the queue
        if self.outbound.take().is_some() {
            tracing::debug!("Closing connection #{}", self.next_id);
        }
    }
}

/// Connection task: drive one WebSocket until it ends, then report `Closed`.
async fn run_connection(
    url: String,
    connection: ConnectionId,
    mut outbound: mpsc::UnboundedReceiver<ClientEvent>,
    inbound: mpsc::UnboundedSender<Inbound>,
) {
    let reason = match drive_connection(&url, connection, &mut outbound, &inbound).await {
        Ok(()) => "connection closed".to_string(),
        Err(e) => {
            tracing::warn!("Connection #{} failed: {}", connection.value(), e);
            e.to_string()
        }
    };
    // the receiver is gone once the client loop has exited
    let _ = inbound.send(Inbound::closed(connection, reason));
}

async fn drive_connection(
    url: &str,
    connection: ConnectionId,
    outbound: &mut mpsc::UnboundedReceiver<ClientEvent>,
    inbound: &mpsc::UnboundedSender<Inbound>,
) -> Result<(), TransportError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| TransportError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to chat server at {}", url);

    let (mut write, mut read) = ws_stream.split();

    // events queued before the namespace handshake completes
    let mut pending: Vec<ClientEvent> = Vec::new();
    let mut namespace_connected = false;

    loop {
        tokio::select! {
            frame = read.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Ok(());
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(TransportError::ConnectionError(e.to_string())),
                };

                let packet = match EnginePacket::decode(text.as_str()) {
                    Ok(packet) => packet,
                    Err(e) => {
                        tracing::warn!("Dropping malformed frame {:?}: {}", text.as_str(), e);
                        continue;
                    }
                };

                match packet {
                    EnginePacket::Open(handshake) => {
                        tracing::debug!("Engine.IO session {} opened", handshake.sid);
                        send_frame(&mut write, encode_connect()).await?;
                    }
                    EnginePacket::Ping(payload) => {
                        send_frame(&mut write, encode_pong(&payload)).await?;
                    }
                    EnginePacket::Close => return Ok(()),
                    EnginePacket::Message(payload) => {
                        let socket_packet = match SocketPacket::decode(&payload) {
                            Ok(packet) if packet.is_default_namespace() => packet,
                            Ok(packet) => {
                                tracing::debug!("Ignoring packet for namespace {}", packet.namespace);
                                continue;
                            }
                            Err(e) => {
                                tracing::warn!("Dropping malformed packet {:?}: {}", payload, e);
                                continue;
                            }
                        };
                        match socket_packet.kind {
                            SocketPacketKind::Connect => {
                                namespace_connected = true;
                                for event in pending.drain(..) {
                                    send_event(&mut write, &event).await?;
                                }
                            }
                            SocketPacketKind::Disconnect => {
                                // server-side namespace disconnect is a forced termination
                                if inbound.send(Inbound::event(connection, ServerEvent::Kicked)).is_err() {
                                    return Ok(());
                                }
                            }
                            SocketPacketKind::Event { name, data } => {
                                match decode_server_event(&name, data) {
                                    Ok(Some(event)) => {
                                        if inbound.send(Inbound::event(connection, event)).is_err() {
                                            return Ok(());
                                        }
                                    }
                                    Ok(None) => tracing::debug!("Ignoring unknown event '{}'", name),
                                    Err(e) => tracing::warn!("Malformed '{}' event: {}", name, e),
                                }
                            }
                            SocketPacketKind::ConnectError(message) => {
                                return Err(TransportError::ConnectionError(message));
                            }
                            SocketPacketKind::Ack => {}
                        }
                    }
                    EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
                }
            }
            event = outbound.recv() => {
                match event {
                    Some(event) if namespace_connected => send_event(&mut write, &event).await?,
                    Some(event) => pending.push(event),
                    None => {
                        // closed locally
                        if namespace_connected {
                            let _ = send_frame(&mut write, encode_disconnect()).await;
                        }
                        let _ = write.close().await;
                        return Ok(());
                    }
                }
            }
        }
    }
}

async fn send_event<S>(sink: &mut S, event: &ClientEvent) -> Result<(), TransportError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let (name, data) = encode_client_event(event)?;
    let frame = encode_event(name, data.as_ref())?;
    tracing::debug!("→ {}", frame);
    send_frame(sink, frame).await
}

async fn send_frame<S>(sink: &mut S, frame: String) -> Result<(), TransportError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    sink.send(Message::Text(frame.into()))
        .await
        .map_err(|e| TransportError::ConnectionError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_url_from_http_base() {
        // テスト項目: http のベース URL から Socket.IO の ws URL が組み立てられる
        // then (期待する結果):
        assert_eq!(
            socket_url("http://127.0.0.1:5000"),
            "ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            socket_url("https://chat.example.com/"),
            "wss://chat.example.com/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_socket_url_keeps_explicit_endpoint() {
        // テスト項目: 既に Socket.IO エンドポイントを指す URL はそのまま使われる
        // given (前提条件):
        let url = "ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket";

        // then (期待する結果):
        assert_eq!(socket_url(url), url);
    }

    #[test]
    fn test_emit_without_open_connection_fails() {
        // テスト項目: 接続前の emit は NotConnected エラーになる
        // given (前提条件):
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut transport = WebSocketTransport::new("ws://127.0.0.1:1/socket.io/", tx);

        // when (操作):
        let result = transport.emit(ClientEvent::Heartbeat);

        // then (期待する結果):
        assert!(matches!(result, Err(TransportError::NotConnected)));
    }

    #[test]
    fn test_open_outside_runtime_fails() {
        // テスト項目: tokio ランタイム外での open はエラーになる
        // given (前提条件):
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut transport = WebSocketTransport::new("ws://127.0.0.1:1/socket.io/", tx);

        // when (操作):
        let result = transport.open();

        // then (期待する結果):
        assert!(matches!(result, Err(TransportError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_closed_signal() {
        // テスト項目: 接続できないサーバーの場合 Closed シグナルが通知される
        // given (前提条件): 何も待ち受けていないポート
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut transport = WebSocketTransport::new(
            "ws://127.0.0.1:9/socket.io/?EIO=4&transport=websocket",
            tx,
        );

        // when (操作):
        let connection = transport.open().unwrap();
        let inbound = rx.recv().await.unwrap();

        // then (期待する結果):
        assert_eq!(inbound.connection, connection);
        assert!(matches!(inbound.signal, crate::domain::Signal::Closed { .. }));
    }
}
