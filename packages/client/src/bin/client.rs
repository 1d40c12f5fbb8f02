//! Terminal chat room client.
//!
//! Connects to the chat server over Socket.IO, joins under a nickname and
//! shows the room live. Type `/help` once running for the command list.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatroom-client -- --server http://127.0.0.1:5000
//! cargo run --bin chatroom-client -- -n Alice --ctrl-enter-sends
//! ```

use std::time::Duration;

use clap::Parser;

use chatroom_client::{
    domain::{
        SessionConfig,
        session::{HEARTBEAT_INTERVAL_MS, MAX_MESSAGE_CHARS, SEND_INTERVAL_MS},
    },
    ui::{ClientOptions, renderer::DEFAULT_WIDTH, run_client},
};
use chatroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chatroom-client")]
#[command(about = "Terminal client for the chat room", long_about = None)]
struct Args {
    /// Chat server base URL
    #[arg(short = 's', long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Join immediately under this nickname
    #[arg(short = 'n', long)]
    nickname: Option<String>,

    /// Plain Enter adds a line to the draft and /send sends it
    #[arg(long)]
    ctrl_enter_sends: bool,

    /// Minimum milliseconds between two sends
    #[arg(long, default_value_t = SEND_INTERVAL_MS)]
    send_interval_ms: i64,

    /// Heartbeat period in milliseconds
    #[arg(long, default_value_t = HEARTBEAT_INTERVAL_MS)]
    heartbeat_ms: u64,

    /// Maximum message length in characters
    #[arg(long, default_value_t = MAX_MESSAGE_CHARS)]
    max_chars: usize,

    /// Width used to right-align your own messages
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let options = ClientOptions {
        server: args.server,
        nickname: args.nickname,
        enter_sends: !args.ctrl_enter_sends,
        width: args.width,
        session: SessionConfig {
            send_interval_ms: args.send_interval_ms,
            heartbeat_interval: Duration::from_millis(args.heartbeat_ms.max(1)),
            max_message_chars: args.max_chars,
        },
    };

    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
