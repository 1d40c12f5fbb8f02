//! Terminal client event loop.
//!
//! One task owns the controller and multiplexes three inputs with
//! `tokio::select!`: lines from the line editor thread, inbound transport
//! signals, and the heartbeat tick.

use std::{io::Write, time::Duration};

use chatroom_shared::time::{Clock, SystemClock};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{
    sync::{mpsc, oneshot},
    time::MissedTickBehavior,
};

use crate::{
    controller::{ChatController, KeyAction},
    domain::{SessionConfig, Transport},
    error::ClientError,
    infrastructure::transport::{WebSocketTransport, socket_url},
};

use super::{
    command::Command,
    formatter::MessageFormatter,
    renderer::{DEFAULT_WIDTH, PROMPT, TerminalRenderer},
};

/// How long to wait for the connection task to flush a final logout.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Chat server base URL (`http://host:port`)
    pub server: String,
    /// Join immediately under this nickname
    pub nickname: Option<String>,
    pub enter_sends: bool,
    pub width: usize,
    pub session: SessionConfig,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            server: "http://127.0.0.1:5000".to_string(),
            nickname: None,
            enter_sends: true,
            width: DEFAULT_WIDTH,
            session: SessionConfig::default(),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Run the terminal chat client until the user quits
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel();
    let url = socket_url(&options.server);
    tracing::info!("Chat server endpoint: {}", url);

    let transport = WebSocketTransport::new(url, inbound_tx);
    let mut controller = ChatController::new(transport, SystemClock::new(), options.session);
    controller.set_enter_sends(options.enter_sends);

    let mut renderer = TerminalRenderer::new(
        std::io::stdout(),
        options.width,
        options.session.max_message_chars,
    );
    renderer.set_enter_sends(options.enter_sends);

    let mut input_rx = spawn_line_editor().await?;

    renderer.write_raw(&MessageFormatter::format_help())?;
    match &options.nickname {
        Some(nickname) => {
            // failures are already on the status line
            let _ = controller.join(nickname);
        }
        None => renderer.write_raw(&MessageFormatter::format_nickname_prompt())?,
    }
    renderer.render(&controller.take_updates())?;

    let mut heartbeat = tokio::time::interval(options.session.heartbeat_interval);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    heartbeat.tick().await;

    loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else {
                    tracing::info!("Input closed");
                    break;
                };
                let command = Command::parse(&line, controller.screen().nickname_form_visible);
                if let Flow::Quit = apply_command(&mut controller, &mut renderer, command)? {
                    break;
                }
            }
            Some(inbound) = inbound_rx.recv() => controller.handle(inbound),
            _ = heartbeat.tick() => {
                if controller.heartbeat() {
                    tracing::trace!("Heartbeat sent");
                }
            }
        }
        renderer.render(&controller.take_updates())?;
    }

    if controller.connection().is_some() {
        controller.logout();
        renderer.render(&controller.take_updates())?;
        // the connection task reports Closed once the logout is flushed
        let _ = tokio::time::timeout(SHUTDOWN_GRACE, inbound_rx.recv()).await;
    }
    writeln!(std::io::stdout())?;
    Ok(())
}

fn apply_command<T, C, W>(
    controller: &mut ChatController<T, C>,
    renderer: &mut TerminalRenderer<W>,
    command: Command,
) -> Result<Flow, ClientError>
where
    T: Transport,
    C: Clock,
    W: Write,
{
    match command {
        Command::Join(nickname) => {
            let _ = controller.join(&nickname);
        }
        Command::Line(line) => {
            controller.type_text(&line);
            if controller.press_enter(false) == KeyAction::Submit
                && !controller.composer().text().is_empty()
            {
                // a submitted terminal line cannot be edited again
                controller.discard_draft();
            }
        }
        Command::Send => {
            controller.press_enter(true);
        }
        Command::EnterSends(enter_sends) => {
            controller.set_enter_sends(enter_sends);
            renderer.set_enter_sends(enter_sends);
            renderer.write_raw(&MessageFormatter::format_composer_ready(enter_sends))?;
        }
        Command::Logout => controller.logout(),
        Command::Help => renderer.write_raw(&MessageFormatter::format_help())?,
        Command::Quit => return Ok(Flow::Quit),
        Command::Unknown(input) => {
            renderer.write_raw(&format!(
                "Unknown command: {}. /help lists commands.\n",
                input
            ))?;
        }
    }
    Ok(Flow::Continue)
}

/// Run rustyline on its own thread and forward lines over a channel.
async fn spawn_line_editor() -> Result<mpsc::UnboundedReceiver<String>, ClientError> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let (ready_tx, ready_rx) = oneshot::channel::<Result<(), String>>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => {
                let _ = ready_tx.send(Ok(()));
                rl
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    match ready_rx.await {
        Ok(Ok(())) => Ok(input_rx),
        Ok(Err(e)) => Err(ClientError::Terminal(e)),
        Err(_) => Err(ClientError::Terminal(
            "line editor thread exited".to_string(),
        )),
    }
}
