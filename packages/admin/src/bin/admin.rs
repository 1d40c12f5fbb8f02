//! Chat room admin console.
//!
//! Talks to the chat server's admin endpoints. Admin routes sit behind the
//! server's login session, so pass the session cookie with `--cookie`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatroom-admin -- show
//! cargo run --bin chatroom-admin -- --cookie "session=..." config --status closed --custom-text "Back at 8pm"
//! cargo run --bin chatroom-admin -- words add spam
//! cargo run --bin chatroom-admin -- blacklist promote 65a0c0ffee0000000000b0b0
//! ```

use clap::{Parser, Subcommand, ValueEnum};

use chatroom_admin::{
    AdminConsole, AdminError,
    domain::{ChatConfig, ChatStatus},
    infrastructure::HttpAdminApi,
    ui::{AdminFormatter, prompt},
};
use chatroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chatroom-admin")]
#[command(about = "Admin console for the chat room", long_about = None)]
struct Args {
    /// Chat server base URL
    #[arg(short = 's', long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Cookie header forwarded with every request
    #[arg(long, env = "CHATROOM_ADMIN_COOKIE")]
    cookie: Option<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Load and print everything
    Show,
    /// Update the chat room configuration (unset fields keep their current value)
    Config {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        open_time: Option<String>,
        #[arg(long)]
        close_time: Option<String>,
        #[arg(long)]
        custom_text: Option<String>,
        #[arg(long)]
        expected_open_time: Option<String>,
    },
    /// Manage sensitive words
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },
    /// Manage the blacklist
    Blacklist {
        #[command(subcommand)]
        action: BlacklistAction,
    },
    /// Manage the message log
    Messages {
        #[command(subcommand)]
        action: MessagesAction,
    },
    /// List chat users
    Users,
}

#[derive(Subcommand, Debug)]
enum WordsAction {
    List,
    Add { word: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum BlacklistAction {
    List,
    /// Blacklist a user; asks for the reason when not given
    Promote {
        user_id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum MessagesAction {
    List,
    Delete { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Closed,
    Open,
    Scheduled,
}

impl From<StatusArg> for ChatStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Closed => ChatStatus::Closed,
            StatusArg::Open => ChatStatus::Open,
            StatusArg::Scheduled => ChatStatus::Scheduled,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run(args).await {
        tracing::error!("Admin error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AdminError> {
    let api = HttpAdminApi::new(&args.server, args.cookie)?;
    let mut console = AdminConsole::new(api);

    let output = match args.command {
        AdminCommand::Show => {
            console.load_all().await?;
            AdminFormatter::format_screen(console.screen())
        }
        AdminCommand::Config {
            status,
            open_time,
            close_time,
            custom_text,
            expected_open_time,
        } => {
            console.load_config().await?;
            let current = console.screen().config.clone().unwrap_or_default();
            let config = ChatConfig {
                status: status.map(ChatStatus::from).unwrap_or(current.status),
                open_time: open_time.unwrap_or(current.open_time),
                close_time: close_time.unwrap_or(current.close_time),
                custom_text: custom_text.unwrap_or(current.custom_text),
                expected_open_time: expected_open_time.unwrap_or(current.expected_open_time),
            };
            let confirmation = console.save_config(config).await?;
            format!(
                "{}\n{}",
                confirmation,
                AdminFormatter::format_config(console.screen().config.as_ref())
            )
        }
        AdminCommand::Words { action } => {
            match action {
                WordsAction::List => console.load_sensitive_words().await?,
                WordsAction::Add { word } => console.add_sensitive_word(&word).await?,
                WordsAction::Delete { id } => console.delete_sensitive_word(&id).await?,
            }
            AdminFormatter::format_sensitive_words(&console.screen().sensitive_words)
        }
        AdminCommand::Blacklist { action } => match action {
            BlacklistAction::List => {
                console.load_blacklist().await?;
                AdminFormatter::format_blacklist(&console.screen().blacklist)
            }
            BlacklistAction::Promote { user_id, reason } => {
                let reason = match reason {
                    Some(reason) => reason,
                    None => {
                        let answer = tokio::task::spawn_blocking(|| prompt::ask("Reason: "))
                            .await
                            .map_err(|e| AdminError::Terminal(e.to_string()))??;
                        match answer {
                            Some(reason) => reason,
                            // cancelled at the prompt
                            None => return Ok(()),
                        }
                    }
                };
                console.promote_user(&user_id, &reason).await?;
                [
                    AdminFormatter::format_users(&console.screen().users),
                    AdminFormatter::format_blacklist(&console.screen().blacklist),
                ]
                .concat()
            }
            BlacklistAction::Delete { id } => {
                console.delete_blacklist_entry(&id).await?;
                AdminFormatter::format_blacklist(&console.screen().blacklist)
            }
        },
        AdminCommand::Messages { action } => {
            match action {
                MessagesAction::List => console.load_messages().await?,
                MessagesAction::Delete { id } => console.delete_message(&id).await?,
            }
            AdminFormatter::format_messages(&console.screen().messages)
        }
        AdminCommand::Users => {
            console.load_users().await?;
            AdminFormatter::format_users(&console.screen().users)
        }
    };

    println!("{}", output);
    Ok(())
}
