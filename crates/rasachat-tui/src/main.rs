//! rasachat terminal client.
//!
//! Chats with a Rasa server through its REST channel webhook.

use std::error::Error;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod backend;
mod event;
mod oneshot;
mod state;
mod ui;

use app::App;
use event::{BackendCommand, UiEvent};
use rasachat_client::{ClientConfig, WebhookClient};
use rasachat_core::{ChatSession, DeliveryOrder, DEFAULT_SENDER, DEFAULT_WEBHOOK_URL};
use state::UiState;

#[derive(Parser)]
#[command(name = "rasachat")]
#[command(about = "Terminal chat client for a Rasa REST webhook")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Clone)]
struct ConnectionArgs {
    /// REST channel webhook URL
    #[arg(short, long, default_value = DEFAULT_WEBHOOK_URL)]
    url: String,

    /// Sender id reported to the server
    #[arg(short, long, default_value = DEFAULT_SENDER)]
    sender: String,

    /// Use a random sender id so the server starts a fresh conversation
    #[arg(long, conflicts_with = "sender")]
    fresh_session: bool,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    timeout: u64,
}

impl ConnectionArgs {
    fn sender_id(&self) -> String {
        if self.fresh_session {
            uuid::Uuid::new_v4().to_string()
        } else {
            self.sender.clone()
        }
    }

    fn client(&self) -> Result<WebhookClient, Box<dyn Error>> {
        let config = ClientConfig {
            webhook_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout),
        };
        Ok(WebhookClient::new(&config)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat window
    #[command(alias = "c")]
    Chat {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Render replies in the order messages were sent
        #[arg(long)]
        ordered: bool,
    },

    /// Send one message and print the replies
    #[command(alias = "s")]
    Send {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Message text
        message: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            connection,
            ordered,
        } => {
            init_file_logging();
            let order = if ordered {
                DeliveryOrder::Fifo
            } else {
                DeliveryOrder::Completion
            };
            run_chat_tui(&connection, order)?;
        }
        Commands::Send {
            connection,
            message,
        } => {
            init_stderr_logging();
            let client = connection.client()?;
            let runtime = tokio::runtime::Runtime::new()?;
            let mut stdout = std::io::stdout();
            runtime.block_on(oneshot::send_once(
                &client,
                connection.sender_id(),
                &message,
                &mut stdout,
            ))?;
        }
    }

    Ok(())
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("rasachat_tui=debug,rasachat_core=debug,rasachat_client=debug")
    })
}

/// Log to a file so the terminal UI is not disturbed.
fn init_file_logging() {
    let path = std::env::temp_dir().join("rasachat.log");
    if let Ok(file) = std::fs::File::create(&path) {
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter(log_filter())
            .with_ansi(false)
            .init();
    }
}

fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run_chat_tui(connection: &ConnectionArgs, order: DeliveryOrder) -> Result<(), Box<dyn Error>> {
    let client = connection.client()?;
    let sender = connection.sender_id();
    info!(url = %connection.url, sender = %sender, ?order, "Starting chat TUI");

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    // Spawn background thread with its own tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;
    let bg_handle = std::thread::spawn(move || {
        runtime.block_on(backend::run_backend(client, ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    let state = UiState::new(ChatSession::new(sender, order), connection.url.clone());
    let mut app = App::new(state, ui_rx, cmd_tx);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    let _ = bg_handle.join();

    info!("TUI shutdown complete");

    result.map_err(|e| e.into())
}
