//! rasachat dev server

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rasachat_devserver::{create_router, AppState, KnowledgeBase};

#[derive(Parser)]
#[command(name = "rasachat-devserver")]
#[command(about = "Local stand-in for a Rasa REST channel")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5005")]
    port: u16,

    /// JSON file with question entries (built-in samples if omitted)
    #[arg(short, long)]
    knowledge: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rasachat_devserver=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let knowledge = match &cli.knowledge {
        Some(path) => {
            let kb = KnowledgeBase::from_file(path)?;
            info!(path = %path.display(), entries = kb.entries.len(), "Knowledge base loaded");
            kb
        }
        None => {
            info!("No knowledge file given, using built-in samples");
            KnowledgeBase::sample()
        }
    };

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let router = create_router(AppState::new(knowledge));

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
