//! Background task that talks to the webhook.

use tokio::sync::mpsc;
use tracing::{debug, info};

use rasachat_client::WebhookClient;
use rasachat_core::{ChatError, PendingSend, Transport};

use crate::event::{BackendCommand, ConnectionState, UiEvent};

/// Run the backend loop.
///
/// This function runs in a separate thread with its own tokio runtime.
/// Every send is spawned as its own task, so replies are reported in the
/// order they complete. Sends cannot be cancelled once issued.
pub async fn run_backend(
    client: WebhookClient,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    info!(url = %client.webhook_url(), "Backend started");
    spawn_ping(client.clone(), ui_tx.clone());

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Send(pending) => {
                spawn_send(client.clone(), pending, ui_tx.clone());
            }
            BackendCommand::Ping => {
                spawn_ping(client.clone(), ui_tx.clone());
            }
            BackendCommand::Quit => {
                info!("Received quit command, shutting down backend");
                break;
            }
        }
    }

    info!("Backend shutdown complete");
}

fn spawn_send(client: WebhookClient, pending: PendingSend, ui_tx: mpsc::Sender<UiEvent>) {
    tokio::spawn(async move {
        let PendingSend { seq, request } = pending;
        debug!(seq, "Sending message");
        let result = client.send(&request).await;

        let connection = match &result {
            Ok(_) | Err(ChatError::Status { .. }) | Err(ChatError::Protocol(_)) => {
                ConnectionState::Reachable
            }
            Err(ChatError::Network(_)) => ConnectionState::Unreachable,
        };

        let _ = ui_tx.send(UiEvent::ReplyReceived { seq, result }).await;
        let _ = ui_tx
            .send(UiEvent::ConnectionStateChanged(connection))
            .await;
    });
}

fn spawn_ping(client: WebhookClient, ui_tx: mpsc::Sender<UiEvent>) {
    tokio::spawn(async move {
        let state = if client.ping().await {
            ConnectionState::Reachable
        } else {
            ConnectionState::Unreachable
        };
        debug!(?state, "Ping finished");
        let _ = ui_tx.send(UiEvent::ConnectionStateChanged(state)).await;
    });
}
