//! Non-interactive single exchange (`rasachat send`).

use std::error::Error;
use std::io::Write;

use tracing::info;

use rasachat_client::WebhookClient;
use rasachat_core::{ChatSession, DeliveryOrder, InputBuffer, Origin, Transcript};

/// Send `message` once and print the transcript to `out`.
///
/// Returns an error if the exchange produced an error message.
pub async fn send_once(
    client: &WebhookClient,
    sender: String,
    message: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut session = ChatSession::new(sender, DeliveryOrder::Completion);
    let mut input = InputBuffer::with_value(message);

    if !session.exchange(client, &mut input).await {
        info!("Blank message, nothing sent");
        return Ok(());
    }

    print_transcript(session.transcript(), out)?;

    if session.transcript().by_origin(Origin::Error).next().is_some() {
        return Err("exchange failed".into());
    }
    Ok(())
}

/// Write one `label> text` line per message.
pub fn print_transcript(transcript: &Transcript, out: &mut impl Write) -> std::io::Result<()> {
    for msg in transcript.messages() {
        writeln!(out, "{}> {}", msg.origin().label(), msg.text())?;
    }
    out.flush()
}
