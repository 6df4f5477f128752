//! The message send/render cycle.
//!
//! A cycle is split in two so that the UI thread never waits on the network:
//! [`ChatSession::submit`] renders the user's message and hands back a
//! [`PendingSend`], and [`ChatSession::complete`] renders whatever came back.
//! Several cycles may be in flight at once.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::ChatError;
use crate::input::InputBuffer;
use crate::message::ChatMessage;
use crate::transcript::Transcript;
use crate::transport::Transport;
use crate::wire::{BotReply, WebhookRequest};

/// How replies to overlapping sends are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryOrder {
    /// Render each reply as soon as its request completes.
    #[default]
    Completion,
    /// Hold replies until every earlier send has rendered.
    Fifo,
}

/// A request that has been rendered locally but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// Send sequence number within this session.
    pub seq: u64,
    pub request: WebhookRequest,
}

type Outcome = Result<Vec<BotReply>, ChatError>;

/// One conversation with the server.
#[derive(Debug)]
pub struct ChatSession {
    sender: String,
    order: DeliveryOrder,
    transcript: Transcript,
    next_seq: u64,
    /// Next sequence number to render in FIFO mode.
    next_render: u64,
    held: BTreeMap<u64, (String, Outcome)>,
    /// Message text of every send not yet rendered, by sequence number.
    outstanding: BTreeMap<u64, String>,
    /// Newest recoverable failure: its sequence number and message text.
    retryable: Option<(u64, String)>,
}

impl ChatSession {
    pub fn new(sender: impl Into<String>, order: DeliveryOrder) -> Self {
        Self {
            sender: sender.into(),
            order,
            transcript: Transcript::new(),
            next_seq: 0,
            next_render: 0,
            held: BTreeMap::new(),
            outstanding: BTreeMap::new(),
            retryable: None,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Number of sends whose replies have not rendered yet, including
    /// replies held back for ordering.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len() + self.held.len()
    }

    /// Text of the last message that failed with a recoverable error.
    pub fn retryable(&self) -> Option<&str> {
        self.retryable.as_ref().map(|(_, text)| text.as_str())
    }

    /// Take the input field's text and render it as a user message.
    ///
    /// Returns `None` without touching the transcript when the input is blank.
    pub fn submit(&mut self, input: &mut InputBuffer) -> Option<PendingSend> {
        let text = input.take_submission()?;
        self.transcript.append(ChatMessage::user(text.clone()));
        Some(self.issue(text))
    }

    /// Resend the last message that failed with a recoverable error.
    ///
    /// The user message is not rendered again.
    pub fn retry(&mut self) -> Option<PendingSend> {
        let (_, text) = self.retryable.take()?;
        info!(sender = %self.sender, "Retrying failed message");
        Some(self.issue(text))
    }

    /// Render the outcome of send `seq`.
    pub fn complete(&mut self, seq: u64, outcome: Outcome) {
        let Some(text) = self.outstanding.remove(&seq) else {
            warn!(seq, "Completion for unknown send ignored");
            return;
        };

        match self.order {
            DeliveryOrder::Completion => self.render_outcome(seq, text, outcome),
            DeliveryOrder::Fifo => {
                self.held.insert(seq, (text, outcome));
                while let Some((text, outcome)) = self.held.remove(&self.next_render) {
                    self.render_outcome(self.next_render, text, outcome);
                    self.next_render += 1;
                }
            }
        }
    }

    /// Run one full cycle against `transport`: submit, send, render.
    ///
    /// Returns `false` if the input was blank and nothing was sent.
    pub async fn exchange<T>(&mut self, transport: &T, input: &mut InputBuffer) -> bool
    where
        T: Transport + ?Sized,
    {
        let Some(pending) = self.submit(input) else {
            return false;
        };
        let outcome = transport.send(&pending.request).await;
        self.complete(pending.seq, outcome);
        true
    }

    fn issue(&mut self, text: String) -> PendingSend {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.outstanding.insert(seq, text.clone());
        debug!(seq, sender = %self.sender, "Issuing send");
        PendingSend {
            seq,
            request: WebhookRequest::new(self.sender.clone(), text),
        }
    }

    fn render_outcome(&mut self, seq: u64, text: String, outcome: Outcome) {
        match outcome {
            Ok(replies) => {
                debug!(count = replies.len(), "Rendering bot replies");
                for reply in replies {
                    if let Some(reply_text) = reply.text {
                        self.transcript.append(ChatMessage::bot(reply_text));
                    }
                }
                // An older success leaves a newer failure retryable
                if self.retryable.as_ref().is_some_and(|(failed, _)| *failed < seq) {
                    self.retryable = None;
                }
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!(error = %err, "Send failed");
                    if self.retryable.as_ref().map_or(true, |(failed, _)| *failed < seq) {
                        self.retryable = Some((seq, text));
                    }
                } else {
                    warn!(error = %err, "Malformed reply from server");
                }
                self.transcript.append(ChatMessage::error(err.user_message()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::message::Origin;

    /// Transport that records requests and answers from a script.
    struct ScriptedTransport {
        requests: Mutex<Vec<WebhookRequest>>,
        outcome: Outcome,
    }

    impl ScriptedTransport {
        fn new(outcome: Outcome) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                outcome,
            }
        }

        fn requests(&self) -> Vec<WebhookRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &WebhookRequest) -> Result<Vec<BotReply>, ChatError> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn texts(session: &ChatSession) -> Vec<(Origin, String)> {
        session
            .transcript()
            .messages()
            .iter()
            .map(|m| (m.origin(), m.text().to_string()))
            .collect()
    }

    fn reply(text: &str) -> BotReply {
        BotReply::text("user", text)
    }

    #[tokio::test]
    async fn test_hello_scenario() {
        let transport = ScriptedTransport::new(Ok(vec![reply("Hi there!")]));
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value("Hello");

        assert!(session.exchange(&transport, &mut input).await);

        assert_eq!(transport.requests(), vec![WebhookRequest::new("user", "Hello")]);
        assert_eq!(
            texts(&session),
            vec![
                (Origin::User, "Hello".to_string()),
                (Origin::Bot, "Hi there!".to_string()),
            ]
        );
        assert!(input.is_empty());
        assert_eq!(session.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_blank_input_sends_nothing() {
        let transport = ScriptedTransport::new(Ok(vec![reply("unused")]));
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value("   ");

        assert!(!session.exchange(&transport, &mut input).await);
        assert!(transport.requests().is_empty());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_user_message_rendered_before_send() {
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value(" trimmed ");

        let pending = session.submit(&mut input).unwrap();

        assert_eq!(pending.request.message, "trimmed");
        assert_eq!(texts(&session), vec![(Origin::User, "trimmed".to_string())]);
        assert_eq!(session.in_flight(), 1);
    }

    #[tokio::test]
    async fn test_replies_render_in_array_order() {
        let transport = ScriptedTransport::new(Ok(vec![reply("A"), reply("B")]));
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value("go");

        session.exchange(&transport, &mut input).await;

        let bots: Vec<&str> = session
            .transcript()
            .by_origin(Origin::Bot)
            .map(|m| m.text())
            .collect();
        assert_eq!(bots, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_network_failure_renders_one_error() {
        let transport = ScriptedTransport::new(Err(ChatError::Network("refused".into())));
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value("Hello");

        session.exchange(&transport, &mut input).await;

        let messages = texts(&session);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], (Origin::User, "Hello".to_string()));
        assert_eq!(messages[1].0, Origin::Error);
        assert_eq!(session.retryable(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_protocol_error_is_not_retryable() {
        let transport = ScriptedTransport::new(Err(ChatError::Protocol("not an array".into())));
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value("Hello");

        session.exchange(&transport, &mut input).await;

        assert_eq!(session.transcript().by_origin(Origin::Error).count(), 1);
        assert_eq!(session.retryable(), None);
        assert!(session.retry().is_none());
    }

    #[test]
    fn test_retry_resends_without_new_user_message() {
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let mut input = InputBuffer::with_value("Hello");

        let first = session.submit(&mut input).unwrap();
        session.complete(first.seq, Err(ChatError::Status { status: 502 }));

        let retry = session.retry().unwrap();
        assert_ne!(retry.seq, first.seq);
        assert_eq!(retry.request.message, "Hello");
        assert_eq!(session.retryable(), None);

        session.complete(retry.seq, Ok(vec![reply("Hi")]));
        assert_eq!(session.transcript().by_origin(Origin::User).count(), 1);
        assert_eq!(session.transcript().by_origin(Origin::Bot).count(), 1);
    }

    #[test]
    fn test_completion_order_follows_arrival() {
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let first = session.submit(&mut InputBuffer::with_value("one")).unwrap();
        let second = session.submit(&mut InputBuffer::with_value("two")).unwrap();

        session.complete(second.seq, Ok(vec![reply("reply two")]));
        session.complete(first.seq, Ok(vec![reply("reply one")]));

        let bots: Vec<&str> = session
            .transcript()
            .by_origin(Origin::Bot)
            .map(|m| m.text())
            .collect();
        assert_eq!(bots, vec!["reply two", "reply one"]);
    }

    #[test]
    fn test_fifo_order_follows_sends() {
        let mut session = ChatSession::new("user", DeliveryOrder::Fifo);
        let first = session.submit(&mut InputBuffer::with_value("one")).unwrap();
        let second = session.submit(&mut InputBuffer::with_value("two")).unwrap();
        let third = session.submit(&mut InputBuffer::with_value("three")).unwrap();

        session.complete(third.seq, Ok(vec![reply("reply three")]));
        session.complete(second.seq, Err(ChatError::Network("reset".into())));
        assert_eq!(session.transcript().by_origin(Origin::Bot).count(), 0);
        assert_eq!(session.in_flight(), 3);

        session.complete(first.seq, Ok(vec![reply("reply one")]));

        let rendered: Vec<(Origin, String)> = texts(&session).into_iter().skip(3).collect();
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], (Origin::Bot, "reply one".to_string()));
        assert_eq!(rendered[1].0, Origin::Error);
        assert_eq!(rendered[2], (Origin::Bot, "reply three".to_string()));
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_older_success_keeps_newer_failure_retryable() {
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let first = session.submit(&mut InputBuffer::with_value("A")).unwrap();
        let second = session.submit(&mut InputBuffer::with_value("B")).unwrap();

        session.complete(second.seq, Err(ChatError::Network("reset".into())));
        session.complete(first.seq, Ok(vec![reply("reply A")]));
        assert_eq!(session.retryable(), Some("B"));

        let retry = session.retry().unwrap();
        session.complete(retry.seq, Ok(vec![reply("reply B")]));
        assert_eq!(session.retryable(), None);
    }

    #[test]
    fn test_newer_success_clears_older_failure() {
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        let first = session.submit(&mut InputBuffer::with_value("A")).unwrap();
        let second = session.submit(&mut InputBuffer::with_value("B")).unwrap();

        session.complete(first.seq, Err(ChatError::Status { status: 503 }));
        session.complete(second.seq, Ok(vec![reply("reply B")]));
        assert_eq!(session.retryable(), None);
    }

    #[test]
    fn test_in_flight_counts_held_replies() {
        let mut session = ChatSession::new("user", DeliveryOrder::Fifo);
        let first = session.submit(&mut InputBuffer::with_value("one")).unwrap();
        let second = session.submit(&mut InputBuffer::with_value("two")).unwrap();

        session.complete(second.seq, Ok(vec![reply("reply two")]));
        assert_eq!(session.in_flight(), 2);

        session.complete(first.seq, Ok(vec![reply("reply one")]));
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_unknown_completion_is_ignored() {
        let mut session = ChatSession::new("user", DeliveryOrder::Completion);
        session.complete(42, Ok(vec![reply("stray")]));
        assert!(session.transcript().is_empty());
    }
}
