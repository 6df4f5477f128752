//! Webhook client against a live local server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::post, Router};
use tokio::net::TcpListener;

use rasachat_client::{ClientConfig, WebhookClient};
use rasachat_core::{
    ChatError, ChatSession, DeliveryOrder, InputBuffer, Origin, Transport, WebhookRequest,
    WEBHOOK_PATH,
};
use rasachat_devserver::{create_router, AppState, KnowledgeBase};

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> WebhookClient {
    let config = ClientConfig {
        webhook_url: format!("http://{}{}", addr, WEBHOOK_PATH),
        timeout: Duration::from_secs(5),
    };
    WebhookClient::new(&config).unwrap()
}

/// Router answering every webhook POST with a fixed body.
fn canned(body: &'static str) -> Router {
    Router::new().route(
        WEBHOOK_PATH,
        post(move || async move { ([("content-type", "application/json")], body) }),
    )
}

#[tokio::test]
async fn test_hello_round_trip() {
    let addr = serve(create_router(AppState::new(KnowledgeBase::sample()))).await;
    let client = client_for(addr);

    let replies = client
        .send(&WebhookRequest::new("user", "Hello"))
        .await
        .unwrap();

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text.as_deref(), Some("Hi there!"));
    assert_eq!(replies[0].recipient_id.as_deref(), Some("user"));
}

#[tokio::test]
async fn test_ping() {
    let addr = serve(create_router(AppState::new(KnowledgeBase::sample()))).await;
    assert!(client_for(addr).ping().await);
}

#[tokio::test]
async fn test_session_renders_bot_replies_in_order() {
    let addr = serve(canned(r#"[{"text":"A"},{"text":"B"}]"#)).await;
    let client = client_for(addr);
    let mut session = ChatSession::new("user", DeliveryOrder::Completion);
    let mut input = InputBuffer::with_value("anything");

    assert!(session.exchange(&client, &mut input).await);

    let bots: Vec<&str> = session
        .transcript()
        .by_origin(Origin::Bot)
        .map(|m| m.text())
        .collect();
    assert_eq!(bots, vec!["A", "B"]);
}

#[tokio::test]
async fn test_non_array_is_protocol_error() {
    let addr = serve(canned(r#"{"text":"A"}"#)).await;
    let err = client_for(addr)
        .send(&WebhookRequest::new("user", "Hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Protocol(_)));
}

#[tokio::test]
async fn test_error_status() {
    let router = Router::new().route(
        WEBHOOK_PATH,
        post(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = serve(router).await;
    let err = client_for(addr)
        .send(&WebhookRequest::new("user", "Hello"))
        .await
        .unwrap_err();
    assert_eq!(err, ChatError::Status { status: 500 });
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    assert!(!client.ping().await);

    let mut session = ChatSession::new("user", DeliveryOrder::Completion);
    let mut input = InputBuffer::with_value("Hello");
    session.exchange(&client, &mut input).await;

    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].origin(), Origin::User);
    assert_eq!(messages[0].text(), "Hello");
    assert_eq!(messages[1].origin(), Origin::Error);
    assert_eq!(session.retryable(), Some("Hello"));
}

#[tokio::test]
async fn test_request_body_reaches_server() {
    let router = Router::new().route(
        WEBHOOK_PATH,
        post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
            let echo = format!("{}|{}", body["sender"], body["message"]);
            axum::Json(serde_json::json!([{ "text": echo }]))
        }),
    );
    let addr = serve(router).await;

    let replies = client_for(addr)
        .send(&WebhookRequest::new("user", "<b>Hello</b>"))
        .await
        .unwrap();
    assert_eq!(replies[0].text.as_deref(), Some(r#""user"|"<b>Hello</b>""#));
}
