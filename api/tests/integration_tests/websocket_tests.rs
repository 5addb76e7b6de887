//! Integration tests for the real-time WebSocket stream.
//!
//! Tests cover:
//! - Delivery of newly ingested entries to every connected client
//! - Rejected entries are not pushed
//! - Disconnected clients are unsubscribed

use axum::http::StatusCode;
use chrono::Utc;
use futures_util::StreamExt;
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::common::{log_payload, post_json, spawn_server};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(addr: SocketAddr) -> Client {
    let (socket, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("ws connect failed");
    socket
}

async fn next_event(client: &mut Client) -> Value {
    let message = tokio::time::timeout(Duration::from_secs(5), client.next())
        .await
        .expect("timed out waiting for event")
        .unwrap()
        .unwrap();
    serde_json::from_str(&message.into_text().unwrap()).unwrap()
}

async fn wait_for_subscribers(state: &api::AppState, expected: usize) {
    for _ in 0..100 {
        if state.notifier().subscriber_count() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} subscribers, found {}",
        state.notifier().subscriber_count()
    );
}

#[tokio::test]
async fn test_new_log_is_pushed_to_every_client() {
    let (addr, app, state) = spawn_server().await;
    let mut first = connect(addr).await;
    let mut second = connect(addr).await;
    wait_for_subscribers(&state, 2).await;

    let payload = log_payload("error", "Payment failed", "payment-service-01", Utc::now());
    assert_eq!(post_json(app.clone(), "/logs", payload).await.0, StatusCode::CREATED);

    for client in [&mut first, &mut second] {
        let event = next_event(client).await;
        assert_eq!(event["event"], "newLog");
        assert_eq!(event["data"]["message"], "Payment failed");
        assert_eq!(event["data"]["resourceId"], "payment-service-01");
    }
}

#[tokio::test]
async fn test_rejected_log_is_not_pushed() {
    let (addr, app, state) = spawn_server().await;
    let mut client = connect(addr).await;
    wait_for_subscribers(&state, 1).await;

    let invalid = log_payload("error", "", "web-01", Utc::now());
    assert_eq!(post_json(app.clone(), "/logs", invalid).await.0, StatusCode::BAD_REQUEST);
    let valid = log_payload("info", "Second one", "web-01", Utc::now());
    assert_eq!(post_json(app.clone(), "/logs", valid).await.0, StatusCode::CREATED);

    // The first frame is the valid entry; the rejected one never arrived.
    let event = next_event(&mut client).await;
    assert_eq!(event["data"]["message"], "Second one");
}

#[tokio::test]
async fn test_disconnect_unsubscribes_client() {
    let (addr, app, state) = spawn_server().await;
    let mut client = connect(addr).await;
    wait_for_subscribers(&state, 1).await;

    client.close(None).await.unwrap();
    drop(client);

    wait_for_subscribers(&state, 0).await;
    let payload = log_payload("info", "Nobody listening", "web-01", Utc::now());
    assert_eq!(post_json(app.clone(), "/logs", payload).await.0, StatusCode::CREATED);
}
