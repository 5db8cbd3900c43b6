//! Integration tests for the KidZone server, run in-process on an ephemeral port.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use kidzone_server::{
    domain::{Capacity, RoomName, RoomRepository},
    infrastructure::{
        dto::websocket::RoomsUpdateMessage,
        message_pusher::WebSocketMessagePusher,
        notifier::LogNotifier,
        repository::{InMemoryRoomRepository, InMemorySubscriptionRepository},
    },
    ui::{AppState, Server},
};
use kidzone_shared::time::SystemClock;
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Helper struct to manage the in-process server lifecycle
struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    http: reqwest::Client,
}

impl TestServer {
    /// Start a server with "Main KidZone" (20, open) and "Overflow Room" (15, closed)
    async fn start() -> Self {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        for (name, capacity, is_open) in [("Main KidZone", 20, true), ("Overflow Room", 15, false)]
        {
            room_repository
                .create_room(
                    RoomName::new(name.to_string()).unwrap(),
                    Capacity::new(capacity).unwrap(),
                    is_open,
                )
                .await
                .unwrap();
        }
        let state = AppState::new(
            room_repository,
            Arc::new(InMemorySubscriptionRepository::new()),
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(LogNotifier::new()),
            Arc::new(SystemClock),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            Server::new(state).serve(listener).await.unwrap();
        });

        TestServer {
            addr,
            handle,
            http: reqwest::Client::new(),
        }
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Connect a WebSocket client and consume its initial snapshot
    async fn connect(&self) -> (WsClient, RoomsUpdateMessage) {
        let (mut ws, _) = connect_async(format!("ws://{}/ws", self.addr))
            .await
            .expect("Failed to connect");
        let initial = next_rooms_update(&mut ws).await;
        (ws, initial)
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.http
            .post(self.http_url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.http.get(self.http_url(path)).send().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Wait for the next `ROOMS_UPDATE`, skipping control frames
async fn next_rooms_update(ws: &mut WsClient) -> RoomsUpdateMessage {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str::<RoomsUpdateMessage>(&text)
                        .expect("Failed to parse ROOMS_UPDATE");
                }
                Some(Ok(_)) => continue,
                other => panic!("Connection ended unexpectedly: {:?}", other),
            }
        }
    })
    .await
    .expect("Timed out waiting for ROOMS_UPDATE")
}

/// Assert that no text frame arrives within a short window
async fn assert_no_update(ws: &mut WsClient) {
    let result = tokio::time::timeout(SILENCE_WINDOW, ws.next()).await;
    assert!(result.is_err(), "Unexpected message: {:?}", result);
}

fn occupancy_of(message: &RoomsUpdateMessage, room_id: u32) -> u32 {
    message
        .rooms
        .iter()
        .find(|r| r.id == room_id)
        .expect("room missing from snapshot")
        .current_occupancy
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await;

    let response = server.get("/api/health").await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn test_new_connection_receives_initial_snapshot() {
    // given:
    let server = TestServer::start().await;

    // when:
    let (_ws, initial) = server.connect().await;

    // then:
    assert_eq!(initial.rooms.len(), 2);
    assert_eq!(initial.rooms[0].name, "Main KidZone");
    assert_eq!(initial.rooms[0].max_capacity, 20);
    assert!(initial.rooms[0].is_open);
    assert_eq!(initial.rooms[1].name, "Overflow Room");
    assert!(!initial.rooms[1].is_open);
}

#[tokio::test]
async fn test_occupancy_update_is_broadcast_to_every_client() {
    // given:
    let server = TestServer::start().await;
    let (mut ws1, _) = server.connect().await;
    let (mut ws2, _) = server.connect().await;

    // when:
    let response = server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 12}))
        .await;

    // then:
    assert_eq!(response.status(), 200);
    let room: Value = response.json().await.unwrap();
    assert_eq!(room["currentOccupancy"], 12);
    assert_eq!(room["maxCapacity"], 20);

    for ws in [&mut ws1, &mut ws2] {
        let update = next_rooms_update(ws).await;
        assert_eq!(occupancy_of(&update, 1), 12);
        assert_eq!(update.rooms.len(), 2);
    }
}

#[tokio::test]
async fn test_raw_wire_message_shape() {
    let server = TestServer::start().await;
    let (mut ws, _) = server.connect().await;

    server
        .post("/api/rooms/2/occupancy", json!({"occupancy": 3}))
        .await;

    let text = tokio::time::timeout(RECV_TIMEOUT, ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap()
        .into_text()
        .unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["type"], "ROOMS_UPDATE");
    assert_eq!(value["rooms"][1]["currentOccupancy"], 3);
    assert_eq!(value["rooms"][1]["isOpen"], false);
}

#[tokio::test]
async fn test_occupancy_above_capacity_is_rejected_without_broadcast() {
    // given:
    let server = TestServer::start().await;
    let (mut ws, _) = server.connect().await;

    // when:
    let response = server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 21}))
        .await;

    // then:
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<Value>().await.unwrap()["message"],
        "Occupancy cannot exceed maximum capacity of 20"
    );
    assert_no_update(&mut ws).await;
}

#[tokio::test]
async fn test_invalid_occupancy_bodies_are_rejected() {
    let server = TestServer::start().await;

    let negative = server
        .post("/api/rooms/1/occupancy", json!({"occupancy": -1}))
        .await;
    let missing = server.post("/api/rooms/1/occupancy", json!({})).await;
    let not_a_number = server
        .post("/api/rooms/1/occupancy", json!({"occupancy": "abc"}))
        .await;
    let fraction = server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 1.5}))
        .await;

    assert_eq!(negative.status(), 400);
    assert_eq!(
        negative.json::<Value>().await.unwrap()["message"],
        "Invalid occupancy value"
    );
    assert_eq!(missing.status(), 400);
    assert_eq!(
        missing.json::<Value>().await.unwrap()["message"],
        "Occupancy value is required"
    );
    for response in [not_a_number, fraction] {
        assert_eq!(response.status(), 400);
        assert_eq!(
            response.json::<Value>().await.unwrap()["message"],
            "Invalid occupancy value"
        );
    }
}

#[tokio::test]
async fn test_unknown_room_is_not_found() {
    let server = TestServer::start().await;

    let response = server
        .post("/api/rooms/99/occupancy", json!({"occupancy": 1}))
        .await;

    assert_eq!(response.status(), 404);
    assert_eq!(
        response.json::<Value>().await.unwrap()["message"],
        "Room not found"
    );
}

#[tokio::test]
async fn test_status_change_is_broadcast() {
    let server = TestServer::start().await;
    let (mut ws, _) = server.connect().await;

    let response = server
        .post("/api/rooms/2/status", json!({"isOpen": true}))
        .await;

    assert_eq!(response.status(), 200);
    let update = next_rooms_update(&mut ws).await;
    assert!(update.rooms[1].is_open);
}

#[tokio::test]
async fn test_reset_zeroes_every_room_and_broadcasts_once() {
    // given:
    let server = TestServer::start().await;
    server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 20}))
        .await;
    server
        .post("/api/rooms/2/occupancy", json!({"occupancy": 7}))
        .await;
    let (mut ws, initial) = server.connect().await;
    assert_eq!(occupancy_of(&initial, 1), 20);

    // when:
    let response = server.post("/api/rooms/reset", json!({})).await;

    // then:
    assert_eq!(response.status(), 200);
    let update = next_rooms_update(&mut ws).await;
    assert!(update.rooms.iter().all(|r| r.current_occupancy == 0));
    assert!(update.rooms.iter().all(|r| r.last_reset.is_some()));
    assert_no_update(&mut ws).await;
}

#[tokio::test]
async fn test_history_lists_changes_in_order() {
    let server = TestServer::start().await;
    server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 4}))
        .await;
    server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 6}))
        .await;

    let response = server.get("/api/rooms/1/history").await;

    assert_eq!(response.status(), 200);
    let history: Vec<Value> = response.json().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["previousOccupancy"], 0);
    assert_eq!(history[0]["newOccupancy"], 4);
    assert_eq!(history[1]["previousOccupancy"], 4);
    assert_eq!(history[1]["newOccupancy"], 6);
    assert_eq!(server.get("/api/rooms/99/history").await.status(), 404);
}

#[tokio::test]
async fn test_create_subscription() {
    let server = TestServer::start().await;

    let created = server
        .post(
            "/api/notifications",
            json!({"roomId": 1, "type": "AVAILABLE", "email": "parent@example.com"}),
        )
        .await;
    let no_contact = server
        .post("/api/notifications", json!({"roomId": 1, "type": "FULL"}))
        .await;
    let unknown_room = server
        .post(
            "/api/notifications",
            json!({"roomId": 99, "type": "FULL", "phone": "+15551234567"}),
        )
        .await;

    assert_eq!(created.status(), 200);
    let subscription: Value = created.json().await.unwrap();
    assert_eq!(subscription["roomId"], 1);
    assert_eq!(subscription["type"], "AVAILABLE");
    assert_eq!(subscription["channel"], "email");
    assert_eq!(no_contact.status(), 400);
    assert_eq!(unknown_room.status(), 404);
}

#[tokio::test]
async fn test_closed_client_does_not_block_others() {
    // given: two clients, one of which hangs up
    let server = TestServer::start().await;
    let (mut leaving, _) = server.connect().await;
    let (mut staying, _) = server.connect().await;
    leaving.send(Message::Close(None)).await.unwrap();
    drop(leaving);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // when:
    let response = server
        .post("/api/rooms/1/occupancy", json!({"occupancy": 5}))
        .await;

    // then:
    assert_eq!(response.status(), 200);
    let update = next_rooms_update(&mut staying).await;
    assert_eq!(occupancy_of(&update, 1), 5);
}
