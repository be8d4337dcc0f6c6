mod events;
mod registry;

pub use events::{ClientEvent, RideStatus, ServerEvent};
pub use registry::{ConnectionId, RoomRegistry};

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Extension, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc::{self, UnboundedSender};
use uuid::Uuid;

use crate::auth::{Session, SessionKeys};
use crate::error::{authentication_error, Error};

/// Fans ride events out to everyone else watching the same ride.
pub struct Relay {
    keys: SessionKeys,
    registry: RoomRegistry,
}

#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    token: Option<String>,
}

/// Upgrades `GET /ws` connections, rejecting them before the upgrade when
/// the credential is missing or bad.
pub async fn gateway(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    headers: HeaderMap,
    Extension(relay): Extension<Arc<Relay>>,
) -> Result<Response, Error> {
    let token = params
        .token
        .or_else(|| bearer_token(&headers))
        .ok_or_else(|| authentication_error("access denied, no token provided"))?;

    let session = relay.authenticate(&token)?;

    Ok(ws.on_upgrade(move |socket| relay.serve_connection(socket, session)))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

impl Relay {
    pub fn new(keys: SessionKeys) -> Self {
        Self {
            keys,
            registry: RoomRegistry::new(),
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn authenticate(&self, token: &str) -> Result<Session, Error> {
        self.keys.verify(token)
    }

    /// Runs one authenticated connection until the peer goes away, then
    /// drops its memberships so later broadcasts no longer see it.
    pub async fn serve_connection(self: Arc<Self>, socket: WebSocket, session: Session) {
        let id = Uuid::new_v4();
        let (mut outgoing, mut incoming) = socket.split();
        let (queue, mut queued) = mpsc::unbounded_channel::<Message>();

        // writes go through a queue drained by its own task, so a slow
        // peer never blocks whoever is broadcasting to it
        let writer = tokio::spawn(async move {
            while let Some(message) = queued.recv().await {
                if outgoing.send(message).await.is_err() {
                    break;
                }
            }
        });

        tracing::info!(connection = %id, mobile = %session.mobile, "connection established");

        while let Some(message) = incoming.next().await {
            let message = match message {
                Ok(message) => message,
                Err(_) => break,
            };

            match message {
                Message::Text(text) => self.handle_event(id, &queue, &text).await,
                Message::Close(_) => break,
                _ => {}
            }
        }

        self.registry.remove_connection(id).await;

        drop(queue);
        let _ = writer.await;

        tracing::info!(connection = %id, "connection closed");
    }

    async fn handle_event(&self, id: ConnectionId, queue: &UnboundedSender<Message>, text: &str) {
        let event = match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => event,
            Err(err) => {
                self.report(queue, format!("malformed event: {}", err));
                return;
            }
        };

        match event {
            ClientEvent::JoinRide { ride_id } => {
                if ride_id.is_empty() {
                    self.report(queue, "ride_id required".into());
                    return;
                }

                self.registry.join(&ride_id, id, queue.clone()).await;

                let members = self.registry.member_count(&ride_id).await;
                tracing::info!(connection = %id, %ride_id, members, "joined ride room");
            }
            ClientEvent::LocationUpdate {
                ride_id,
                lat,
                lng,
                heading,
            } => {
                if ride_id.is_empty() {
                    self.report(queue, "ride_id required".into());
                    return;
                }

                if !lat.is_finite() || !lng.is_finite() {
                    self.report(queue, "coordinates must be finite numbers".into());
                    return;
                }

                let event = ServerEvent::LocationUpdate {
                    ride_id: ride_id.clone(),
                    lat,
                    lng,
                    heading,
                };

                let delivered = self.registry.broadcast(&ride_id, id, &event).await;
                tracing::debug!(connection = %id, %ride_id, delivered, "relayed location update");
            }
            ClientEvent::StatusChanged {
                ride_id,
                status,
                detail,
            } => {
                if ride_id.is_empty() {
                    self.report(queue, "ride_id required".into());
                    return;
                }

                let event = ServerEvent::StatusChanged {
                    ride_id: ride_id.clone(),
                    status,
                    detail,
                };

                let delivered = self.registry.broadcast(&ride_id, id, &event).await;
                tracing::info!(connection = %id, %ride_id, ?status, delivered, "relayed status change");
            }
        }
    }

    /// Problems with a submitted event go back to that sender alone.
    fn report(&self, queue: &UnboundedSender<Message>, message: String) {
        let payload =
            serde_json::to_string(&ServerEvent::Error { message }).expect("event serializes");

        let _ = queue.send(Message::Text(payload));
    }
}
