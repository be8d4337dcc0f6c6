use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::relay::ServerEvent;

pub type ConnectionId = Uuid;

/// Ride-room membership, mapping each room to the outbound queues of its
/// connections. Owned by the relay that serves it; nothing here is
/// process-global, so tests and servers each build their own.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, HashMap<ConnectionId, UnboundedSender<Message>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joining twice is a no-op, the connection's queue is registered once
    /// per room.
    pub async fn join(&self, ride_id: &str, id: ConnectionId, queue: UnboundedSender<Message>) {
        let mut rooms = self.rooms.write().await;

        rooms.entry(ride_id.into()).or_default().insert(id, queue);
    }

    /// Drops the connection from every room it joined. Rooms left empty are
    /// discarded.
    pub async fn remove_connection(&self, id: ConnectionId) {
        let mut rooms = self.rooms.write().await;

        for members in rooms.values_mut() {
            members.remove(&id);
        }

        rooms.retain(|_, members| !members.is_empty());
    }

    /// Queues the event on every member of the room except the sender,
    /// returning how many members it reached.
    pub async fn broadcast(
        &self,
        ride_id: &str,
        sender: ConnectionId,
        event: &ServerEvent,
    ) -> usize {
        let payload = serde_json::to_string(event).expect("event serializes");

        let rooms = self.rooms.read().await;

        let members = match rooms.get(ride_id) {
            Some(members) => members,
            None => return 0,
        };

        let mut delivered = 0;

        for (&member, queue) in members.iter() {
            if member == sender {
                continue;
            }

            // a failed send means the member is already shutting down; its
            // membership is removed when its connection task finishes
            if queue.send(Message::Text(payload.clone())).is_ok() {
                delivered += 1;
            }
        }

        delivered
    }

    pub async fn member_count(&self, ride_id: &str) -> usize {
        let rooms = self.rooms.read().await;

        rooms.get(ride_id).map(|members| members.len()).unwrap_or(0)
    }
}
