/**
 * Chat Hub
 *
 * Per-user broadcast channels for direct-message delivery. Every open chat
 * WebSocket of a user subscribes to that user's channel, so a message sent
 * from any device reaches all of them.
 *
 * Channels are created on first subscribe and dropped by
 * `cleanup_inactive_channels` once their last receiver is gone. Delivery is
 * best effort: a user with no open session simply receives nothing, and the
 * message is still in the store for `GET /api/chats/{username}`.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::forum::ServerFrame;

/// Registry of per-user broadcast channels
#[derive(Clone)]
pub struct ChatHub {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<ServerFrame>>>>,
    capacity: usize,
}

impl std::fmt::Debug for ChatHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatHub")
            .field("channels", &self.channels().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl ChatHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    // A poisoned map is still consistent.
    fn channels(&self) -> MutexGuard<'_, HashMap<Uuid, broadcast::Sender<ServerFrame>>> {
        self.channels.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Open a receiver on `user_id`'s channel, creating the channel if needed
    pub fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<ServerFrame> {
        let capacity = self.capacity;
        self.channels()
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(capacity).0)
            .subscribe()
    }

    /// Send a frame to every session of `user_id`
    ///
    /// # Returns
    ///
    /// Number of sessions that received the frame (0 if the user is offline)
    pub fn deliver(&self, user_id: Uuid, frame: ServerFrame) -> usize {
        let sender = match self.channels().get(&user_id) {
            Some(sender) => sender.clone(),
            None => return 0,
        };
        match sender.send(frame) {
            Ok(count) => {
                tracing::debug!("[Chat] Frame delivered to {} session(s) of {}", count, user_id);
                count
            }
            Err(_) => 0,
        }
    }

    pub fn session_count(&self, user_id: Uuid) -> usize {
        self.channels()
            .get(&user_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    pub fn online(&self, user_id: Uuid) -> bool {
        self.session_count(user_id) > 0
    }

    /// Drop channels that no longer have subscribers
    ///
    /// # Returns
    ///
    /// Number of channels removed
    pub fn cleanup_inactive_channels(&self) -> usize {
        let mut channels = self.channels();
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        before - channels.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels().len()
    }
}
