//! Registry of open WebSocket sessions, keyed by user id.
//!
//! A user has at most one live session; opening a second connection
//! replaces the first. Messages sent to a user with no session are
//! dropped, the data is still reachable over HTTP.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::domain::gateways::QrNotifier;

/// Tracks the outbound channel of each connected user.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, mpsc::UnboundedSender<String>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session for `user_id` and returns the receiving half.
    ///
    /// Any previous session for the same user is replaced; its receiver
    /// closes and the old socket task winds down.
    pub fn register(&self, user_id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sessions = self.sessions.lock().expect("session registry lock poisoned");
        if sessions.insert(user_id.to_string(), tx).is_some() {
            tracing::debug!(%user_id, "replaced existing session");
        }
        rx
    }

    /// Removes the session unless a newer one took its place.
    pub fn unregister(&self, user_id: &str) {
        let mut sessions = self.sessions.lock().expect("session registry lock poisoned");
        if let Some(tx) = sessions.get(user_id) {
            if tx.is_closed() {
                sessions.remove(user_id);
            }
        }
    }

    /// Sends a text frame to the user's session. Returns `false` when the
    /// user is not connected.
    pub fn send(&self, user_id: &str, message: &str) -> bool {
        let sessions = self.sessions.lock().expect("session registry lock poisoned");
        match sessions.get(user_id) {
            Some(tx) => tx.send(message.to_string()).is_ok(),
            None => false,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl QrNotifier for SessionRegistry {
    fn notify_qr(&self, owner: &str, key: &str, message: &str) -> bool {
        let delivered = self.send(owner, message);
        if !delivered {
            tracing::debug!(%owner, %key, "no live session for QR push");
        }
        delivered
    }
}
