//! Active observer connections and broadcast fan-out.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use fleettrack_shared::domain::Location;

/// The set of live observer channels. Each entry is the sending half of an
/// unbounded channel whose receiver is drained by that observer's forward
/// task; a send fails only once that task has exited, so a slow peer never
/// blocks the fan-out pass. The trade-off: frames queue without bound in
/// memory while a peer stalls, until its transport gives up and the handle
/// is evicted.
pub struct ConnectionHub {
    connections: Mutex<HashMap<Uuid, UnboundedSender<Location>>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Add a fresh channel to the active set. Called exactly once per
    /// upgraded connection.
    pub fn register(&self) -> (Uuid, UnboundedReceiver<Location>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.connections.lock().unwrap().insert(id, tx);
        (id, rx)
    }

    /// Remove a handle. No-op when a failed broadcast already evicted it.
    pub fn unregister(&self, id: &Uuid) {
        self.connections.lock().unwrap().remove(id);
    }

    /// Deliver `location` to every active handle, the sender's own channel
    /// included. Handles whose observer has gone away are evicted during the
    /// same pass; the lock is held for the full fan-out.
    pub fn broadcast(&self, location: &Location) {
        let mut connections = self.connections.lock().unwrap();
        connections.retain(|id, tx| {
            let delivered = tx.send(location.clone()).is_ok();
            if !delivered {
                tracing::debug!(connection = %id, "evicting dead observer");
            }
            delivered
        });
    }

    /// Number of currently-registered observers.
    pub fn len(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConnectionHub {
    fn default() -> Self {
        Self::new()
    }
}
