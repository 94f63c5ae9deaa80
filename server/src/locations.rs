//! Last-known location per live channel.
//!
//! Keys are transport identities: the remote endpoint observed when the
//! channel was accepted. They are unrelated to driver ids; a channel never
//! announces which driver it carries.

use std::collections::HashMap;
use std::sync::Mutex;

use fleettrack_shared::domain::Location;

pub struct LocationStore {
    locations: Mutex<HashMap<String, Location>>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self {
            locations: Mutex::new(HashMap::new()),
        }
    }

    /// Unconditional upsert under the channel's key.
    pub fn put(&self, key: &str, location: Location) {
        self.locations
            .lock()
            .unwrap()
            .insert(key.to_owned(), location);
    }

    pub fn get(&self, key: &str) -> Option<Location> {
        self.locations.lock().unwrap().get(key).cloned()
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_previous_value() {
        let store = LocationStore::new();
        let key = "10.0.0.7:52110";

        store.put(
            key,
            Location {
                latitude: 1.0,
                longitude: 2.0,
                timestamp: 1000,
            },
        );
        store.put(
            key,
            Location {
                latitude: 3.0,
                longitude: 4.0,
                timestamp: 2000,
            },
        );

        assert_eq!(store.get(key).unwrap().timestamp, 2000);
    }

    #[test]
    fn unknown_key_is_none() {
        let store = LocationStore::new();
        assert!(store.get("203.0.113.9:4000").is_none());
    }
}
