//! Concurrency-safe driver records, keyed by caller-supplied id.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use fleettrack_shared::domain::Driver;

/// The fleet-wide driver map. One lock covers the whole map; every mutation
/// refreshes `last_seen` to wall-clock time.
pub struct DriverRegistry {
    drivers: Mutex<HashMap<String, Driver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self {
            drivers: Mutex::new(HashMap::new()),
        }
    }

    /// Insert or overwrite the record keyed by `driver.id` and return the
    /// stored record. A second create with the same id replaces the first.
    pub fn create(&self, mut driver: Driver) -> Driver {
        driver.last_seen = unix_now();
        let mut drivers = self.drivers.lock().unwrap();
        drivers.insert(driver.id.clone(), driver.clone());
        driver
    }

    /// Mutate the position of an existing driver in place. `None` if the id
    /// is unknown.
    pub fn update_location(&self, id: &str, latitude: f64, longitude: f64) -> Option<Driver> {
        let mut drivers = self.drivers.lock().unwrap();
        let driver = drivers.get_mut(id)?;
        driver.latitude = latitude;
        driver.longitude = longitude;
        driver.last_seen = unix_now();
        Some(driver.clone())
    }

    pub fn get(&self, id: &str) -> Option<Driver> {
        self.drivers.lock().unwrap().get(id).cloned()
    }

    /// Snapshot of all records; iteration order is not significant.
    pub fn list(&self) -> HashMap<String, Driver> {
        self.drivers.lock().unwrap().clone()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Driver {
        Driver {
            id: "d1".into(),
            name: "Ana".into(),
            vehicle: "Moto".into(),
            license: "ABC123".into(),
            ..Driver::default()
        }
    }

    #[test]
    fn create_then_get_returns_stored_record() {
        let registry = DriverRegistry::new();
        let before = unix_now();

        let stored = registry.create(ana());
        assert!(stored.last_seen >= before);

        let fetched = registry.get("d1").unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.name, "Ana");
    }

    #[test]
    fn create_with_same_id_overwrites() {
        let registry = DriverRegistry::new();
        registry.create(ana());
        registry.create(Driver {
            name: "Bia".into(),
            ..ana()
        });

        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.get("d1").unwrap().name, "Bia");
    }

    #[test]
    fn update_location_mutates_in_place() {
        let registry = DriverRegistry::new();
        let created = registry.create(ana());

        let updated = registry.update_location("d1", -23.5, -46.6).unwrap();
        assert_eq!(updated.latitude, -23.5);
        assert_eq!(updated.longitude, -46.6);
        assert!(updated.last_seen >= created.last_seen);
        assert_eq!(registry.get("d1").unwrap(), updated);
    }

    #[test]
    fn update_location_unknown_id_leaves_registry_unchanged() {
        let registry = DriverRegistry::new();
        registry.create(ana());

        assert!(registry.update_location("ghost", 1.0, 2.0).is_none());
        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.get("d1").unwrap().latitude, 0.0);
    }

    #[test]
    fn list_snapshots_every_record() {
        let registry = DriverRegistry::new();
        for n in 0..4 {
            registry.create(Driver {
                id: format!("d{n}"),
                ..ana()
            });
        }

        let all = registry.list();
        assert_eq!(all.len(), 4);
        for id in all.keys() {
            assert!(registry.get(id).is_some());
        }
    }
}
