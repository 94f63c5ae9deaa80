use serde::{Deserialize, Serialize};

/// A tracked fleet entity, keyed by its caller-supplied `id`.
///
/// `last_seen` is unix seconds and is set by the server on every mutation;
/// values supplied by callers are overwritten.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub vehicle: String,
    pub license: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_seen: u64,
}

/// One position report as it travels over the live channel, in both
/// directions. The timestamp is producer-supplied and not normalized.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
}

/// Body of the location update call.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_wire_shape() {
        let location = Location {
            latitude: 1.0,
            longitude: 2.0,
            timestamp: 1000,
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"latitude": 1.0, "longitude": 2.0, "timestamp": 1000})
        );
    }

    #[test]
    fn absent_fields_decode_to_zero_values() {
        let driver: Driver = serde_json::from_str(r#"{"id":"d1","name":"Ana"}"#).unwrap();
        assert_eq!(driver.id, "d1");
        assert_eq!(driver.name, "Ana");
        assert_eq!(driver.vehicle, "");
        assert_eq!(driver.latitude, 0.0);
        assert_eq!(driver.last_seen, 0);
    }

    #[test]
    fn ill_typed_fields_are_rejected() {
        assert!(serde_json::from_str::<Location>(r#"{"latitude":"north"}"#).is_err());
    }
}
