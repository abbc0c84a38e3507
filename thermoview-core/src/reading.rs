//! Reading model mirroring the upstream wire format
//!
//! One JSON object per observation. The upstream service names the
//! value field `temperatura` and emits timestamps either as epoch
//! milliseconds or as an RFC 3339 string; both are accepted here and
//! normalized to milliseconds.

use serde::{Deserialize, Deserializer, Serialize};

use crate::time::Timestamp;

/// Identifier of the originating sensor, one per environment.
///
/// A small fixed set; see [`crate::environment`] for the known ids.
pub type SensorId = u8;

/// One sensor observation.
///
/// `timestamp` is the deduplication key: two readings with the same
/// timestamp are considered the same reading regardless of the other
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Originating sensor/environment.
    pub sensor_id: SensorId,
    /// When the reading was produced, in milliseconds since epoch.
    #[serde(deserialize_with = "timestamp_millis")]
    pub timestamp: Timestamp,
    /// Measured temperature in °C.
    #[serde(alias = "temperatura")]
    pub temperature: f32,
}

/// Accept epoch milliseconds or an RFC 3339 string.
fn timestamp_millis<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Millis(u64),
        Text(String),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Millis(ms) => Ok(ms),
        Wire::Text(s) => {
            let parsed = chrono::DateTime::parse_from_rfc3339(&s)
                .map_err(serde::de::Error::custom)?;
            let ms = parsed.timestamp_millis();
            if ms < 0 {
                return Err(serde::de::Error::custom("timestamp before Unix epoch"));
            }
            Ok(ms as Timestamp)
        }
    }
}
