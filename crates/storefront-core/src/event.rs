//! The event envelope carried on the event channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of an event.
///
/// Unrecognized wire values deserialize to `Unknown` so that a consumer can
/// fail the message explicitly instead of dropping it at the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Create the entity carried in `data`.
    Create,
    /// Delete all entities matching `key`.
    Delete,
    /// Any event type not understood by this version of the service.
    #[serde(other)]
    Unknown,
}

/// An immutable event: a type, a key identifying the affected data, an
/// optional data element, and a creation timestamp.
///
/// CREATE events carry `data`; DELETE events carry `data = None`. Events
/// with the same key are delivered in publication order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event<K, T> {
    /// The kind of event.
    pub event_type: EventType,
    /// The business key identifying the affected data.
    pub key: K,
    /// The event payload; `None` for DELETE events.
    pub data: Option<T>,
    /// When the event was created.
    pub event_created_at: DateTime<Utc>,
}

impl<K, T> Event<K, T> {
    /// Builds a CREATE event for `data`, keyed by `key`.
    pub fn create(key: K, data: T, created_at: DateTime<Utc>) -> Self {
        Self {
            event_type: EventType::Create,
            key,
            data: Some(data),
            event_created_at: created_at,
        }
    }

    /// Builds a DELETE event for everything matching `key`.
    pub const fn delete(key: K, created_at: DateTime<Utc>) -> Self {
        Self {
            event_type: EventType::Delete,
            key,
            data: None,
            event_created_at: created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_create_event_serializes_to_wire_format() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let event = Event::create(123, "payload".to_owned(), created_at);

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["eventType"], "CREATE");
        assert_eq!(json["key"], 123);
        assert_eq!(json["data"], "payload");
        assert_eq!(json["eventCreatedAt"], "2026-01-15T10:00:00Z");
    }

    #[test]
    fn test_delete_event_carries_null_data() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let event: Event<i32, String> = Event::delete(123, created_at);

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["eventType"], "DELETE");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_unrecognized_event_type_deserializes_to_unknown() {
        let json = serde_json::json!({
            "eventType": "UPSERT",
            "key": 1,
            "data": null,
            "eventCreatedAt": "2026-01-15T10:00:00Z"
        });

        let event: Event<i32, String> = serde_json::from_value(json).unwrap();

        assert_eq!(event.event_type, EventType::Unknown);
    }
}
