use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Accepted,
    Arrived,
    Started,
    Completed,
    Cancelled,
}

/// Events a connected client may submit to a ride room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRide {
        ride_id: String,
    },
    LocationUpdate {
        ride_id: String,
        lat: f64,
        lng: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        heading: Option<f64>,
    },
    StatusChanged {
        ride_id: String,
        status: RideStatus,
        #[serde(flatten)]
        detail: Map<String, Value>,
    },
}

/// Events the relay delivers to room members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    LocationUpdate {
        ride_id: String,
        lat: f64,
        lng: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        heading: Option<f64>,
    },
    StatusChanged {
        ride_id: String,
        status: RideStatus,
        #[serde(flatten)]
        detail: Map<String, Value>,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_ride_parses_from_the_wire_shape() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"join_ride","ride_id":"ride-42"}"#).unwrap();

        assert_eq!(
            event,
            ClientEvent::JoinRide {
                ride_id: "ride-42".into(),
            }
        );
    }

    #[test]
    fn location_updates_parse_with_or_without_heading() {
        let with: ClientEvent = serde_json::from_str(
            r#"{"type":"location_update","ride_id":"ride-42","lat":12.9,"lng":77.6,"heading":90.0}"#,
        )
        .unwrap();

        assert_eq!(
            with,
            ClientEvent::LocationUpdate {
                ride_id: "ride-42".into(),
                lat: 12.9,
                lng: 77.6,
                heading: Some(90.0),
            }
        );

        let without: ClientEvent = serde_json::from_str(
            r#"{"type":"location_update","ride_id":"ride-7","lat":1.0,"lng":2.0}"#,
        )
        .unwrap();

        assert!(matches!(
            without,
            ClientEvent::LocationUpdate { heading: None, .. }
        ));
    }

    #[test]
    fn omitted_headings_stay_omitted_on_the_wire() {
        let event = ServerEvent::LocationUpdate {
            ride_id: "ride-7".into(),
            lat: 1.0,
            lng: 2.0,
            heading: None,
        };

        let wire: Value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            wire,
            json!({"type": "location_update", "ride_id": "ride-7", "lat": 1.0, "lng": 2.0})
        );
    }

    #[test]
    fn status_changes_carry_extra_fields_through_opaquely() {
        let event: ClientEvent = serde_json::from_str(
            r#"{"type":"status_changed","ride_id":"ride-42","status":"accepted","driver_name":"Asha","eta_min":4}"#,
        )
        .unwrap();

        let (ride_id, status, detail) = match event {
            ClientEvent::StatusChanged {
                ride_id,
                status,
                detail,
            } => (ride_id, status, detail),
            other => panic!("expected a status change, got {:?}", other),
        };

        assert_eq!(ride_id, "ride-42");
        assert_eq!(status, RideStatus::Accepted);
        assert_eq!(detail["driver_name"], json!("Asha"));
        assert_eq!(detail["eta_min"], json!(4));
    }

    #[test]
    fn unknown_event_types_fail_to_parse() {
        assert!(serde_json::from_str::<ClientEvent>(r#"{"type":"launch_rocket"}"#).is_err());
        assert!(serde_json::from_str::<ClientEvent>(r#"{"lat":1.0}"#).is_err());
    }

    #[test]
    fn unknown_statuses_fail_to_parse() {
        let result = serde_json::from_str::<ClientEvent>(
            r#"{"type":"status_changed","ride_id":"r","status":"teleported"}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn relay_errors_serialize_with_a_message() {
        let wire = serde_json::to_value(ServerEvent::Error {
            message: "ride_id required".into(),
        })
        .unwrap();

        assert_eq!(wire, json!({"type": "error", "message": "ride_id required"}));
    }
}
