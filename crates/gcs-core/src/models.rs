//! Core data models for route planning and mission exchange.

use serde::{Deserialize, Serialize};

/// Altitude attached to every exported point, in meters.
pub const DEFAULT_ALTITUDE_M: f64 = 20.0;

fn default_altitude() -> f64 {
    DEFAULT_ALTITUDE_M
}

/// One stop of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// 1-based position in the owning route
    pub sequence: u32,
    pub lat: f64,
    pub lon: f64,
}

/// A waypoint as sent to (and received from) the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionPoint {
    pub seq: u32,
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_altitude")]
    pub alt: f64,
}

impl From<&Waypoint> for MissionPoint {
    fn from(wp: &Waypoint) -> Self {
        Self {
            seq: wp.sequence,
            lat: wp.lat,
            lon: wp.lon,
            alt: DEFAULT_ALTITUDE_M,
        }
    }
}

/// A named mission, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub name: String,
    pub points: Vec<MissionPoint>,
}

/// Response of `GET /api/missions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionList {
    #[serde(default)]
    pub missions: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

/// Response of `POST /api/missions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSaved {
    #[serde(default)]
    pub message: String,
    pub mission_name: String,
    pub waypoint_count: usize,
}

/// Outbound WebSocket frame pushing a route to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRouteCommand {
    pub cmd: String,
    pub name: String,
    pub points: Vec<MissionPoint>,
}

impl SendRouteCommand {
    pub const CMD: &'static str = "send_route";

    pub fn new(mission: &Mission) -> Self {
        Self {
            cmd: Self::CMD.to_string(),
            name: mission.name.clone(),
            points: mission.points.clone(),
        }
    }
}

/// Outbound WebSocket frame changing the drone's cruise speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSpeedCommand {
    pub cmd: String,
    pub value: f64,
}

impl SetSpeedCommand {
    pub const CMD: &'static str = "set_speed";

    pub fn new(value: f64) -> Self {
        Self {
            cmd: Self::CMD.to_string(),
            value,
        }
    }
}

/// Inbound WebSocket frame from the backend.
///
/// Telemetry and any other untagged payloads land in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerReply {
    Ack {
        cmd: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        count: Option<usize>,
        #[serde(default)]
        value: Option<f64>,
    },
    Error {
        #[serde(default)]
        msg: String,
    },
    #[serde(other)]
    Other,
}

impl ServerReply {
    /// Parse a text frame. Frames without a recognised `type` map to `Other`.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.get("type").is_none() {
            return Ok(ServerReply::Other);
        }
        serde_json::from_value(value)
    }

    /// True when this is the acknowledgement of a `send_route` command.
    pub fn is_route_ack(&self) -> bool {
        matches!(self, ServerReply::Ack { cmd, .. } if cmd == SendRouteCommand::CMD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_point_defaults_altitude() {
        let point: MissionPoint =
            serde_json::from_str(r#"{"seq":1,"lat":36.8,"lon":10.1}"#).unwrap();
        assert_eq!(point.alt, DEFAULT_ALTITUDE_M);
    }

    #[test]
    fn send_route_command_shape() {
        let mission = Mission {
            name: "survey".into(),
            points: vec![MissionPoint { seq: 1, lat: 1.0, lon: 2.0, alt: 20.0 }],
        };
        let json = serde_json::to_value(SendRouteCommand::new(&mission)).unwrap();
        assert_eq!(json["cmd"], "send_route");
        assert_eq!(json["name"], "survey");
        assert_eq!(json["points"][0]["seq"], 1);
        assert_eq!(json["points"][0]["alt"], 20.0);
    }

    #[test]
    fn parses_route_ack() {
        let reply =
            ServerReply::parse(r#"{"type":"ack","cmd":"send_route","name":"m1","count":3}"#)
                .unwrap();
        assert!(reply.is_route_ack());
        assert_eq!(
            reply,
            ServerReply::Ack {
                cmd: "send_route".into(),
                name: Some("m1".into()),
                count: Some(3),
                value: None,
            }
        );
    }

    #[test]
    fn parses_speed_ack() {
        let reply =
            ServerReply::parse(r#"{"type":"ack","cmd":"set_speed","value":5.0}"#).unwrap();
        assert!(!reply.is_route_ack());
        assert_eq!(
            reply,
            ServerReply::Ack { cmd: "set_speed".into(), name: None, count: None, value: Some(5.0) }
        );
        let json = serde_json::to_value(SetSpeedCommand::new(5.0)).unwrap();
        assert_eq!(json, serde_json::json!({"cmd": "set_speed", "value": 5.0}));
    }

    #[test]
    fn parses_error_reply() {
        let reply = ServerReply::parse(r#"{"type":"error","msg":"bad route"}"#).unwrap();
        assert_eq!(reply, ServerReply::Error { msg: "bad route".into() });
    }

    #[test]
    fn telemetry_frames_are_other() {
        let reply = ServerReply::parse(r#"{"lat":36.8,"lon":10.1,"alt":20.0}"#).unwrap();
        assert_eq!(reply, ServerReply::Other);

        let reply = ServerReply::parse(r#"{"type":"telemetry","lat":36.8}"#).unwrap();
        assert_eq!(reply, ServerReply::Other);
    }

    #[test]
    fn ack_for_other_command_is_not_route_ack() {
        let reply = ServerReply::parse(r#"{"type":"ack","cmd":"arm"}"#).unwrap();
        assert!(!reply.is_route_ack());
    }
}
