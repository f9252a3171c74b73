//! Wire contract for the hub's live sockets.
//!
//! Inbound frames are JSON snapshots keyed by sensor identifier, or
//! the bare reload sentinel. Outbound frames are single-field update
//! commands and the scan request.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::telemetry::{Masthead, SensorPosition, WindSnapshot};

/// Distinguished non-JSON payload instructing clients to discard all
/// live state and re-prime. Must be checked before JSON decoding.
pub const RELOAD_SENTINEL: &str = "reload";

/// A decoded inbound frame from a live socket.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound<T> {
    /// The hub asked clients to reload.
    Reload,
    /// A regular data frame.
    Frame(T),
}

/// Decode a text payload, recognizing the reload sentinel before
/// attempting JSON.
pub fn decode_frame<T: DeserializeOwned>(payload: &str) -> Result<Inbound<T>> {
    if payload == RELOAD_SENTINEL {
        return Ok(Inbound::Reload);
    }
    Ok(Inbound::Frame(serde_json::from_str(payload)?))
}

/// Envelope carried on the wind socket. Frames without a `wind` entry
/// belong to other subsystems and are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindEnvelope {
    #[serde(default)]
    pub wind: Option<WindFrame>,
}

/// Payload of a wind frame: either the combined active display or a
/// full snapshot of live sensors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WindFrame {
    /// Active combined display update.
    Masthead(Masthead),
    /// Full snapshot of live wind sensors keyed by hardware address.
    Sensors(WindSnapshot),
}

/// Outbound command on the wind socket.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the vane calibration offset of one sensor.
    SetOffset { sensor: String, degrees: f64 },
    /// Assign the mounting position of one sensor.
    SetPosition {
        sensor: String,
        position: SensorPosition,
    },
    /// Ask the hub to scan for new sensors.
    Scan,
}

impl Command {
    /// Encode to the hub's wire form: `{"<sensor>": {"<field>": <value>}}`
    /// for field updates, or the bare scan request.
    pub fn encode(&self) -> String {
        match self {
            Command::SetOffset { sensor, degrees } => {
                let key = sensor.as_str();
                serde_json::json!({ key: { "offset": degrees } }).to_string()
            }
            Command::SetPosition { sensor, position } => {
                let key = sensor.as_str();
                serde_json::json!({ key: { "position": position.as_str() } }).to_string()
            }
            Command::Scan => serde_json::json!("scan").to_string(),
        }
    }
}
