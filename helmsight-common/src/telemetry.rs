use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A generic live reading published on the data socket, keyed by
/// display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// The measured value.
    pub value: f64,

    /// Which input produced the value (e.g., "gps", "nmea", "computed").
    pub source: String,

    /// Age of the reading in milliseconds when it was published.
    pub latency: i64,
}

/// A wind sensor entry published on the wind socket, keyed by the
/// sensor's hardware address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    /// Mounting position assigned to this sensor.
    #[serde(default)]
    pub position: SensorPosition,

    /// Calibration offset in degrees applied to the vane.
    #[serde(default)]
    pub offset: f64,

    /// Apparent wind direction in degrees, if the vane is readable.
    #[serde(default)]
    pub dir: Option<f64>,

    /// Apparent wind speed in knots.
    pub knots: f64,

    /// Milliseconds since the sensor last reported.
    pub dt: i64,
}

/// The combined active wind display broadcast alongside per-sensor
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Masthead {
    /// Apparent wind direction in degrees, clockwise from the bow;
    /// `None` when no vane is reporting.
    pub direction: Option<f64>,

    /// Apparent wind speed in knots.
    pub knots: f64,
}

/// Mounting position assigned to a wind sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorPosition {
    #[default]
    Primary,
    Secondary,
    Port,
    Starboard,
    Ignored,
}

impl SensorPosition {
    /// All assignable positions, in the order offered to the user.
    pub const ALL: &'static [SensorPosition] = &[
        SensorPosition::Primary,
        SensorPosition::Secondary,
        SensorPosition::Port,
        SensorPosition::Starboard,
        SensorPosition::Ignored,
    ];

    /// The wire / display name of this position.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorPosition::Primary => "Primary",
            SensorPosition::Secondary => "Secondary",
            SensorPosition::Port => "Port",
            SensorPosition::Starboard => "Starboard",
            SensorPosition::Ignored => "Ignored",
        }
    }
}

impl std::fmt::Display for SensorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full current set of generic readings, keyed by display name.
pub type ReadingSnapshot = HashMap<String, Reading>;

/// Full current set of live wind sensors, keyed by hardware address.
pub type WindSnapshot = HashMap<String, WindReading>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_decode() {
        let reading: Reading =
            serde_json::from_str(r#"{"value":3.14159,"source":"gps","latency":12}"#).unwrap();
        assert_eq!(reading.value, 3.14159);
        assert_eq!(reading.source, "gps");
        assert_eq!(reading.latency, 12);
    }

    #[test]
    fn test_wind_reading_null_direction() {
        let reading: WindReading = serde_json::from_str(
            r#"{"position":"Port","offset":10.0,"dir":null,"knots":4.5,"dt":250}"#,
        )
        .unwrap();
        assert_eq!(reading.position, SensorPosition::Port);
        assert_eq!(reading.dir, None);
        assert_eq!(reading.knots, 4.5);
    }

    #[test]
    fn test_wind_reading_defaults() {
        // A freshly discovered sensor may not carry calibration fields yet.
        let reading: WindReading =
            serde_json::from_str(r#"{"knots":2.0,"dt":100}"#).unwrap();
        assert_eq!(reading.position, SensorPosition::Primary);
        assert_eq!(reading.offset, 0.0);
        assert_eq!(reading.dir, None);
    }

    #[test]
    fn test_sensor_position_round_trip() {
        for position in SensorPosition::ALL {
            let encoded = serde_json::to_string(position).unwrap();
            assert_eq!(encoded, format!("\"{}\"", position.as_str()));
            let decoded: SensorPosition = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, *position);
        }
    }
}
