//! Mock frame constructors for demo mode and tests.
//!
//! Builds realistic live frames and history payloads without a hub on
//! the network.

use helmsight_common::{
    HistoryResponse, Masthead, Reading, ReadingSnapshot, SampleSlot, SensorPosition, WindReading,
    WindSnapshot,
};

/// Build a generic reading.
pub fn reading(value: f64, source: &str, latency: i64) -> Reading {
    Reading {
        value,
        source: source.to_string(),
        latency,
    }
}

/// Build a readings snapshot from `(name, reading)` pairs.
pub fn reading_snapshot(entries: &[(&str, Reading)]) -> ReadingSnapshot {
    entries
        .iter()
        .map(|(name, reading)| (name.to_string(), reading.clone()))
        .collect()
}

/// Build a wind sensor entry.
pub fn wind_reading(dir: Option<f64>, knots: f64, dt: i64) -> WindReading {
    WindReading {
        position: SensorPosition::Primary,
        offset: 0.0,
        dir,
        knots,
        dt,
    }
}

/// Build a wind snapshot from `(address, reading)` pairs.
pub fn wind_snapshot(entries: &[(&str, WindReading)]) -> WindSnapshot {
    entries
        .iter()
        .map(|(address, reading)| (address.to_string(), reading.clone()))
        .collect()
}

/// Build a masthead update.
pub fn masthead(direction: Option<f64>, knots: f64) -> Masthead {
    Masthead { direction, knots }
}

/// Build a history response from newest-first `(time, value)` samples;
/// `None` entries become gap markers.
pub fn history_response(
    total_time: f64,
    samples: &[(f64, Option<f64>)],
) -> HistoryResponse {
    let data: Vec<(f64, SampleSlot)> = samples
        .iter()
        .map(|(time, value)| {
            let slot = match value {
                Some(value) => SampleSlot::Value(*value),
                None => SampleSlot::Marker(false),
            };
            (*time, slot)
        })
        .collect();

    let values: Vec<f64> = samples.iter().filter_map(|(_, value)| *value).collect();
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);

    HistoryResponse {
        total_time,
        high: if values.is_empty() { 0.0 } else { high },
        low: if values.is_empty() { 0.0 } else { low },
        data,
    }
}

/// The demo fleet's sensor addresses.
pub fn demo_sensor_addresses() -> Vec<&'static str> {
    vec![
        "a4:c1:38:00:11:22",
        "a4:c1:38:00:33:44",
        "a4:c1:38:00:55:66",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use helmsight_common::split_segments;

    #[test]
    fn test_history_response_markers_and_bounds() {
        let response = history_response(
            300.0,
            &[(120.0, Some(4.0)), (60.0, None), (30.0, Some(2.0))],
        );
        assert_eq!(response.high, 4.0);
        assert_eq!(response.low, 2.0);
        assert_eq!(split_segments(&response.data).len(), 2);
    }

    #[test]
    fn test_snapshot_builders() {
        let snapshot = wind_snapshot(&[("aa", wind_reading(Some(10.0), 5.0, 100))]);
        assert_eq!(snapshot.len(), 1);

        let readings = reading_snapshot(&[("GPS Speed", reading(4.2, "gps", 15))]);
        assert_eq!(readings["GPS Speed"].source, "gps");
    }
}
