//! Demo mode simulation.
//!
//! Generates realistic, time-varying wind and navigation frames so the
//! UI can run without a hub on the network. Sensors appear and drop
//! out over time to exercise the same reconciliation paths live data
//! does.

use std::collections::HashMap;
use std::time::Duration;

use iced::Subscription;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;

use helmsight_common::{
    HistoryItem, HistoryRange, HistoryResponse, Masthead, Reading, ReadingSnapshot, SensorPosition,
    WindReading, WindSnapshot,
};

use crate::message::Message;
use crate::mock;
use crate::stream::CommandLink;

/// Simulates the hub's wind socket.
pub struct WindSimulator {
    rng: SmallRng,
    tick: u64,
    base_direction: f64,
    active: Vec<String>,
    benched: Vec<String>,
}

impl WindSimulator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            tick: 0,
            base_direction: 45.0,
            active: mock::demo_sensor_addresses()
                .into_iter()
                .map(str::to_string)
                .collect(),
            benched: Vec::new(),
        }
    }

    /// Advance the simulated wind one step.
    pub fn step(&mut self) {
        self.tick += 1;
        let drift = self.rng.random_range(-6.0..6.0);
        self.base_direction = (self.base_direction + drift).rem_euclid(360.0);

        // Occasionally drop a sensor or bring one back, so tables see
        // removals and re-insertions.
        if self.tick % 15 == 0 && self.active.len() > 1 {
            let index = self.rng.random_range(0..self.active.len());
            let gone = self.active.remove(index);
            tracing::debug!(sensor = %gone, "Demo sensor went offline");
            self.benched.push(gone);
        } else if self.tick % 23 == 0
            && let Some(back) = self.benched.pop()
        {
            tracing::debug!(sensor = %back, "Demo sensor came back");
            self.active.push(back);
        }
    }

    fn knots(&mut self) -> f64 {
        let swell = 8.0 + 4.0 * (self.tick as f64 * 0.1).sin();
        (swell + self.rng.random_range(-1.0..1.0)).max(0.0)
    }

    /// The combined active display for this step.
    pub fn masthead(&mut self) -> Masthead {
        // Brief vane dropouts render the direction-unknown state.
        let direction = if self.tick % 29 < 2 {
            None
        } else {
            Some((self.base_direction + self.rng.random_range(-2.0..2.0)).rem_euclid(360.0))
        };
        Masthead {
            direction,
            knots: self.knots(),
        }
    }

    /// A full sensor snapshot for this step.
    pub fn sensors(&mut self) -> WindSnapshot {
        let mut snapshot = HashMap::new();
        let addresses = self.active.clone();
        for (index, address) in addresses.iter().enumerate() {
            let dir = if index == 2 && self.tick % 13 < 3 {
                None
            } else {
                Some(
                    (self.base_direction + self.rng.random_range(-10.0..10.0)).rem_euclid(360.0),
                )
            };
            let reading = WindReading {
                position: SensorPosition::Primary,
                offset: 0.0,
                dir,
                knots: self.knots(),
                dt: self.rng.random_range(50..400),
            };
            snapshot.insert(address.clone(), reading);
        }
        snapshot
    }
}

impl Default for WindSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulates the hub's generic data socket.
pub struct ReadingsSimulator {
    rng: SmallRng,
    tick: u64,
}

impl ReadingsSimulator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            tick: 0,
        }
    }

    /// A full readings snapshot for this step.
    pub fn snapshot(&mut self) -> ReadingSnapshot {
        self.tick += 1;
        let phase = self.tick as f64 * 0.05;

        let mut channels: Vec<(&str, &str, f64)> = vec![
            ("GPS Speed", "gps", 5.2 + phase.sin()),
            ("GPS Heading", "gps", (180.0 + 40.0 * phase.cos()).rem_euclid(360.0)),
            ("Baro Pressure", "baro", 1013.2 + 1.5 * (phase * 0.2).sin()),
            ("Air Temp", "baro", 18.4 + 0.8 * (phase * 0.1).sin()),
            ("Water Temp", "nmea", 14.1),
        ];

        // The sounder cuts out in shallow intervals; its key vanishes
        // from the snapshot entirely.
        if self.tick % 40 < 30 {
            channels.push(("Depth", "nmea", 22.0 + 6.0 * (phase * 0.3).sin()));
        }

        channels
            .into_iter()
            .map(|(name, source, value)| {
                let jitter = self.rng.random_range(-0.05..0.05);
                let reading = Reading {
                    value: value + value.abs() * jitter,
                    source: source.to_string(),
                    latency: self.rng.random_range(5..80),
                };
                (name.to_string(), reading)
            })
            .collect()
    }
}

impl Default for ReadingsSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated history payload standing in for the hub's history
/// endpoint. Pure function of the query, newest-first like the real
/// feed, with one offline gap partway through the window.
pub fn history(item: HistoryItem, range: HistoryRange) -> HistoryResponse {
    let total = range.seconds();
    let base = match item {
        HistoryItem::WindSpeed => 8.0,
        HistoryItem::BaroPressure => 1013.0,
        HistoryItem::Depth => 22.0,
        HistoryItem::GpsSpeed => 5.5,
        HistoryItem::WaterSpeed => 5.0,
    };

    let samples = 80;
    let entries: Vec<(f64, Option<f64>)> = (0..samples)
        .map(|i| {
            let time = total * (1.0 - i as f64 / samples as f64);
            if (25..28).contains(&i) {
                (time, None)
            } else {
                let swing = base * 0.2 * (i as f64 * 0.3).sin();
                (time, Some(base + swing))
            }
        })
        .collect();

    mock::history_response(total, &entries)
}

/// Demo replacement for the wind socket subscription.
pub fn wind_subscription() -> Subscription<Message> {
    Subscription::run(|| {
        async_stream::stream! {
            let (sender, mut commands) = mpsc::unbounded_channel();
            yield Message::WindConnected(CommandLink::new(sender));

            let mut simulator = WindSimulator::new();
            loop {
                tokio::time::sleep(Duration::from_millis(500)).await;

                while let Ok(command) = commands.try_recv() {
                    tracing::debug!(command = ?command, "Demo hub received command");
                }

                simulator.step();
                yield Message::MastheadUpdated(simulator.masthead());
                if simulator.tick % 4 == 0 {
                    yield Message::WindSensors(simulator.sensors());
                }
            }
        }
    })
}

/// Demo replacement for the data socket subscription.
pub fn readings_subscription() -> Subscription<Message> {
    Subscription::run(|| {
        async_stream::stream! {
            yield Message::DataConnected;

            let mut simulator = ReadingsSimulator::new();
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                yield Message::ReadingsReceived(simulator.snapshot());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_simulator_produces_sensors() {
        let mut simulator = WindSimulator::new();
        simulator.step();
        let snapshot = simulator.sensors();
        assert!(!snapshot.is_empty());
        for reading in snapshot.values() {
            assert!(reading.knots >= 0.0);
            assert!(reading.dt >= 50);
        }
    }

    #[test]
    fn test_wind_simulator_sensors_drop_and_return() {
        let mut simulator = WindSimulator::new();
        let initial = simulator.active.len();

        let mut smallest = initial;
        for _ in 0..60 {
            simulator.step();
            smallest = smallest.min(simulator.active.len());
            assert!(!simulator.active.is_empty());
        }
        assert!(smallest < initial);
    }

    #[test]
    fn test_demo_history_has_a_gap() {
        let response = history(HistoryItem::WindSpeed, HistoryRange::FiveMinutes);
        assert_eq!(response.total_time, 300.0);
        assert!(response.high >= response.low);

        let segments = helmsight_common::split_segments(&response.data);
        assert_eq!(segments.len(), 2);
        for segment in &segments {
            for pair in segment.windows(2) {
                assert!(pair[0].0 <= pair[1].0);
            }
        }
    }

    #[test]
    fn test_readings_simulator_snapshot_keys() {
        let mut simulator = ReadingsSimulator::new();
        let snapshot = simulator.snapshot();
        assert!(snapshot.contains_key("GPS Speed"));
        assert!(snapshot.contains_key("Baro Pressure"));
        for reading in snapshot.values() {
            assert!(!reading.source.is_empty());
        }
    }
}
