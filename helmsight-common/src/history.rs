//! History query contract and segmentation.
//!
//! The hub serves `GET /history?data_type=..&data_range=..` returning
//! `{total_time, high, low, data}` where `data` is a newest-first list
//! of `[timestamp, value]` pairs. A boolean in the value slot marks a
//! gap (e.g., the instrument was offline) that must break the plotted
//! line into separate strokes.

use serde::Deserialize;
use std::time::Duration;

use crate::error::Result;

/// Logged quantities the hub keeps history for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryItem {
    WindSpeed,
    BaroPressure,
    Depth,
    GpsSpeed,
    WaterSpeed,
}

impl HistoryItem {
    /// All queryable items, in display order.
    pub const ALL: &'static [HistoryItem] = &[
        HistoryItem::WindSpeed,
        HistoryItem::BaroPressure,
        HistoryItem::Depth,
        HistoryItem::GpsSpeed,
        HistoryItem::WaterSpeed,
    ];

    /// The label used as the `data_type` query value.
    pub fn label(&self) -> &'static str {
        match self {
            HistoryItem::WindSpeed => "Wind Speed",
            HistoryItem::BaroPressure => "Baro Pressure",
            HistoryItem::Depth => "Depth",
            HistoryItem::GpsSpeed => "GPS Speed",
            HistoryItem::WaterSpeed => "Water Speed",
        }
    }
}

impl std::fmt::Display for HistoryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Time window a history query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    FiveMinutes,
    Hour,
    Day,
    Month,
    Year,
}

impl HistoryRange {
    /// All query ranges, shortest first.
    pub const ALL: &'static [HistoryRange] = &[
        HistoryRange::FiveMinutes,
        HistoryRange::Hour,
        HistoryRange::Day,
        HistoryRange::Month,
        HistoryRange::Year,
    ];

    /// The label used as the `data_range` query value.
    pub fn label(&self) -> &'static str {
        match self {
            HistoryRange::FiveMinutes => "5m",
            HistoryRange::Hour => "1h",
            HistoryRange::Day => "1d",
            HistoryRange::Month => "1m",
            HistoryRange::Year => "1y",
        }
    }

    /// Window length in seconds.
    pub fn seconds(&self) -> f64 {
        match self {
            HistoryRange::FiveMinutes => 5.0 * 60.0,
            HistoryRange::Hour => 3600.0,
            HistoryRange::Day => 86_400.0,
            HistoryRange::Month => 30.0 * 86_400.0,
            HistoryRange::Year => 365.0 * 86_400.0,
        }
    }
}

impl std::fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The value slot of one history entry: a sample, or a boolean marker
/// denoting a segment break.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SampleSlot {
    Value(f64),
    Marker(bool),
}

/// One `[timestamp, value]` entry of the history feed.
pub type HistoryEntry = (f64, SampleSlot);

/// Response of the hub's history endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryResponse {
    /// Span of the requested window in seconds.
    pub total_time: f64,

    /// Highest value logged over the window.
    pub high: f64,

    /// Lowest value logged over the window.
    pub low: f64,

    /// Newest-first samples with embedded gap markers.
    #[serde(default)]
    pub data: Vec<HistoryEntry>,
}

/// A maximal run of consecutive points uninterrupted by a marker,
/// in chronological order.
pub type Segment = Vec<(f64, f64)>;

/// Partition the raw feed into chronological segments.
///
/// Scans the entries in order, accumulating samples into the current
/// run; a marker closes the run and starts a new one, and the final
/// run is closed after the scan even without a trailing marker. Each
/// closed run is returned oldest-first regardless of feed order.
pub fn split_segments(data: &[HistoryEntry]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run: Segment = Vec::new();

    for (time, slot) in data {
        match slot {
            SampleSlot::Value(value) => run.push((*time, *value)),
            SampleSlot::Marker(_) => close_run(&mut segments, &mut run),
        }
    }
    close_run(&mut segments, &mut run);

    segments
}

fn close_run(segments: &mut Vec<Segment>, run: &mut Segment) {
    if run.is_empty() {
        return;
    }
    let mut segment = std::mem::take(run);
    if segment[0].0 > segment[segment.len() - 1].0 {
        segment.reverse();
    }
    segments.push(segment);
}

/// Number of equal intervals on the chart's time axis.
pub const AXIS_TICKS: usize = 10;

/// Observed time bounds across all plotted points.
pub fn time_bounds(segments: &[Segment]) -> Option<(f64, f64)> {
    bounds(segments, |(time, _)| time)
}

/// Observed value bounds across all plotted points.
pub fn value_bounds(segments: &[Segment]) -> Option<(f64, f64)> {
    bounds(segments, |(_, value)| value)
}

fn bounds(segments: &[Segment], pick: fn(&(f64, f64)) -> &f64) -> Option<(f64, f64)> {
    let mut result: Option<(f64, f64)> = None;
    for point in segments.iter().flatten() {
        let value = *pick(point);
        result = Some(match result {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    result
}

/// The tick values of an axis spanning `[min, max]`, split into
/// [`AXIS_TICKS`] equal intervals.
pub fn axis_ticks(min: f64, max: f64) -> Vec<f64> {
    (0..=AXIS_TICKS)
        .map(|i| min + (max - min) * i as f64 / AXIS_TICKS as f64)
        .collect()
}

/// Delay before the next poll of the same query: roughly 80 refreshes
/// across the requested window.
pub fn refresh_delay(total_time_secs: f64) -> Duration {
    Duration::from_secs_f64((total_time_secs / 80.0).max(0.0))
}

/// Query the hub's history endpoint.
pub async fn fetch_history(
    host: &str,
    item: HistoryItem,
    range: HistoryRange,
) -> Result<HistoryResponse> {
    let url = format!("http://{}/history", host);
    tracing::debug!(url = %url, item = %item, range = %range, "Querying history");

    let response = reqwest::Client::new()
        .get(&url)
        .query(&[("data_type", item.label()), ("data_range", range.label())])
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(time: f64, v: f64) -> HistoryEntry {
        (time, SampleSlot::Value(v))
    }

    fn marker(time: f64) -> HistoryEntry {
        (time, SampleSlot::Marker(false))
    }

    #[test]
    fn test_split_on_marker() {
        let data = vec![value(0.0, 1.0), value(1.0, 2.0), marker(1.5), value(2.0, 3.0)];
        let segments = split_segments(&data);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(segments[1], vec![(2.0, 3.0)]);
    }

    #[test]
    fn test_descending_feed_is_reordered() {
        // The live feed is newest-first; each segment must come out
        // oldest-first.
        let data = vec![
            value(30.0, 5.0),
            value(20.0, 4.0),
            marker(15.0),
            value(10.0, 3.0),
            value(0.0, 2.0),
        ];
        let segments = split_segments(&data);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(20.0, 4.0), (30.0, 5.0)]);
        assert_eq!(segments[1], vec![(0.0, 2.0), (10.0, 3.0)]);
    }

    #[test]
    fn test_no_trailing_marker_closes_final_run() {
        let segments = split_segments(&[value(0.0, 1.0)]);
        assert_eq!(segments, vec![vec![(0.0, 1.0)]]);
    }

    #[test]
    fn test_consecutive_and_edge_markers() {
        let data = vec![marker(0.0), value(1.0, 1.0), marker(2.0), marker(3.0)];
        let segments = split_segments(&data);
        assert_eq!(segments, vec![vec![(1.0, 1.0)]]);
    }

    #[test]
    fn test_empty_feed() {
        assert!(split_segments(&[]).is_empty());
    }

    #[test]
    fn test_bounds_span_all_segments() {
        let segments = vec![vec![(0.0, 1.0), (10.0, 8.0)], vec![(20.0, -2.0)]];
        assert_eq!(time_bounds(&segments), Some((0.0, 20.0)));
        assert_eq!(value_bounds(&segments), Some((-2.0, 8.0)));
        assert_eq!(time_bounds(&[]), None);
    }

    #[test]
    fn test_axis_ticks_are_equal_intervals() {
        let ticks = axis_ticks(0.0, 100.0);
        assert_eq!(ticks.len(), AXIS_TICKS + 1);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[5], 50.0);
        assert_eq!(ticks[10], 100.0);
    }

    #[test]
    fn test_response_decode_with_markers() {
        let payload = r#"{
            "total_time": 300.0,
            "high": 9.5,
            "low": 1.2,
            "data": [[120.5, 3.4], [119.0, false], [60.0, 2.1]]
        }"#;
        let response: HistoryResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.total_time, 300.0);
        assert_eq!(response.data.len(), 3);
        assert_eq!(response.data[1].1, SampleSlot::Marker(false));

        let segments = split_segments(&response.data);
        assert_eq!(segments, vec![vec![(120.5, 3.4)], vec![(60.0, 2.1)]]);
    }

    #[test]
    fn test_refresh_delay_tracks_window() {
        assert_eq!(refresh_delay(300.0), Duration::from_secs_f64(3.75));
        assert_eq!(refresh_delay(3600.0), Duration::from_secs(45));
        assert_eq!(refresh_delay(-5.0), Duration::ZERO);
    }

    #[test]
    fn test_query_labels() {
        assert_eq!(HistoryItem::BaroPressure.label(), "Baro Pressure");
        assert_eq!(HistoryRange::FiveMinutes.label(), "5m");
        assert_eq!(HistoryRange::Year.label(), "1y");
    }

    #[test]
    fn test_range_seconds() {
        assert_eq!(HistoryRange::FiveMinutes.seconds(), 300.0);
        assert_eq!(HistoryRange::Day.seconds(), 86_400.0);
    }
}
