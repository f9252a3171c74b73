//! Shared display formatting for the Helmsight views.

/// Placeholder shown when a directional value is unknown.
pub const DIRECTION_PLACEHOLDER: &str = "---";

/// Format a generic reading value at table precision.
pub fn format_value(value: f64) -> String {
    format!("{:.3}", value)
}

/// Format a wind direction readout in degrees, or the placeholder when
/// no vane is reporting.
pub fn format_direction(direction: Option<f64>) -> String {
    match direction {
        Some(degrees) => format!("{:.1}", degrees),
        None => DIRECTION_PLACEHOLDER.to_string(),
    }
}

/// Direction table cell, with unit suffix.
pub fn format_direction_cell(direction: Option<f64>) -> String {
    match direction {
        Some(degrees) => format!("{:.1} deg", degrees),
        None => DIRECTION_PLACEHOLDER.to_string(),
    }
}

/// Wind speed readout.
pub fn format_knots(knots: f64) -> String {
    format!("{:.2}", knots)
}

/// Wind speed table cell, with unit suffix.
pub fn format_knots_cell(knots: f64) -> String {
    format!("{:.2}kt", knots)
}

/// Latency table cell.
pub fn format_latency(ms: i64) -> String {
    format!("{}ms", ms)
}

/// Gauge speed label: whole knots.
pub fn format_gauge_knots(knots: f64) -> String {
    format!("{} kt", knots.round() as i64)
}

/// Format a time-axis tick as an offset back from the newest sample.
///
/// Returns strings like "now", "-30s", "-5m", "-2h", "-3d".
pub fn format_time_offset(offset_secs: f64) -> String {
    let offset = offset_secs.round() as i64;
    if offset <= 0 {
        "now".to_string()
    } else if offset < 60 {
        format!("-{}s", offset)
    } else if offset < 3600 {
        format!("-{}m", offset / 60)
    } else if offset < 86_400 {
        format!("-{}h", offset / 3600)
    } else {
        format!("-{}d", offset / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_fixed_precision() {
        assert_eq!(format_value(3.14159), "3.142");
        assert_eq!(format_value(0.0005), "0.001");
        assert_eq!(format_value(2.0), "2.000");
    }

    #[test]
    fn test_format_direction_placeholder() {
        assert_eq!(format_direction(Some(273.46)), "273.5");
        assert_eq!(format_direction(None), "---");
        assert_eq!(format_direction_cell(Some(12.0)), "12.0 deg");
        assert_eq!(format_direction_cell(None), "---");
    }

    #[test]
    fn test_format_speed_and_latency() {
        assert_eq!(format_knots(6.255), "6.26");
        assert_eq!(format_knots_cell(6.255), "6.26kt");
        assert_eq!(format_latency(12), "12ms");
    }

    #[test]
    fn test_format_gauge_knots_rounds_to_integer() {
        assert_eq!(format_gauge_knots(6.4), "6 kt");
        assert_eq!(format_gauge_knots(6.5), "7 kt");
        assert_eq!(format_gauge_knots(0.0), "0 kt");
    }

    #[test]
    fn test_format_time_offset() {
        assert_eq!(format_time_offset(0.0), "now");
        assert_eq!(format_time_offset(30.0), "-30s");
        assert_eq!(format_time_offset(300.0), "-5m");
        assert_eq!(format_time_offset(7200.0), "-2h");
        assert_eq!(format_time_offset(259_200.0), "-3d");
    }
}
