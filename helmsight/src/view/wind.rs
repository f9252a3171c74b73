//! Wind page: masthead readouts, polar gauge, and the live sensor
//! table with its calibration controls.

use iced::widget::{Column, button, column, container, pick_list, row, rule, text, text_input};
use iced::{Alignment, Element, Length, Theme};

use helmsight_common::{Masthead, SensorPosition, WindReading};

use crate::message::Message;
use crate::table::{RowTable, TableRow};
use crate::view::formatting::{
    format_direction, format_direction_cell, format_knots, format_knots_cell, format_latency,
};
use crate::view::gauge::gauge_view;
use crate::view::theme;

/// State for the wind page.
#[derive(Debug, Default)]
pub struct WindState {
    /// Latest combined active display, if any has arrived.
    pub masthead: Option<Masthead>,
    /// Live sensor rows, bound to the latest snapshot.
    pub sensors: RowTable<WindRow>,
}

impl WindState {
    /// Discard everything learned from the hub.
    pub fn clear(&mut self) {
        self.masthead = None;
        self.sensors.clear();
    }
}

/// One bound row of the wind sensor table.
///
/// The position picker and offset input are fixed cells seeded at
/// insertion; snapshot refreshes only touch the measurement cells, so
/// an edit in progress survives the next frame.
#[derive(Debug, Clone)]
pub struct WindRow {
    /// Currently assigned mounting position.
    pub position: SensorPosition,
    /// Offset input contents (may hold an in-progress edit).
    pub offset_input: String,
    /// Formatted direction cell.
    pub direction: String,
    /// Formatted speed cell.
    pub knots: String,
    /// Formatted latency cell.
    pub latency: String,
}

impl TableRow for WindRow {
    type Record = WindReading;

    fn build(_key: &str, record: &WindReading) -> Self {
        Self {
            position: record.position,
            offset_input: format!("{}", record.offset),
            direction: format_direction_cell(record.dir),
            knots: format_knots_cell(record.knots),
            latency: format_latency(record.dt),
        }
    }

    fn refresh(&mut self, record: &WindReading) {
        self.direction = format_direction_cell(record.dir);
        self.knots = format_knots_cell(record.knots);
        self.latency = format_latency(record.dt);
    }
}

/// Render the wind page.
pub fn wind_view(state: &WindState) -> Element<'_, Message> {
    let (direction, knots) = match &state.masthead {
        Some(masthead) => (masthead.direction, masthead.knots),
        None => (None, 0.0),
    };

    let readouts = row![
        text(format!("Direction: {}", format_direction(direction))).size(18),
        text(format!("Speed: {} kt", format_knots(knots))).size(18),
    ]
    .spacing(30);

    let gauge = container(gauge_view(direction, knots)).center_x(Length::Fill);

    let scan_button = button(text("Scan for sensors").size(14))
        .on_press(Message::ScanRequested)
        .style(iced::widget::button::secondary);

    let content = column![
        readouts,
        gauge,
        rule::horizontal(1),
        render_sensor_table(state),
        scan_button,
    ]
    .spacing(15)
    .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Render the sensor table: header plus one row per bound sensor,
/// newest first.
fn render_sensor_table(state: &WindState) -> Element<'_, Message> {
    let header = row![
        text("Sensor").size(13).width(Length::FillPortion(3)),
        text("Position").size(13).width(Length::FillPortion(2)),
        text("Offset").size(13).width(Length::FillPortion(2)),
        text("Direction").size(13).width(Length::FillPortion(2)),
        text("Speed").size(13).width(Length::FillPortion(2)),
        text("Latency").size(13).width(Length::FillPortion(1)),
    ]
    .spacing(10);

    if state.sensors.is_empty() {
        return column![header, text("No live sensors").size(13)]
            .spacing(8)
            .into();
    }

    let mut rows = Column::new().spacing(4);
    for (key, sensor) in state.sensors.iter() {
        rows = rows.push(render_sensor_row(key, sensor));
    }

    column![header, rows].spacing(8).into()
}

fn render_sensor_row<'a>(key: &'a str, sensor: &'a WindRow) -> Element<'a, Message> {
    let mac = key.to_string();
    let position_picker = pick_list(SensorPosition::ALL, Some(sensor.position), {
        let mac = mac.clone();
        move |position| Message::PositionPicked(mac.clone(), position)
    })
    .text_size(12)
    .width(Length::Fill);

    let offset_input = text_input("0", &sensor.offset_input)
        .on_input({
            let mac = mac.clone();
            move |value| Message::OffsetEdited(mac.clone(), value)
        })
        .on_submit(Message::OffsetSubmitted(mac))
        .size(12)
        .width(Length::Fill);

    let cells = row![
        text(key).size(13).width(Length::FillPortion(3)),
        container(position_picker).width(Length::FillPortion(2)),
        container(offset_input).width(Length::FillPortion(2)),
        text(&sensor.direction).size(13).width(Length::FillPortion(2)),
        text(&sensor.knots).size(13).width(Length::FillPortion(2)),
        text(&sensor.latency).size(13).width(Length::FillPortion(1)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    container(cells)
        .width(Length::Fill)
        .padding(6)
        .style(|theme: &Theme| {
            let colors = theme::colors(theme);
            container::Style {
                background: Some(iced::Background::Color(colors.row_background())),
                border: iced::Border {
                    color: colors.border_subtle(),
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reading(dir: Option<f64>, knots: f64, dt: i64) -> WindReading {
        WindReading {
            position: SensorPosition::Primary,
            offset: 0.0,
            dir,
            knots,
            dt,
        }
    }

    #[test]
    fn test_row_cells_formatting() {
        let row = WindRow::build("a4:c1", &reading(Some(271.25), 6.128, 180));
        assert_eq!(row.direction, "271.2 deg");
        assert_eq!(row.knots, "6.13kt");
        assert_eq!(row.latency, "180ms");
        assert_eq!(row.offset_input, "0");
    }

    #[test]
    fn test_row_null_direction_placeholder() {
        let row = WindRow::build("a4:c1", &reading(None, 0.0, 50));
        assert_eq!(row.direction, "---");
    }

    #[test]
    fn test_refresh_keeps_calibration_cells() {
        let mut table: RowTable<WindRow> = RowTable::new();
        let mut snapshot = HashMap::new();
        snapshot.insert("a4:c1".to_string(), reading(Some(10.0), 5.0, 100));
        table.reconcile(&snapshot);

        // User picks a position and starts typing an offset.
        let row = table.get_mut("a4:c1").unwrap();
        row.position = SensorPosition::Port;
        row.offset_input = "12.".to_string();

        snapshot.insert("a4:c1".to_string(), reading(Some(20.0), 6.0, 90));
        table.reconcile(&snapshot);

        let row = table.get("a4:c1").unwrap();
        assert_eq!(row.position, SensorPosition::Port);
        assert_eq!(row.offset_input, "12.");
        assert_eq!(row.direction, "20.0 deg");
        assert_eq!(row.knots, "6.00kt");
    }

    #[test]
    fn test_clear_discards_masthead_and_rows() {
        let mut state = WindState::default();
        state.masthead = Some(Masthead {
            direction: Some(90.0),
            knots: 4.0,
        });
        let mut snapshot = HashMap::new();
        snapshot.insert("a4:c1".to_string(), reading(None, 1.0, 10));
        state.sensors.reconcile(&snapshot);

        state.clear();
        assert!(state.masthead.is_none());
        assert!(state.sensors.is_empty());
    }
}
