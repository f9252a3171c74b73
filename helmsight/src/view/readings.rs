//! Readings page: the generic live-data table.

use iced::widget::{Column, column, container, row, text};
use iced::{Element, Length, Theme};

use helmsight_common::Reading;

use crate::message::Message;
use crate::table::{RowTable, TableRow};
use crate::view::formatting::{format_latency, format_value};
use crate::view::theme;

/// One bound row of the readings table.
#[derive(Debug, Clone)]
pub struct ReadingRow {
    /// Formatted value cell.
    pub value: String,
    /// Source cell.
    pub source: String,
    /// Formatted latency cell.
    pub latency: String,
}

impl TableRow for ReadingRow {
    type Record = Reading;

    fn build(_key: &str, record: &Reading) -> Self {
        Self {
            value: format_value(record.value),
            source: record.source.clone(),
            latency: format_latency(record.latency),
        }
    }

    fn refresh(&mut self, record: &Reading) {
        self.value = format_value(record.value);
        self.source = record.source.clone();
        self.latency = format_latency(record.latency);
    }
}

/// Render the readings page.
pub fn readings_view(table: &RowTable<ReadingRow>) -> Element<'_, Message> {
    let header = row![
        text("Name").size(13).width(Length::FillPortion(3)),
        text("Value").size(13).width(Length::FillPortion(2)),
        text("Source").size(13).width(Length::FillPortion(2)),
        text("Latency").size(13).width(Length::FillPortion(1)),
    ]
    .spacing(10);

    let body: Element<'_, Message> = if table.is_empty() {
        text("Waiting for live data...").size(13).into()
    } else {
        let mut rows = Column::new().spacing(4);
        for (key, reading) in table.iter() {
            rows = rows.push(render_reading_row(key, reading));
        }
        rows.into()
    };

    let content = column![header, body].spacing(8).padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_reading_row<'a>(key: &'a str, reading: &'a ReadingRow) -> Element<'a, Message> {
    let cells = row![
        text(key).size(13).width(Length::FillPortion(3)),
        text(&reading.value).size(13).width(Length::FillPortion(2)),
        text(&reading.source).size(13).width(Length::FillPortion(2)),
        text(&reading.latency).size(13).width(Length::FillPortion(1)),
    ]
    .spacing(10);

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

    #[test]
    fn test_reading_row_cells() {
        let row = ReadingRow::build(
            "A1",
            &Reading {
                value: 3.14159,
                source: "gps".to_string(),
                latency: 12,
            },
        );
        assert_eq!(row.value, "3.142");
        assert_eq!(row.source, "gps");
        assert_eq!(row.latency, "12ms");
    }

    #[test]
    fn test_snapshot_round_trip_through_table() {
        // One frame announces a reading; the next omits it.
        let mut table: RowTable<ReadingRow> = RowTable::new();

        let mut snapshot = HashMap::new();
        snapshot.insert(
            "A1".to_string(),
            Reading {
                value: 3.14159,
                source: "gps".to_string(),
                latency: 12,
            },
        );
        table.reconcile(&snapshot);

        let cells: Vec<(String, ReadingRow)> = table
            .iter()
            .map(|(key, row)| (key.to_string(), row.clone()))
            .collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].0, "A1");
        assert_eq!(cells[0].1.value, "3.142");
        assert_eq!(cells[0].1.source, "gps");
        assert_eq!(cells[0].1.latency, "12ms");

        table.reconcile(&HashMap::new());
        assert!(table.is_empty());
    }
}
