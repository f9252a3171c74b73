//! History page: query pickers, summary readouts, and the segment
//! chart canvas.

use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{button, column, container, pick_list, row, rule, text};
use iced::{Alignment, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use helmsight_common::{
    HistoryItem, HistoryRange, HistoryResponse, Segment, axis_ticks, split_segments, time_bounds,
    value_bounds,
};

use crate::message::Message;
use crate::view::formatting::format_time_offset;
use crate::view::theme;

/// State for the history page.
///
/// One outstanding query or re-poll timer exists at a time; the
/// generation counter invalidates responses and timers that belong to
/// a superseded query.
#[derive(Debug)]
pub struct HistoryState {
    /// Quantity being queried.
    pub item: HistoryItem,
    /// Window being queried.
    pub range: HistoryRange,
    /// Query generation; bumped whenever the query restarts.
    pub generation: u64,
    /// Chart state, updated in place on every refresh.
    pub chart: SegmentChart,
    /// Span of the last response's window in seconds.
    pub total_time: Option<f64>,
    /// Highest value over the window.
    pub high: Option<f64>,
    /// Lowest value over the window.
    pub low: Option<f64>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            item: HistoryItem::WindSpeed,
            range: HistoryRange::FiveMinutes,
            generation: 0,
            chart: SegmentChart::new(),
            total_time: None,
            high: None,
            low: None,
        }
    }

    /// Start a new query cycle, invalidating any in-flight response or
    /// pending re-poll timer.
    pub fn restart(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a successful response: summary fields and chart data are
    /// updated in place.
    pub fn plot(&mut self, response: &HistoryResponse) {
        self.total_time = Some(response.total_time);
        self.high = Some(response.high);
        self.low = Some(response.low);
        self.chart.set_segments(split_segments(&response.data));
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Chart of chronological segments drawn as independent strokes.
///
/// The chart object persists across refreshes: a refresh replaces the
/// segment list and clears the cached geometry, leaving axis layout
/// and styling untouched.
#[derive(Debug)]
pub struct SegmentChart {
    segments: Vec<Segment>,
    time_axis: Option<(f64, f64)>,
    value_axis: Option<(f64, f64)>,
    cache: Cache,
}

impl SegmentChart {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            time_axis: None,
            value_axis: None,
            cache: Cache::new(),
        }
    }

    /// Replace the plotted data in place. The axes span the observed
    /// min/max timestamp and value across all points.
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.time_axis = time_bounds(&segments);
        self.value_axis = value_bounds(&segments);
        self.segments = segments;
        self.cache.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn time_axis(&self) -> Option<(f64, f64)> {
        self.time_axis
    }
}

impl Default for SegmentChart {
    fn default() -> Self {
        Self::new()
    }
}

/// Chart widget that renders the segments.
pub struct Chart<'a> {
    state: &'a SegmentChart,
}

impl<'a> Chart<'a> {
    pub fn new(state: &'a SegmentChart) -> Self {
        Self { state }
    }

    fn draw_chart(&self, frame: &mut Frame, size: Size, theme: &Theme) {
        let colors = theme::colors(theme);
        let padding = 50.0;
        let chart_width = size.width - padding * 2.0;
        let chart_height = size.height - padding * 2.0;

        if chart_width <= 0.0 || chart_height <= 0.0 {
            return;
        }

        let background = Path::rectangle(Point::ORIGIN, size);
        frame.fill(&background, colors.chart_background());

        let (Some((time_min, time_max)), Some((value_min, value_max))) =
            (self.state.time_axis, self.state.value_axis)
        else {
            let no_data = Text {
                content: "No data".to_string(),
                position: Point::new(size.width / 2.0 - 30.0, size.height / 2.0),
                color: colors.text_dimmed(),
                size: 16.0.into(),
                ..Text::default()
            };
            frame.fill_text(no_data);
            return;
        };

        let time_span = (time_max - time_min).max(f64::EPSILON);
        let value_span = (value_max - value_min).max(f64::EPSILON);

        let x_of = |time: f64| -> f32 {
            padding + ((time - time_min) / time_span) as f32 * chart_width
        };
        let y_of = |value: f64| -> f32 {
            padding + chart_height - ((value - value_min) / value_span) as f32 * chart_height
        };

        // Time axis: ten equal intervals across the observed span,
        // labeled as offsets back from the newest sample.
        for tick in axis_ticks(time_min, time_max) {
            let x = x_of(tick);
            let line = Path::line(
                Point::new(x, padding),
                Point::new(x, padding + chart_height),
            );
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(colors.chart_grid())
                    .with_width(1.0),
            );

            let label = Text {
                content: format_time_offset(time_max - tick),
                position: Point::new(x - 15.0, padding + chart_height + 15.0),
                color: colors.chart_label(),
                size: 10.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }

        // Value axis grid.
        let value_lines = 5;
        for i in 0..=value_lines {
            let value = value_min + value_span * i as f64 / value_lines as f64;
            let y = y_of(value);
            let line = Path::line(Point::new(padding, y), Point::new(padding + chart_width, y));
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(colors.chart_grid())
                    .with_width(1.0),
            );

            let label = Text {
                content: format!("{:.2}", value),
                position: Point::new(5.0, y - 6.0),
                color: colors.chart_label(),
                size: 10.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }

        // Each segment is one continuous stroke; gaps between segments
        // stay blank. No point markers.
        for segment in &self.state.segments {
            let mut points = segment
                .iter()
                .map(|(time, value)| Point::new(x_of(*time), y_of(*value)));
            let Some(first) = points.next() else {
                continue;
            };

            let mut builder = canvas::path::Builder::new();
            builder.move_to(first);
            for point in points {
                builder.line_to(point);
            }

            frame.stroke(
                &builder.build(),
                Stroke::default()
                    .with_color(colors.chart_stroke())
                    .with_width(2.0),
            );
        }
    }
}

impl<'a> canvas::Program<Message> for Chart<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.state.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_chart(frame, bounds.size(), theme);
        });

        vec![geometry]
    }
}

/// Render the history page.
pub fn history_view(state: &HistoryState) -> Element<'_, Message> {
    let item_picker = pick_list(
        HistoryItem::ALL,
        Some(state.item),
        Message::HistoryItemPicked,
    );
    let range_picker = pick_list(
        HistoryRange::ALL,
        Some(state.range),
        Message::HistoryRangePicked,
    );
    let refresh_button = button(text("Refresh").size(14))
        .on_press(Message::HistoryRefreshRequested)
        .style(iced::widget::button::secondary);

    let controls = row![item_picker, range_picker, refresh_button]
        .spacing(10)
        .align_y(Alignment::Center);

    let summary = row![
        summary_field("Duration", state.total_time),
        summary_field("High", state.high),
        summary_field("Low", state.low),
    ]
    .spacing(20);

    let chart: Element<'_, Message> = Canvas::new(Chart::new(&state.chart))
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    let content = column![controls, summary, rule::horizontal(1), chart]
        .spacing(10)
        .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// One labeled summary readout; the raw response value is shown
/// verbatim.
fn summary_field(label: &str, value: Option<f64>) -> Element<'_, Message> {
    let rendered = match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    };
    row![
        text(format!("{}:", label)).size(14),
        text(rendered).size(14),
    ]
    .spacing(5)
    .into()
}
