//! Polar wind gauge drawn on an iced canvas.
//!
//! A compass-style rim with a triangular needle pointing toward the
//! apparent wind and a whole-knots readout. The drawing is a pure
//! function of direction, speed, and canvas size; the surface is fully
//! redrawn on every frame and no state is kept between calls.

use iced::mouse;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::{Element, Length, Point, Rectangle, Renderer, Size, Theme};

use crate::message::Message;
use crate::view::formatting::format_gauge_knots;
use crate::view::theme;

/// The rim is inset from the canvas edge by 1/20th of the reference
/// dimension; the same unit is the needle's base half-width.
const MARGIN_DIVISOR: f32 = 20.0;

const RIM_STROKE_WIDTH: f32 = 5.0;

/// Rim and needle geometry for a gauge of the given canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    /// Canvas center.
    pub center: (f32, f32),
    /// Rim radius.
    pub radius: f32,
    /// Half-width of the needle base.
    pub base_half: f32,
}

/// Compute gauge geometry from the canvas size.
pub fn gauge_geometry(width: f32, height: f32) -> GaugeGeometry {
    let reference = width.min(height);
    let base_half = reference / MARGIN_DIVISOR;
    GaugeGeometry {
        center: (width / 2.0, height / 2.0),
        radius: reference / 2.0 - base_half,
        base_half,
    }
}

/// The three corners of the needle for a direction in degrees,
/// measured clockwise from the top reference axis: one base corner,
/// the tip on the rim, the other base corner. The base is a short
/// segment through the gauge origin, perpendicular to the needle.
pub fn needle_points(geometry: &GaugeGeometry, direction_deg: f64) -> [(f32, f32); 3] {
    let (cx, cy) = geometry.center;
    let radius = geometry.radius;
    let unit = geometry.base_half;
    let radians = direction_deg.to_radians();
    let (x, y) = (radians.sin() as f32, radians.cos() as f32);
    [
        (cx - unit * y, cy - unit * x),
        (cx + x * radius, cy - y * radius),
        (cx + unit * y, cy + unit * x),
    ]
}

/// Canvas program rendering the gauge.
pub struct WindGauge {
    direction: Option<f64>,
    knots: f64,
}

impl WindGauge {
    pub fn new(direction: Option<f64>, knots: f64) -> Self {
        Self { direction, knots }
    }

    fn draw_gauge(&self, frame: &mut Frame, size: Size, theme: &Theme) {
        let colors = theme::colors(theme);
        let geometry = gauge_geometry(size.width, size.height);
        if geometry.radius <= 0.0 {
            return;
        }

        let (cx, cy) = geometry.center;
        let rim = Path::circle(Point::new(cx, cy), geometry.radius);
        frame.stroke(
            &rim,
            Stroke::default()
                .with_color(colors.text())
                .with_width(RIM_STROKE_WIDTH),
        );

        // Direction unknown: the rim and readout stand alone.
        if let Some(direction) = self.direction {
            let [base_a, tip, base_b] = needle_points(&geometry, direction);
            let needle = {
                let mut builder = canvas::path::Builder::new();
                builder.move_to(Point::new(base_a.0, base_a.1));
                builder.line_to(Point::new(tip.0, tip.1));
                builder.line_to(Point::new(base_b.0, base_b.1));
                builder.close();
                builder.build()
            };
            frame.fill(&needle, colors.primary());
        }

        let readout = Text {
            content: format_gauge_knots(self.knots),
            position: Point::new(size.width * 0.4, size.height * 0.7),
            color: colors.text(),
            size: (size.width / 4.0).into(),
            ..Text::default()
        };
        frame.fill_text(readout);
    }
}

impl canvas::Program<Message> for WindGauge {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        self.draw_gauge(&mut frame, bounds.size(), theme);
        vec![frame.into_geometry()]
    }
}

/// Create the gauge canvas element.
pub fn gauge_view(direction: Option<f64>, knots: f64) -> Element<'static, Message> {
    Canvas::new(WindGauge::new(direction, knots))
        .width(Length::Fixed(260.0))
        .height(Length::Fixed(260.0))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip_angle_degrees(geometry: &GaugeGeometry, direction: f64) -> f64 {
        let [_, (tip_x, tip_y), _] = needle_points(geometry, direction);
        let (cx, cy) = geometry.center;
        // Clockwise angle from the upward reference axis.
        let angle = f64::atan2((tip_x - cx) as f64, (cy - tip_y) as f64).to_degrees();
        angle.rem_euclid(360.0)
    }

    #[test]
    fn test_geometry_uses_smaller_dimension() {
        let geometry = gauge_geometry(200.0, 400.0);
        assert_eq!(geometry.center, (100.0, 200.0));
        assert_eq!(geometry.base_half, 10.0);
        assert_eq!(geometry.radius, 90.0);
    }

    #[test]
    fn test_needle_angle_matches_direction() {
        let geometry = gauge_geometry(200.0, 200.0);
        for direction in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            let angle = tip_angle_degrees(&geometry, direction);
            assert!(
                (angle - direction).abs() < 1e-4,
                "direction {} rendered at {}",
                direction,
                angle
            );
        }
    }

    #[test]
    fn test_needle_angle_wraps_modulo_360() {
        let geometry = gauge_geometry(200.0, 200.0);
        let angle = tip_angle_degrees(&geometry, 370.0);
        assert!((angle - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_needle_tip_is_on_rim() {
        let geometry = gauge_geometry(300.0, 200.0);
        let [_, (tip_x, tip_y), _] = needle_points(&geometry, 123.0);
        let (cx, cy) = geometry.center;
        let distance = ((tip_x - cx).powi(2) + (tip_y - cy).powi(2)).sqrt();
        assert!((distance - geometry.radius).abs() < 1e-3);
    }

    #[test]
    fn test_needle_base_is_perpendicular() {
        let geometry = gauge_geometry(200.0, 200.0);
        let [base_a, tip, base_b] = needle_points(&geometry, 77.0);
        let (cx, cy) = geometry.center;
        let axis = (tip.0 - cx, tip.1 - cy);
        let base = (base_b.0 - base_a.0, base_b.1 - base_a.1);
        let dot = axis.0 * base.0 + axis.1 * base.1;
        assert!(dot.abs() < 1e-3);
    }
}
