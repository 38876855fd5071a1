use nalgebra::Point2;

use crate::{
    Result,
    config::Config,
    control_points::{ControlPointKind, ControlPoints},
    line::Line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Dark,
    Light,
    Highlighted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    Shadow,
    Background,
    ControlPoint,
    HighlightedControlPoint,
}

/// Drawing primitives the scene is rendered with.
pub trait Painter {
    fn clear(&mut self, width: f32, height: f32);
    fn stroke_line(&mut self, from: Point2<f32>, to: Point2<f32>, style: StrokeStyle, width: f32);
    fn fill_polygon(&mut self, vertices: &[Point2<f32>], style: FillStyle);
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, style: FillStyle);
    fn stroke_circle(&mut self, center: Point2<f32>, radius: f32, style: StrokeStyle, width: f32);
}

const EDGE_WIDTH: f32 = 2.0;
const RAY_WIDTH: f32 = 1.0;
const MARKER_WIDTH: f32 = 1.5;

/// Everything needed to draw one frame, computed up front so that a
/// degenerate configuration fails before anything is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: f32,
    height: f32,
    shadow: Vec<Point2<f32>>,
    footprint: [Point2<f32>; 4],
    vanishing_rays: [Line; 4],
    front: [Line; 4],
    back: [Line; 4],
    connectors: [Line; 4],
    construction: Vec<Line>,
}

impl Scene {
    pub fn compose(config: &Config) -> Result<Self> {
        let wireframe = config.wireframe();
        let shadow = config.shadow()?;

        let mut construction = Vec::with_capacity(9);
        construction.push(Line::segment(config.light, config.light_drop));
        construction.extend(shadow.light_rays);
        construction.extend(shadow.ground_rays);

        Ok(Self {
            width: config.width,
            height: config.height,
            shadow: shadow.polygon,
            footprint: shadow.footprint,
            vanishing_rays: wireframe.vanishing_rays,
            front: wireframe.front,
            back: wireframe.back,
            connectors: wireframe.connectors,
            construction,
        })
    }

    fn stroke<P: Painter>(&self, painter: &mut P, lines: &[Line], style: StrokeStyle, width: f32) {
        for line in lines {
            if let Some((from, to)) = line.extent(self.width, self.height) {
                painter.stroke_line(from, to, style, width);
            }
        }
    }

    /// Paints back to front: the shadow, the footprint punched out of it, then
    /// the wireframe and finally the construction rays.
    pub fn paint<P: Painter>(&self, painter: &mut P) {
        painter.clear(self.width, self.height);
        painter.fill_polygon(&self.shadow, FillStyle::Shadow);
        painter.fill_polygon(&self.footprint, FillStyle::Background);
        self.stroke(painter, &self.vanishing_rays, StrokeStyle::Light, RAY_WIDTH);
        self.stroke(painter, &self.front, StrokeStyle::Dark, EDGE_WIDTH);
        self.stroke(painter, &self.back, StrokeStyle::Dark, EDGE_WIDTH);
        self.stroke(painter, &self.connectors, StrokeStyle::Dark, EDGE_WIDTH);
        self.stroke(painter, &self.construction, StrokeStyle::Light, RAY_WIDTH);
    }
}

/// Markers for the control points, drawn over the scene. The grasped point,
/// or else `hovered`, is highlighted.
pub fn paint_control_points<P: Painter>(
    control_points: &ControlPoints,
    hovered: Option<ControlPointKind>,
    painter: &mut P,
) {
    let highlighted = control_points.selected().or(hovered);
    for point in control_points.iter() {
        let (fill, stroke) = if Some(point.kind()) == highlighted {
            (FillStyle::HighlightedControlPoint, StrokeStyle::Highlighted)
        } else {
            (FillStyle::ControlPoint, StrokeStyle::Dark)
        };
        painter.fill_circle(point.position(), point.radius(), fill);
        painter.stroke_circle(point.position(), point.radius(), stroke, MARKER_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeometryError, config::SceneSettings};

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Line(StrokeStyle),
        Polygon(usize, FillStyle),
        FillCircle(FillStyle),
        StrokeCircle(StrokeStyle),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Painter for Recorder {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.calls.push(Call::Clear);
        }
        fn stroke_line(
            &mut self,
            _from: Point2<f32>,
            _to: Point2<f32>,
            style: StrokeStyle,
            _width: f32,
        ) {
            self.calls.push(Call::Line(style));
        }
        fn fill_polygon(&mut self, vertices: &[Point2<f32>], style: FillStyle) {
            self.calls.push(Call::Polygon(vertices.len(), style));
        }
        fn fill_circle(&mut self, _center: Point2<f32>, _radius: f32, style: FillStyle) {
            self.calls.push(Call::FillCircle(style));
        }
        fn stroke_circle(
            &mut self,
            _center: Point2<f32>,
            _radius: f32,
            style: StrokeStyle,
            _width: f32,
        ) {
            self.calls.push(Call::StrokeCircle(style));
        }
    }

    fn control_points() -> ControlPoints {
        ControlPoints::new(
            Point2::new(400.0, 100.0),
            Point2::new(150.0, 400.0),
            Point2::new(300.0, 300.0),
            Point2::new(40.0, 60.0),
            Point2::new(40.0, 450.0),
        )
    }

    #[test]
    fn draw_order() {
        let config = Config::new(640.0, 480.0, &control_points(), &SceneSettings::default());
        let scene = Scene::compose(&config).unwrap();
        let mut recorder = Recorder::default();
        scene.paint(&mut recorder);

        let calls = recorder.calls;
        assert_eq!(calls[0], Call::Clear);
        assert!(matches!(calls[1], Call::Polygon(_, FillStyle::Shadow)));
        assert_eq!(calls[2], Call::Polygon(4, FillStyle::Background));
        // 4 vanishing rays, 12 box edges, plumb line, 4 light and 4 ground rays
        assert_eq!(calls.len(), 3 + 4 + 12 + 9);
        assert!(calls[3..7].iter().all(|call| *call == Call::Line(StrokeStyle::Light)));
        assert!(calls[7..19].iter().all(|call| *call == Call::Line(StrokeStyle::Dark)));
        assert!(calls[19..].iter().all(|call| *call == Call::Line(StrokeStyle::Light)));
    }

    #[test]
    fn degenerate_light_fails_before_drawing() {
        let control_points = ControlPoints::new(
            Point2::new(400.0, 100.0),
            Point2::new(150.0, 400.0),
            Point2::new(300.0, 300.0),
            Point2::new(150.0, 60.0),
            Point2::new(150.0, 450.0),
        );
        let config = Config::new(640.0, 480.0, &control_points, &SceneSettings::default());
        assert!(matches!(
            Scene::compose(&config),
            Err(GeometryError::ParallelLines { .. })
        ));
    }

    #[test]
    fn zero_length_lines_are_skipped() {
        // vanishing point on a front corner collapses one ray and one connector
        let control_points = ControlPoints::new(
            Point2::new(150.0, 400.0),
            Point2::new(150.0, 400.0),
            Point2::new(300.0, 300.0),
            Point2::new(40.0, 60.0),
            Point2::new(40.0, 450.0),
        );
        let config = Config::new(640.0, 480.0, &control_points, &SceneSettings::default());
        let scene = Scene::compose(&config).unwrap();
        let mut recorder = Recorder::default();
        scene.paint(&mut recorder);
        let lines = recorder
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Line(_)))
            .count();
        assert_eq!(lines, 4 + 12 + 9 - 2);
    }

    #[test]
    fn grasped_marker_is_highlighted() {
        let grasped = control_points().select(Point2::new(40.0, 60.0));
        let mut recorder = Recorder::default();
        paint_control_points(&grasped, Some(ControlPointKind::VanishingPoint), &mut recorder);
        assert_eq!(recorder.calls.len(), 10);
        assert_eq!(recorder.calls[6], Call::FillCircle(FillStyle::HighlightedControlPoint));
        assert_eq!(recorder.calls[0], Call::FillCircle(FillStyle::ControlPoint));

        let mut recorder = Recorder::default();
        paint_control_points(&control_points(), Some(ControlPointKind::BoxPoint2), &mut recorder);
        assert_eq!(recorder.calls[5], Call::StrokeCircle(StrokeStyle::Highlighted));
        assert_eq!(
            recorder
                .calls
                .iter()
                .filter(|call| **call == Call::StrokeCircle(StrokeStyle::Highlighted))
                .count(),
            1
        );
    }
}
