use nalgebra::{Point2, Vector2};
use tracing::{debug, trace};

/// Grab radius around every control point, in pixels.
pub const RADIUS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPointKind {
    VanishingPoint,
    BoxPoint1,
    BoxPoint2,
    Light,
    LightDrop,
}

impl ControlPointKind {
    /// Declaration order; also the hit-test priority.
    pub const ALL: [ControlPointKind; 5] = [
        ControlPointKind::VanishingPoint,
        ControlPointKind::BoxPoint1,
        ControlPointKind::BoxPoint2,
        ControlPointKind::Light,
        ControlPointKind::LightDrop,
    ];

    fn index(self) -> usize {
        match self {
            ControlPointKind::VanishingPoint => 0,
            ControlPointKind::BoxPoint1 => 1,
            ControlPointKind::BoxPoint2 => 2,
            ControlPointKind::Light => 3,
            ControlPointKind::LightDrop => 4,
        }
    }

    /// The kind whose x-coordinate follows this one while it is dragged.
    fn coupled(self) -> Option<ControlPointKind> {
        match self {
            ControlPointKind::Light => Some(ControlPointKind::LightDrop),
            ControlPointKind::LightDrop => Some(ControlPointKind::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    kind: ControlPointKind,
    position: Point2<f32>,
}

impl ControlPoint {
    pub fn new(kind: ControlPointKind, position: Point2<f32>) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> ControlPointKind {
        self.kind
    }

    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn radius(&self) -> f32 {
        RADIUS
    }

    pub fn is_hit(&self, point: &Point2<f32>) -> bool {
        (point - self.position).norm() <= RADIUS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grasp {
    kind: ControlPointKind,
    delta: Vector2<f32>,
}

/// The five draggable points and which of them, if any, is held. Every
/// operation returns a new value and leaves the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoints {
    points: [ControlPoint; 5],
    grasp: Option<Grasp>,
}

impl ControlPoints {
    pub fn new(
        vanishing_point: Point2<f32>,
        box_point_1: Point2<f32>,
        box_point_2: Point2<f32>,
        light: Point2<f32>,
        light_drop: Point2<f32>,
    ) -> Self {
        let positions = [vanishing_point, box_point_1, box_point_2, light, light_drop];
        Self {
            points: ControlPointKind::ALL
                .map(|kind| ControlPoint::new(kind, positions[kind.index()])),
            grasp: None,
        }
    }

    /// Starting layout for a `width` x `height` viewport.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let light_x = width * 0.1;
        Self::new(
            Point2::new(width * 0.6, height * 0.35),
            Point2::new(width * 0.3, height * 0.75),
            Point2::new(width * 0.45, height * 0.55),
            Point2::new(light_x, height * 0.15),
            Point2::new(light_x, height * 0.85),
        )
    }

    pub fn get(&self, kind: ControlPointKind) -> ControlPoint {
        self.points[kind.index()]
    }

    pub fn position(&self, kind: ControlPointKind) -> Point2<f32> {
        self.get(kind).position
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlPoint> {
        self.points.iter()
    }

    pub fn selected(&self) -> Option<ControlPointKind> {
        self.grasp.map(|grasp| grasp.kind)
    }

    /// Offset from the grasped point to the pointer, fixed at selection.
    pub fn delta(&self) -> Option<Vector2<f32>> {
        self.grasp.map(|grasp| grasp.delta)
    }

    /// First control point, in declaration order, within reach of `point`.
    pub fn hit(&self, point: &Point2<f32>) -> Option<ControlPoint> {
        self.points.iter().find(|item| item.is_hit(point)).copied()
    }

    #[must_use]
    pub fn select(&self, point: Point2<f32>) -> Self {
        let grasp = self.hit(&point).map(|item| Grasp {
            kind: item.kind,
            delta: point - item.position,
        });
        if let Some(grasp) = grasp.as_ref() {
            debug!("grasped {:?} with offset {:?}", grasp.kind, grasp.delta);
        }
        Self {
            points: self.points,
            grasp,
        }
    }

    #[must_use]
    pub fn move_to(&self, point: Point2<f32>) -> Self {
        let Some(grasp) = self.grasp else {
            return *self;
        };
        let position = point - grasp.delta;
        let mut points = self.points;
        points[grasp.kind.index()].position = position;
        if let Some(coupled) = grasp.kind.coupled() {
            points[coupled.index()].position.x = position.x;
        }
        trace!("moved {:?} to {}", grasp.kind, position);
        Self {
            points,
            grasp: self.grasp,
        }
    }

    #[must_use]
    pub fn deselect(&self) -> Self {
        if let Some(grasp) = self.grasp {
            debug!("released {:?}", grasp.kind);
        }
        Self {
            points: self.points,
            grasp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> ControlPoints {
        ControlPoints::new(
            Point2::new(100.0, 100.0),
            Point2::new(50.0, 150.0),
            Point2::new(150.0, 200.0),
            Point2::new(20.0, 50.0),
            Point2::new(20.0, 180.0),
        )
    }

    #[test]
    fn mapping_is_total() {
        let control_points = scenario();
        for kind in ControlPointKind::ALL {
            assert_eq!(control_points.get(kind).kind(), kind);
        }
        assert_eq!(control_points.iter().count(), 5);
        assert_eq!(
            control_points.position(ControlPointKind::BoxPoint2),
            Point2::new(150.0, 200.0)
        );
    }

    #[test]
    fn hit_test_includes_radius() {
        let point = ControlPoint::new(ControlPointKind::Light, Point2::new(0.0, 0.0));
        assert!(point.is_hit(&Point2::new(10.0, 0.0)));
        assert!(point.is_hit(&Point2::new(6.0, 8.0)));
        assert!(!point.is_hit(&Point2::new(10.0, 0.5)));
    }

    #[test]
    fn select_captures_offset() {
        let control_points = scenario().select(Point2::new(104.0, 97.0));
        assert_eq!(control_points.selected(), Some(ControlPointKind::VanishingPoint));
        assert_eq!(control_points.delta(), Some(Vector2::new(4.0, -3.0)));
    }

    #[test]
    fn select_miss_is_idle() {
        let control_points = scenario()
            .select(Point2::new(100.0, 100.0))
            .select(Point2::new(400.0, 400.0));
        assert_eq!(control_points.selected(), None);
        assert_eq!(control_points.delta(), None);
    }

    #[test]
    fn overlapping_points_prefer_declaration_order() {
        let control_points = ControlPoints::new(
            Point2::new(0.0, 0.0),
            Point2::new(200.0, 200.0),
            Point2::new(300.0, 300.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 100.0),
        );
        assert_eq!(
            control_points.select(Point2::new(3.0, 0.0)).selected(),
            Some(ControlPointKind::VanishingPoint)
        );
        assert_eq!(
            control_points.select(Point2::new(12.0, 0.0)).selected(),
            Some(ControlPointKind::Light)
        );
    }

    #[test]
    fn select_does_not_touch_receiver() {
        let idle = scenario();
        let grasped = idle.select(Point2::new(100.0, 100.0));
        assert_eq!(idle.selected(), None);
        assert_ne!(idle, grasped);
        let moved = grasped.move_to(Point2::new(120.0, 100.0));
        assert_eq!(grasped.position(ControlPointKind::VanishingPoint), Point2::new(100.0, 100.0));
        assert_eq!(moved.position(ControlPointKind::VanishingPoint), Point2::new(120.0, 100.0));
    }

    #[test]
    fn move_keeps_offset() {
        let mut control_points = scenario().select(Point2::new(55.0, 148.0));
        let delta = control_points.delta().unwrap();
        for (x, y) in [(60.0, 160.0), (10.0, 10.0), (300.0, 2.0)] {
            let pointer = Point2::new(x, y);
            control_points = control_points.move_to(pointer);
            let dragged = control_points.position(ControlPointKind::BoxPoint1);
            assert_eq!(pointer - dragged, delta);
        }
        assert_eq!(control_points.delta(), Some(delta));
    }

    #[test]
    fn light_drags_its_drop() {
        let control_points = scenario()
            .select(Point2::new(22.0, 52.0))
            .move_to(Point2::new(70.0, 10.0));
        let light = control_points.position(ControlPointKind::Light);
        let light_drop = control_points.position(ControlPointKind::LightDrop);
        assert_eq!(light, Point2::new(68.0, 8.0));
        assert_eq!(light_drop, Point2::new(68.0, 180.0));
    }

    #[test]
    fn drop_drags_its_light() {
        let control_points = scenario()
            .select(Point2::new(20.0, 180.0))
            .move_to(Point2::new(-15.0, 260.0));
        assert_eq!(
            control_points.position(ControlPointKind::LightDrop),
            Point2::new(-15.0, 260.0)
        );
        assert_eq!(
            control_points.position(ControlPointKind::Light),
            Point2::new(-15.0, 50.0)
        );
    }

    #[test]
    fn other_points_move_alone() {
        let before = scenario();
        let after = before
            .select(Point2::new(150.0, 200.0))
            .move_to(Point2::new(170.0, 230.0));
        for kind in ControlPointKind::ALL {
            if kind != ControlPointKind::BoxPoint2 {
                assert_eq!(after.get(kind), before.get(kind));
            }
        }
    }

    #[test]
    fn move_while_idle_is_noop() {
        let idle = scenario();
        assert_eq!(idle.move_to(Point2::new(1.0, 2.0)), idle);
    }

    #[test]
    fn deselect_is_idempotent() {
        let grasped = scenario().select(Point2::new(20.0, 50.0));
        let once = grasped.deselect();
        assert_eq!(once.deselect(), once);
        assert_eq!(once.selected(), None);
        assert_eq!(once.delta(), None);
        assert_eq!(once, scenario());
    }

    #[test]
    fn viewport_layout_keeps_light_above_drop() {
        let control_points = ControlPoints::for_viewport(800.0, 600.0);
        let light = control_points.position(ControlPointKind::Light);
        let light_drop = control_points.position(ControlPointKind::LightDrop);
        assert_eq!(light.x, light_drop.x);
        assert!(light.y < light_drop.y);
        assert!(control_points.iter().all(|point| {
            let p = point.position();
            (0.0..=800.0).contains(&p.x) && (0.0..=600.0).contains(&p.y)
        }));
    }
}
