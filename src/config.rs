use nalgebra::Point2;

use crate::{
    Result, VanishingRays,
    control_points::{ControlPointKind, ControlPoints},
    perspective_box::{DEFAULT_DEPTH_FACTOR, PerspectiveBox, Shadow, Wireframe},
};

/// Settings that stay fixed for the lifetime of the application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub depth_factor: f32,
    pub vanishing_rays: VanishingRays,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            depth_factor: DEFAULT_DEPTH_FACTOR,
            vanishing_rays: VanishingRays::default(),
        }
    }
}

/// Snapshot of the scene for one viewport and one control point state.
/// Built from scratch whenever either changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub vanishing_point: Point2<f32>,
    pub light: Point2<f32>,
    pub light_drop: Point2<f32>,
    pub perspective_box: PerspectiveBox,
    pub vanishing_rays: VanishingRays,
}

impl Config {
    pub fn new(
        width: f32,
        height: f32,
        control_points: &ControlPoints,
        settings: &SceneSettings,
    ) -> Self {
        let perspective_box = PerspectiveBox::new(
            control_points.position(ControlPointKind::BoxPoint1),
            control_points.position(ControlPointKind::BoxPoint2),
        )
        .depth_factor(settings.depth_factor);
        Self {
            width,
            height,
            vanishing_point: control_points.position(ControlPointKind::VanishingPoint),
            light: control_points.position(ControlPointKind::Light),
            light_drop: control_points.position(ControlPointKind::LightDrop),
            perspective_box,
            vanishing_rays: settings.vanishing_rays,
        }
    }

    pub fn wireframe(&self) -> Wireframe {
        self.perspective_box
            .wireframe(&self.vanishing_point, self.vanishing_rays)
    }

    pub fn shadow(&self) -> Result<Shadow> {
        self.perspective_box
            .shadow(&self.vanishing_point, &self.light, &self.light_drop)
    }
}
