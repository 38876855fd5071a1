pub mod config;
pub mod control_points;
pub mod hull;
pub mod line;
pub mod perspective_box;
pub mod scene;
pub mod scene_canvas;
pub mod utils;

use crate::line::Line;

/// Unsupported geometric configurations. None of these are retried: the
/// frame being composed is dropped and the previous one stays visible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("lines do not intersect, directions are parallel: {first:?} and {second:?}")]
    ParallelLines { first: Line, second: Line },
    #[error("convex hull needs at least 3 non-collinear points, got {0}")]
    DegenerateHull(usize),
    #[error("convex hull did not close after {0} steps")]
    HullDidNotConverge(usize),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VanishingRays {
    #[default]
    StopAtVanishingPoint,
    ExtendBeyondVanishingPoint,
}
