use nalgebra::{Point2, Vector2};

use crate::{GeometryError, Result};

/// A segment or ray through two points. The stop flags only decide how far
/// the line is drawn; intersection always works on the infinite line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub begin: Point2<f32>,
    pub end: Point2<f32>,
    pub stop_at_begin: bool,
    pub stop_at_end: bool,
}

impl Line {
    pub fn new(
        begin: Point2<f32>,
        end: Point2<f32>,
        stop_at_begin: bool,
        stop_at_end: bool,
    ) -> Self {
        Self {
            begin,
            end,
            stop_at_begin,
            stop_at_end,
        }
    }

    /// Hard-stopped at both ends.
    pub fn segment(begin: Point2<f32>, end: Point2<f32>) -> Self {
        Self::new(begin, end, true, true)
    }

    /// Starts at `origin` and runs on through `through` without stopping.
    pub fn ray(origin: Point2<f32>, through: Point2<f32>) -> Self {
        Self::new(origin, through, true, false)
    }

    pub fn direction(&self) -> Vector2<f32> {
        self.end - self.begin
    }

    pub fn is_degenerate(&self) -> bool {
        self.begin == self.end
    }

    pub fn intersect_with(&self, other: &Line) -> Result<Point2<f32>> {
        let tr = self.direction();
        let or = other.direction();
        let denom = tr.y * or.x - tr.x * or.y;
        if denom == 0.0 {
            return Err(GeometryError::ParallelLines {
                first: *self,
                second: *other,
            });
        }
        let d = other.begin - self.begin;
        let t = (or.x * d.y - or.y * d.x) / denom;
        Ok(self.begin + tr * t)
    }

    /// End points to draw inside a `width` x `height` viewport. Open ends are
    /// pushed far enough along the line to leave the viewport. Zero-length
    /// lines have no extent.
    pub fn extent(&self, width: f32, height: f32) -> Option<(Point2<f32>, Point2<f32>)> {
        if self.is_degenerate() {
            return None;
        }
        let unit = self.direction().normalize();
        // Viewport points lie within `width + height` of the origin. Moving
        // `reach` from either end lands farther out than that.
        let reach = self.begin.coords.norm() + self.end.coords.norm() + width + height;
        let begin = if self.stop_at_begin {
            self.begin
        } else {
            self.begin - unit * reach
        };
        let end = if self.stop_at_end {
            self.end
        } else {
            self.end + unit * reach
        };
        Some((begin, end))
    }
}
