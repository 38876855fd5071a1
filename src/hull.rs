use nalgebra::Point2;
use tracing::trace;

use crate::{GeometryError, Result};

/// `candidate` lies strictly left of the directed line `from -> to`. Points
/// coincident with either end are never left.
fn is_left(from: &Point2<f32>, to: &Point2<f32>, candidate: &Point2<f32>) -> bool {
    if candidate == from || candidate == to {
        return false;
    }
    cross(from, to, candidate) > 0.0
}

fn cross(from: &Point2<f32>, to: &Point2<f32>, candidate: &Point2<f32>) -> f32 {
    let a = to - from;
    let b = candidate - from;
    a.x * b.y - a.y * b.x
}

/// `candidate` is collinear with `from -> to` and strictly between them.
fn is_between(from: &Point2<f32>, to: &Point2<f32>, candidate: &Point2<f32>) -> bool {
    if candidate == from || candidate == to {
        return false;
    }
    let a = to - from;
    let b = candidate - from;
    cross(from, to, candidate) == 0.0 && a.dot(&b) > 0.0 && b.norm_squared() < a.norm_squared()
}

/// `candidate` lies on the line `previous -> current` but back towards
/// `previous`.
fn turns_back(previous: &Point2<f32>, current: &Point2<f32>, candidate: &Point2<f32>) -> bool {
    cross(previous, current, candidate) == 0.0
        && (current - previous).dot(&(candidate - current)) < 0.0
}

/// Gift-wrapping hull of `points`, starting at the leftmost point (first one
/// wins on ties). Each step takes the point with nothing strictly left of
/// the edge towards it, the nearest one when several are collinear, so the
/// result runs counter-clockwise on a y-down screen. Inputs without three
/// distinct non-collinear points have no area and are rejected.
pub fn convex_hull(points: &[Point2<f32>]) -> Result<Vec<Point2<f32>>> {
    if points.len() < 3 {
        return Err(GeometryError::DegenerateHull(points.len()));
    }

    let start = points
        .iter()
        .skip(1)
        .fold(points[0], |leftmost, point| {
            if point.x < leftmost.x {
                *point
            } else {
                leftmost
            }
        });

    let Some(other) = points.iter().find(|&point| *point != start) else {
        return Err(GeometryError::DegenerateHull(1));
    };
    if points.iter().all(|point| cross(&start, other, point) == 0.0) {
        return Err(GeometryError::DegenerateHull(2));
    }

    let max_steps = points.len() + 1;
    let mut hull = Vec::with_capacity(points.len());
    let mut previous: Option<Point2<f32>> = None;
    let mut current = start;
    for _ in 0..max_steps {
        hull.push(current);

        let mut next: Option<Point2<f32>> = None;
        for candidate in points.iter().filter(|&point| *point != current) {
            if previous.is_some_and(|previous| turns_back(&previous, &current, candidate)) {
                continue;
            }
            if points.iter().any(|other| is_left(&current, candidate, other)) {
                continue;
            }
            next = match next {
                Some(chosen) if !is_between(&current, &chosen, candidate) => Some(chosen),
                _ => Some(*candidate),
            };
        }
        let Some(next) = next else {
            return Err(GeometryError::HullDidNotConverge(hull.len()));
        };

        if next == start {
            trace!("hull closed with {} vertices", hull.len());
            return Ok(hull);
        }
        previous = Some(current);
        current = next;
    }
    Err(GeometryError::HullDidNotConverge(max_steps))
}
