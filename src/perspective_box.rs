use arrayvec::ArrayVec;
use nalgebra::Point2;
use tracing::trace;

use crate::{Result, VanishingRays, hull::convex_hull, line::Line};

pub const DEFAULT_DEPTH_FACTOR: f32 = 0.3;

/// Front/back face indices of the top and bottom end of each vertical edge.
const VERTICAL_EDGES: [(usize, usize); 2] = [(1, 0), (2, 3)];
const BOTTOM: [usize; 2] = [0, 3];

/// One-point-perspective box: an axis-aligned front rectangle spanned by two
/// opposite corners, with the back face pulled `depth_factor` of the way
/// towards the vanishing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveBox {
    corner1: Point2<f32>,
    corner2: Point2<f32>,
    depth_factor: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub vanishing_rays: [Line; 4],
    pub front: [Line; 4],
    pub back: [Line; 4],
    pub connectors: [Line; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    /// One per vertical box edge: front left, front right, back left, back right.
    pub vertices: [Point2<f32>; 4],
    pub polygon: Vec<Point2<f32>>,
    /// Ground projection of the box, front bottom edge then back bottom edge.
    pub footprint: [Point2<f32>; 4],
    pub light_rays: [Line; 4],
    pub ground_rays: [Line; 4],
}

fn quad(points: &[Point2<f32>; 4]) -> [Line; 4] {
    [0, 1, 2, 3].map(|index| Line::segment(points[index], points[(index + 1) % 4]))
}

impl PerspectiveBox {
    pub fn new(corner1: Point2<f32>, corner2: Point2<f32>) -> Self {
        Self {
            corner1,
            corner2,
            depth_factor: DEFAULT_DEPTH_FACTOR,
        }
    }

    pub fn depth_factor(mut self, depth_factor: f32) -> Self {
        self.depth_factor = depth_factor;
        self
    }

    pub fn corners(&self) -> (Point2<f32>, Point2<f32>) {
        (self.corner1, self.corner2)
    }

    /// Front face, always in the order C1, (C1.x, C2.y), C2, (C2.x, C1.y).
    pub fn front(&self) -> [Point2<f32>; 4] {
        [
            self.corner1,
            Point2::new(self.corner1.x, self.corner2.y),
            self.corner2,
            Point2::new(self.corner2.x, self.corner1.y),
        ]
    }

    pub fn back(&self, vanishing_point: &Point2<f32>) -> [Point2<f32>; 4] {
        self.front()
            .map(|point| point + (vanishing_point - point) * self.depth_factor)
    }

    pub fn wireframe(&self, vanishing_point: &Point2<f32>, rays: VanishingRays) -> Wireframe {
        let front = self.front();
        let back = self.back(vanishing_point);
        let stop_at_vanishing_point = rays == VanishingRays::StopAtVanishingPoint;
        Wireframe {
            vanishing_rays: front
                .map(|point| Line::new(*vanishing_point, point, stop_at_vanishing_point, true)),
            front: quad(&front),
            back: quad(&back),
            connectors: [0, 1, 2, 3].map(|index| Line::segment(front[index], back[index])),
        }
    }

    /// Where each vertical edge lands on the ground: the light ray through its
    /// top end meets the ground ray from the light-drop through its bottom end.
    pub fn shadow(
        &self,
        vanishing_point: &Point2<f32>,
        light: &Point2<f32>,
        light_drop: &Point2<f32>,
    ) -> Result<Shadow> {
        let front = self.front();
        let back = self.back(vanishing_point);

        let mut vertices = ArrayVec::<Point2<f32>, 4>::new();
        let mut light_rays = ArrayVec::<Line, 4>::new();
        let mut ground_rays = ArrayVec::<Line, 4>::new();
        for face in [&front, &back] {
            for (top, bottom) in VERTICAL_EDGES {
                let light_ray = Line::ray(*light, face[top]);
                let ground_ray = Line::ray(*light_drop, face[bottom]);
                let vertex = light_ray.intersect_with(&ground_ray)?;
                vertices.push(vertex);
                light_rays.push(Line::segment(*light, vertex));
                ground_rays.push(Line::segment(*light_drop, vertex));
            }
        }

        let footprint = [front[BOTTOM[0]], front[BOTTOM[1]], back[BOTTOM[1]], back[BOTTOM[0]]];
        let mut outline = ArrayVec::<Point2<f32>, 8>::new();
        outline.extend(vertices.iter().copied());
        outline.extend(footprint);
        let polygon = convex_hull(&outline)?;
        trace!("shadow outline {:?}", polygon);

        Ok(Shadow {
            vertices: [vertices[0], vertices[1], vertices[2], vertices[3]],
            polygon,
            footprint,
            light_rays: [light_rays[0], light_rays[1], light_rays[2], light_rays[3]],
            ground_rays: [ground_rays[0], ground_rays[1], ground_rays[2], ground_rays[3]],
        })
    }
}
