//! Torus mesh generation
//!
//! The surface is a doubly-periodic quad grid: `num_circles` samples of
//! the major angle phi by `num_segments` samples of the minor angle
//! theta, each quad split into two triangles. Triangles are generated
//! fresh every frame from the parameters; nothing is cached.

use crate::rasterizer::{Triangle, Vec3};
use std::f32::consts::TAU;

/// Torus surface parameters
#[derive(Debug, Clone, Copy)]
pub struct Torus {
    /// Radius of the tube (R1)
    pub tube_radius: f32,
    /// Distance from the torus center to the tube center (R2)
    pub center_radius: f32,
    /// Major-circle samples
    pub num_circles: usize,
    /// Minor-circle samples
    pub num_segments: usize,
}

impl Torus {
    pub fn new(tube_radius: f32, center_radius: f32, num_circles: usize, num_segments: usize) -> Self {
        Self {
            tube_radius,
            center_radius,
            num_circles,
            num_segments,
        }
    }

    /// Model-space vertex at grid cell (i, j). Indices wrap modulo the
    /// resolution so the seam closes onto the first ring.
    fn vertex(&self, i: usize, j: usize) -> Vec3 {
        let i = i % self.num_circles;
        let j = j % self.num_segments;
        let phi = TAU * i as f32 / self.num_circles as f32;
        let theta = TAU * j as f32 / self.num_segments as f32;

        let ring = self.tube_radius * theta.cos() + self.center_radius;
        Vec3 {
            x: ring * phi.cos(),
            y: self.tube_radius * theta.sin(),
            z: ring * phi.sin(),
        }
    }

    /// Produce the surface triangles in row-major (i, j) order:
    /// exactly `2 * num_circles * num_segments` of them.
    pub fn triangles(&self) -> Vec<Triangle> {
        let mut out = Vec::with_capacity(2 * self.num_circles * self.num_segments);
        for i in 0..self.num_circles {
            for j in 0..self.num_segments {
                let v00 = self.vertex(i, j);
                let v10 = self.vertex(i + 1, j);
                let v01 = self.vertex(i, j + 1);
                let v11 = self.vertex(i + 1, j + 1);

                out.push(Triangle::new(v00, v10, v01));
                out.push(Triangle::new(v10, v11, v01));
            }
        }
        out
    }
}
