//! Vector math for the torus pipeline
//!
//! Points move through three frames: model space (as generated on the
//! torus surface), rotated space (after the X/Y/Z rotations), and screen
//! space (after the perspective divide, with rotated-space z kept for
//! depth testing).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component by index: 0 -> x, 1 -> y, 2 -> z.
    /// Panics on any other index.
    pub fn get(self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("Vec3 index out of range: {}", index),
        }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Smallest of the three components.
    pub fn min_component(self) -> f32 {
        self.x.min(self.y).min(self.z)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component by index: 0 -> x, 1 -> y.
    /// Panics on any other index.
    pub fn get(self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => panic!("Vec2 index out of range: {}", index),
        }
    }
}

/// Accumulated rotation angles around the three axes, in radians.
///
/// Owned by the frame driver and passed by value to the transform stage
/// each frame; input handling folds deltas in via `turn`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Fold input deltas into the accumulated angles.
    pub fn turn(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotate a point about X, then Y, then Z (composition Rz * Ry * Rx).
    pub fn apply(self, v: Vec3) -> Vec3 {
        rotate_z(rotate_y(rotate_x(v, self.x), self.y), self.z)
    }
}

/// Right-handed rotation about the X axis.
fn rotate_x(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3 {
        x: v.x,
        y: v.y * c - v.z * s,
        z: v.y * s + v.z * c,
    }
}

/// Right-handed rotation about the Y axis.
fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3 {
        x: v.x * c + v.z * s,
        y: v.y,
        z: -v.x * s + v.z * c,
    }
}

/// Right-handed rotation about the Z axis.
fn rotate_z(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3 {
        x: v.x * c - v.y * s,
        y: v.x * s + v.y * c,
        z: v.z,
    }
}

/// Pinhole-style perspective projection into screen space.
///
/// `k2` is the camera distance; `k1` scales the projected coordinates so
/// the whole torus fits the viewport. Both are fixed for the run.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub k1: f32,
    pub k2: f32,
    pub width: usize,
    pub height: usize,
}

/// Points closer to the camera plane than this are considered degenerate
/// and the triangle is skipped rather than projected.
pub const MIN_CAMERA_DISTANCE: f32 = 1e-3;

impl Projection {
    /// Derive the projection from the viewport and torus radii.
    /// `k1 = width * k2 * 3 / (8 * (r1 + r2))` keeps the silhouette on screen.
    pub fn new(
        width: usize,
        height: usize,
        tube_radius: f32,
        center_radius: f32,
        camera_distance: f32,
    ) -> Self {
        let k1 = width as f32 * camera_distance * 3.0 / (8.0 * (tube_radius + center_radius));
        Self {
            k1,
            k2: camera_distance,
            width,
            height,
        }
    }

    /// Viewport center in pixels
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Project a rotated-space point to screen space.
    ///
    /// x and y become pixel coordinates; z is carried through unchanged
    /// for the depth test. The divisor `k2 + z` is assumed nonzero here;
    /// callers screen triangles with [`Projection::in_front`] first.
    pub fn to_screen(&self, v: Vec3) -> Vec3 {
        let denom = self.k2 + v.z;
        let center = self.center();
        Vec3 {
            x: (v.x * self.k1) / denom + center.x,
            y: (v.y * self.k1) / denom + center.y,
            z: v.z,
        }
    }

    /// True when the point is far enough from the camera plane to project.
    pub fn in_front(&self, v: Vec3) -> bool {
        (self.k2 + v.z).abs() >= MIN_CAMERA_DISTANCE
    }
}

/// Calculate barycentric coordinates for point p in triangle (v1, v2, v3)
/// using the 2D screen projection (z is ignored).
/// Returns (u, v, w) with u + v + w = 1 when the triangle is not
/// degenerate; a triangle with near-zero screen area yields the sentinel
/// (-1, -1, -1) so every inside test fails.
pub fn barycentric(p: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

    if d.abs() < 1e-4 {
        return Vec3::new(-1.0, -1.0, -1.0); // Degenerate triangle
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    let w = 1.0 - u - v;

    Vec3::new(u, v, w)
}
