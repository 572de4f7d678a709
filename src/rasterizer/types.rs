//! Core types for the rasterizer

use super::math::Vec3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to packed u32 (RGBA)
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
    }

    /// Convert to [u8; 4] for the framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A triangle on the torus surface.
///
/// Vertices are model-space positions at construction; the transform
/// stage maps them to rotated space. Triangles are built fresh from the
/// mesh parameters every frame and never outlive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Apply a transform to every vertex, yielding a new triangle.
    pub fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Triangle {
        Triangle {
            v1: f(self.v1),
            v2: f(self.v2),
            v3: f(self.v3),
        }
    }
}

/// How the torus surface is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Z-buffered barycentric fill with edge highlighting
    Filled,
    /// Projected triangle edges only
    Wireframe,
    /// Projected vertices only
    Points,
}

impl RenderMode {
    /// Next mode in the Tab cycle.
    pub fn next(self) -> RenderMode {
        match self {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Points,
            RenderMode::Points => RenderMode::Filled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Filled => "filled",
            RenderMode::Wireframe => "wireframe",
            RenderMode::Points => "points",
        }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Color of pixels in the triangle interior
    pub face_color: Color,
    /// Color of pixels near a triangle edge
    pub edge_color: Color,
    /// A pixel is an edge pixel when its smallest barycentric coordinate
    /// is strictly below this threshold; exactly at the threshold counts
    /// as face.
    pub edge_threshold: f32,
    /// Frame clear color
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Filled,
            face_color: Color::new(190, 60, 60),
            edge_color: Color::WHITE,
            edge_threshold: 0.03,
            background: Color::new(18, 18, 24),
        }
    }
}
