//! Core rendering functions
//!
//! Triangle rasterization with z-buffer visibility and barycentric
//! edge highlighting.

use super::math::{barycentric, Projection, Rotation, Vec3};
use super::types::{Color, RenderMode, RenderSettings, Triangle};

/// Depth value every z-buffer cell is reset to at the start of a frame.
/// Depths only ever grow from here; larger z is closer to the viewer.
pub const DEPTH_CLEAR: f32 = f32::NEG_INFINITY;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,   // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>, // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![DEPTH_CLEAR; width * height],
            width,
            height,
        }
    }

    /// Reset every pixel to `color` and every depth cell to [`DEPTH_CLEAR`].
    /// Must run once at the top of each frame so no stale depth survives.
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4] = bytes[0];
            self.pixels[i * 4 + 1] = bytes[1];
            self.pixels[i * 4 + 2] = bytes[2];
            self.pixels[i * 4 + 3] = bytes[3];
            self.zbuffer[i] = DEPTH_CLEAR;
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let bytes = color.to_bytes();
            self.pixels[idx] = bytes[0];
            self.pixels[idx + 1] = bytes[1];
            self.pixels[idx + 2] = bytes[2];
            self.pixels[idx + 3] = bytes[3];
        }
    }

    /// Depth-tested write: the pixel and its depth cell update together,
    /// and only when `z` is strictly greater than the stored depth.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z > self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                let bytes = color.to_bytes();
                self.pixels[pixel_idx] = bytes[0];
                self.pixels[pixel_idx + 1] = bytes[1];
                self.pixels[pixel_idx + 2] = bytes[2];
                self.pixels[pixel_idx + 3] = bytes[3];
                return true;
            }
        }
        false
    }

    /// Read back the color at (x, y). Out of bounds returns black.
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::with_alpha(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        } else {
            Color::BLACK
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.set_pixel(x as usize, y as usize, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Projected triangle ready for rasterization.
/// x and y are pixel coordinates; z is the raw rotated-space depth.
struct Surface {
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
}

/// Rotate and project a model-space triangle.
/// Returns None when any vertex sits on the camera plane, where the
/// perspective divide blows up; such triangles are skipped outright.
fn project_triangle(tri: &Triangle, rotation: Rotation, projection: &Projection) -> Option<Surface> {
    let rotated = tri.map(|v| rotation.apply(v));
    if !rotated.vertices().iter().all(|v| projection.in_front(*v)) {
        return None;
    }
    Some(Surface {
        v1: projection.to_screen(rotated.v1),
        v2: projection.to_screen(rotated.v2),
        v3: projection.to_screen(rotated.v3),
    })
}

/// Edge classification: a pixel whose smallest barycentric coordinate is
/// strictly below the threshold sits near a triangle edge. Exactly at
/// the threshold counts as face.
fn is_edge(bary: Vec3, threshold: f32) -> bool {
    bary.min_component() < threshold
}

/// Rasterize a single triangle with depth testing
fn fill_triangle(fb: &mut Framebuffer, surface: &Surface, settings: &RenderSettings) {
    // Bounding box clamped to the viewport
    let min_x = surface.v1.x.min(surface.v2.x).min(surface.v3.x).max(0.0) as usize;
    let max_x = (surface.v1.x.max(surface.v2.x).max(surface.v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = surface.v1.y.min(surface.v2.y).min(surface.v3.y).max(0.0) as usize;
    let max_y = (surface.v1.y.max(surface.v2.y).max(surface.v3.y) + 1.0).min(fb.height as f32) as usize;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Vec3::new(x as f32, y as f32, 0.0);
            let bc = barycentric(p, surface.v1, surface.v2, surface.v3);

            // Inside iff all three coordinates are non-negative; the
            // degenerate-triangle sentinel fails this for every pixel.
            if bc.x >= 0.0 && bc.y >= 0.0 && bc.z >= 0.0 {
                // Interpolate depth
                let z = bc.x * surface.v1.z + bc.y * surface.v2.z + bc.z * surface.v3.z;

                let color = if is_edge(bc, settings.edge_threshold) {
                    settings.edge_color
                } else {
                    settings.face_color
                };

                fb.set_pixel_with_depth(x, y, z, color);
            }
        }
    }
}

/// Draw the three projected edges of a triangle
fn outline_triangle(fb: &mut Framebuffer, surface: &Surface, settings: &RenderSettings) {
    let corners = [
        (surface.v1.x as i32, surface.v1.y as i32),
        (surface.v2.x as i32, surface.v2.y as i32),
        (surface.v3.x as i32, surface.v3.y as i32),
    ];
    for i in 0..3 {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % 3];
        fb.draw_line(x0, y0, x1, y1, settings.edge_color);
    }
}

/// Plot the three projected vertices of a triangle
fn plot_triangle(fb: &mut Framebuffer, surface: &Surface, settings: &RenderSettings) {
    for v in [surface.v1, surface.v2, surface.v3] {
        if v.x >= 0.0 && v.y >= 0.0 {
            fb.set_pixel(v.x as usize, v.y as usize, settings.edge_color);
        }
    }
}

/// Render a mesh to the framebuffer.
///
/// Each triangle is rotated, projected, and drawn according to the
/// settings. The z-buffered fill is order-independent, so the mesh
/// generator's deterministic ordering only matters for reproducibility.
pub fn render_mesh(
    fb: &mut Framebuffer,
    triangles: &[Triangle],
    rotation: Rotation,
    projection: &Projection,
    settings: &RenderSettings,
) {
    for tri in triangles {
        let surface = match project_triangle(tri, rotation, projection) {
            Some(s) => s,
            None => continue,
        };
        match settings.mode {
            RenderMode::Filled => fill_triangle(fb, &surface, settings),
            RenderMode::Wireframe => outline_triangle(fb, &surface, settings),
            RenderMode::Points => plot_triangle(fb, &surface, settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_surface(z: f32) -> Surface {
        // Big right triangle covering the upper-left of a small viewport
        Surface {
            v1: Vec3::new(0.0, 0.0, z),
            v2: Vec3::new(100.0, 0.0, z),
            v3: Vec3::new(0.0, 100.0, z),
        }
    }

    fn settings_with_face(face: Color) -> RenderSettings {
        RenderSettings {
            face_color: face,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn test_clear_resets_depth_and_color() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_pixel_with_depth(3, 3, 5.0, Color::RED);
        fb.clear(Color::BLACK);
        assert!(fb.zbuffer.iter().all(|&z| z == DEPTH_CLEAR));
        assert_eq!(fb.get_pixel(3, 3), Color::BLACK);
    }

    #[test]
    fn test_depth_write_requires_strictly_greater() {
        let mut fb = Framebuffer::new(4, 4);
        fb.clear(Color::BLACK);
        assert!(fb.set_pixel_with_depth(1, 1, 2.0, Color::RED));
        // Equal depth loses
        assert!(!fb.set_pixel_with_depth(1, 1, 2.0, Color::GREEN));
        assert_eq!(fb.get_pixel(1, 1), Color::RED);
        // Greater depth wins
        assert!(fb.set_pixel_with_depth(1, 1, 3.0, Color::GREEN));
        assert_eq!(fb.get_pixel(1, 1), Color::GREEN);
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(100, 100, Color::RED);
        assert!(!fb.set_pixel_with_depth(4, 0, 10.0, Color::RED));
        fb.draw_line(-10, -10, 20, 20, Color::WHITE);
    }

    #[test]
    fn test_depth_test_is_order_independent() {
        let near = flat_surface(10.0);
        let far = flat_surface(-10.0);
        let near_settings = settings_with_face(Color::GREEN);
        let far_settings = settings_with_face(Color::RED);

        // Interior pixel away from the edge band
        let (px, py) = (30, 30);

        let mut fb = Framebuffer::new(128, 128);
        fb.clear(Color::BLACK);
        fill_triangle(&mut fb, &far, &far_settings);
        fill_triangle(&mut fb, &near, &near_settings);
        assert_eq!(fb.get_pixel(px, py), Color::GREEN);

        let mut fb = Framebuffer::new(128, 128);
        fb.clear(Color::BLACK);
        fill_triangle(&mut fb, &near, &near_settings);
        fill_triangle(&mut fb, &far, &far_settings);
        assert_eq!(fb.get_pixel(px, py), Color::GREEN);
    }

    #[test]
    fn test_fill_never_exceeds_max_vertex_depth() {
        let mut fb = Framebuffer::new(128, 128);
        fb.clear(Color::BLACK);
        let surface = Surface {
            v1: Vec3::new(0.0, 0.0, -5.0),
            v2: Vec3::new(100.0, 0.0, 3.0),
            v3: Vec3::new(0.0, 100.0, 7.0),
        };
        fill_triangle(&mut fb, &surface, &RenderSettings::default());
        let max_depth = fb
            .zbuffer
            .iter()
            .copied()
            .filter(|z| *z != DEPTH_CLEAR)
            .fold(f32::MIN, f32::max);
        // Interpolated depth is a convex combination of vertex depths
        assert!(max_depth <= 7.0 + 1e-3);
    }

    #[test]
    fn test_edge_threshold_is_exclusive() {
        let t = 0.03;
        // Exactly at the threshold: face
        assert!(!is_edge(Vec3::new(0.03, 0.5, 0.47), t));
        // Strictly below: edge
        assert!(is_edge(Vec3::new(0.0299, 0.5001, 0.47), t));
    }

    #[test]
    fn test_fill_classifies_edge_and_face_pixels() {
        let mut fb = Framebuffer::new(128, 128);
        fb.clear(Color::BLACK);
        let settings = RenderSettings::default();
        fill_triangle(&mut fb, &flat_surface(0.0), &settings);
        // (1, 1) hugs two edges of the right triangle
        assert_eq!(fb.get_pixel(1, 1), settings.edge_color);
        // (30, 30) is deep inside: every coordinate >= 0.3
        assert_eq!(fb.get_pixel(30, 30), settings.face_color);
    }

    #[test]
    fn test_fill_clamps_to_viewport() {
        let mut fb = Framebuffer::new(32, 32);
        fb.clear(Color::BLACK);
        let surface = Surface {
            v1: Vec3::new(-50.0, -50.0, 0.0),
            v2: Vec3::new(80.0, -10.0, 0.0),
            v3: Vec3::new(-10.0, 80.0, 0.0),
        };
        fill_triangle(&mut fb, &surface, &settings_with_face(Color::BLUE));
        // Pixels inside the viewport got painted, and nothing panicked
        assert_ne!(fb.get_pixel(0, 0), Color::BLACK);
    }

    #[test]
    fn test_degenerate_triangle_paints_nothing() {
        let mut fb = Framebuffer::new(32, 32);
        fb.clear(Color::BLACK);
        let surface = Surface {
            v1: Vec3::new(1.0, 1.0, 0.0),
            v2: Vec3::new(10.0, 10.0, 0.0),
            v3: Vec3::new(20.0, 20.0, 0.0),
        };
        fill_triangle(&mut fb, &surface, &RenderSettings::default());
        assert!(fb.zbuffer.iter().all(|&z| z == DEPTH_CLEAR));
    }

    #[test]
    fn test_triangle_on_camera_plane_is_skipped() {
        let projection = Projection::new(800, 600, 100.0, 200.0, 650.0);
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, -650.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        );
        assert!(project_triangle(&tri, Rotation::default(), &projection).is_none());
    }

    #[test]
    fn test_default_torus_silhouette_is_centered_and_contained() {
        use crate::torus::Torus;

        let mut fb = Framebuffer::new(800, 600);
        fb.clear(Color::BLACK);
        let torus = Torus::new(100.0, 200.0, 40, 20);
        let projection = Projection::new(800, 600, 100.0, 200.0, 650.0);
        let triangles = torus.triangles();
        render_mesh(
            &mut fb,
            &triangles,
            Rotation::default(),
            &projection,
            &RenderSettings::default(),
        );

        // Bounding box of every painted pixel
        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0usize, 0usize);
        let mut painted = 0usize;
        for y in 0..600 {
            for x in 0..800 {
                if fb.zbuffer[y * 800 + x] != DEPTH_CLEAR {
                    painted += 1;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        assert!(painted > 0, "torus rendered no pixels");
        // Silhouette centered on the viewport center, within a pixel
        let cx = (min_x + max_x) as f32 / 2.0;
        let cy = (min_y + max_y) as f32 / 2.0;
        assert!((cx - 400.0).abs() <= 1.0, "center x = {}", cx);
        assert!((cy - 300.0).abs() <= 1.0, "center y = {}", cy);
        // And fully on screen: the clamped bbox never touches the border
        assert!(min_x > 0 && min_y > 0 && max_x < 799 && max_y < 599);
    }

    #[test]
    fn test_wireframe_and_points_modes_paint() {
        use crate::torus::Torus;

        let torus = Torus::new(100.0, 200.0, 8, 6);
        let projection = Projection::new(800, 600, 100.0, 200.0, 650.0);
        let triangles = torus.triangles();

        for mode in [RenderMode::Wireframe, RenderMode::Points] {
            let mut fb = Framebuffer::new(800, 600);
            fb.clear(Color::BLACK);
            let settings = RenderSettings {
                mode,
                ..RenderSettings::default()
            };
            render_mesh(&mut fb, &triangles, Rotation::default(), &projection, &settings);
            let painted = fb
                .pixels
                .chunks_exact(4)
                .filter(|px| px[0] != 0 || px[1] != 0 || px[2] != 0)
                .count();
            assert!(painted > 0, "{:?} painted nothing", mode);
        }
    }
}
