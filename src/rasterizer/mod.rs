//! Software rasterizer for the torus viewer
//!
//! Pipeline per frame:
//! - rotate model-space triangles by the accumulated angles
//! - perspective-project them to screen space
//! - fill pixels via barycentric coverage with z-buffer visibility,
//!   highlighting pixels near triangle edges

mod math;
mod render;
mod types;

pub use math::*;
pub use render::*;
pub use types::*;

/// Default viewport dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
