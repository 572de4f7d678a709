//! Torus Engine: real-time software-rasterized spinning torus
//!
//! A CPU rasterizer drawing a procedurally generated torus:
//! - barycentric triangle fill with per-pixel z-buffer visibility
//! - edge highlighting near triangle boundaries
//! - interactive rotation about all three axes
//!
//! Controls: X/Y/Z rotate (Shift reverses), Tab cycles render mode,
//! Escape quits.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod rasterizer;
mod torus;

use config::{Config, CONFIG_FILE};
use macroquad::prelude::*;
use rasterizer::{render_mesh, Framebuffer, Projection, RenderSettings, Rotation};
use torus::Torus;

fn window_conf() -> Conf {
    // Window dimensions come from the same config main() loads; errors
    // are reported there, before the frame loop.
    let config = Config::load_or_default(CONFIG_FILE).unwrap_or_default();
    Conf {
        window_title: format!("Torus Engine v{}", VERSION),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match Config::load_or_default(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", CONFIG_FILE, e);
            std::process::exit(1);
        }
    };

    println!("=== Torus Engine v{} ===", VERSION);
    println!(
        "{}x{} viewport | mesh {}x{} | R1={} R2={}",
        config.width,
        config.height,
        config.num_circles,
        config.num_segments,
        config.tube_radius,
        config.center_radius
    );

    // The framebuffer (pixels + z-buffer) is the run's one long-lived
    // allocation; everything else is rebuilt per frame.
    let mut fb = Framebuffer::new(config.width, config.height);
    let torus = Torus::new(
        config.tube_radius,
        config.center_radius,
        config.num_circles,
        config.num_segments,
    );
    let projection = Projection::new(
        config.width,
        config.height,
        config.tube_radius,
        config.center_radius,
        config.camera_distance,
    );
    let mut settings = RenderSettings::default();
    let mut rotation = Rotation::default();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Tab) {
            settings.mode = settings.mode.next();
        }

        // Held rotation keys apply one step per frame; Shift reverses
        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let step = if shift { -config.angle_step } else { config.angle_step };
        if is_key_down(KeyCode::X) {
            rotation.turn(step, 0.0, 0.0);
        }
        if is_key_down(KeyCode::Y) {
            rotation.turn(0.0, step, 0.0);
        }
        if is_key_down(KeyCode::Z) {
            rotation.turn(0.0, 0.0, step);
        }

        fb.clear(settings.background);
        let triangles = torus.triangles();
        render_mesh(&mut fb, &triangles, rotation, &projection, &settings);

        // Upload the CPU framebuffer and stretch it over the window
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "rot ({:.2}, {:.2}, {:.2}) | {} | {} fps",
                rotation.x,
                rotation.y,
                rotation.z,
                settings.mode.label(),
                get_fps()
            ),
            10.0,
            20.0,
            20.0,
            WHITE,
        );

        next_frame().await;
    }
}
