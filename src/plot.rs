//! Animated plot of the field on both sides of the interface.
//!
//! Each [`Animation`] gets its own window. Frames are redrawn in a loop every
//! [`FRAME_INTERVAL_MS`] milliseconds until the window is closed or `Esc`/`Q`
//! is pressed.

use macroquad::prelude::*;
use ndarray::Array1;

use crate::constants::FRAME_INTERVAL_MS;
use crate::field::Animation;

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn viewport_maps_corners() {
        let view = Viewport::new(1000.0, 800.0, (-3.0, 3.0), (-20.0, 20.0));
        let (x, y) = view.to_screen(-3.0, 20.0);
        assert!((x - MARGIN_LEFT).abs() < 1e-4);
        assert!((y - MARGIN_TOP).abs() < 1e-4);

        let (x, y) = view.to_screen(3.0, -20.0);
        assert!((x - (1000.0 - MARGIN_RIGHT)).abs() < 1e-4);
        assert!((y - (800.0 - MARGIN_BOTTOM)).abs() < 1e-4);

        let (x, _) = view.to_screen(0.0, 0.0);
        assert!((x - (MARGIN_LEFT + (1000.0 - MARGIN_LEFT - MARGIN_RIGHT) / 2.0)).abs() < 1e-4);
    }

    #[test]
    fn viewport_handles_degenerate_ranges() {
        let view = Viewport::new(800.0, 600.0, (0.0, 0.0), (1.0, 1.0));
        let (x, y) = view.to_screen(0.0, 1.0);
        assert!(x.is_finite());
        assert!(y.is_finite());
    }
}

const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 90.0;
const MARGIN_BOTTOM: f32 = 50.0;
const WINDOW_WIDTH: i32 = 1000;
const WINDOW_HEIGHT: i32 = 800;
const DASH: f32 = 8.0;

/// Maps plot coordinates `(z, E)` to screen pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    z: (f64, f64),
    e: (f64, f64),
}

impl Viewport {
    fn new(screen_w: f32, screen_h: f32, z: (f64, f64), e: (f64, f64)) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (screen_w - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (screen_h - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            z,
            e,
        }
    }

    fn to_screen(&self, z: f64, e: f64) -> (f32, f32) {
        let span_z = (self.z.1 - self.z.0).max(f64::EPSILON);
        let span_e = (self.e.1 - self.e.0).max(f64::EPSILON);
        let x = self.left + ((z - self.z.0) / span_z) as f32 * self.width;
        let y = self.top + ((self.e.1 - e) / span_e) as f32 * self.height;
        (x, y)
    }
}

/// Opens a window and plays `animation` in a loop.
pub fn show(animation: Animation) {
    let title = format!("Traveling wave ({})", animation.name);
    let conf = Conf {
        window_title: title,
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, run(animation));
}

async fn run(animation: Animation) {
    if animation.is_empty() {
        return;
    }

    let interval = FRAME_INTERVAL_MS as f64 / 1000.0;
    let mut index = 0;
    let mut last = get_time();

    loop {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }

        clear_background(WHITE);
        let view = Viewport::new(
            screen_width(),
            screen_height(),
            animation.grid.bounds(),
            animation.ylim,
        );
        draw_axes(&view);

        let frame = &animation.frames[index];
        let grid = &animation.grid;
        draw_curve(&view, &grid.z1, &frame.incident, BLUE, 1.0, true);
        draw_curve(&view, &grid.z1, &frame.reflected, RED, 1.0, true);
        draw_curve(&view, &grid.z1, &frame.total, GREEN, 1.5, false);
        draw_curve(&view, &grid.z2, &frame.transmitted, PURPLE, 1.5, false);

        draw_title(&animation);
        draw_legend(&view);
        draw_text(
            &format!("t = {:.3e} s", frame.time),
            view.left + 8.0,
            view.top + view.height - 8.0,
            18.0,
            DARKGRAY,
        );

        if get_time() - last >= interval {
            index = (index + 1) % animation.len();
            last = get_time();
        }

        next_frame().await;
    }
}

fn draw_axes(view: &Viewport) {
    draw_rectangle_lines(view.left, view.top, view.width, view.height, 1.0, DARKGRAY);

    // grid lines at quarters of each axis
    for i in 1..4 {
        let fx = view.left + view.width * i as f32 / 4.0;
        let fy = view.top + view.height * i as f32 / 4.0;
        draw_line(fx, view.top, fx, view.top + view.height, 1.0, LIGHTGRAY);
        draw_line(view.left, fy, view.left + view.width, fy, 1.0, LIGHTGRAY);
    }

    let (x0, _) = view.to_screen(0.0, 0.0);
    draw_line(x0, view.top, x0, view.top + view.height, 2.0, BLACK);

    let (z_min, z_max) = view.z;
    let (e_min, e_max) = view.e;
    let bottom = view.top + view.height;
    draw_text(&format!("{:.3}", z_min), view.left, bottom + 20.0, 16.0, DARKGRAY);
    draw_text(
        &format!("{:.3}", z_max),
        view.left + view.width - 40.0,
        bottom + 20.0,
        16.0,
        DARKGRAY,
    );
    draw_text("space (z)", view.left + view.width / 2.0 - 30.0, bottom + 38.0, 18.0, BLACK);
    draw_text(&format!("{:.2}", e_max), 8.0, view.top + 12.0, 16.0, DARKGRAY);
    draw_text(&format!("{:.2}", e_min), 8.0, bottom, 16.0, DARKGRAY);
    draw_text("E [V/m]", 8.0, view.top + view.height / 2.0, 18.0, BLACK);
}

fn draw_curve(view: &Viewport, z: &Array1<f64>, e: &Array1<f64>, color: Color, thickness: f32, dashed: bool) {
    let points: Vec<(f32, f32)> = z
        .iter()
        .zip(e.iter())
        .map(|(&z, &e)| view.to_screen(z, e.clamp(view.e.0, view.e.1)))
        .collect();

    let mut travelled = 0.0;
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        let length = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
        if !dashed || (travelled / DASH) as u32 % 2 == 0 {
            draw_line(x1, y1, x2, y2, thickness, color);
        }
        travelled += length;
    }
}

fn draw_title(animation: &Animation) {
    let describe = |n: u8, side: &str, m: &crate::medium::Medium| {
        format!(
            "medium {}: {}, ε_r={}, μ_r={}, σ={}",
            n,
            side,
            m.relative_permittivity(),
            m.relative_permeability(),
            m.conductivity()
        )
    };
    draw_text("Traveling wave", MARGIN_LEFT, 26.0, 24.0, BLACK);
    draw_text(&describe(1, "z<0", &animation.medium1), MARGIN_LEFT, 50.0, 18.0, BLACK);
    draw_text(&describe(2, "z>0", &animation.medium2), MARGIN_LEFT, 72.0, 18.0, BLACK);
}

fn draw_legend(view: &Viewport) {
    let entries = [
        ("incident e1_i", BLUE),
        ("reflected e1_r", RED),
        ("total e1_tot", GREEN),
        ("transmitted e2_t", PURPLE),
    ];
    let x = view.left + view.width - 170.0;
    for (i, (label, color)) in entries.iter().enumerate() {
        let y = view.top + 20.0 + 20.0 * i as f32;
        draw_line(x, y - 5.0, x + 24.0, y - 5.0, 2.0, *color);
        draw_text(label, x + 30.0, y, 18.0, BLACK);
    }
}
