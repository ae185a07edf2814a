//! Rendering: the `Renderer` seam, a retained scene and the RGBA canvas it
//! rasterizes into.

use crate::clock::ClockTime;
use crate::face::DisplayMode;

pub mod canvas;
mod raster;
pub mod transform;

pub use canvas::CanvasRenderer;
pub use transform::{ElementId, HandElement, TransformRenderer};

// ============================================================================
// COLOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

}

#[cfg(test)]
impl Color {
    pub(crate) fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

// ============================================================================
// RENDERER
// ============================================================================

/// A watch-face drawing backend.
///
/// `render` is the atomic per-tick update (full redraw or full transform
/// set); `paint` pushes the current state into a framebuffer.
pub trait Renderer {
    fn render(&mut self, mode: DisplayMode, time: &ClockTime);

    fn paint(&self, canvas: &mut Canvas<'_>);

    /// Called when the framebuffer size changes.
    fn resize(&mut self, _width: usize, _height: usize) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, mode: DisplayMode, time: &ClockTime) {
        (**self).render(mode, time)
    }

    fn paint(&self, canvas: &mut Canvas<'_>) {
        (**self).paint(canvas)
    }

    fn resize(&mut self, width: usize, height: usize) {
        (**self).resize(width, height)
    }
}

// ============================================================================
// RETAINED MODE
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    NeedleLine {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        thickness: f32,
        color: Color,
    },
    /// Filled disc.
    Circle {
        cx: i32,
        cy: i32,
        radius: f64,
        color: Color,
    },
    /// Stroke centered on the circle of `radius`.
    Ring {
        cx: i32,
        cy: i32,
        radius: f64,
        thickness: f32,
        color: Color,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas<'_>) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear(color) => canvas.clear(color),
                DrawCommand::NeedleLine {
                    x0,
                    y0,
                    x1,
                    y1,
                    thickness,
                    color,
                } => raster::draw_thick_line_aa(canvas, x0, y0, x1, y1, thickness, color),
                DrawCommand::Circle {
                    cx,
                    cy,
                    radius,
                    color,
                } => raster::draw_circle(canvas, cx, cy, radius, color),
                DrawCommand::Ring {
                    cx,
                    cy,
                    radius,
                    thickness,
                    color,
                } => raster::draw_ring(canvas, cx, cy, radius, thickness, color),
            }
        }
    }
}

// ============================================================================
// CANVAS
// ============================================================================

/// RGBA8 framebuffer view.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }
}

/// Dial center and radius for a framebuffer of the given size.
pub(crate) fn dial_geometry(width: usize, height: usize) -> (i32, i32, f64) {
    let cx = width as i32 / 2;
    let cy = height as i32 / 2;
    let radius = width.min(height) as f64 / 2.0;
    (cx, cy, radius)
}

/// End point of a hand of `length` pixels at dial angle `degrees`.
pub(crate) fn hand_tip(cx: i32, cy: i32, degrees: f64, length: f64) -> (i32, i32) {
    let radians = crate::angle::to_canvas_radians(degrees);
    (
        (cx as f64 + radians.cos() * length).round() as i32,
        (cy as f64 + radians.sin() * length).round() as i32,
    )
}
