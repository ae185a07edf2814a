//! Draw-based face: every render clears the scene and draws the needles and
//! the center dot again.

use crate::angle::hand_angles;
use crate::clock::ClockTime;
use crate::config::{CanvasFaceStyle, CanvasModeStyle, DotStyle, NeedleStyle};
use crate::face::DisplayMode;

use super::{dial_geometry, hand_tip, Canvas, DrawCommand, Renderer, Scene};

pub struct CanvasRenderer {
    style: CanvasFaceStyle,
    width: usize,
    height: usize,
    scene: Scene,
    last: Option<(DisplayMode, ClockTime)>,
}

impl CanvasRenderer {
    pub fn new(style: CanvasFaceStyle, width: usize, height: usize) -> Self {
        Self {
            style,
            width,
            height,
            scene: Scene::new(),
            last: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn mode_style(&self, mode: DisplayMode) -> &CanvasModeStyle {
        match mode {
            DisplayMode::Normal => &self.style.normal,
            DisplayMode::Ambient => &self.style.ambient,
        }
    }

    fn rebuild(&mut self, mode: DisplayMode, time: &ClockTime) {
        let style = self.mode_style(mode).clone();
        let (cx, cy, radius) = dial_geometry(self.width, self.height);
        let angles = hand_angles(time);

        self.scene.reset();
        self.scene.add_command(DrawCommand::Clear(style.background));
        add_needle(&mut self.scene, cx, cy, radius, angles.hour, &style.hour);
        add_needle(&mut self.scene, cx, cy, radius, angles.minute, &style.minute);
        for dot in &style.center_dots {
            add_dot(&mut self.scene, cx, cy, dot);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, mode: DisplayMode, time: &ClockTime) {
        self.rebuild(mode, time);
        self.last = Some((mode, *time));
    }

    fn paint(&self, canvas: &mut Canvas<'_>) {
        self.scene.render(canvas);
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        if let Some((mode, time)) = self.last {
            self.rebuild(mode, &time);
        }
    }
}

fn add_needle(scene: &mut Scene, cx: i32, cy: i32, radius: f64, angle: f64, style: &NeedleStyle) {
    let (x1, y1) = hand_tip(cx, cy, angle, radius * style.length_ratio);
    scene.add_command(DrawCommand::NeedleLine {
        x0: cx,
        y0: cy,
        x1,
        y1,
        thickness: style.width,
        color: style.color,
    });
}

fn add_dot(scene: &mut Scene, cx: i32, cy: i32, dot: &DotStyle) {
    if let Some(fill) = dot.fill {
        scene.add_command(DrawCommand::Circle {
            cx,
            cy,
            radius: dot.radius,
            color: fill,
        });
    }
    if let Some(stroke) = dot.stroke {
        scene.add_command(DrawCommand::Ring {
            cx,
            cy,
            radius: dot.radius,
            thickness: stroke.width,
            color: stroke.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ACCENT;
    use crate::render::Color;

    fn renderer() -> CanvasRenderer {
        CanvasRenderer::new(CanvasFaceStyle::default(), 360, 360)
    }

    fn needles(scene: &Scene) -> Vec<&DrawCommand> {
        scene
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::NeedleLine { .. }))
            .collect()
    }

    #[test]
    fn normal_frame_layout() {
        let mut renderer = renderer();
        renderer.render(DisplayMode::Normal, &ClockTime::hms(3, 0, 0).unwrap());
        let commands = renderer.scene().commands();

        assert_eq!(commands[0], DrawCommand::Clear(Color::BLACK));
        // hour needle at 3 o'clock, 0.58 of a 180px radius
        assert_eq!(
            commands[1],
            DrawCommand::NeedleLine {
                x0: 180,
                y0: 180,
                x1: 284,
                y1: 180,
                thickness: 6.0,
                color: ACCENT,
            }
        );
        // minute needle at 12 o'clock, 0.80 of the radius
        assert_eq!(
            commands[2],
            DrawCommand::NeedleLine {
                x0: 180,
                y0: 180,
                x1: 180,
                y1: 36,
                thickness: 4.0,
                color: ACCENT,
            }
        );
        // two concentric dots, each filled then stroked
        assert_eq!(commands.len(), 7);
    }

    #[test]
    fn ambient_frame_is_monochrome_and_smaller() {
        let mut renderer = renderer();
        let time = ClockTime::hms(10, 15, 30).unwrap();
        renderer.render(DisplayMode::Ambient, &time);
        let ambient: Vec<DrawCommand> = needles(renderer.scene()).into_iter().cloned().collect();
        renderer.render(DisplayMode::Normal, &time);
        let normal = needles(renderer.scene());

        for (a, n) in ambient.iter().zip(normal) {
            let (
                DrawCommand::NeedleLine { x1: ax, y1: ay, color, .. },
                DrawCommand::NeedleLine { x1: nx, y1: ny, .. },
            ) = (a, n)
            else {
                unreachable!();
            };
            assert!(color.is_gray());
            let len = |x: i32, y: i32| (((x - 180).pow(2) + (y - 180).pow(2)) as f64).sqrt();
            assert!(len(*ax, *ay) < len(*nx, *ny));
        }
    }

    #[test]
    fn every_render_starts_from_a_clear() {
        let mut renderer = renderer();
        let time = ClockTime::hms(6, 30, 0).unwrap();
        renderer.render(DisplayMode::Normal, &time);
        let first = renderer.scene().commands().len();
        renderer.render(DisplayMode::Normal, &time);
        assert_eq!(renderer.scene().commands().len(), first);
        let clears = renderer
            .scene()
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Clear(_)))
            .count();
        assert_eq!(clears, 1);
    }

    #[test]
    fn resize_rebuilds_last_frame() {
        let mut renderer = renderer();
        renderer.render(DisplayMode::Normal, &ClockTime::hms(3, 0, 0).unwrap());
        renderer.resize(200, 200);
        let DrawCommand::NeedleLine { x0, x1, .. } = renderer.scene().commands()[1] else {
            panic!("expected hour needle");
        };
        assert_eq!(x0, 100);
        assert_eq!(x1, 158);
    }
}
