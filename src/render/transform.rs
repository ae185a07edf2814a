//! Transform-based face: a fixed set of hand elements whose rotation is the
//! only thing a render changes.

use crate::angle::hand_angles;
use crate::clock::ClockTime;
use crate::config::{HandGeometry, TransformFaceStyle};
use crate::face::DisplayMode;

use super::{dial_geometry, hand_tip, Canvas, Color, DrawCommand, Renderer, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    HourHandShadow,
    MinuteHandShadow,
    HourHand,
    MinuteHand,
    SecondHand,
}

impl ElementId {
    pub fn is_shadow(self) -> bool {
        matches!(self, ElementId::HourHandShadow | ElementId::MinuteHandShadow)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandElement {
    id: ElementId,
    geometry: HandGeometry,
    offset: (i32, i32),
    /// Degrees clockwise from 12 o'clock.
    rotation: f64,
    visible: bool,
}

impl HandElement {
    fn new(id: ElementId, geometry: HandGeometry, offset: (i32, i32)) -> Self {
        Self {
            id,
            geometry,
            offset,
            rotation: 0.0,
            visible: true,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }
}

pub struct TransformRenderer {
    style: TransformFaceStyle,
    /// Back to front.
    elements: Vec<HandElement>,
    mode: DisplayMode,
    width: usize,
    height: usize,
}

impl TransformRenderer {
    pub fn new(style: TransformFaceStyle, width: usize, height: usize) -> Self {
        let shadow = |geometry: HandGeometry| HandGeometry {
            color: style.shadow_color,
            ..geometry
        };
        let mut elements = vec![
            HandElement::new(
                ElementId::HourHandShadow,
                shadow(style.hour),
                style.shadow_offset,
            ),
            HandElement::new(
                ElementId::MinuteHandShadow,
                shadow(style.minute),
                style.shadow_offset,
            ),
            HandElement::new(ElementId::HourHand, style.hour, (0, 0)),
            HandElement::new(ElementId::MinuteHand, style.minute, (0, 0)),
        ];
        if style.show_seconds {
            elements.push(HandElement::new(ElementId::SecondHand, style.second, (0, 0)));
        }

        Self {
            style,
            elements,
            mode: DisplayMode::Normal,
            width,
            height,
        }
    }

    pub fn elements(&self) -> &[HandElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&HandElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Composes the elements, in their current transforms, into a scene.
    pub fn compose(&self) -> Scene {
        let (cx, cy, radius) = dial_geometry(self.width, self.height);
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Clear(self.style.background));

        for element in self.elements.iter().filter(|element| element.visible) {
            let color = self.element_color(element);
            let (px, py) = (cx + element.offset.0, cy + element.offset.1);
            let (x0, y0) = hand_tip(
                px,
                py,
                element.rotation + 180.0,
                radius * element.geometry.tail_ratio,
            );
            let (x1, y1) = hand_tip(
                px,
                py,
                element.rotation,
                radius * element.geometry.length_ratio,
            );
            scene.add_command(DrawCommand::NeedleLine {
                x0,
                y0,
                x1,
                y1,
                thickness: element.geometry.width,
                color,
            });
        }

        if let Some(fill) = self.style.hub.fill {
            let color = match self.mode {
                DisplayMode::Normal => fill,
                DisplayMode::Ambient => self.style.ambient_color,
            };
            scene.add_command(DrawCommand::Circle {
                cx,
                cy,
                radius: self.style.hub.radius,
                color,
            });
        }
        scene
    }

    fn element_color(&self, element: &HandElement) -> Color {
        match self.mode {
            DisplayMode::Ambient if !element.id.is_shadow() => self.style.ambient_color,
            _ => element.geometry.color,
        }
    }
}

impl Renderer for TransformRenderer {
    fn render(&mut self, mode: DisplayMode, time: &ClockTime) {
        let angles = hand_angles(time);
        self.mode = mode;
        for element in &mut self.elements {
            element.set_rotation(match element.id {
                ElementId::HourHand | ElementId::HourHandShadow => angles.hour,
                ElementId::MinuteHand | ElementId::MinuteHandShadow => angles.minute,
                ElementId::SecondHand => angles.second,
            });
            // Ambient keeps only the two main hands
            element.visible = mode == DisplayMode::Normal
                || matches!(element.id, ElementId::HourHand | ElementId::MinuteHand);
        }
    }

    fn paint(&self, canvas: &mut Canvas<'_>) {
        self.compose().render(canvas);
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }
}
