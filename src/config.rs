use std::time::Duration;

use bon::Builder;

use crate::clock::ClockTime;
use crate::error::WatchError;
use crate::render::Color;
use crate::scheduler::{AmbientPolicy, NormalPolicy};

/// Blue accent used by the canvas face.
pub const ACCENT: Color = Color::new(0x00, 0x4f, 0xe1);

/// Which renderer variant draws the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceKind {
    /// Clears and redraws needles every frame.
    #[default]
    Canvas,
    /// Rotates a fixed set of hand elements.
    Transform,
}

/// Line stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A needle drawn from the dial center outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleStyle {
    /// Length as a fraction of the dial radius.
    pub length_ratio: f64,
    pub width: f32,
    pub color: Color,
}

/// Circle at the dial center, optionally filled and stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// Canvas face appearance for one display mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasModeStyle {
    pub background: Color,
    pub hour: NeedleStyle,
    pub minute: NeedleStyle,
    /// Drawn in order, on top of the needles.
    pub center_dots: Vec<DotStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasFaceStyle {
    pub normal: CanvasModeStyle,
    pub ambient: CanvasModeStyle,
}

impl Default for CanvasFaceStyle {
    fn default() -> Self {
        Self {
            normal: CanvasModeStyle {
                background: Color::BLACK,
                hour: NeedleStyle {
                    length_ratio: 0.58,
                    width: 6.0,
                    color: ACCENT,
                },
                minute: NeedleStyle {
                    length_ratio: 0.80,
                    width: 4.0,
                    color: ACCENT,
                },
                center_dots: vec![
                    DotStyle {
                        radius: 8.0,
                        fill: Some(Color::BLACK),
                        stroke: Some(Stroke {
                            color: ACCENT,
                            width: 7.0,
                        }),
                    },
                    DotStyle {
                        radius: 7.0,
                        fill: Some(ACCENT),
                        stroke: Some(Stroke {
                            color: Color::BLACK,
                            width: 2.0,
                        }),
                    },
                ],
            },
            // Smaller needles, monochrome palette
            ambient: CanvasModeStyle {
                background: Color::BLACK,
                hour: NeedleStyle {
                    length_ratio: 0.55,
                    width: 6.0,
                    color: Color::WHITE,
                },
                minute: NeedleStyle {
                    length_ratio: 0.75,
                    width: 4.0,
                    color: Color::WHITE,
                },
                center_dots: vec![DotStyle {
                    radius: 7.0,
                    fill: Some(Color::BLACK),
                    stroke: Some(Stroke {
                        color: Color::WHITE,
                        width: 4.0,
                    }),
                }],
            },
        }
    }
}

/// Static geometry of one hand element. Only its rotation changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandGeometry {
    /// Length past the pivot, as a fraction of the dial radius.
    pub length_ratio: f64,
    /// Length behind the pivot, as a fraction of the dial radius.
    pub tail_ratio: f64,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformFaceStyle {
    pub background: Color,
    pub hour: HandGeometry,
    pub minute: HandGeometry,
    pub second: HandGeometry,
    pub shadow_color: Color,
    /// Pixel offset of the shadow duplicates from their hands.
    pub shadow_offset: (i32, i32),
    pub show_seconds: bool,
    pub hub: DotStyle,
    /// Hand color in ambient mode.
    pub ambient_color: Color,
}

impl Default for TransformFaceStyle {
    fn default() -> Self {
        Self {
            background: Color::new(0x10, 0x14, 0x1c),
            hour: HandGeometry {
                length_ratio: 0.50,
                tail_ratio: 0.08,
                width: 9.0,
                color: Color::new(0xe8, 0xe4, 0xd8),
            },
            minute: HandGeometry {
                length_ratio: 0.74,
                tail_ratio: 0.10,
                width: 6.0,
                color: Color::new(0xe8, 0xe4, 0xd8),
            },
            second: HandGeometry {
                length_ratio: 0.82,
                tail_ratio: 0.16,
                width: 2.0,
                color: Color::new(0xd9, 0x3b, 0x2b),
            },
            shadow_color: Color::new(0x05, 0x06, 0x08),
            shadow_offset: (3, 4),
            show_seconds: false,
            hub: DotStyle {
                radius: 6.0,
                fill: Some(Color::new(0xe8, 0xe4, 0xd8)),
                stroke: None,
            },
            ambient_color: Color::new(0xb0, 0xb0, 0xb0),
        }
    }
}

/// Startup configuration of a watch app.
#[derive(Debug, Clone, Builder)]
pub struct WatchConfig {
    #[builder(into, default = "Watch".to_string())]
    pub title: String,
    /// Logical window edge length; the window is square.
    #[builder(default = 360)]
    pub window_size: u32,
    #[builder(default)]
    pub face: FaceKind,
    /// Overrides the face's own Normal-mode pacing.
    pub normal_policy: Option<NormalPolicy>,
    #[builder(default)]
    pub ambient_policy: AmbientPolicy,
    #[builder(default)]
    pub canvas_style: CanvasFaceStyle,
    #[builder(default)]
    pub transform_style: TransformFaceStyle,
    /// Run the clock from this time instead of the system time.
    pub start_time: Option<ClockTime>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WatchConfig {
    /// Normal-mode pacing: the explicit override, else second-aligned for the
    /// canvas face and a fixed one second rate for the transform face.
    pub fn effective_normal_policy(&self) -> NormalPolicy {
        self.normal_policy.unwrap_or(match self.face {
            FaceKind::Canvas => NormalPolicy::AlignToSecond,
            FaceKind::Transform => NormalPolicy::FixedRate(Duration::from_secs(1)),
        })
    }

    pub fn validate(&self) -> Result<(), WatchError> {
        if self.window_size == 0 {
            return Err(WatchError::Config("window size must be positive".into()));
        }
        if let NormalPolicy::FixedRate(period) = self.effective_normal_policy() {
            if period.is_zero() {
                return Err(WatchError::Config("normal tick period must be positive".into()));
            }
        }
        if let AmbientPolicy::Periodic(period) = self.ambient_policy {
            if period < Duration::from_millis(1) {
                return Err(WatchError::Config("ambient tick period must be positive".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WatchConfig::default();
        assert_eq!(config.title, "Watch");
        assert_eq!(config.window_size, 360);
        assert_eq!(config.face, FaceKind::Canvas);
        assert_eq!(config.ambient_policy, AmbientPolicy::Periodic(Duration::from_secs(60)));
        assert!(config.start_time.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn normal_policy_follows_face_kind() {
        let canvas = WatchConfig::builder().face(FaceKind::Canvas).build();
        assert_eq!(canvas.effective_normal_policy(), NormalPolicy::AlignToSecond);

        let transform = WatchConfig::builder().face(FaceKind::Transform).build();
        assert_eq!(
            transform.effective_normal_policy(),
            NormalPolicy::FixedRate(Duration::from_secs(1))
        );

        let overridden = WatchConfig::builder()
            .face(FaceKind::Transform)
            .normal_policy(NormalPolicy::AlignToSecond)
            .build();
        assert_eq!(overridden.effective_normal_policy(), NormalPolicy::AlignToSecond);
    }

    #[test]
    fn rejects_zero_sizes_and_periods() {
        assert!(WatchConfig::builder().window_size(0).build().validate().is_err());
        assert!(WatchConfig::builder()
            .normal_policy(NormalPolicy::FixedRate(Duration::ZERO))
            .build()
            .validate()
            .is_err());
        assert!(WatchConfig::builder()
            .ambient_policy(AmbientPolicy::Periodic(Duration::ZERO))
            .build()
            .validate()
            .is_err());
    }

    #[test]
    fn canvas_ambient_palette_is_monochrome() {
        let style = CanvasFaceStyle::default();
        assert!(style.ambient.hour.color.is_gray());
        assert!(style.ambient.minute.color.is_gray());
        assert!(style.ambient.hour.length_ratio < style.normal.hour.length_ratio);
        assert!(style.ambient.minute.length_ratio < style.normal.minute.length_ratio);
    }
}
