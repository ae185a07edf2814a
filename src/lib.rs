// ============================================================================
// CRATE LAYOUT
// ============================================================================

pub mod angle;
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod face;
pub mod logging;
pub mod render;
pub mod scheduler;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use angle::{hand_angles, hour_angle, minute_angle, second_angle, HandAngles};
pub use app::{DynWatchFace, HostInput, WatchApp};
pub use clock::{
    ClockSource, ClockTime, FixedClock, LocalClock, PlatformClock, ReadSource, ShiftedClock,
    TimeSource,
};
pub use config::{CanvasFaceStyle, FaceKind, TransformFaceStyle, WatchConfig};
pub use error::WatchError;
pub use face::{DisplayMode, WatchEvent, WatchFace, WatchFaceState};
pub use logging::{init_logging, LoggingConfig};
pub use render::{Canvas, CanvasRenderer, Color, DrawCommand, Renderer, Scene, TransformRenderer};
pub use scheduler::{AmbientPolicy, NormalPolicy, Scheduler, TimerHandle, Wake};
