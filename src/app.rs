//! Desktop host: a winit window with a pixels framebuffer standing in for the
//! watch platform.

use std::sync::Arc;
use std::time::Instant;

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::clock::{ClockSource, LocalClock, OffsetWatch, ShiftedClock, TimeSource};
use crate::config::{FaceKind, WatchConfig};
use crate::error::WatchError;
use crate::face::{DisplayMode, WatchEvent, WatchFace};
use crate::render::{Canvas, CanvasRenderer, Renderer, TransformRenderer};
use crate::scheduler::Scheduler;

/// Watch face with its renderer and time source chosen at runtime.
pub type DynWatchFace = WatchFace<Box<dyn Renderer>, Box<dyn TimeSource>>;

/// Host input that maps to a watch lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    Occluded(bool),
    ToggleAmbient,
    ManualTick,
    OffsetChanged,
}

impl HostInput {
    /// Keyboard shortcuts: `a` toggles ambient mode, `t` delivers a tick.
    pub fn from_key(key: &Key) -> Option<Self> {
        match key.as_ref() {
            Key::Character("a") | Key::Character("A") => Some(HostInput::ToggleAmbient),
            Key::Character("t") | Key::Character("T") => Some(HostInput::ManualTick),
            _ => None,
        }
    }

    pub fn to_event(self, current: DisplayMode) -> WatchEvent {
        match self {
            HostInput::Occluded(occluded) => WatchEvent::VisibilityChanged { visible: !occluded },
            HostInput::ToggleAmbient => {
                WatchEvent::AmbientModeChanged(current == DisplayMode::Normal)
            }
            HostInput::ManualTick => WatchEvent::TimeTick,
            HostInput::OffsetChanged => WatchEvent::TimezoneChanged,
        }
    }
}

pub struct WatchApp {
    config: WatchConfig,
}

impl WatchApp {
    pub fn new(config: WatchConfig) -> Self {
        Self { config }
    }

    /// Builds the configured face for a framebuffer of the given size.
    pub fn face(&self, width: usize, height: usize) -> Result<DynWatchFace, WatchError> {
        self.config.validate()?;

        let renderer: Box<dyn Renderer> = match self.config.face {
            FaceKind::Canvas => Box::new(CanvasRenderer::new(
                self.config.canvas_style.clone(),
                width,
                height,
            )),
            FaceKind::Transform => Box::new(TransformRenderer::new(
                self.config.transform_style.clone(),
                width,
                height,
            )),
        };
        let clock: Box<dyn TimeSource> = match self.config.start_time {
            Some(start) => Box::new(ShiftedClock::starting_at(start)),
            None => Box::new(ClockSource::system()),
        };
        let scheduler = Scheduler::new(
            self.config.effective_normal_policy(),
            self.config.ambient_policy,
        );

        Ok(WatchFace::new(renderer, clock, scheduler))
    }

    /// Opens the window and runs the face until the window is closed.
    pub fn run(&self) -> Result<(), WatchError> {
        let logical_size = self.config.window_size as f64;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(logical_size, logical_size))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut face = self.face(fb_width, fb_height)?;
        let local = LocalClock;
        let mut offsets = OffsetWatch::new(local.utc_offset_seconds());

        log::info!(
            "starting {:?} face at {}x{} ({:?} / {:?})",
            self.config.face,
            fb_width,
            fb_height,
            self.config.effective_normal_policy(),
            self.config.ambient_policy,
        );
        face.start();

        event_loop.run(move |event, window_target| {
            let now = Instant::now();
            let mut input = None;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("window closed");
                        window_target.exit();
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    } => {
                        if logical_key == Key::Named(NamedKey::Escape) {
                            window_target.exit();
                        } else {
                            input = HostInput::from_key(&logical_key);
                        }
                    }
                    WindowEvent::Occluded(occluded) => {
                        input = Some(HostInput::Occluded(occluded));
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            log::error!("failed to resize framebuffer: {err}");
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::error!("failed to resize surface: {err}");
                        }
                        face.renderer_mut().resize(fb_width, fb_height);
                        window_clone.request_redraw();
                    }
                    WindowEvent::RedrawRequested => {
                        face.animation_frame(now);

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        face.renderer().paint(&mut canvas);
                        face.take_dirty();

                        if let Err(err) = pixels.render() {
                            log::error!("failed to present frame: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if offsets.observe(local.utc_offset_seconds()) {
                        input = Some(HostInput::OffsetChanged);
                    }
                }
                _ => {}
            }

            if let Some(input) = input {
                face.handle(input.to_event(face.mode()), now);
            }
            face.poll(now);

            if face.wants_redraw() {
                window_clone.request_redraw();
            }
            match face.next_deadline() {
                Some(deadline) => window_target.set_control_flow(ControlFlow::WaitUntil(deadline)),
                None => window_target.set_control_flow(ControlFlow::Wait),
            }
        })?;

        Ok(())
    }
}
