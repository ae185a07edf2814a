//! Mode controller: owns the display mode and the scheduler, and turns
//! lifecycle events into renders.

use std::time::Instant;

use crate::clock::{ClockTime, TimeSource};
use crate::render::Renderer;
use crate::scheduler::{Scheduler, Wake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    Ambient,
}

/// External lifecycle events delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    AmbientModeChanged(bool),
    VisibilityChanged { visible: bool },
    TimeTick,
    TimezoneChanged,
}

/// Everything that changes while the face runs.
#[derive(Debug, Clone, Default)]
pub struct WatchFaceState {
    pub mode: DisplayMode,
    pub scheduler: Scheduler,
    pub last_render: Option<ClockTime>,
    pub render_count: u64,
    /// Set by every render, cleared once the host has presented it.
    pub dirty: bool,
    pub hidden: bool,
}

pub struct WatchFace<R, T> {
    state: WatchFaceState,
    renderer: R,
    clock: T,
}

impl<R, T> WatchFace<R, T>
where
    R: Renderer,
    T: TimeSource,
{
    pub fn new(renderer: R, clock: T, scheduler: Scheduler) -> Self {
        Self {
            state: WatchFaceState {
                scheduler,
                ..WatchFaceState::default()
            },
            renderer,
            clock,
        }
    }

    /// Kicks off the Normal render chain with a first frame request.
    pub fn start(&mut self) {
        log::debug!("watch face started in {:?} mode", self.state.mode);
        self.state.scheduler.request_frame();
    }

    pub fn handle(&mut self, event: WatchEvent, now: Instant) {
        match event {
            WatchEvent::AmbientModeChanged(true) => self.activate(DisplayMode::Ambient, now),
            WatchEvent::AmbientModeChanged(false) => self.activate(DisplayMode::Normal, now),
            WatchEvent::VisibilityChanged { visible: true } => {
                self.state.hidden = false;
                self.activate(self.state.mode, now);
            }
            WatchEvent::VisibilityChanged { visible: false } => {
                log::trace!("watch face hidden");
                self.state.hidden = true;
            }
            WatchEvent::TimeTick => self.ambient_tick(now),
            WatchEvent::TimezoneChanged => {
                log::debug!("timezone changed, refreshing");
                self.activate(self.state.mode, now);
            }
        }
    }

    /// Fires a due timeout. Returns `true` if anything happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some((_, wake)) = self.state.scheduler.fire_due(now) else {
            return false;
        };
        match wake {
            Wake::Frame if self.state.mode == DisplayMode::Normal => {
                self.state.scheduler.request_frame();
            }
            Wake::AmbientTick => self.ambient_tick(now),
            Wake::Frame => {}
        }
        true
    }

    /// Serves a pending animation-frame request: render, then schedule the
    /// next tick. Returns `false` when no frame was requested.
    pub fn animation_frame(&mut self, now: Instant) -> bool {
        if self.state.scheduler.take_frame().is_none() {
            return false;
        }
        if self.state.mode != DisplayMode::Normal {
            return false;
        }
        let time = self.render();
        self.state
            .scheduler
            .schedule_next_tick(DisplayMode::Normal, &time, now);
        true
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.mode
    }

    pub fn state(&self) -> &WatchFaceState {
        &self.state
    }

    pub fn render_count(&self) -> u64 {
        self.state.render_count
    }

    pub fn last_render(&self) -> Option<ClockTime> {
        self.state.last_render
    }

    pub fn pending_count(&self) -> usize {
        self.state.scheduler.pending_count()
    }

    pub fn frame_requested(&self) -> bool {
        self.state.scheduler.frame_requested()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.scheduler.next_deadline()
    }

    /// Whether the host should present a frame. Nothing is presented while
    /// hidden; the pending frame request waits for the face to become visible.
    pub fn wants_redraw(&self) -> bool {
        !self.state.hidden && (self.frame_requested() || self.state.dirty)
    }

    /// Returns whether a render happened since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.state.dirty)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn activate(&mut self, mode: DisplayMode, now: Instant) {
        self.state.scheduler.cancel();
        if self.state.mode != mode {
            log::debug!("display mode {:?} -> {:?}", self.state.mode, mode);
        }
        self.state.mode = mode;

        match mode {
            DisplayMode::Ambient => {
                let time = self.render();
                self.state
                    .scheduler
                    .schedule_next_tick(DisplayMode::Ambient, &time, now);
            }
            DisplayMode::Normal => {
                self.state.scheduler.request_frame();
            }
        }
    }

    fn ambient_tick(&mut self, now: Instant) {
        if self.state.mode != DisplayMode::Ambient {
            log::trace!("time tick ignored outside ambient mode");
            return;
        }
        let time = self.render();
        self.state
            .scheduler
            .schedule_next_tick(DisplayMode::Ambient, &time, now);
    }

    fn render(&mut self) -> ClockTime {
        let time = self.clock.now();
        log::trace!("render {:?} at {}", self.state.mode, time);
        self.renderer.render(self.state.mode, &time);
        self.state.last_render = Some(time);
        self.state.render_count += 1;
        self.state.dirty = true;
        time
    }
}
