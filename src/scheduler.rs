//! Render scheduling.
//!
//! The scheduler holds at most one pending callback: either a timeout with a
//! deadline or an animation-frame request. Scheduling anything replaces what
//! was pending, so two render chains can never run side by side.

use std::time::{Duration, Instant};

use crate::clock::ClockTime;
use crate::face::DisplayMode;

/// Identifies one scheduled callback. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// How Normal mode paces its renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalPolicy {
    /// Wake on the next whole-second boundary of the last rendered time.
    #[default]
    AlignToSecond,
    /// Wake a fixed period after each render.
    FixedRate(Duration),
}

/// How Ambient mode receives its ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientPolicy {
    /// Ticks arrive from the host as `WatchEvent::TimeTick`.
    External,
    /// An internal timer ticks on each period boundary of the day.
    Periodic(Duration),
}

impl Default for AmbientPolicy {
    fn default() -> Self {
        AmbientPolicy::Periodic(Duration::from_secs(60))
    }
}

/// What a timeout asks for once its deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Request an animation frame (Normal mode).
    Frame,
    /// Deliver an ambient tick.
    AmbientTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Timeout {
        handle: TimerHandle,
        due: Instant,
        wake: Wake,
    },
    AnimationFrame {
        handle: TimerHandle,
    },
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    normal: NormalPolicy,
    ambient: AmbientPolicy,
    pending: Option<Pending>,
    next_id: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(NormalPolicy::default(), AmbientPolicy::default())
    }
}

impl Scheduler {
    pub fn new(normal: NormalPolicy, ambient: AmbientPolicy) -> Self {
        Self {
            normal,
            ambient,
            pending: None,
            next_id: 0,
        }
    }

    /// Delay until the next render of `mode`, given the time shown by the
    /// last render. `None` means the mode does not reschedule itself.
    pub fn delay_for(&self, mode: DisplayMode, last_render: &ClockTime) -> Option<Duration> {
        match mode {
            DisplayMode::Normal => match self.normal {
                NormalPolicy::AlignToSecond => Some(Duration::from_millis(
                    last_render.millis_until_next_second() as u64,
                )),
                NormalPolicy::FixedRate(period) => Some(period),
            },
            DisplayMode::Ambient => match self.ambient {
                AmbientPolicy::External => None,
                AmbientPolicy::Periodic(period) => {
                    let period_ms = period.as_millis().clamp(1, u32::MAX as u128) as u32;
                    Some(Duration::from_millis(
                        last_render.millis_until_next_boundary(period_ms) as u64,
                    ))
                }
            },
        }
    }

    /// Replaces whatever is pending with the next tick for `mode`.
    pub fn schedule_next_tick(
        &mut self,
        mode: DisplayMode,
        last_render: &ClockTime,
        now: Instant,
    ) -> Option<TimerHandle> {
        self.cancel();
        let delay = self.delay_for(mode, last_render)?;
        let wake = match mode {
            DisplayMode::Normal => Wake::Frame,
            DisplayMode::Ambient => Wake::AmbientTick,
        };
        let handle = self.next_handle();
        self.pending = Some(Pending::Timeout {
            handle,
            due: now + delay,
            wake,
        });
        Some(handle)
    }

    /// Replaces whatever is pending with a request for the next frame.
    pub fn request_frame(&mut self) -> TimerHandle {
        let handle = self.next_handle();
        self.pending = Some(Pending::AnimationFrame { handle });
        handle
    }

    pub fn cancel(&mut self) -> Option<Pending> {
        self.pending.take()
    }

    /// Takes the pending timeout if its deadline has passed.
    pub fn fire_due(&mut self, now: Instant) -> Option<(TimerHandle, Wake)> {
        match self.pending {
            Some(Pending::Timeout { handle, due, wake }) if due <= now => {
                self.pending = None;
                Some((handle, wake))
            }
            _ => None,
        }
    }

    /// Takes the pending animation-frame request, if any.
    pub fn take_frame(&mut self) -> Option<TimerHandle> {
        match self.pending {
            Some(Pending::AnimationFrame { handle }) => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    pub fn frame_requested(&self) -> bool {
        matches!(self.pending, Some(Pending::AnimationFrame { .. }))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.pending {
            Some(Pending::Timeout { due, .. }) => Some(due),
            _ => None,
        }
    }

    pub fn pending_count(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u8, m: u8, s: u8, ms: u16) -> ClockTime {
        ClockTime::new(h, m, s, ms).unwrap()
    }

    #[test]
    fn normal_aligns_to_next_second() {
        let scheduler = Scheduler::default();
        assert_eq!(
            scheduler.delay_for(DisplayMode::Normal, &t(10, 15, 30, 250)),
            Some(Duration::from_millis(750))
        );
        assert_eq!(
            scheduler.delay_for(DisplayMode::Normal, &t(10, 15, 30, 0)),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn fixed_rate_ignores_render_time() {
        let scheduler = Scheduler::new(
            NormalPolicy::FixedRate(Duration::from_secs(1)),
            AmbientPolicy::External,
        );
        assert_eq!(
            scheduler.delay_for(DisplayMode::Normal, &t(1, 2, 3, 456)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn external_ambient_never_schedules() {
        let mut scheduler = Scheduler::new(NormalPolicy::AlignToSecond, AmbientPolicy::External);
        let now = Instant::now();
        assert!(scheduler
            .schedule_next_tick(DisplayMode::Ambient, &t(9, 0, 0, 0), now)
            .is_none());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn periodic_ambient_aligns_to_minute() {
        let scheduler = Scheduler::default();
        assert_eq!(
            scheduler.delay_for(DisplayMode::Ambient, &t(9, 0, 45, 500)),
            Some(Duration::from_millis(14_500))
        );
    }

    #[test]
    fn scheduling_replaces_pending() {
        let mut scheduler = Scheduler::default();
        let now = Instant::now();
        let first = scheduler
            .schedule_next_tick(DisplayMode::Normal, &t(0, 0, 0, 0), now)
            .unwrap();
        let second = scheduler.request_frame();
        assert_ne!(first, second);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.take_frame(), Some(second));
    }

    #[test]
    fn fire_due_respects_deadline() {
        let mut scheduler = Scheduler::default();
        let now = Instant::now();
        let handle = scheduler
            .schedule_next_tick(DisplayMode::Normal, &t(0, 0, 0, 600), now)
            .unwrap();
        assert_eq!(scheduler.next_deadline(), Some(now + Duration::from_millis(400)));

        assert!(scheduler.fire_due(now + Duration::from_millis(399)).is_none());
        assert_eq!(
            scheduler.fire_due(now + Duration::from_millis(400)),
            Some((handle, Wake::Frame))
        );
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn take_frame_only_takes_frames() {
        let mut scheduler = Scheduler::default();
        let now = Instant::now();
        scheduler.schedule_next_tick(DisplayMode::Normal, &t(0, 0, 0, 0), now);
        assert!(scheduler.take_frame().is_none());
        assert_eq!(scheduler.pending_count(), 1);

        let handle = scheduler.request_frame();
        assert!(scheduler.frame_requested());
        assert_eq!(scheduler.take_frame(), Some(handle));
        assert!(!scheduler.frame_requested());
    }

    #[test]
    fn cancel_clears_pending() {
        let mut scheduler = Scheduler::default();
        let handle = scheduler.request_frame();
        assert_eq!(
            scheduler.cancel(),
            Some(Pending::AnimationFrame { handle })
        );
        assert!(scheduler.cancel().is_none());
    }
}
