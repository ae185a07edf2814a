//! Time source: platform clock first, system clock as a silent fallback.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::{Local, Offset, Timelike};

const MILLIS_PER_SECOND: u32 = 1_000;
const MILLIS_PER_DAY: u32 = 24 * 60 * 60 * MILLIS_PER_SECOND;

/// Wall-clock time of day as read at a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
    millis: u16,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime {
        hours: 0,
        minutes: 0,
        seconds: 0,
        millis: 0,
    };

    /// Returns `None` when any field is out of range.
    pub fn new(hours: u8, minutes: u8, seconds: u8, millis: u16) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 || millis > 999 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
            millis,
        })
    }

    /// Shorthand for whole-second times.
    pub fn hms(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        Self::new(hours, minutes, seconds, 0)
    }

    /// Builds a `ClockTime` from any chrono time value.
    ///
    /// Leap seconds are folded into the last millisecond of the second.
    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        Self {
            hours: time.hour() as u8,
            minutes: time.minute() as u8,
            seconds: time.second() as u8,
            millis: (time.nanosecond() / 1_000_000).min(999) as u16,
        }
    }

    /// Rebuilds a time from milliseconds since midnight, wrapping at 24h.
    pub fn from_millis_of_day(millis: u32) -> Self {
        let millis = millis % MILLIS_PER_DAY;
        let total_seconds = millis / MILLIS_PER_SECOND;
        Self {
            hours: (total_seconds / 3600) as u8,
            minutes: (total_seconds / 60 % 60) as u8,
            seconds: (total_seconds % 60) as u8,
            millis: (millis % MILLIS_PER_SECOND) as u16,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn millis(&self) -> u16 {
        self.millis
    }

    /// Seconds including the sub-second fraction.
    pub fn fractional_seconds(&self) -> f64 {
        self.seconds as f64 + self.millis as f64 / 1000.0
    }

    pub fn millis_of_day(&self) -> u32 {
        ((self.hours as u32 * 60 + self.minutes as u32) * 60 + self.seconds as u32)
            * MILLIS_PER_SECOND
            + self.millis as u32
    }

    /// Milliseconds left until the next whole second, in `1..=1000`.
    pub fn millis_until_next_second(&self) -> u32 {
        MILLIS_PER_SECOND - self.millis as u32
    }

    /// Milliseconds left until the next multiple of `period_ms` since midnight.
    ///
    /// Always in `1..=period_ms`, so a tick landing exactly on a boundary
    /// waits a full period instead of firing twice.
    pub fn millis_until_next_boundary(&self, period_ms: u32) -> u32 {
        let period_ms = period_ms.max(1);
        period_ms - self.millis_of_day() % period_ms
    }

    /// Adds `millis` and wraps around midnight.
    pub fn add_millis(&self, millis: u32) -> Self {
        Self::from_millis_of_day(self.millis_of_day() + millis % MILLIS_PER_DAY)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Anything the watch face can read the current time from.
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> ClockTime {
        (**self).now()
    }
}

/// High-precision platform time API. `None` means the API is unavailable.
pub trait PlatformClock {
    fn current_date_time(&self) -> Option<ClockTime>;
}

/// Generic system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl LocalClock {
    /// Current offset of local time from UTC, in seconds.
    pub fn utc_offset_seconds(&self) -> i32 {
        Local::now().offset().fix().local_minus_utc()
    }
}

impl TimeSource for LocalClock {
    fn now(&self) -> ClockTime {
        ClockTime::from_timelike(&Local::now())
    }
}

/// Which branch produced the last reading of a [`ClockSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    Platform,
    System,
}

/// Reads the platform clock when it is present and available, the system
/// clock otherwise. The substitution is never reported as an error.
pub struct ClockSource {
    platform: Option<Box<dyn PlatformClock>>,
    fallback: LocalClock,
    last: Cell<Option<ReadSource>>,
}

impl ClockSource {
    /// Time source without any platform API; always reads the system clock.
    pub fn system() -> Self {
        Self {
            platform: None,
            fallback: LocalClock,
            last: Cell::new(None),
        }
    }

    pub fn with_platform(platform: impl PlatformClock + 'static) -> Self {
        Self {
            platform: Some(Box::new(platform)),
            fallback: LocalClock,
            last: Cell::new(None),
        }
    }

    /// Branch used by the most recent `now()`, `None` before the first read.
    pub fn last_source(&self) -> Option<ReadSource> {
        self.last.get()
    }

    /// Whether the last read had to fall back to the system clock.
    pub fn degraded(&self) -> bool {
        self.last.get() == Some(ReadSource::System)
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::system()
    }
}

impl TimeSource for ClockSource {
    fn now(&self) -> ClockTime {
        let platform_time = self
            .platform
            .as_ref()
            .and_then(|platform| platform.current_date_time());

        match platform_time {
            Some(time) => {
                self.last.set(Some(ReadSource::Platform));
                time
            }
            None => {
                self.last.set(Some(ReadSource::System));
                self.fallback.now()
            }
        }
    }
}

/// Settable time source. Clones share the same time, so a test can keep a
/// handle after moving one into a [`crate::WatchFace`].
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: Rc<Cell<ClockTime>>,
}

impl FixedClock {
    pub fn new(time: ClockTime) -> Self {
        Self {
            time: Rc::new(Cell::new(time)),
        }
    }

    pub fn set(&self, time: ClockTime) {
        self.time.set(time);
    }

    pub fn advance_millis(&self, millis: u32) {
        self.time.set(self.time.get().add_millis(millis));
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> ClockTime {
        self.time.get()
    }
}

/// Runs at wall-clock speed from a chosen start time.
#[derive(Debug, Clone, Copy)]
pub struct ShiftedClock {
    start: ClockTime,
    origin: Instant,
}

impl ShiftedClock {
    pub fn starting_at(start: ClockTime) -> Self {
        Self {
            start,
            origin: Instant::now(),
        }
    }
}

impl TimeSource for ShiftedClock {
    fn now(&self) -> ClockTime {
        let elapsed = self.origin.elapsed().as_millis() % MILLIS_PER_DAY as u128;
        self.start.add_millis(elapsed as u32)
    }
}

/// Detects changes of the local UTC offset between polls.
#[derive(Debug, Clone, Copy)]
pub struct OffsetWatch {
    last_offset: i32,
}

impl OffsetWatch {
    pub fn new(offset_seconds: i32) -> Self {
        Self {
            last_offset: offset_seconds,
        }
    }

    /// Records `offset_seconds` and reports whether it differs from the
    /// previous observation.
    pub fn observe(&mut self, offset_seconds: i32) -> bool {
        let changed = offset_seconds != self.last_offset;
        self.last_offset = offset_seconds;
        changed
    }
}
