//! Hand angles for a given time of day.
//!
//! Angles are degrees clockwise from 12 o'clock in `[0, 360)`. Sub-second
//! fractions feed every hand so that no hand jumps at a rollover.

use crate::clock::ClockTime;

pub const DEGREES_PER_HOUR: f64 = 30.0;
pub const DEGREES_PER_MINUTE: f64 = 6.0;
pub const DEGREES_PER_SECOND: f64 = 6.0;

/// Raster space puts 0 rad at 3 o'clock; the dial puts 0° at 12 o'clock.
pub const CANVAS_AXIS_OFFSET_DEGREES: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

fn normalize(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn hour_angle(time: &ClockTime) -> f64 {
    let hours = time.hours() as f64
        + time.minutes() as f64 / 60.0
        + time.fractional_seconds() / 3600.0;
    normalize(hours * DEGREES_PER_HOUR)
}

pub fn minute_angle(time: &ClockTime) -> f64 {
    let minutes = time.minutes() as f64 + time.fractional_seconds() / 60.0;
    normalize(minutes * DEGREES_PER_MINUTE)
}

pub fn second_angle(time: &ClockTime) -> f64 {
    normalize(time.fractional_seconds() * DEGREES_PER_SECOND)
}

pub fn hand_angles(time: &ClockTime) -> HandAngles {
    HandAngles {
        hour: hour_angle(time),
        minute: minute_angle(time),
        second: second_angle(time),
    }
}

/// Converts a dial angle to raster radians (x right, y down).
pub fn to_canvas_radians(degrees: f64) -> f64 {
    (degrees + CANVAS_AXIS_OFFSET_DEGREES).to_radians()
}
