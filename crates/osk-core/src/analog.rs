#![forbid(unsafe_code)]

//! Analog-stick quantizer.
//!
//! Each axis is classified on its own against two fixed thresholds, and the
//! pair of classes maps onto one of nine compass directions. Screen
//! coordinates are used: a negative Y reading points up.

use crate::input::{AXIS_MASK, InputSample};

/// Readings below this are negative.
pub const LOW_THRESHOLD: u32 = 0x3;
/// Readings above this are positive.
pub const HIGH_THRESHOLD: u32 = 0xc;

/// Per-axis classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisClass {
    Negative,
    Neutral,
    Positive,
}

/// Nine-way stick direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalogDirection {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Classify one axis reading. Out-of-range values are masked to 4 bits first.
#[must_use]
pub const fn classify_axis(value: u32) -> AxisClass {
    let value = value & AXIS_MASK;
    if value < LOW_THRESHOLD {
        AxisClass::Negative
    } else if value <= HIGH_THRESHOLD {
        AxisClass::Neutral
    } else {
        AxisClass::Positive
    }
}

/// Combine two axis classes into a direction.
#[must_use]
pub const fn combine(x: AxisClass, y: AxisClass) -> AnalogDirection {
    use AxisClass::{Negative, Neutral, Positive};
    match (x, y) {
        (Neutral, Neutral) => AnalogDirection::Center,
        (Neutral, Negative) => AnalogDirection::North,
        (Positive, Negative) => AnalogDirection::NorthEast,
        (Positive, Neutral) => AnalogDirection::East,
        (Positive, Positive) => AnalogDirection::SouthEast,
        (Neutral, Positive) => AnalogDirection::South,
        (Negative, Positive) => AnalogDirection::SouthWest,
        (Negative, Neutral) => AnalogDirection::West,
        (Negative, Negative) => AnalogDirection::NorthWest,
    }
}

/// Quantize the analog stick of `sample`.
#[must_use]
pub const fn classify(sample: &InputSample) -> AnalogDirection {
    combine(
        classify_axis(sample.analog_x()),
        classify_axis(sample.analog_y()),
    )
}
