#![forbid(unsafe_code)]

//! Raw controller input.
//!
//! The joypad driver delivers one 32-bit word per read. The low 24 bits are
//! digital buttons; the top byte packs two 4-bit analog-stick magnitudes
//! (X in bits 24..28, Y in bits 28..32).

use bitflags::bitflags;

bitflags! {
    /// Digital buttons reported by the joypad driver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        const UP         = 0x0000_0001;
        const RIGHT      = 0x0000_0002;
        const DOWN       = 0x0000_0004;
        const LEFT       = 0x0000_0008;
        const TRIANGLE   = 0x0000_0010;
        const CIRCLE     = 0x0000_0020;
        const CROSS      = 0x0000_0040;
        const SQUARE     = 0x0000_0080;
        const SELECT     = 0x0000_0100;
        const L_TRIGGER  = 0x0000_0200;
        const R_TRIGGER  = 0x0000_0400;
        const START      = 0x0000_0800;
        const HOME       = 0x0000_1000;
        const HOLD       = 0x0000_2000;
        const WLAN       = 0x0000_4000;
        const REMOTE     = 0x0000_8000;
        const VOLUME_UP  = 0x0001_0000;
        const VOLUME_DOWN = 0x0002_0000;
        /// The display key; used as the screenshot hotkey.
        const SCREEN     = 0x0004_0000;
        const NOTE       = 0x0008_0000;
        const DISC       = 0x0010_0000;
        const MOUSE_MODE = 0x0080_0000;

        const DPAD = Self::UP.bits() | Self::RIGHT.bits() | Self::DOWN.bits() | Self::LEFT.bits();
        const TRIGGERS = Self::L_TRIGGER.bits() | Self::R_TRIGGER.bits();
        const POWER_OFF_COMBO = Self::HOME.bits() | Self::CIRCLE.bits() | Self::CROSS.bits();
    }
}

const BUTTON_MASK: u32 = 0x00ff_ffff;
const ANALOG_X_SHIFT: u32 = 24;
const ANALOG_Y_SHIFT: u32 = 28;

/// Width mask of one analog axis reading.
pub const AXIS_MASK: u32 = 0xf;

/// One sampled input word.
///
/// Samples are plain values. Layers that handle a button pass on a residual
/// sample with that button removed (see [`InputSample::without`]), so the
/// same press is never interpreted twice within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputSample {
    raw: u32,
}

impl InputSample {
    /// No buttons pressed, both analog axes at zero.
    pub const EMPTY: Self = Self { raw: 0 };

    /// Wrap a raw driver word.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    /// Build a sample from buttons and two analog readings.
    ///
    /// Axis values are masked to 4 bits.
    #[must_use]
    pub const fn new(buttons: Buttons, analog_x: u32, analog_y: u32) -> Self {
        Self {
            raw: (buttons.bits() & BUTTON_MASK)
                | ((analog_x & AXIS_MASK) << ANALOG_X_SHIFT)
                | ((analog_y & AXIS_MASK) << ANALOG_Y_SHIFT),
        }
    }

    /// Sample with only the given buttons and a centered analog stick.
    #[must_use]
    pub const fn pressed(buttons: Buttons) -> Self {
        Self::new(buttons, CENTER_AXIS, CENTER_AXIS)
    }

    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Digital buttons in this sample. Unknown bits are dropped.
    #[must_use]
    pub const fn buttons(&self) -> Buttons {
        Buttons::from_bits_truncate(self.raw & BUTTON_MASK)
    }

    /// True if every button in `buttons` is held.
    #[must_use]
    pub const fn contains(&self, buttons: Buttons) -> bool {
        self.buttons().contains(buttons)
    }

    /// The residual sample with `buttons` marked as handled.
    #[must_use]
    pub const fn without(self, buttons: Buttons) -> Self {
        Self {
            raw: self.raw & !(buttons.bits() & BUTTON_MASK),
        }
    }

    /// Raw X-axis magnitude (0..=15).
    #[must_use]
    pub const fn analog_x(&self) -> u32 {
        (self.raw >> ANALOG_X_SHIFT) & AXIS_MASK
    }

    /// Raw Y-axis magnitude (0..=15).
    #[must_use]
    pub const fn analog_y(&self) -> u32 {
        (self.raw >> ANALOG_Y_SHIFT) & AXIS_MASK
    }
}

/// An axis reading that classifies as neutral.
pub const CENTER_AXIS: u32 = 0x8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_and_axes_are_unpacked() {
        let sample = InputSample::from_raw(0x5a00_0441);
        assert_eq!(
            sample.buttons(),
            Buttons::UP | Buttons::CROSS | Buttons::R_TRIGGER
        );
        assert_eq!(sample.analog_x(), 0xa);
        assert_eq!(sample.analog_y(), 0x5);
    }

    #[test]
    fn new_masks_axis_values() {
        let sample = InputSample::new(Buttons::empty(), 0x1f, 0x23);
        assert_eq!(sample.analog_x(), 0xf);
        assert_eq!(sample.analog_y(), 0x3);
    }

    #[test]
    fn without_clears_only_named_buttons() {
        let sample = InputSample::new(Buttons::UP | Buttons::LEFT | Buttons::CIRCLE, 2, 14);
        let residual = sample.without(Buttons::UP | Buttons::LEFT);
        assert_eq!(residual.buttons(), Buttons::CIRCLE);
        assert_eq!(residual.analog_x(), 2);
        assert_eq!(residual.analog_y(), 14);
    }

    #[test]
    fn unknown_bits_are_not_buttons() {
        let sample = InputSample::from_raw(0x0020_0000 | 0x0040_0000);
        assert!(sample.buttons().is_empty());
    }

    #[test]
    fn combo_requires_every_button() {
        let partial = InputSample::pressed(Buttons::HOME | Buttons::CIRCLE);
        assert!(!partial.contains(Buttons::POWER_OFF_COMBO));
        assert!(partial.buttons().intersects(Buttons::POWER_OFF_COMBO));
        let full = InputSample::pressed(Buttons::POWER_OFF_COMBO);
        assert!(full.contains(Buttons::POWER_OFF_COMBO));
    }
}
