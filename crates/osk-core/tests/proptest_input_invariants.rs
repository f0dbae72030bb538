//! Property-based invariant tests for input samples and the analog quantizer.
//!
//! 1. `classify` is total and deterministic over every raw word.
//! 2. Axis classification depends only on the low four bits.
//! 3. Classification is monotone along an axis.
//! 4. Digital buttons never influence the analog direction.
//! 5. `without` only ever clears bits.
//! 6. Grid cells of a section stay inside the image.

use osk_core::analog::{self, AxisClass, HIGH_THRESHOLD, LOW_THRESHOLD, classify_axis};
use osk_core::{AnalogDirection, Buttons, InputSample, Rect, Section};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rank(class: AxisClass) -> u8 {
    match class {
        AxisClass::Negative => 0,
        AxisClass::Neutral => 1,
        AxisClass::Positive => 2,
    }
}

fn buttons_strategy() -> impl Strategy<Value = Buttons> {
    any::<u32>().prop_map(Buttons::from_bits_truncate)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Totality and determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classify_is_deterministic(raw in any::<u32>()) {
        let sample = InputSample::from_raw(raw);
        prop_assert_eq!(analog::classify(&sample), analog::classify(&sample));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Only the axis nibble matters
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn axis_is_masked(value in any::<u32>()) {
        prop_assert_eq!(classify_axis(value), classify_axis(value & 0xf));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Monotone along an axis, with the documented thresholds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn axis_is_monotone(a in 0u32..16, b in 0u32..16) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify_axis(lo)) <= rank(classify_axis(hi)));
    }

    #[test]
    fn neutral_band_is_inclusive(value in LOW_THRESHOLD..=HIGH_THRESHOLD) {
        prop_assert_eq!(classify_axis(value), AxisClass::Neutral);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Buttons do not leak into the analog direction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn buttons_do_not_move_stick(buttons in buttons_strategy(), x in 0u32..16, y in 0u32..16) {
        let bare = InputSample::new(Buttons::empty(), x, y);
        let pressed = InputSample::new(buttons, x, y);
        prop_assert_eq!(analog::classify(&bare), analog::classify(&pressed));
    }

    #[test]
    fn centered_stick_is_center(buttons in buttons_strategy()) {
        prop_assert_eq!(
            analog::classify(&InputSample::pressed(buttons)),
            AnalogDirection::Center
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Residual samples only lose bits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn without_only_clears(raw in any::<u32>(), handled in buttons_strategy()) {
        let sample = InputSample::from_raw(raw);
        let residual = sample.without(handled);
        prop_assert_eq!(residual.raw() & !raw, 0);
        prop_assert!(!residual.buttons().intersects(handled));
        prop_assert_eq!(residual.buttons(), sample.buttons() - handled);
        prop_assert_eq!(residual.analog_x(), sample.analog_x());
        prop_assert_eq!(residual.analog_y(), sample.analog_y());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Section cells fit inside their image
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn section_cells_fit(w in 0u32..2000, h in 0u32..2000) {
        let image = Rect::from_size(w, h);
        for section in Section::ALL {
            let (col, row) = section.grid();
            let cell = image.grid_cell(3, 3, col, row);
            prop_assert!(image.contains_rect(&cell), "{:?} -> {:?}", section, cell);
        }
    }
}
