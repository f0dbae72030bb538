//! Property-based invariant tests for the navigation state machine.
//!
//! 1. Both triggers always land in the Shifted keyboard, whatever came before.
//! 2. Console cycling wraps within the configured count.
//! 3. Repeating a sample inside a keyboard never redraws.
//! 4. `Failed` absorbs every later sample without touching a device.

use osk_core::{Buttons, Config, InputMode, InputSample, Variant};
use osk_harness::{FakeCanvas, RecordingConsole, RecordingSystem, ScriptedInput, test_images};
use osk_runtime::{Controller, UiState};
use proptest::prelude::*;

type Fake = Controller<ScriptedInput, FakeCanvas, RecordingConsole, RecordingSystem>;

// ── Helpers ─────────────────────────────────────────────────────────────

fn controller(config: Config) -> Fake {
    let mut ctl = Controller::new(
        config,
        test_images(),
        ScriptedInput::default(),
        FakeCanvas::default(),
        RecordingConsole::default(),
        RecordingSystem::default(),
    );
    ctl.initialize().unwrap();
    ctl.start().unwrap();
    ctl
}

/// Buttons that steer the state machine, without screenshot or volume keys.
fn navigation_buttons() -> impl Strategy<Value = Buttons> {
    prop::sample::subsequence(
        vec![
            Buttons::UP,
            Buttons::RIGHT,
            Buttons::DOWN,
            Buttons::LEFT,
            Buttons::TRIANGLE,
            Buttons::CIRCLE,
            Buttons::CROSS,
            Buttons::SQUARE,
            Buttons::L_TRIGGER,
            Buttons::R_TRIGGER,
            Buttons::MOUSE_MODE,
        ],
        0..=4,
    )
    .prop_map(|picked| picked.into_iter().fold(Buttons::empty(), |acc, b| acc | b))
}

fn sample_strategy() -> impl Strategy<Value = InputSample> {
    (navigation_buttons(), 0u32..16, 0u32..16)
        .prop_map(|(buttons, x, y)| InputSample::new(buttons, x, y))
}

fn input_mode() -> impl Strategy<Value = InputMode> {
    prop_oneof![
        Just(InputMode::DPAD),
        Just(InputMode::ANALOG),
        Just(InputMode::all()),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Both triggers select Shifted
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn both_triggers_select_shifted(
        mode in input_mode(),
        history in prop::collection::vec(sample_strategy(), 0..12),
        extra in navigation_buttons(),
    ) {
        let mut ctl = controller(Config::default().with_input(mode));
        for sample in history {
            ctl.step(sample).unwrap();
        }
        let buttons = (extra | Buttons::TRIGGERS) - Buttons::MOUSE_MODE;
        let state = ctl.step(InputSample::pressed(buttons)).unwrap();
        prop_assert!(
            matches!(state, UiState::Active { variant: Variant::Shifted, .. }),
            "ended in {:?}", state
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Console wraparound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn console_index_wraps(consoles in 1u8..=6, ups in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut ctl = controller(Config::default().with_consoles(consoles));
        let count = i32::from(consoles);
        let mut expected = 0i32;
        for up in ups {
            let (button, delta) = if up {
                (Buttons::VOLUME_UP, 1)
            } else {
                (Buttons::VOLUME_DOWN, -1)
            };
            ctl.step(InputSample::pressed(button)).unwrap();
            expected = (expected + delta).rem_euclid(count);
            prop_assert_eq!(ctl.console_index(), expected as usize);
            prop_assert!(ctl.console_index() < usize::from(consoles));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Repeated samples do not redraw
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_sample_is_idempotent(mode in input_mode(), sample in sample_strategy()) {
        let buttons = sample.buttons() - Buttons::MOUSE_MODE - Buttons::TRIGGERS;
        let sample = InputSample::new(buttons, sample.analog_x(), sample.analog_y());

        let mut ctl = controller(Config::default().with_input(mode));
        ctl.step(InputSample::pressed(Buttons::R_TRIGGER)).unwrap();
        ctl.step(sample).unwrap();
        ctl.canvas_mut().take_ops();

        ctl.step(sample).unwrap();
        prop_assert!(ctl.canvas().ops().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Failed is absorbing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn failed_is_absorbing(raws in prop::collection::vec(any::<u32>(), 1..20)) {
        let mut ctl = controller(Config::default());
        ctl.canvas_mut().fail_now();
        ctl.step(InputSample::pressed(Buttons::MOUSE_MODE)).unwrap();
        prop_assert_eq!(ctl.state(), UiState::Failed);

        let canvas_calls = ctl.canvas().calls();
        let console_calls = ctl.console().calls();
        for raw in raws {
            prop_assert_eq!(ctl.step(InputSample::from_raw(raw)).unwrap(), UiState::Failed);
        }
        prop_assert_eq!(ctl.canvas().calls(), canvas_calls);
        prop_assert_eq!(ctl.console().calls(), console_calls);
        prop_assert!(ctl.system().screenshots().is_empty());
    }
}
