#![forbid(unsafe_code)]

//! Navigation state machine.
//!
//! [`Navigator`] owns the live [`UiState`] and advances it once per input
//! sample. It decides transitions, which region to repaint and which keys to
//! type, and hands every side effect to an [`Effects`] implementation.
//!
//! # Tick order
//!
//! 1. Global hotkeys (console cycling, screenshot, power-off) consume their
//!    buttons from the sample.
//! 2. The current state's logic runs on the residual sample.
//! 3. If it requested another state, the exit hook of the old state and the
//!    enter hook of the new one run. An enter hook may redirect again; the
//!    chain repeats until a state keeps itself.
//!
//! `Failed` is terminal: once reached, [`Navigator::step`] does nothing.

use osk_backend::BackendError;
use osk_core::layout::Layout;
use osk_core::{
    AnalogDirection, Buttons, Config, Face, InputMode, InputSample, OutputKey, Section, Variant,
    classify,
};
use tracing::{debug, error, trace};

/// The live UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiState {
    /// Terminal. Nothing is drawn or typed any more.
    Failed,
    /// Keyboard hidden; the pad acts as cursor keys plus the editing keys of
    /// the Plain center section.
    Idle,
    /// A keyboard variant is shown. `section` is the highlighted cell, or
    /// `None` until the first draw after entry.
    Active {
        variant: Variant,
        section: Option<Section>,
    },
    /// The pad is driving the pointer; only the mouse badge is shown.
    Mouse,
}

impl UiState {
    /// Fresh `Active` state for `variant`, nothing highlighted yet.
    #[must_use]
    pub const fn active(variant: Variant) -> Self {
        Self::Active {
            variant,
            section: None,
        }
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Same mode, ignoring the highlighted section.
    fn same_mode(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Active { variant: a, .. }, Self::Active { variant: b, .. }) => a == b,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

/// What a state's logic asks for after handling a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Enter(UiState),
}

/// Console cycling direction requested by the volume keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStep {
    Next,
    Previous,
}

impl ConsoleStep {
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
        }
    }
}

/// A repaint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Clear, then show the small Idle badge.
    Idle,
    /// Clear, then show the mouse badge.
    Mouse,
    /// Highlight `current`. With no `previous` the whole keyboard is drawn
    /// first; otherwise only `previous` is restored.
    Keyboard {
        variant: Variant,
        previous: Option<Section>,
        current: Section,
    },
}

/// Side effects requested by the navigator.
///
/// Only [`Effects::paint`] can fail the state machine. Every other effect is
/// best-effort: implementations log and swallow their own failures.
pub trait Effects {
    fn paint(&mut self, scene: Scene) -> Result<(), BackendError>;
    fn send_key(&mut self, key: OutputKey);
    fn cycle_console(&mut self, step: ConsoleStep);
    fn take_screenshot(&mut self);
    fn power_off(&mut self);
}

/// Action buttons in the order their keys are typed.
const ACTION_FACES: [(Buttons, Face); 4] = [
    (Buttons::SQUARE, Face::Left),
    (Buttons::TRIANGLE, Face::Top),
    (Buttons::CIRCLE, Face::Right),
    (Buttons::CROSS, Face::Bottom),
];

/// D-pad buttons typed as cursor keys while idle, in order.
const CURSOR_KEYS: [(Buttons, OutputKey); 4] = [
    (Buttons::UP, OutputKey::Up),
    (Buttons::RIGHT, OutputKey::Right),
    (Buttons::DOWN, OutputKey::Down),
    (Buttons::LEFT, OutputKey::Left),
];

/// Section candidates, first match wins. Diagonals come first so that a held
/// Up+Left lands on a corner rather than an edge.
const SECTION_PRIORITY: [(Section, Buttons, AnalogDirection); 8] = [
    (
        Section::TopLeft,
        Buttons::UP.union(Buttons::LEFT),
        AnalogDirection::NorthWest,
    ),
    (
        Section::TopRight,
        Buttons::UP.union(Buttons::RIGHT),
        AnalogDirection::NorthEast,
    ),
    (
        Section::BottomLeft,
        Buttons::DOWN.union(Buttons::LEFT),
        AnalogDirection::SouthWest,
    ),
    (
        Section::BottomRight,
        Buttons::DOWN.union(Buttons::RIGHT),
        AnalogDirection::SouthEast,
    ),
    (Section::Top, Buttons::UP, AnalogDirection::North),
    (Section::Bottom, Buttons::DOWN, AnalogDirection::South),
    (Section::Left, Buttons::LEFT, AnalogDirection::West),
    (Section::Right, Buttons::RIGHT, AnalogDirection::East),
];

/// Pick the section selected by `sample`.
///
/// Returns the section and the D-pad buttons it consumed. A match clears its
/// D-pad buttons whichever source (pad or stick) triggered it; the Center
/// fallback consumes nothing.
#[must_use]
pub fn resolve_section(input: InputMode, sample: InputSample) -> (Section, Buttons) {
    let dpad = input.contains(InputMode::DPAD);
    let analog = input.contains(InputMode::ANALOG);
    let direction = classify(&sample);
    SECTION_PRIORITY
        .iter()
        .find(|(_, buttons, dir)| {
            (dpad && sample.contains(*buttons)) || (analog && direction == *dir)
        })
        .map_or((Section::Center, Buttons::empty()), |(section, buttons, _)| {
            (*section, *buttons)
        })
}

/// Mode requested by the mouse and trigger buttons, if any.
///
/// Mouse mode beats the triggers; both triggers beat either one.
#[must_use]
pub fn requested_mode(sample: InputSample) -> Option<UiState> {
    if sample.contains(Buttons::MOUSE_MODE) {
        Some(UiState::Mouse)
    } else if sample.contains(Buttons::TRIGGERS) {
        Some(UiState::active(Variant::Shifted))
    } else if sample.contains(Buttons::R_TRIGGER) {
        Some(UiState::active(Variant::Plain))
    } else if sample.contains(Buttons::L_TRIGGER) {
        Some(UiState::active(Variant::Numeric))
    } else {
        None
    }
}

/// The navigation state machine.
#[derive(Debug, Clone)]
pub struct Navigator {
    config: Config,
    state: UiState,
}

impl Navigator {
    /// Create a navigator. Call [`Navigator::start`] before stepping.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: UiState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> UiState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Enter `Idle` as if an empty sample had arrived.
    pub fn start(&mut self, fx: &mut impl Effects) {
        debug!("navigator starting");
        self.enter_chain(UiState::Idle, InputSample::EMPTY, fx);
    }

    /// Advance by one sample.
    pub fn step(&mut self, sample: InputSample, fx: &mut impl Effects) {
        if self.is_terminated() {
            return;
        }

        let residual = Self::handle_global(sample, fx);
        let transition = match self.state {
            UiState::Failed => Transition::Stay,
            UiState::Idle => Self::idle_logic(residual, fx),
            UiState::Active { variant, .. } => self.active_logic(variant, residual, fx),
            UiState::Mouse => Self::mouse_logic(residual),
        };

        if let Transition::Enter(next) = transition
            && !next.same_mode(&self.state)
        {
            self.exit();
            self.enter_chain(next, residual, fx);
        }
    }

    // ── Global hotkeys ──────────────────────────────────────────────────

    fn handle_global(sample: InputSample, fx: &mut impl Effects) -> InputSample {
        let mut sample = sample;
        if sample.contains(Buttons::VOLUME_UP) {
            sample = sample.without(Buttons::VOLUME_UP);
            fx.cycle_console(ConsoleStep::Next);
        }
        if sample.contains(Buttons::VOLUME_DOWN) {
            sample = sample.without(Buttons::VOLUME_DOWN);
            fx.cycle_console(ConsoleStep::Previous);
        }
        if sample.contains(Buttons::SCREEN) {
            sample = sample.without(Buttons::SCREEN);
            fx.take_screenshot();
        }
        if sample.contains(Buttons::POWER_OFF_COMBO) {
            sample = sample.without(Buttons::POWER_OFF_COMBO);
            fx.power_off();
        }
        sample
    }

    // ── Per-state logic ─────────────────────────────────────────────────

    fn idle_logic(sample: InputSample, fx: &mut impl Effects) -> Transition {
        if let Some(mode) = requested_mode(sample) {
            return Transition::Enter(mode);
        }

        let mut sample = sample;
        for (button, key) in CURSOR_KEYS {
            if sample.contains(button) {
                sample = sample.without(button);
                fx.send_key(key);
            }
        }
        type_actions(Variant::Plain.layout(), Section::Center, sample, fx);
        Transition::Stay
    }

    fn active_logic(
        &mut self,
        variant: Variant,
        sample: InputSample,
        fx: &mut impl Effects,
    ) -> Transition {
        match requested_mode(sample) {
            Some(UiState::Active { variant: wanted, .. }) if wanted == variant => {}
            Some(mode) => return Transition::Enter(mode),
            None => {}
        }

        let (section, handled) = resolve_section(self.config.input, sample);
        let previous = match self.state {
            UiState::Active { section, .. } => section,
            _ => None,
        };

        if previous != Some(section) {
            self.state = UiState::Active {
                variant,
                section: Some(section),
            };
            let scene = Scene::Keyboard {
                variant,
                previous,
                current: section,
            };
            if let Err(err) = fx.paint(scene) {
                error!(error = %err, ?scene, "keyboard draw failed");
                return Transition::Enter(UiState::Failed);
            }
        }

        type_actions(variant.layout(), section, sample.without(handled), fx);
        Transition::Stay
    }

    fn mouse_logic(sample: InputSample) -> Transition {
        if sample.contains(Buttons::MOUSE_MODE) {
            Transition::Stay
        } else {
            Transition::Enter(UiState::Idle)
        }
    }

    // ── State changes ───────────────────────────────────────────────────

    /// Leave the current state. States hold no resources; the hook only
    /// records the departure.
    fn exit(&self) {
        trace!(state = ?self.state, "state exit");
    }

    fn enter_chain(&mut self, target: UiState, sample: InputSample, fx: &mut impl Effects) {
        let mut target = target;
        loop {
            debug!(from = ?self.state, to = ?target, "state change");
            self.state = target;
            match self.enter(sample, fx) {
                Transition::Enter(next) if !next.same_mode(&self.state) => {
                    self.exit();
                    target = next;
                }
                _ => break,
            }
        }
    }

    fn enter(&mut self, sample: InputSample, fx: &mut impl Effects) -> Transition {
        match self.state {
            UiState::Failed => {
                error!("terminated after encountering an error");
                Transition::Stay
            }
            UiState::Idle => {
                let transition = Self::idle_logic(sample, fx);
                if transition != Transition::Stay {
                    return transition;
                }
                paint_or_fail(fx, Scene::Idle)
            }
            UiState::Active { variant, .. } => {
                self.state = UiState::active(variant);
                Transition::Stay
            }
            UiState::Mouse => paint_or_fail(fx, Scene::Mouse),
        }
    }
}

fn paint_or_fail(fx: &mut impl Effects, scene: Scene) -> Transition {
    match fx.paint(scene) {
        Ok(()) => Transition::Stay,
        Err(err) => {
            error!(error = %err, ?scene, "draw failed");
            Transition::Enter(UiState::Failed)
        }
    }
}

/// Type the keys of `section` for every held action button.
fn type_actions(layout: &Layout, section: Section, sample: InputSample, fx: &mut impl Effects) {
    for (button, face) in ACTION_FACES {
        if sample.contains(button) {
            fx.send_key(layout.key(section, face));
        }
    }
}
