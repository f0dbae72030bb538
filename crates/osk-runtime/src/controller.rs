#![forbid(unsafe_code)]

//! The sample → navigate → effect loop.
//!
//! # Lifecycle
//!
//! 1. [`Controller::new`]: wire the collaborators.
//! 2. [`Controller::initialize`]: acquire every device. Nothing is drawn
//!    unless all of them come up.
//! 3. [`Controller::run`]: enter `Idle`, then sample and step until the
//!    navigator reaches `Failed`.
//!
//! Tests drive the same machinery one sample at a time with
//! [`Controller::step`].

use core::fmt;

use osk_backend::{BackendError, Canvas, Console, InputSource, System};
use osk_core::{Config, ImageSet, InputSample};
use tracing::{debug, info};

use crate::host::Host;
use crate::navigator::{Navigator, UiState};

/// Which collaborator failed to come up.
#[derive(Debug)]
pub enum InitError {
    Canvas(BackendError),
    Input(BackendError),
    Console(BackendError),
}

impl InitError {
    /// Short name of the failed collaborator.
    #[must_use]
    pub const fn collaborator(&self) -> &'static str {
        match self {
            Self::Canvas(_) => "canvas",
            Self::Input(_) => "input",
            Self::Console(_) => "console",
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Self::Canvas(err) | Self::Input(err) | Self::Console(err)) = self;
        write!(f, "failed to initialize {}: {err}", self.collaborator())
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let (Self::Canvas(err) | Self::Input(err) | Self::Console(err)) = self;
        Some(err)
    }
}

/// Misuse of the controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// `start`, `step` or `run` was called before `initialize` succeeded.
    NotInitialized,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => f.write_str("controller used before initialize()"),
        }
    }
}

impl std::error::Error for RunError {}

/// Owns the collaborators and the navigator.
pub struct Controller<I, C, K, S> {
    input: I,
    host: Host<C, K, S>,
    navigator: Navigator,
    initialized: bool,
    started: bool,
}

impl<I, C, K, S> Controller<I, C, K, S>
where
    I: InputSource,
    C: Canvas,
    K: Console,
    S: System,
{
    #[must_use]
    pub fn new(
        config: Config,
        images: ImageSet,
        input: I,
        canvas: C,
        console: K,
        system: S,
    ) -> Self {
        let consoles = usize::from(config.consoles());
        Self {
            input,
            host: Host::new(canvas, console, system, images, consoles),
            navigator: Navigator::new(config),
            initialized: false,
            started: false,
        }
    }

    /// Acquire canvas, input and console, in that order, then learn which
    /// console is showing. Calling it again after success is a no-op.
    pub fn initialize(&mut self) -> Result<(), InitError> {
        if self.initialized {
            debug!("controller already initialized");
            return Ok(());
        }
        self.host.canvas_mut().initialize().map_err(InitError::Canvas)?;
        self.input.initialize().map_err(InitError::Input)?;
        self.host
            .console_mut()
            .initialize()
            .map_err(InitError::Console)?;
        self.host.sync_console_index();

        let (width, height) = self.host.canvas().size();
        info!(
            width,
            height,
            consoles = self.host.consoles(),
            console = self.host.console_index(),
            "devices ready"
        );
        self.initialized = true;
        Ok(())
    }

    /// Enter `Idle`. Runs at most once; later calls do nothing.
    pub fn start(&mut self) -> Result<(), RunError> {
        if !self.initialized {
            return Err(RunError::NotInitialized);
        }
        if !self.started {
            self.started = true;
            self.navigator.start(&mut self.host);
        }
        Ok(())
    }

    /// Feed one sample, starting first if needed.
    pub fn step(&mut self, sample: InputSample) -> Result<UiState, RunError> {
        self.start()?;
        self.navigator.step(sample, &mut self.host);
        Ok(self.navigator.state())
    }

    /// Read one sample from the input device and step on it.
    pub fn tick(&mut self) -> Result<UiState, RunError> {
        self.start()?;
        let sample = self.input.sample();
        self.step(sample)
    }

    /// Loop until the navigator reaches `Failed`.
    pub fn run(&mut self) -> Result<(), RunError> {
        self.start()?;
        info!("on-screen keyboard running");
        while !self.navigator.is_terminated() {
            self.tick()?;
        }
        info!("on-screen keyboard stopped");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> UiState {
        self.navigator.state()
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.navigator.is_terminated()
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn console_index(&self) -> usize {
        self.host.console_index()
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn canvas(&self) -> &C {
        self.host.canvas()
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        self.host.canvas_mut()
    }

    pub fn console(&self) -> &K {
        self.host.console()
    }

    pub fn console_mut(&mut self) -> &mut K {
        self.host.console_mut()
    }

    pub fn system(&self) -> &S {
        self.host.system()
    }

    pub fn system_mut(&mut self) -> &mut S {
        self.host.system_mut()
    }
}
