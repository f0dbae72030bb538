#![forbid(unsafe_code)]

//! Effect executor over the device collaborators.

use osk_backend::{BackendResult, Canvas, Console, System};
use osk_core::{ImageSet, OutputKey};
use tracing::{debug, info, warn};

use crate::navigator::{ConsoleStep, Effects, Scene};
use crate::painter::Painter;

/// Owns the output-side collaborators and the console bookkeeping.
pub struct Host<C, K, S> {
    canvas: C,
    console: K,
    system: S,
    images: ImageSet,
    consoles: usize,
    console_index: usize,
}

impl<C: Canvas, K: Console, S: System> Host<C, K, S> {
    /// `consoles` is clamped to at least one.
    pub fn new(canvas: C, console: K, system: S, images: ImageSet, consoles: usize) -> Self {
        Self {
            canvas,
            console,
            system,
            images,
            consoles: consoles.max(1),
            console_index: 0,
        }
    }

    /// Index of the console believed to be showing.
    #[must_use]
    pub const fn console_index(&self) -> usize {
        self.console_index
    }

    #[must_use]
    pub const fn consoles(&self) -> usize {
        self.consoles
    }

    /// Ask the console which index is showing; fall back to 0.
    pub fn sync_console_index(&mut self) {
        self.console_index = match self.console.active() {
            Ok(index) => index,
            Err(err) => {
                warn!(error = %err, "could not query active console, assuming 0");
                0
            }
        };
        debug!(index = self.console_index, "active console");
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn console(&self) -> &K {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut K {
        &mut self.console
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut S {
        &mut self.system
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    fn screenshot(&mut self) -> BackendResult<std::path::PathBuf> {
        let frame = self.canvas.capture_frame()?;
        self.system.save_screenshot(&frame)
    }
}

/// Wrap `index + delta` into `[0, count)`.
#[must_use]
pub fn wrap_console(index: usize, delta: isize, count: usize) -> usize {
    let count = count.max(1) as isize;
    (index as isize + delta).rem_euclid(count) as usize
}

impl<C: Canvas, K: Console, S: System> Effects for Host<C, K, S> {
    fn paint(&mut self, scene: Scene) -> BackendResult<()> {
        Painter::new(&mut self.canvas, &mut self.console, &self.images).paint(scene)
    }

    fn send_key(&mut self, key: OutputKey) {
        if let Err(err) = self.console.send_key(key) {
            warn!(?key, error = %err, "failed to send key");
        }
    }

    fn cycle_console(&mut self, step: ConsoleStep) {
        let requested = wrap_console(self.console_index, step.delta(), self.consoles);
        match self.console.switch_to(requested) {
            Ok(actual) => {
                debug!(requested, actual, "switched console");
                self.console_index = actual;
            }
            Err(err) => {
                warn!(requested, error = %err, "console switch rejected");
            }
        }
    }

    fn take_screenshot(&mut self) {
        match self.screenshot() {
            Ok(path) => info!(path = %path.display(), "saved screenshot"),
            Err(err) => warn!(error = %err, "failed to take screenshot"),
        }
    }

    fn power_off(&mut self) {
        info!("power-off requested");
        if let Err(err) = self.system.power_off() {
            warn!(error = %err, "failed to start power-off");
        }
    }
}
