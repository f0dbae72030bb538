#![forbid(unsafe_code)]

//! Runtime for the on-screen keyboard.
//!
//! - [`navigator`]: the navigation state machine.
//! - [`painter`]: how scenes turn into clears and blits.
//! - [`host`]: the effect executor over the output devices.
//! - [`controller`]: initialization and the blocking main loop.

pub mod controller;
pub mod host;
pub mod navigator;
pub mod painter;

pub use controller::{Controller, InitError, RunError};
pub use host::Host;
pub use navigator::{ConsoleStep, Effects, Navigator, Scene, Transition, UiState};
pub use painter::Painter;
